use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

use super::value::Value;

pub type ScopeRef = Rc<RefCell<Scope>>;

/// One lexical scope. Scopes form a parent chain; functions capture the
/// scope they were created in, giving closures for free.
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn root() -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }))
    }

    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Introduce a binding in this scope, shadowing any outer binding.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Walk the chain for `name`.
    pub fn lookup(scope: &ScopeRef, name: &str) -> Option<Value> {
        let mut current = Rc::clone(scope);
        loop {
            if let Some(value) = current.borrow().bindings.get(name) {
                return Some(value.clone());
            }
            let parent = current.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    /// Assign to an existing binding somewhere in the chain. Returns false
    /// when no such binding exists.
    pub fn assign(scope: &ScopeRef, name: &str, value: Value) -> bool {
        let mut current = Rc::clone(scope);
        loop {
            if current.borrow().bindings.contains_key(name) {
                current.borrow_mut().bindings.insert(name.to_string(), value);
                return true;
            }
            let parent = current.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return false,
            }
        }
    }
}
