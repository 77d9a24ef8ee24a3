//! Test helpers for the litepad engine
//!
//! Provides convenient functions for running scripts and building sample
//! projects in tests, wiring the engine through its public facade.

pub mod fixtures;
pub mod run;

pub use fixtures::sample_project;
pub use run::{engine_with_files, run_files, run_source};
