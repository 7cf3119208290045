//! Public API layer — stable entry points for the UI collaborator.
//!
//! All externally visible types are re-exported here.

mod runner;

pub use runner::{RunHandle, Runner, RunnerBuilder};
