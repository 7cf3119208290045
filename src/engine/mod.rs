//! Engine layer — the execution kernel.
//!
//! - [`structure`] — Structural-size resolution for positionally nested
//!   programs.
//! - [`executor`] — The recursive structure executor (crate-internal).
//! - [`driver`] — The top-level run driver, countdown ticker, and run
//!   configuration.

pub mod driver;
pub(crate) mod executor;
pub mod structure;

pub use driver::{Command, RunConfig, RunStatus};
pub use structure::structure_len;
