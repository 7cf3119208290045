//! Domain layer — pure leaf data, no runtime behavior.
//!
//! Submodules:
//! - [`instruction`] — The closed instruction set.
//! - [`program`] — Bounded, editor-owned instruction sequences.
//! - [`world`] — Per-level grid, obstacles, start/goal, time budget.
//! - [`outcome`] — Terminal run classification.

pub mod instruction;
pub mod outcome;
pub mod program;
pub mod world;

pub use instruction::Instruction;
pub use outcome::{LossReason, RunOutcome};
pub use program::Program;
pub use world::{Coord, Direction, World};
