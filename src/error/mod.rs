//! Error types for the interpreter API.
//!
//! Only pre-run problems are errors: failures *during* a run (collision,
//! timeout, cancellation) surface as [`RunOutcome`](crate::domain::RunOutcome)
//! values so the UI can always render a deterministic end state.

use thiserror::Error;

use crate::domain::world::Coord;

/// Errors raised before a run starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Program is empty")]
    EmptyProgram,
    #[error("Program is full ({max_len} instruction limit)")]
    ProgramFull { max_len: usize },
    #[error("Start cell {0} is outside the grid")]
    StartOutOfBounds(Coord),
    #[error("Goal cell {0} is outside the grid")]
    GoalOutOfBounds(Coord),
    #[error("Obstacle {0} is outside the grid")]
    ObstacleOutOfBounds(Coord),
}

/// Convenience alias for API-level results.
pub type RunResult<T> = Result<T, RunError>;
