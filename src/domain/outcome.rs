use serde::{Deserialize, Serialize};

/// Terminal classification of a run.
///
/// Every run settles into exactly one of these; failures during execution
/// are outcome values, never errors propagated to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The actor ended on the goal cell, or the program ran to completion
    /// in a world that defines no goal.
    Won,
    Lost(LossReason),
    /// The run was cancelled before reaching a terminal state; neither a
    /// win nor a loss.
    Aborted,
}

/// Why a run was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    /// The actor tried to enter a blocked or out-of-bounds cell.
    Collision,
    /// The level's time budget ran out mid-run.
    Timeout,
    /// The program completed but the actor was not on the goal.
    GoalNotReached,
}
