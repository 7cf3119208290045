use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::domain::outcome::RunOutcome;
use crate::domain::world::{Coord, Direction};

/// Run events, emitted incrementally so the UI can animate playback in
/// lockstep with execution.
#[derive(Clone, Debug, Serialize)]
pub enum RunEvent {
    /// A run entered the `Running` state.
    RunStarted {
        run_id: String,
        timestamp: DateTime<Utc>,
    },

    /// The actor committed a move to a new cell.
    ActorMoved { coord: Coord, direction: Direction },

    /// A blocked move updated the actor's facing without moving it.
    ActorTurned { direction: Direction },

    /// The actor painted its current cell.
    CellPainted { coord: Coord },

    /// An if-chain resolved. `arm` is the selected arm's position in the
    /// chain (0 = the opening `If*`), or `None` when no arm matched and
    /// control fell through.
    BranchSelected {
        chain_index: usize,
        arm: Option<usize>,
    },

    /// Countdown tick for timed levels.
    TimeTick { remaining_secs: u64 },

    /// The run reached its terminal outcome.
    RunFinished {
        run_id: String,
        outcome: RunOutcome,
        timestamp: DateTime<Utc>,
    },
}

/// Event receiver handed to the UI collaborator.
pub type EventReceiver = mpsc::UnboundedReceiver<RunEvent>;

/// Sender wrapper for run events, with an atomic active flag so that event
/// emission can be cheaply skipped once the listener is gone.
#[derive(Clone)]
pub struct EventEmitter {
    tx: mpsc::UnboundedSender<RunEvent>,
    active: Arc<AtomicBool>,
}

impl EventEmitter {
    pub(crate) fn new(tx: mpsc::UnboundedSender<RunEvent>, active: Arc<AtomicBool>) -> Self {
        Self { tx, active }
    }

    #[inline(always)]
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    pub(crate) fn emit(&self, event: RunEvent) {
        if self.is_active() && self.tx.send(event).is_err() {
            self.active.store(false, Ordering::Relaxed);
        }
    }
}

/// Create an event channel plus its emitter.
pub(crate) fn create_event_channel() -> (EventEmitter, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventEmitter::new(tx, Arc::new(AtomicBool::new(true))), rx)
}
