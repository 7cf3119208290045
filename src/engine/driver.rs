//! Top-level run driver.
//!
//! One driver task per run: it resets the actor, walks top-level
//! structures (advancing the program counter by structural size), runs
//! the countdown ticker for timed levels, listens for external commands,
//! and settles the terminal outcome exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::actor::ActorState;
use crate::core::cancel::CancelSignal;
use crate::core::event_bus::{EventEmitter, RunEvent};
use crate::domain::instruction::Instruction;
use crate::domain::outcome::{LossReason, RunOutcome};
use crate::domain::world::World;
use crate::engine::executor::{Executor, Interrupt};
use crate::engine::structure::structure_len;

/// Pacing configuration for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Visual delay after each committed move, in milliseconds.
    pub step_delay_ms: u64,
    /// Visual delay after each paint, in milliseconds.
    pub paint_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            step_delay_ms: 300,
            paint_delay_ms: 200,
        }
    }
}

/// Observable state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Finished(RunOutcome),
}

/// External command to control an in-flight run.
#[derive(Debug, Clone)]
pub enum Command {
    Cancel,
}

pub(crate) struct RunDriver {
    pub(crate) run_id: String,
    pub(crate) program: Vec<Instruction>,
    pub(crate) world: World,
    pub(crate) config: RunConfig,
    pub(crate) emitter: EventEmitter,
    pub(crate) cancel: CancelSignal,
    pub(crate) status_tx: watch::Sender<RunStatus>,
}

impl RunDriver {
    /// Drive one run to its terminal outcome.
    pub(crate) async fn run(self, mut command_rx: mpsc::Receiver<Command>) -> RunOutcome {
        let run_id = self.run_id.clone();
        debug!(run_id = %run_id, instructions = self.program.len(), "run started");
        self.emitter.emit(RunEvent::RunStarted {
            run_id: run_id.clone(),
            timestamp: Utc::now(),
        });

        let cancel = self.cancel.clone();
        let command_task = tokio::spawn(async move {
            while let Some(command) = command_rx.recv().await {
                match command {
                    Command::Cancel => cancel.trigger(),
                }
            }
        });

        // The timeout clock ticks once per second, independent of the
        // instruction cadence; the flag it sets is observed cooperatively
        // between actions, never preemptively.
        let timed_out = Arc::new(AtomicBool::new(false));
        let ticker = self
            .world
            .time_limit
            .map(|limit| spawn_ticker(limit, Arc::clone(&timed_out), self.emitter.clone()));

        let mut actor = ActorState::at_start(&self.world);
        let mut interrupt = None;
        {
            let mut executor = Executor::new(
                &self.world,
                &mut actor,
                &self.emitter,
                &self.cancel,
                &timed_out,
                Duration::from_millis(self.config.step_delay_ms),
                Duration::from_millis(self.config.paint_delay_ms),
            );
            let mut pc = 0;
            while pc < self.program.len() {
                if let Err(stop) = executor.run_structure(&self.program, pc).await {
                    interrupt = Some(stop);
                    break;
                }
                pc += structure_len(&self.program, pc);
            }
        }

        let outcome = match interrupt {
            Some(Interrupt::Collision) => {
                warn!(run_id = %run_id, coord = %actor.coord, "collision, run lost");
                RunOutcome::Lost(LossReason::Collision)
            }
            Some(Interrupt::Timeout) => RunOutcome::Lost(LossReason::Timeout),
            Some(Interrupt::Cancelled) => RunOutcome::Aborted,
            None => {
                // A cancel that lands after the final instruction still
                // aborts: the win condition is only evaluated for
                // uncancelled runs.
                if self.cancel.is_triggered() {
                    RunOutcome::Aborted
                } else if timed_out.load(Ordering::Relaxed) {
                    RunOutcome::Lost(LossReason::Timeout)
                } else {
                    match self.world.goal {
                        Some(goal) if actor.coord == goal => RunOutcome::Won,
                        Some(_) => RunOutcome::Lost(LossReason::GoalNotReached),
                        None => RunOutcome::Won,
                    }
                }
            }
        };

        if let Some(ticker) = ticker {
            ticker.abort();
        }
        command_task.abort();

        debug!(run_id = %run_id, ?outcome, "run finished");
        self.emitter.emit(RunEvent::RunFinished {
            run_id,
            outcome,
            timestamp: Utc::now(),
        });
        let _ = self.status_tx.send(RunStatus::Finished(outcome));
        outcome
    }
}

fn spawn_ticker(limit: u64, timed_out: Arc<AtomicBool>, emitter: EventEmitter) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut remaining = limit;
        let mut tick = tokio::time::interval(Duration::from_secs(1));
        // Consume the immediate first tick so the countdown starts one
        // full second into the run.
        tick.tick().await;
        loop {
            tick.tick().await;
            remaining = remaining.saturating_sub(1);
            emitter.emit(RunEvent::TimeTick {
                remaining_secs: remaining,
            });
            if remaining == 0 {
                timed_out.store(true, Ordering::Relaxed);
                break;
            }
        }
    })
}
