//! High-level run entry point.
//!
//! [`Runner`] is the interpreter session owned by the gameplay screen: it
//! validates level data, launches runs, and guarantees at most one run is
//! in flight (starting a new run cancels the previous one). A launched
//! run is observed through its [`RunHandle`].

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::core::cancel::CancelSignal;
use crate::core::event_bus::{create_event_channel, EventReceiver, RunEvent};
use crate::domain::outcome::RunOutcome;
use crate::domain::program::Program;
use crate::domain::world::World;
use crate::engine::driver::{Command, RunConfig, RunDriver, RunStatus};
use crate::error::RunError;

/// Handle to a running or completed run.
///
/// Allows polling [`status()`](Self::status), blocking on completion via
/// [`wait()`](Self::wait), consuming the incremental event stream, and
/// requesting cancellation.
pub struct RunHandle {
    status_rx: watch::Receiver<RunStatus>,
    events: Option<EventReceiver>,
    command_tx: mpsc::Sender<Command>,
}

impl RunHandle {
    /// Return the current run status (non-blocking).
    pub fn status(&self) -> RunStatus {
        self.status_rx.borrow().clone()
    }

    /// Block until the run reaches its terminal outcome.
    pub async fn wait(&self) -> RunOutcome {
        let mut rx = self.status_rx.clone();
        loop {
            let status = rx.borrow().clone();
            match status {
                RunStatus::Running => {
                    if rx.changed().await.is_err() {
                        // The driver went away without publishing a
                        // terminal status.
                        return RunOutcome::Aborted;
                    }
                }
                RunStatus::Finished(outcome) => return outcome,
            }
        }
    }

    /// Receive the next run event, or `None` once the stream has ended
    /// (after `RunFinished`) or the receiver was taken.
    pub async fn next_event(&mut self) -> Option<RunEvent> {
        self.events.as_mut()?.recv().await
    }

    /// Take the event receiver for external consumption. Returns `None`
    /// if it was already taken.
    pub fn take_event_receiver(&mut self) -> Option<EventReceiver> {
        self.events.take()
    }

    /// Request cancellation of this run. Idempotent; a no-op once the run
    /// has finished.
    pub async fn cancel(&self) {
        let _ = self.command_tx.send(Command::Cancel).await;
    }
}

/// The interpreter session.
///
/// One `Runner` lives per gameplay screen. Programs and worlds are
/// supplied per run; the session only owns pacing configuration and the
/// active run's cancellation signal.
pub struct Runner {
    config: RunConfig,
    active: Mutex<Option<CancelSignal>>,
}

impl Runner {
    /// A runner with default pacing.
    pub fn new() -> Self {
        Self::with_config(RunConfig::default())
    }

    pub fn with_config(config: RunConfig) -> Self {
        Self {
            config,
            active: Mutex::new(None),
        }
    }

    /// Create a new builder for configuring a runner.
    pub fn builder() -> RunnerBuilder {
        RunnerBuilder {
            config: RunConfig::default(),
        }
    }

    /// Validate level data and launch a run on the current tokio runtime.
    ///
    /// Any run still in flight is cancelled first, so at most one run is
    /// ever active per session.
    pub fn run(&self, program: &Program, world: &World) -> Result<RunHandle, RunError> {
        validate(program, world)?;

        let cancel = CancelSignal::new();
        if let Some(previous) = self.active.lock().replace(cancel.clone()) {
            previous.trigger();
        }

        let (emitter, events) = create_event_channel();
        let (status_tx, status_rx) = watch::channel(RunStatus::Running);
        let (command_tx, command_rx) = mpsc::channel(8);

        let driver = RunDriver {
            run_id: Uuid::new_v4().to_string(),
            program: program.instructions().to_vec(),
            world: world.clone(),
            config: self.config.clone(),
            emitter,
            cancel,
            status_tx,
        };
        tokio::spawn(driver.run(command_rx));

        Ok(RunHandle {
            status_rx,
            events: Some(events),
            command_tx,
        })
    }

    /// Cancel the active run, if any. Idempotent when no run is active.
    pub fn cancel(&self) {
        if let Some(active) = self.active.lock().as_ref() {
            active.trigger();
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`Runner`].
pub struct RunnerBuilder {
    config: RunConfig,
}

impl RunnerBuilder {
    /// Set the visual delay after each committed move.
    pub fn step_delay_ms(mut self, ms: u64) -> Self {
        self.config.step_delay_ms = ms;
        self
    }

    /// Set the visual delay after each paint.
    pub fn paint_delay_ms(mut self, ms: u64) -> Self {
        self.config.paint_delay_ms = ms;
        self
    }

    /// Replace the whole pacing configuration.
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Runner {
        Runner::with_config(self.config)
    }
}

fn validate(program: &Program, world: &World) -> Result<(), RunError> {
    if program.is_empty() {
        return Err(RunError::EmptyProgram);
    }
    if !world.in_bounds(world.start) {
        return Err(RunError::StartOutOfBounds(world.start));
    }
    if let Some(goal) = world.goal {
        if !world.in_bounds(goal) {
            return Err(RunError::GoalOutOfBounds(goal));
        }
    }
    if let Some(&obstacle) = world.obstacles.iter().find(|c| !world.in_bounds(**c)) {
        return Err(RunError::ObstacleOutOfBounds(obstacle));
    }
    Ok(())
}
