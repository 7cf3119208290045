//! The recursive structure executor.
//!
//! Executes one structure at a time against the actor, recursing into loop
//! and branch bodies. Interrupts (collision, timeout, cancellation)
//! propagate immediately through every recursion level; no further actor
//! mutation or event emission happens once one is raised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::core::actor::ActorState;
use crate::core::cancel::CancelSignal;
use crate::core::event_bus::{EventEmitter, RunEvent};
use crate::domain::instruction::Instruction;
use crate::domain::world::World;
use crate::engine::structure::structure_len;

/// Why execution stopped before the program ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    Collision,
    Timeout,
    Cancelled,
}

pub(crate) type StepResult = Result<(), Interrupt>;

/// Executes structures against one actor for the duration of a run.
pub(crate) struct Executor<'a> {
    world: &'a World,
    actor: &'a mut ActorState,
    emitter: &'a EventEmitter,
    cancel: &'a CancelSignal,
    timed_out: &'a AtomicBool,
    step_delay: Duration,
    paint_delay: Duration,
}

impl<'a> Executor<'a> {
    pub(crate) fn new(
        world: &'a World,
        actor: &'a mut ActorState,
        emitter: &'a EventEmitter,
        cancel: &'a CancelSignal,
        timed_out: &'a AtomicBool,
        step_delay: Duration,
        paint_delay: Duration,
    ) -> Self {
        Self {
            world,
            actor,
            emitter,
            cancel,
            timed_out,
            step_delay,
            paint_delay,
        }
    }

    /// Cooperative checkpoint, observed at every recursive dispatch and
    /// hence before every atomic action. Cancellation wins over timeout.
    fn checkpoint(&self) -> StepResult {
        if self.cancel.is_triggered() {
            return Err(Interrupt::Cancelled);
        }
        if self.timed_out.load(Ordering::Relaxed) {
            return Err(Interrupt::Timeout);
        }
        Ok(())
    }

    /// Execute the single structure starting at `index` to completion.
    ///
    /// Boxed because the future recurses through loop and branch bodies.
    pub(crate) fn run_structure<'b>(
        &'b mut self,
        program: &'b [Instruction],
        index: usize,
    ) -> BoxFuture<'b, StepResult> {
        async move {
            self.checkpoint()?;
            let Some(&instruction) = program.get(index) else {
                // Empty body of a trailing control instruction.
                return Ok(());
            };
            match instruction {
                Instruction::Repeat2 => self.run_repeat(program, index, 2).await,
                Instruction::Repeat3 => self.run_repeat(program, index, 3).await,
                Instruction::IfObstacleAhead | Instruction::IfPathAhead => {
                    self.run_chain(program, index, instruction).await
                }
                // A dangling chain link reached by top-level dispatch still
                // executes its body.
                Instruction::ElseIf | Instruction::Else => {
                    self.run_structure(program, index + 1).await
                }
                atomic => self.run_atomic(atomic).await,
            }
        }
        .boxed()
    }

    /// Execute the loop body at `index + 1` exactly `count` times, each
    /// repetition a full recursive execution.
    async fn run_repeat(
        &mut self,
        program: &[Instruction],
        index: usize,
        count: usize,
    ) -> StepResult {
        for _ in 0..count {
            self.run_structure(program, index + 1).await?;
        }
        Ok(())
    }

    /// Resolve an if / else-if / else chain: evaluate conditions against
    /// the actor's current state and run at most one arm.
    async fn run_chain(
        &mut self,
        program: &[Instruction],
        index: usize,
        opener: Instruction,
    ) -> StepResult {
        let condition = match opener {
            Instruction::IfPathAhead => !self.obstacle_ahead(),
            _ => self.obstacle_ahead(),
        };
        if condition {
            self.emitter.emit(RunEvent::BranchSelected {
                chain_index: index,
                arm: Some(0),
            });
            return self.run_structure(program, index + 1).await;
        }

        // Walk the sibling chain, skipping each unselected arm's body.
        let mut cursor = index + 1 + structure_len(program, index + 1);
        let mut arm = 1;
        while let Some(&link) = program.get(cursor) {
            match link {
                Instruction::Else => {
                    self.emitter.emit(RunEvent::BranchSelected {
                        chain_index: index,
                        arm: Some(arm),
                    });
                    return self.run_structure(program, cursor + 1).await;
                }
                Instruction::ElseIf => {
                    // Re-evaluated against the actor's state at this point.
                    // An else-if always re-tests obstacle-ahead, even in a
                    // chain opened by IfPathAhead.
                    if self.obstacle_ahead() {
                        self.emitter.emit(RunEvent::BranchSelected {
                            chain_index: index,
                            arm: Some(arm),
                        });
                        return self.run_structure(program, cursor + 1).await;
                    }
                    cursor += 1 + structure_len(program, cursor + 1);
                    arm += 1;
                }
                _ => break,
            }
        }
        self.emitter.emit(RunEvent::BranchSelected {
            chain_index: index,
            arm: None,
        });
        Ok(())
    }

    fn obstacle_ahead(&self) -> bool {
        self.world
            .is_blocked(self.actor.coord.step(self.actor.direction))
    }

    /// Apply one atomic instruction to the actor.
    async fn run_atomic(&mut self, instruction: Instruction) -> StepResult {
        match instruction {
            Instruction::Paint => {
                self.actor.painted.insert(self.actor.coord);
                self.emitter.emit(RunEvent::CellPainted {
                    coord: self.actor.coord,
                });
                self.pace(self.paint_delay).await
            }
            motion => {
                let Some(direction) = motion.direction() else {
                    return Ok(());
                };
                let target = self.actor.coord.step(direction);
                if self.world.is_blocked(target) {
                    // The attempted facing still commits; the position
                    // does not.
                    self.actor.direction = direction;
                    self.emitter.emit(RunEvent::ActorTurned { direction });
                    return Err(Interrupt::Collision);
                }
                self.actor.coord = target;
                self.actor.direction = direction;
                self.emitter.emit(RunEvent::ActorMoved {
                    coord: target,
                    direction,
                });
                self.pace(self.step_delay).await
            }
        }
    }

    /// Cosmetic pacing between actions. Cancellation cuts the delay short;
    /// a pending timeout lets the delay finish and is observed at the next
    /// checkpoint.
    async fn pace(&self, delay: Duration) -> StepResult {
        if delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            _ = self.cancel.cancelled() => Err(Interrupt::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}
