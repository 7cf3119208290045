//! # Blockrun — a block-program interpreter for grid adventures
//!
//! `blockrun` executes user-authored sequences of instruction blocks
//! against a simulated grid world: the player sequences motion, paint,
//! counted-repetition, and conditional blocks to steer a character from a
//! start cell to a goal, avoiding obstacles and an optional countdown.
//! The surrounding game UI owns rendering, audio, and editing; this crate
//! owns the execution semantics:
//!
//! - **Positional structure**: control blocks (`Repeat*`, `If*`, `ElseIf`,
//!   `Else`) have no closing marker — their body is the structure that
//!   follows them, resolved by a structural-size pre-pass.
//! - **Step-by-step playback**: each committed action emits an event and
//!   yields for a configurable visual delay, so the UI animates in
//!   lockstep with execution.
//! - **Deterministic endings**: every run settles into exactly one of
//!   `Won`, `Lost` (collision, timeout, or goal missed), or `Aborted`;
//!   failures are outcome values, never errors.
//! - **Prompt cancellation**: a run-scoped signal is observed before every
//!   action and cuts pacing delays short; starting a new run cancels the
//!   one in flight.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use blockrun::{Coord, Instruction, Program, Runner, World};
//!
//! #[tokio::main]
//! async fn main() {
//!     let world = World::new(3, Coord::new(0, 0)).with_goal(Coord::new(2, 0));
//!     let program = Program::from_instructions([
//!         Instruction::MoveRight,
//!         Instruction::MoveRight,
//!     ]);
//!
//!     let runner = Runner::new();
//!     let mut handle = runner.run(&program, &world).unwrap();
//!     while let Some(event) = handle.next_event().await {
//!         println!("{event:?}");
//!     }
//!     println!("{:?}", handle.wait().await);
//! }
//! ```

pub mod api;
pub mod core;
pub mod domain;
pub mod engine;
pub mod error;

pub use crate::api::{RunHandle, Runner, RunnerBuilder};
pub use crate::core::{ActorState, CancelSignal, EventReceiver, RunEvent};
pub use crate::domain::{Coord, Direction, Instruction, LossReason, Program, RunOutcome, World};
pub use crate::engine::{structure_len, Command, RunConfig, RunStatus};
pub use crate::error::{RunError, RunResult};
