//! Run lifecycle: cancellation promptness, the cancel-vs-win race, and
//! the one-run-per-session guarantee.

use blockrun::{Coord, Instruction, Program, RunEvent, RunHandle, RunOutcome, Runner, World};
use Instruction::*;

fn paced_runner() -> Runner {
    Runner::builder().step_delay_ms(50).paint_delay_ms(50).build()
}

async fn drain_events(handle: &mut RunHandle) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Some(event) = handle.next_event().await {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_run_aborts() {
    let world = World::new(9, Coord::new(0, 0));
    let program =
        Program::from_instructions([MoveRight, MoveRight, MoveRight, MoveRight, MoveRight]);

    let runner = paced_runner();
    let mut handle = runner.run(&program, &world).unwrap();
    handle.cancel().await;

    assert_eq!(handle.wait().await, RunOutcome::Aborted);

    let events = drain_events(&mut handle).await;
    let moves = events
        .iter()
        .filter(|e| matches!(e, RunEvent::ActorMoved { .. }))
        .count();
    assert!(moves < 5, "cancellation must not let the run finish");
    assert!(matches!(
        events.last(),
        Some(RunEvent::RunFinished {
            outcome: RunOutcome::Aborted,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_reaching_goal_still_aborts() {
    // The actor lands on the goal, but the cancel arrives before the win
    // condition is evaluated; the abort wins the race.
    let world = World::new(3, Coord::new(0, 0)).with_goal(Coord::new(1, 0));
    let program = Program::from_instructions([MoveRight]);

    let runner = paced_runner();
    let handle = runner.run(&program, &world).unwrap();
    handle.cancel().await;

    assert_eq!(handle.wait().await, RunOutcome::Aborted);
}

#[tokio::test(start_paused = true)]
async fn test_session_cancel_aborts_active_run() {
    let world = World::new(9, Coord::new(0, 0));
    let program = Program::from_instructions([MoveRight, MoveRight, MoveRight]);

    let runner = paced_runner();
    let handle = runner.run(&program, &world).unwrap();
    runner.cancel();

    assert_eq!(handle.wait().await, RunOutcome::Aborted);
}

#[tokio::test(start_paused = true)]
async fn test_new_run_supersedes_the_active_one() {
    let world = World::new(9, Coord::new(0, 0)).with_goal(Coord::new(2, 0));
    let program = Program::from_instructions([MoveRight, MoveRight]);

    let runner = paced_runner();
    let first = runner.run(&program, &world).unwrap();
    let second = runner.run(&program, &world).unwrap();

    assert_eq!(first.wait().await, RunOutcome::Aborted);
    assert_eq!(second.wait().await, RunOutcome::Won);
}

#[tokio::test]
async fn test_handle_cancel_after_finish_is_a_noop() {
    let world = World::new(3, Coord::new(0, 0));
    let program = Program::from_instructions([Paint]);

    let runner = Runner::builder().step_delay_ms(0).paint_delay_ms(0).build();
    let handle = runner.run(&program, &world).unwrap();
    assert_eq!(handle.wait().await, RunOutcome::Won);

    // The driver is gone; cancelling must neither panic nor change the
    // recorded outcome.
    handle.cancel().await;
    assert_eq!(handle.wait().await, RunOutcome::Won);
}
