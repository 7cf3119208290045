use std::collections::HashSet;

use crate::domain::world::{Coord, Direction, World};

/// The simulated character's mutable state during one run.
///
/// Owned exclusively by the run task; reset to the world's start cell,
/// facing right, with nothing painted, at the beginning of every run.
#[derive(Debug, Clone)]
pub struct ActorState {
    pub coord: Coord,
    pub direction: Direction,
    /// Cells painted so far. Set semantics: repainting a cell is a no-op.
    pub painted: HashSet<Coord>,
}

impl ActorState {
    pub fn at_start(world: &World) -> Self {
        Self {
            coord: world.start,
            direction: Direction::Right,
            painted: HashSet::new(),
        }
    }
}
