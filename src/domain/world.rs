//! The static per-level grid definition and its pure queries.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A zero-indexed cell position. `col` grows rightward, `row` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The cell one step ahead of `self` when facing `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self::new(self.col + dc, self.row + dr)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Cardinal facing of the actor. Runs always begin facing [`Right`](Self::Right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Movement delta as `(col, row)`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The immutable per-level world: a square grid with obstacles, a start
/// cell, an optional goal cell, and an optional time budget.
///
/// Constructed once when a level begins and discarded when the player
/// leaves or restarts; the interpreter never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Side length of the square grid.
    pub size: i32,
    #[serde(default)]
    pub obstacles: HashSet<Coord>,
    pub start: Coord,
    #[serde(default)]
    pub goal: Option<Coord>,
    /// Time budget in seconds. `None` means the level is untimed.
    #[serde(default)]
    pub time_limit: Option<u64>,
}

impl World {
    pub fn new(size: i32, start: Coord) -> Self {
        Self {
            size,
            obstacles: HashSet::new(),
            start,
            goal: None,
            time_limit: None,
        }
    }

    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Coord>) -> Self {
        self.obstacles = obstacles.into_iter().collect();
        self
    }

    pub fn with_goal(mut self, goal: Coord) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_time_limit(mut self, secs: u64) -> Self {
        self.time_limit = Some(secs);
        self
    }

    /// Whether `coord` lies inside the grid.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        (0..self.size).contains(&coord.col) && (0..self.size).contains(&coord.row)
    }

    /// Whether `coord` is impassable: outside the grid or on an obstacle.
    pub fn is_blocked(&self, coord: Coord) -> bool {
        !self.in_bounds(coord) || self.obstacles.contains(&coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_per_direction() {
        let origin = Coord::new(2, 2);
        assert_eq!(origin.step(Direction::Up), Coord::new(2, 1));
        assert_eq!(origin.step(Direction::Down), Coord::new(2, 3));
        assert_eq!(origin.step(Direction::Left), Coord::new(1, 2));
        assert_eq!(origin.step(Direction::Right), Coord::new(3, 2));
    }

    #[test]
    fn test_bounds_blocking() {
        let world = World::new(3, Coord::new(0, 0));
        assert!(!world.is_blocked(Coord::new(0, 0)));
        assert!(!world.is_blocked(Coord::new(2, 2)));
        assert!(world.is_blocked(Coord::new(-1, 0)));
        assert!(world.is_blocked(Coord::new(0, -1)));
        assert!(world.is_blocked(Coord::new(3, 0)));
        assert!(world.is_blocked(Coord::new(0, 3)));
    }

    #[test]
    fn test_obstacle_blocking() {
        let world = World::new(3, Coord::new(0, 0)).with_obstacles([Coord::new(1, 1)]);
        assert!(world.is_blocked(Coord::new(1, 1)));
        assert!(!world.is_blocked(Coord::new(1, 0)));
    }

    #[test]
    fn test_world_serde_round_trip() {
        let world = World::new(4, Coord::new(0, 3))
            .with_goal(Coord::new(3, 0))
            .with_obstacles([Coord::new(2, 2)])
            .with_time_limit(30);
        let json = serde_json::to_string(&world).unwrap();
        let back: World = serde_json::from_str(&json).unwrap();
        assert_eq!(back.size, 4);
        assert_eq!(back.start, Coord::new(0, 3));
        assert_eq!(back.goal, Some(Coord::new(3, 0)));
        assert!(back.obstacles.contains(&Coord::new(2, 2)));
        assert_eq!(back.time_limit, Some(30));
    }
}
