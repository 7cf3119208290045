use serde::{Deserialize, Serialize};

use super::world::Direction;

/// One atomic block in a user-authored program.
///
/// Instructions carry no parameters: repetition count and branch condition
/// are encoded entirely in the tag. Control instructions (`Repeat*`, `If*`,
/// `ElseIf`, `Else`) have no closing marker — the body they govern is
/// whatever structure immediately follows them in the sequence (see
/// [`structure_len`](crate::engine::structure::structure_len)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Paint,
    Repeat2,
    Repeat3,
    IfObstacleAhead,
    IfPathAhead,
    ElseIf,
    Else,
}

impl Instruction {
    /// Direction of travel for motion instructions, `None` otherwise.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Instruction::MoveUp => Some(Direction::Up),
            Instruction::MoveDown => Some(Direction::Down),
            Instruction::MoveLeft => Some(Direction::Left),
            Instruction::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }

    /// Whether this instruction continues an if-chain (`ElseIf` / `Else`).
    pub fn is_chain_link(self) -> bool {
        matches!(self, Instruction::ElseIf | Instruction::Else)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_directions() {
        assert_eq!(Instruction::MoveUp.direction(), Some(Direction::Up));
        assert_eq!(Instruction::MoveDown.direction(), Some(Direction::Down));
        assert_eq!(Instruction::MoveLeft.direction(), Some(Direction::Left));
        assert_eq!(Instruction::MoveRight.direction(), Some(Direction::Right));
        assert_eq!(Instruction::Paint.direction(), None);
        assert_eq!(Instruction::Repeat2.direction(), None);
    }

    #[test]
    fn test_chain_links() {
        assert!(Instruction::Else.is_chain_link());
        assert!(Instruction::ElseIf.is_chain_link());
        assert!(!Instruction::IfObstacleAhead.is_chain_link());
        assert!(!Instruction::MoveUp.is_chain_link());
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Instruction::IfObstacleAhead).unwrap();
        assert_eq!(json, "\"if_obstacle_ahead\"");
        let back: Instruction = serde_json::from_str("\"repeat2\"").unwrap();
        assert_eq!(back, Instruction::Repeat2);
    }
}
