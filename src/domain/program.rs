use serde::{Deserialize, Serialize};

use super::instruction::Instruction;
use crate::error::RunError;

/// An ordered sequence of instructions authored through the block palette.
///
/// Bounded by a per-level maximum length. The editor mutates it between
/// runs; the interpreter consumes an immutable snapshot for the duration
/// of a run, so edits never race an execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
    max_len: usize,
}

impl Program {
    /// Palette limit used when a level does not specify its own.
    pub const DEFAULT_MAX_LEN: usize = 20;

    /// An empty program bounded to `max_len` instructions.
    pub fn new(max_len: usize) -> Self {
        Self {
            instructions: Vec::new(),
            max_len,
        }
    }

    /// Build a program from existing instructions, for level import and
    /// tests. The bound is widened to fit when the sequence is longer than
    /// [`DEFAULT_MAX_LEN`](Self::DEFAULT_MAX_LEN).
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        let instructions: Vec<Instruction> = instructions.into_iter().collect();
        let max_len = instructions.len().max(Self::DEFAULT_MAX_LEN);
        Self {
            instructions,
            max_len,
        }
    }

    /// Append an instruction, rejecting pushes past the palette bound.
    pub fn push(&mut self, instruction: Instruction) -> Result<(), RunError> {
        if self.instructions.len() >= self.max_len {
            return Err(RunError::ProgramFull {
                max_len: self.max_len,
            });
        }
        self.instructions.push(instruction);
        Ok(())
    }

    /// Remove the instruction at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Instruction> {
        (index < self.instructions.len()).then(|| self.instructions.remove(index))
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_respects_bound() {
        let mut program = Program::new(2);
        program.push(Instruction::MoveUp).unwrap();
        program.push(Instruction::MoveDown).unwrap();
        assert_eq!(
            program.push(Instruction::Paint),
            Err(RunError::ProgramFull { max_len: 2 })
        );
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut program =
            Program::from_instructions([Instruction::MoveUp, Instruction::Paint]);
        assert_eq!(program.remove(0), Some(Instruction::MoveUp));
        assert_eq!(program.remove(5), None);
        program.clear();
        assert!(program.is_empty());
    }

    #[test]
    fn test_import_widens_bound() {
        let long = vec![Instruction::MoveRight; Program::DEFAULT_MAX_LEN + 5];
        let program = Program::from_instructions(long);
        assert_eq!(program.len(), Program::DEFAULT_MAX_LEN + 5);
        assert_eq!(program.max_len(), Program::DEFAULT_MAX_LEN + 5);
    }
}
