//! Structural-size resolution for positionally nested programs.
//!
//! Control instructions are not self-delimiting: a loop's or branch's body
//! is whatever structure immediately follows it in the sequence.
//! [`structure_len`] computes how many consecutive instructions make up
//! the complete structure starting at an index. The executor uses it both
//! to bound loop/branch bodies and to advance the top-level program
//! counter from one structure to the next, so raw index arithmetic never
//! leaks outside this module and the executor.

use crate::domain::instruction::Instruction;

/// Number of instructions in the complete structure starting at `index`.
///
/// Pure and total: returns 0 when `index` is out of bounds, so a control
/// instruction at the end of the program executes with an empty body
/// rather than erroring. Within bounds the result is always ≥ 1 and the
/// recursion strictly advances, so it terminates on any finite program.
pub fn structure_len(program: &[Instruction], index: usize) -> usize {
    let Some(&instruction) = program.get(index) else {
        return 0;
    };
    match instruction {
        Instruction::Repeat2 | Instruction::Repeat3 => 1 + structure_len(program, index + 1),
        Instruction::IfObstacleAhead | Instruction::IfPathAhead => {
            let mut len = 1 + structure_len(program, index + 1);
            // Greedily absorb the trailing else / else-if chain; absorption
            // stops at the first instruction that is neither.
            while let Some(&next) = program.get(index + len) {
                if !next.is_chain_link() {
                    break;
                }
                len += 1 + structure_len(program, index + len + 1);
            }
            len
        }
        // A dangling chain link outside any absorbing if-chain still owns
        // the structure after it.
        Instruction::ElseIf | Instruction::Else => 1 + structure_len(program, index + 1),
        _ => 1,
    }
}
