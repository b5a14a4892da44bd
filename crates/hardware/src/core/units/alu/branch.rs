//! Branch condition evaluation.

use crate::isa::Opcode;

/// Evaluates the condition of a conditional branch.
///
/// Returns `false` for anything that is not a conditional branch.
pub fn taken(op: Opcode, a: u64, b: u64) -> bool {
    match op {
        Opcode::Beq => a == b,
        Opcode::Bne => a != b,
        Opcode::Blt => (a as i64) < (b as i64),
        Opcode::Bge => (a as i64) >= (b as i64),
        Opcode::Bltu => a < b,
        Opcode::Bgeu => a >= b,
        _ => false,
    }
}
