//! ALU logical and comparison operations.
//!
//! Implements bitwise OR, AND, XOR and set-less-than (signed and unsigned).
//! Comparison results are always 0 or 1.

use crate::isa::Opcode;

/// Executes a logical or comparison operation.
///
/// Returns `0` for non-logic opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    match op {
        Opcode::Or | Opcode::Ori => a | b,
        Opcode::And | Opcode::Andi => a & b,
        Opcode::Xor | Opcode::Xori => a ^ b,
        Opcode::Slt | Opcode::Slti => ((a as i64) < (b as i64)) as u64,
        Opcode::Sltu | Opcode::Sltiu => (a < b) as u64,
        _ => 0,
    }
}
