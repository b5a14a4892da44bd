//! ALU shift operations.
//!
//! Shift amounts are masked to 6 bits (0-63).

use crate::isa::Opcode;

/// Bit mask for the shift amount.
const SHAMT_MASK: u64 = 0x3f;

/// Executes a shift operation.
///
/// `b` supplies the shift amount; only its low six bits are used. Returns
/// `0` for non-shift opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    let sh = (b & SHAMT_MASK) as u32;
    match op {
        Opcode::Sll | Opcode::Slli => a.wrapping_shl(sh),
        Opcode::Srl | Opcode::Srli => a.wrapping_shr(sh),
        Opcode::Sra | Opcode::Srai => ((a as i64) >> sh) as u64,
        _ => 0,
    }
}
