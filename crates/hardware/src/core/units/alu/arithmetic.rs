//! ALU arithmetic operations.
//!
//! Implements 64-bit integer addition, subtraction, and the full
//! multiply/divide family. Division never traps: divide-by-zero and signed
//! overflow produce defined result values.

use crate::isa::Opcode;

/// Number of bits in a register (used for high-multiply shift).
const XLEN_BITS: u32 = 64;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 64-bit result. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    match op {
        Opcode::Add | Opcode::Addi => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Mulh => {
            // Both operands are signed: sign-extend through i64 to preserve
            // negative values. Direct u64 to i128 zero-extends.
            (((a as i64 as i128) * (b as i64 as i128)) >> XLEN_BITS) as u64
        }
        Opcode::Mulhsu => {
            // Operand a is signed, b is unsigned.
            (((a as i64 as i128) * (b as u128 as i128)) >> XLEN_BITS) as u64
        }
        Opcode::Mulhu => (((a as u128) * (b as u128)) >> XLEN_BITS) as u64,
        Opcode::Div => {
            if b == 0 {
                -1i64 as u64
            } else {
                (a as i64).wrapping_div(b as i64) as u64
            }
        }
        Opcode::Divu => a.checked_div(b).unwrap_or(u64::MAX),
        Opcode::Rem => {
            if b == 0 {
                a
            } else {
                (a as i64).wrapping_rem(b as i64) as u64
            }
        }
        Opcode::Remu => a.checked_rem(b).unwrap_or(a),
        _ => 0,
    }
}
