//! Operation set understood by the scheduling core.
//!
//! Only the properties the scheduler needs are defined here: which execution
//! unit class runs the operation and whether it is a load, store, branch or
//! jump. Operand semantics live with the execution units.

use serde::{Deserialize, Serialize};

use crate::core::units::UnitClass;

/// A decoded operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    /// No operation.
    #[default]
    Nop,
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 & rs2`
    And,
    /// `rd = rs1 | rs2`
    Or,
    /// `rd = rs1 ^ rs2`
    Xor,
    /// `rd = rs1 << rs2[5:0]`
    Sll,
    /// `rd = rs1 >> rs2[5:0]` (logical)
    Srl,
    /// `rd = rs1 >> rs2[5:0]` (arithmetic)
    Sra,
    /// `rd = (rs1 < rs2) signed`
    Slt,
    /// `rd = (rs1 < rs2) unsigned`
    Sltu,
    /// `rd = rs1 + imm`
    Addi,
    /// `rd = rs1 & imm`
    Andi,
    /// `rd = rs1 | imm`
    Ori,
    /// `rd = rs1 ^ imm`
    Xori,
    /// `rd = rs1 << imm[5:0]`
    Slli,
    /// `rd = rs1 >> imm[5:0]` (logical)
    Srli,
    /// `rd = rs1 >> imm[5:0]` (arithmetic)
    Srai,
    /// `rd = (rs1 < imm) signed`
    Slti,
    /// `rd = (rs1 < imm) unsigned`
    Sltiu,
    /// `rd = imm`
    Lui,
    /// `rd = pc + imm`
    Auipc,
    /// Branch to `pc + imm` if `rs1 == rs2`.
    Beq,
    /// Branch to `pc + imm` if `rs1 != rs2`.
    Bne,
    /// Branch to `pc + imm` if `rs1 < rs2` (signed).
    Blt,
    /// Branch to `pc + imm` if `rs1 >= rs2` (signed).
    Bge,
    /// Branch to `pc + imm` if `rs1 < rs2` (unsigned).
    Bltu,
    /// Branch to `pc + imm` if `rs1 >= rs2` (unsigned).
    Bgeu,
    /// Jump to `pc + imm`, `rd = pc + 4`.
    Jal,
    /// Jump to `(rs1 + imm) & !1`, `rd = pc + 4`.
    Jalr,
    /// Low 64 bits of `rs1 * rs2`.
    Mul,
    /// High 64 bits of signed `rs1 * rs2`.
    Mulh,
    /// High 64 bits of signed `rs1` times unsigned `rs2`.
    Mulhsu,
    /// High 64 bits of unsigned `rs1 * rs2`.
    Mulhu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
    /// `rd = mem[rs1 + imm]`
    Ld,
    /// `mem[rs1 + imm] = rs2`
    Sd,
    /// Load-reserved: `rd = mem[rs1 + imm]` and reserve the address.
    Lr,
    /// Store-conditional: `mem[rs1 + imm] = rs2` if the reservation holds; `rd = 0` on success, `1` on failure.
    Sc,
}

impl Opcode {
    /// Execution unit class that runs this operation.
    pub const fn unit_class(self) -> UnitClass {
        match self {
            Self::Mul | Self::Mulh | Self::Mulhsu | Self::Mulhu => UnitClass::Mul,
            Self::Div | Self::Divu | Self::Rem | Self::Remu => UnitClass::Div,
            Self::Ld | Self::Sd | Self::Lr | Self::Sc => UnitClass::Lsu,
            _ => UnitClass::Alu,
        }
    }

    /// Reads memory.
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Ld | Self::Lr)
    }

    /// Writes memory (store-conditional included).
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Sd | Self::Sc)
    }

    /// Conditional branch.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Bltu | Self::Bgeu
        )
    }

    /// Unconditional jump.
    pub const fn is_jump(self) -> bool {
        matches!(self, Self::Jal | Self::Jalr)
    }

    /// Changes control flow and therefore carries a prediction.
    pub const fn is_control(self) -> bool {
        self.is_branch() || self.is_jump()
    }

    /// Part of the load-reserved / store-conditional pair.
    pub const fn is_atomic(self) -> bool {
        matches!(self, Self::Lr | Self::Sc)
    }
}
