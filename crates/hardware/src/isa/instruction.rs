//! Decoded instruction records.
//!
//! This is the boundary with the external fetch/decode collaborator: the core
//! never sees encodings, only these records plus the branch predictor's
//! guess attached by the frontend.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::opcode::Opcode;
use crate::common::ArchReg;

/// Size of every instruction in bytes; the fall-through PC is `pc + INST_BYTES`.
pub const INST_BYTES: u64 = 4;

/// Direction and target guessed for a branch or jump at fetch time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted taken.
    pub taken: bool,
    /// Predicted target (meaningful only when `taken`).
    pub target: u64,
}

impl Prediction {
    /// Predicted address of the next instruction.
    pub const fn next_pc(&self, pc: u64) -> u64 {
        if self.taken {
            self.target
        } else {
            pc.wrapping_add(INST_BYTES)
        }
    }
}

/// A decoded instruction as delivered by fetch/decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedInst {
    /// Program counter. Filled in by the instruction source.
    #[serde(default)]
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// Destination register, if the operation writes one.
    #[serde(default)]
    pub rd: Option<ArchReg>,
    /// First source register.
    #[serde(default)]
    pub rs1: Option<ArchReg>,
    /// Second source register.
    #[serde(default)]
    pub rs2: Option<ArchReg>,
    /// Sign-extended immediate.
    #[serde(default)]
    pub imm: i64,
    /// Prediction for branches and jumps, attached by the frontend.
    #[serde(skip)]
    pub prediction: Option<Prediction>,
}

impl DecodedInst {
    /// An operation with no register operands.
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            pc: 0,
            opcode,
            rd: None,
            rs1: None,
            rs2: None,
            imm: 0,
            prediction: None,
        }
    }

    /// Register-register form: `rd = rs1 op rs2`.
    pub const fn reg(opcode: Opcode, rd: u8, rs1: u8, rs2: u8) -> Self {
        Self {
            rd: Some(ArchReg(rd)),
            rs1: Some(ArchReg(rs1)),
            rs2: Some(ArchReg(rs2)),
            ..Self::new(opcode)
        }
    }

    /// Register-immediate form: `rd = rs1 op imm` (loads and `jalr` too).
    pub const fn imm(opcode: Opcode, rd: u8, rs1: u8, imm: i64) -> Self {
        Self {
            rd: Some(ArchReg(rd)),
            rs1: Some(ArchReg(rs1)),
            imm,
            ..Self::new(opcode)
        }
    }

    /// Upper-immediate or direct jump form: `rd = f(pc, imm)`.
    pub const fn upper(opcode: Opcode, rd: u8, imm: i64) -> Self {
        Self {
            rd: Some(ArchReg(rd)),
            imm,
            ..Self::new(opcode)
        }
    }

    /// Store form: `mem[rs1 + imm] = rs2`.
    pub const fn store(rs1: u8, rs2: u8, imm: i64) -> Self {
        Self {
            rs1: Some(ArchReg(rs1)),
            rs2: Some(ArchReg(rs2)),
            imm,
            ..Self::new(Opcode::Sd)
        }
    }

    /// Store-conditional: `rd = status`, `mem[rs1 + imm] = rs2` on success.
    pub const fn store_conditional(rd: u8, rs1: u8, rs2: u8) -> Self {
        Self {
            rd: Some(ArchReg(rd)),
            rs1: Some(ArchReg(rs1)),
            rs2: Some(ArchReg(rs2)),
            ..Self::new(Opcode::Sc)
        }
    }

    /// Conditional branch form: compare `rs1`, `rs2`, target `pc + imm`.
    pub const fn branch(opcode: Opcode, rs1: u8, rs2: u8, imm: i64) -> Self {
        Self {
            rs1: Some(ArchReg(rs1)),
            rs2: Some(ArchReg(rs2)),
            imm,
            ..Self::new(opcode)
        }
    }

    /// Returns a copy placed at `pc`.
    #[must_use]
    pub fn at(mut self, pc: u64) -> Self {
        self.pc = pc;
        self
    }

    /// Returns a copy carrying `prediction`.
    #[must_use]
    pub const fn predicted(mut self, prediction: Prediction) -> Self {
        self.prediction = Some(prediction);
        self
    }

    /// Reads memory.
    pub const fn is_load(&self) -> bool {
        self.opcode.is_load()
    }

    /// Writes memory.
    pub const fn is_store(&self) -> bool {
        self.opcode.is_store()
    }

    /// Conditional branch.
    pub const fn is_branch(&self) -> bool {
        self.opcode.is_branch()
    }

    /// Unconditional jump.
    pub const fn is_jump(&self) -> bool {
        self.opcode.is_jump()
    }

    /// Predicted address of the next instruction; fall-through when no prediction is attached.
    pub fn predicted_next_pc(&self) -> u64 {
        self.prediction
            .unwrap_or_default()
            .next_pc(self.pc)
    }
}

impl fmt::Display for DecodedInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}: {:?}", self.pc, self.opcode)?;
        let regs = [self.rd, self.rs1, self.rs2];
        let mut sep = " ";
        for reg in regs.iter().flatten() {
            write!(f, "{sep}{reg}")?;
            sep = ", ";
        }
        if self.imm != 0 {
            write!(f, "{sep}{}", self.imm)?;
        }
        Ok(())
    }
}
