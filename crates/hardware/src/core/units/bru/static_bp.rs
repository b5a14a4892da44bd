//! Static Branch Predictor.
//!
//! Conditional branches and indirect jumps are predicted not taken. Direct
//! jumps are predicted taken to `pc + imm`, which decode already knows.

use super::BranchPredictor;
use crate::isa::{DecodedInst, Opcode, Prediction};

/// Static Branch Predictor structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict(&self, pc: u64, inst: &DecodedInst) -> Prediction {
        match inst.opcode {
            Opcode::Jal => Prediction {
                taken: true,
                target: pc.wrapping_add(inst.imm as u64),
            },
            _ => Prediction::default(),
        }
    }

    /// Keeps no history.
    fn update(&mut self, _pc: u64, _taken: bool, _target: u64) {}
}
