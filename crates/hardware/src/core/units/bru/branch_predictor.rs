//! Branch Predictor Interface.
//!
//! The scheduling core only consumes a prediction per branch or jump at fetch
//! time and reports the realized outcome back at commit. How a predictor
//! turns that feedback into future predictions is its own business.

use crate::isa::{DecodedInst, Prediction};

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts direction and target for the control instruction `inst` at `pc`.
    ///
    /// Only called for branches and jumps.
    fn predict(&self, pc: u64, inst: &DecodedInst) -> Prediction;

    /// Trains the predictor with a committed outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch or jump
    /// * `taken` - Whether it was actually taken
    /// * `target` - The realized taken-target
    fn update(&mut self, pc: u64, taken: bool, target: u64);
}
