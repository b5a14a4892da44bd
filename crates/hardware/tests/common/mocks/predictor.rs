use std::cell::RefCell;
use std::rc::Rc;

use oocore::core::units::bru::BranchPredictor;
use oocore::isa::{DecodedInst, Prediction};

/// Predicts every branch and jump taken to one fixed target.
#[derive(Clone, Debug, Default)]
pub struct FixedTargetPredictor {
    pub target: u64,
    /// Every `(pc, taken, target)` reported at commit.
    pub updates: Rc<RefCell<Vec<(u64, bool, u64)>>>,
}

impl FixedTargetPredictor {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            updates: Rc::default(),
        }
    }
}

impl BranchPredictor for FixedTargetPredictor {
    fn predict(&self, _pc: u64, _inst: &DecodedInst) -> Prediction {
        Prediction {
            taken: true,
            target: self.target,
        }
    }

    fn update(&mut self, pc: u64, taken: bool, target: u64) {
        self.updates.borrow_mut().push((pc, taken, target));
    }
}
