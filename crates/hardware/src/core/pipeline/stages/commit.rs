//! Commit Stage: retire entries from the window head.
//!
//! For every retired entry this stage:
//! 1. Retires memory instructions in the memory subsystem: buffered stores
//!    may drain and reservation changes become permanent.
//! 2. Reports branch and jump outcomes to the predictor.
//! 3. Stops at the first misprediction and returns the corrected fetch address.

use std::cell::RefCell;

use crate::core::units::bru::BranchPredictor;
use crate::core::units::lsu::MemorySubsystem;
use crate::core::window::InstructionWindow;
use crate::stats::CoreStats;

/// Executes the Commit stage.
///
/// Retires up to `width` entries. Returns the redirect address when a
/// mispredicted branch or jump retired; the window has already flushed
/// itself in that case.
pub fn commit_stage(
    window: &mut InstructionWindow,
    memory: &RefCell<MemorySubsystem>,
    predictor: &mut dyn BranchPredictor,
    stats: &mut CoreStats,
    width: usize,
) -> Option<u64> {
    for _ in 0..width {
        let retired = window.commit()?;
        stats.committed += 1;

        if retired.opcode.is_load() || retired.opcode.is_store() {
            let _ = memory.borrow_mut().commit(retired.seq);
        }

        if let Some(branch) = retired.branch {
            stats.branches += 1;
            predictor.update(retired.pc, branch.taken, branch.target);
            if branch.mispredicted {
                stats.mispredictions += 1;
                return Some(branch.next_pc);
            }
        }
    }
    None
}
