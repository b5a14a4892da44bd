//! Advance Stage: unit-internal progress and the store buffer drain.

use std::cell::RefCell;

use crate::core::units::ExecutionUnit;
use crate::core::units::lsu::MemorySubsystem;
use crate::stats::CoreStats;

/// Executes the Advance stage.
pub fn advance_stage(
    units: &mut [Box<dyn ExecutionUnit>],
    memory: &RefCell<MemorySubsystem>,
    stats: &mut CoreStats,
) {
    for unit in units.iter_mut() {
        unit.tick();
    }
    stats.stores_drained += memory.borrow_mut().drain() as u64;
}
