//! Complete Stage: hand unit results to the window.

use crate::core::units::ExecutionUnit;
use crate::core::window::InstructionWindow;
use crate::stats::CoreStats;

/// Executes the Complete stage.
///
/// Polls every unit until it has nothing left to report. Results may arrive
/// in any order; the window ignores completions for entries that are no
/// longer waiting for them.
pub fn complete_stage(
    window: &mut InstructionWindow,
    units: &mut [Box<dyn ExecutionUnit>],
    stats: &mut CoreStats,
) {
    for unit in units.iter_mut() {
        while let Some(done) = unit.poll_result() {
            if window.complete_with(&done) {
                stats.completed += 1;
            } else {
                stats.stale_completions += 1;
            }
        }
    }
}
