//! Dispatch Stage: rename fetched instructions into the window.

use tracing::trace;

use crate::common::DispatchReject;
use crate::core::pipeline::Frontend;
use crate::core::window::InstructionWindow;
use crate::stats::CoreStats;

/// Executes the Dispatch stage.
///
/// Dispatches up to `width` instructions in order. Renaming is sequential,
/// so later instructions in the group see the mappings created by earlier
/// ones. The first rejection ends the group; the rejected instruction stays
/// at the head of the fetch queue for the next cycle.
pub fn dispatch_stage(
    window: &mut InstructionWindow,
    frontend: &mut Frontend,
    stats: &mut CoreStats,
    width: usize,
) {
    for _ in 0..width {
        let Some(inst) = frontend.peek() else {
            break;
        };
        match window.dispatch(inst) {
            Ok(_) => {
                let _ = frontend.pop();
                stats.dispatched += 1;
            }
            Err(DispatchReject::WindowFull) => {
                stats.stalls_window_full += 1;
                break;
            }
            Err(DispatchReject::NoFreeRegister) => {
                stats.stalls_no_register += 1;
                let floor = window.free_list().has_free();
                if floor {
                    stats.stalls_register_floor += 1;
                }
                trace!(pc = format_args!("{:#x}", inst.pc), floor, "dispatch stalled on register");
                break;
            }
        }
    }
}
