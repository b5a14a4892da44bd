//! Issue Stage: select ready entries and route them to units.
//!
//! The port budget handed to select is built from the units that can accept
//! an operation this cycle (plus the free store-buffer slots for stores), so
//! every selected entry normally finds a unit. If a unit refuses anyway the
//! entry goes back to the candidate pool, and so does every younger memory
//! operation selected behind a refused one, keeping memory issue in order.

use std::cell::RefCell;

use tracing::trace;

use crate::core::units::lsu::MemorySubsystem;
use crate::core::units::{ExecutionUnit, IssueOutcome, UnitClass};
use crate::core::window::{InstructionWindow, IssuePorts};
use crate::stats::CoreStats;

/// Port budget for this cycle.
pub fn issue_ports(
    units: &[Box<dyn ExecutionUnit>],
    memory: &RefCell<MemorySubsystem>,
    issue_width: usize,
) -> IssuePorts {
    let mut ports = IssuePorts::new(issue_width)
        .with_store_credits(memory.borrow().store_buffer().free_slots());
    for class in UnitClass::ALL {
        let open = units
            .iter()
            .filter(|u| u.class() == class && u.can_accept())
            .count();
        ports = ports.with(class, open);
    }
    ports
}

/// Executes the Issue stage.
pub fn issue_stage(
    window: &mut InstructionWindow,
    units: &mut [Box<dyn ExecutionUnit>],
    memory: &RefCell<MemorySubsystem>,
    stats: &mut CoreStats,
    issue_width: usize,
) {
    let mut ports = issue_ports(units, memory, issue_width);
    let selected = window.select_ready(&mut ports);
    let mut memory_refused = false;

    for slot in selected {
        let Some(req) = window.issue_request(slot) else {
            continue;
        };
        let is_memory = req.opcode.is_load() || req.opcode.is_store();
        let class = req.opcode.unit_class();

        let accepted = !(is_memory && memory_refused)
            && units
                .iter_mut()
                .find(|u| u.class() == class && u.can_accept())
                .is_some_and(|u| u.issue(req) == IssueOutcome::Accepted);

        if accepted {
            stats.issued += 1;
            trace!(%slot, seq = req.seq, %class, "issue");
        } else {
            window.cancel_issue(slot);
            stats.issue_busy += 1;
            memory_refused |= is_memory;
        }
    }
}
