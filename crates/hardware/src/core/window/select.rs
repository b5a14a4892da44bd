//! Issue arbitration.
//!
//! Select scans valid entries from `head` to `tail`, so the oldest ready
//! instruction always wins a contested port. Each execution-unit class has its
//! own per-cycle port count and a global issue width caps the total. Memory
//! operations additionally issue in program order among themselves: an older
//! memory operation that cannot issue holds back every younger one.

use tracing::trace;

use super::{InstructionWindow, SlotId};
use crate::config::UnitConfig;
use crate::core::units::UnitClass;

/// Issue bandwidth available in one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuePorts {
    ports: [usize; UnitClass::COUNT],
    issue_width: usize,
    store_credits: usize,
}

impl IssuePorts {
    /// No ports open, `issue_width` total.
    pub const fn new(issue_width: usize) -> Self {
        Self {
            ports: [0; UnitClass::COUNT],
            issue_width,
            store_credits: usize::MAX,
        }
    }

    /// One port per configured unit instance.
    pub const fn from_units(units: &UnitConfig, issue_width: usize) -> Self {
        Self::new(issue_width)
            .with(UnitClass::Alu, units.alu)
            .with(UnitClass::Mul, units.mul)
            .with(UnitClass::Div, units.div)
            .with(UnitClass::Lsu, units.lsu)
    }

    /// Sets the port count of `class`.
    #[must_use]
    pub const fn with(mut self, class: UnitClass, ports: usize) -> Self {
        self.ports[class.index()] = ports;
        self
    }

    /// Limits how many stores may issue (free store-buffer slots).
    #[must_use]
    pub const fn with_store_credits(mut self, credits: usize) -> Self {
        self.store_credits = credits;
        self
    }

    /// Remaining ports of `class`.
    #[inline]
    pub const fn available(&self, class: UnitClass) -> usize {
        self.ports[class.index()]
    }

    /// Remaining global issue slots.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.issue_width
    }

    /// Remaining store credits.
    #[inline]
    pub const fn store_credits(&self) -> usize {
        self.store_credits
    }

    fn admits(&self, class: UnitClass, is_store: bool) -> bool {
        self.issue_width > 0
            && self.ports[class.index()] > 0
            && (!is_store || self.store_credits > 0)
    }

    fn consume(&mut self, class: UnitClass, is_store: bool) {
        self.issue_width -= 1;
        self.ports[class.index()] -= 1;
        if is_store {
            self.store_credits -= 1;
        }
    }
}

impl InstructionWindow {
    /// Chooses this cycle's issue set, oldest first, and marks each selected entry issued.
    ///
    /// `ports` is consumed as entries are selected. A candidate whose class has
    /// no port left is skipped without blocking other classes.
    pub fn select_ready(&mut self, ports: &mut IssuePorts) -> Vec<SlotId> {
        let mut selected = Vec::new();
        let mut memory_blocked = false;
        let cap = self.entries.len();

        for i in 0..self.count {
            if ports.remaining() == 0 {
                break;
            }
            let idx = (self.head + i) % cap;
            let e = &self.entries[idx];
            if !e.valid || e.issued {
                continue;
            }

            let is_memory = e.is_memory();
            if is_memory && memory_blocked {
                continue;
            }
            let class = e.opcode.unit_class();
            let is_store = e.opcode.is_store();
            if !e.is_candidate() || !ports.admits(class, is_store) {
                memory_blocked |= is_memory;
                continue;
            }

            debug_assert!(
                e.dest.is_none()
                    || selected
                        .iter()
                        .all(|s: &SlotId| self.entries[s.0].dest != e.dest),
                "two selected entries write {:?}",
                e.dest
            );

            ports.consume(class, is_store);
            self.entries[idx].issued = true;
            trace!(slot = idx, seq = self.entries[idx].seq, ?class, "select");
            selected.push(SlotId(idx));
        }
        selected
    }
}
