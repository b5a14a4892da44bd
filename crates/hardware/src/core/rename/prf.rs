//! Physical register file: value + ready flag per physical id.

use crate::common::PhysReg;

/// A physical register slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysRegEntry {
    /// Produced value; meaningful only when `ready`.
    pub value: u64,
    /// The producing instruction has completed.
    pub ready: bool,
}

/// Physical register file.
#[derive(Clone, Debug)]
pub struct PhysRegFile {
    entries: Vec<PhysRegEntry>,
}

impl PhysRegFile {
    /// Creates `count` registers, none ready.
    pub fn new(count: usize) -> Self {
        Self {
            entries: vec![PhysRegEntry::default(); count],
        }
    }

    /// Returns the slot for `reg`.
    pub fn get(&self, reg: PhysReg) -> PhysRegEntry {
        self.entries.get(reg.index()).copied().unwrap_or_default()
    }

    /// Whether `reg` holds a produced value.
    #[inline]
    pub fn is_ready(&self, reg: PhysReg) -> bool {
        self.get(reg).ready
    }

    /// Marks `reg` as awaiting its producer.
    pub fn mark_pending(&mut self, reg: PhysReg) {
        if let Some(e) = self.entries.get_mut(reg.index()) {
            *e = PhysRegEntry::default();
        }
    }

    /// Stores the produced value and marks `reg` ready.
    pub fn write(&mut self, reg: PhysReg, value: u64) {
        if let Some(e) = self.entries.get_mut(reg.index()) {
            e.value = value;
            e.ready = true;
        }
    }

    /// Clears `reg` when it goes back to the free list.
    pub fn release(&mut self, reg: PhysReg) {
        self.mark_pending(reg);
    }
}
