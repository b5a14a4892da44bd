//! Physical register free list.
//!
//! One bit per physical register; a set bit means the register is free. Ids
//! below the architectural register count are reserved for the committed
//! file and are never set. Allocation is deterministic: the lowest free id
//! (optionally above a floor) is always chosen.

use crate::common::{PhysReg, RegMask};

/// Free list over the physical register space.
#[derive(Clone, Debug)]
pub struct FreeList {
    free: RegMask,
    reserved: usize,
}

impl FreeList {
    /// Creates a free list with ids `reserved..total` free.
    pub fn new(total: usize, reserved: usize) -> Self {
        let mut free = RegMask::new(total);
        for bit in reserved..total {
            free.set(bit);
        }
        Self { free, reserved }
    }

    /// Total physical registers, reserved ids included.
    #[inline]
    pub fn total(&self) -> usize {
        self.free.width()
    }

    /// Number of ids permanently reserved for the architectural file.
    #[inline]
    pub const fn reserved(&self) -> usize {
        self.reserved
    }

    /// Whether any register can be allocated.
    #[inline]
    pub fn has_free(&self) -> bool {
        !self.free.is_empty()
    }

    /// Number of free registers.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.count()
    }

    /// Whether `reg` is currently free.
    #[inline]
    pub fn is_free(&self, reg: PhysReg) -> bool {
        self.free.test(reg.index())
    }

    /// Whether `reg` belongs to the reserved architectural range.
    #[inline]
    pub const fn is_reserved(&self, reg: PhysReg) -> bool {
        reg.index() < self.reserved
    }

    /// Lowest free register strictly above `floor` (any register when `floor` is `None`),
    /// without allocating it.
    pub fn peek_above(&self, floor: Option<PhysReg>) -> Option<PhysReg> {
        let start = floor.map_or(0, |p| p.index() + 1);
        self.free.lowest_from(start).map(|bit| PhysReg(bit as u16))
    }

    /// Allocates the lowest free register. `None` means exhausted.
    pub fn allocate(&mut self) -> Option<PhysReg> {
        self.allocate_above(None)
    }

    /// Allocates the lowest free register strictly above `floor`.
    pub fn allocate_above(&mut self, floor: Option<PhysReg>) -> Option<PhysReg> {
        let reg = self.peek_above(floor)?;
        self.free.clear(reg.index());
        Some(reg)
    }

    /// Returns `reg` to the free list.
    ///
    /// Reserved ids, out-of-range ids and registers that are already free are
    /// rejected and leave the list unchanged. Returns whether the register
    /// was actually released.
    pub fn free(&mut self, reg: PhysReg) -> bool {
        if self.is_reserved(reg) || reg.index() >= self.total() || self.is_free(reg) {
            return false;
        }
        self.free.set(reg.index());
        true
    }

    /// Iterates the free register ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PhysReg> + '_ {
        self.free.iter().map(|bit| PhysReg(bit as u16))
    }
}
