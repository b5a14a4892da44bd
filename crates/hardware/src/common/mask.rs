//! Fixed-width register bit-mask.
//!
//! Both the free list and every alias-table row are a bit per physical
//! register. The width is fixed at construction. Storage and the priority
//! scans (`highest`, `lowest_from`) come from `bitvec`, which searches whole
//! words rather than walking individual bits.

use bitvec::prelude::*;

/// A fixed-width bit vector over physical register ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegMask {
    bits: BitVec<u64, Lsb0>,
}

impl RegMask {
    /// Creates an all-clear mask `width` bits wide.
    pub fn new(width: usize) -> Self {
        Self {
            bits: bitvec![u64, Lsb0; 0; width],
        }
    }

    /// Number of bits in the mask.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Sets bit `bit`. Out-of-range bits are ignored.
    #[inline]
    pub fn set(&mut self, bit: usize) {
        if bit < self.bits.len() {
            self.bits.set(bit, true);
        }
    }

    /// Clears bit `bit`. Out-of-range bits are ignored.
    #[inline]
    pub fn clear(&mut self, bit: usize) {
        if bit < self.bits.len() {
            self.bits.set(bit, false);
        }
    }

    /// Returns whether bit `bit` is set.
    #[inline]
    pub fn test(&self, bit: usize) -> bool {
        self.bits.get(bit).is_some_and(|b| *b)
    }

    /// Clears every bit.
    pub fn clear_all(&mut self) {
        self.bits.fill(false);
    }

    /// Returns true if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Highest set bit, if any.
    pub fn highest(&self) -> Option<usize> {
        self.bits.last_one()
    }

    /// Lowest set bit, if any.
    pub fn lowest(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Lowest set bit at or above `start`, if any.
    pub fn lowest_from(&self, start: usize) -> Option<usize> {
        self.bits
            .get(start..)
            .and_then(BitSlice::first_one)
            .map(|offset| start + offset)
    }

    /// Iterates the set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}
