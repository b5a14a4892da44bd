//! Architectural register file.
//!
//! This module implements the committed (non-speculative) register state. It performs the following:
//! 1. **Storage:** Maintains `arch_regs` integer registers.
//! 2. **Invariant Enforcement:** Optionally keeps register 0 hardwired to zero.
//! 3. **Debugging:** Provides a formatted dump of the committed state.

use std::fmt;

use crate::common::ArchReg;

/// Architectural register file, written only at commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchRegFile {
    regs: Vec<u64>,
    hardwired_zero: bool,
}

impl ArchRegFile {
    /// Creates a register file with `count` registers, all zero.
    pub fn new(count: usize, hardwired_zero: bool) -> Self {
        Self {
            regs: vec![0; count],
            hardwired_zero,
        }
    }

    /// Number of architectural registers.
    #[inline]
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns true if the file has no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Whether `reg` is the hardwired zero register.
    #[inline]
    pub const fn is_zero(&self, reg: ArchReg) -> bool {
        self.hardwired_zero && reg.0 == 0
    }

    /// Reads a register. The hardwired zero register and out-of-range ids read 0.
    pub fn read(&self, reg: ArchReg) -> u64 {
        if self.is_zero(reg) {
            0
        } else {
            self.regs.get(reg.index()).copied().unwrap_or(0)
        }
    }

    /// Writes a register. Writes to the hardwired zero register are dropped.
    pub fn write(&mut self, reg: ArchReg, val: u64) {
        if self.is_zero(reg) {
            return;
        }
        if let Some(slot) = self.regs.get_mut(reg.index()) {
            *slot = val;
        }
    }

    /// Snapshot of every register value, index = register number.
    pub fn values(&self) -> Vec<u64> {
        (0..self.regs.len())
            .map(|i| self.read(ArchReg(i as u8)))
            .collect()
    }
}

impl fmt::Display for ArchRegFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.regs.chunks(2).enumerate() {
            let base = i * 2;
            write!(f, "r{:<2}={:#018x}", base, pair[0])?;
            if let Some(second) = pair.get(1) {
                write!(f, " r{:<2}={:#018x}", base + 1, second)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
