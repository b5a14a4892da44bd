//! Register identifiers.
//!
//! Architectural and physical register numbers are kept as distinct newtypes so
//! a rename table lookup can never be confused with a raw architectural index.
//! Both are plain indices into fixed-size arrays (arena + index): window
//! entries, the alias table and the physical register file refer to each
//! other only through these ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Architectural register number as named by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchReg(pub u8);

impl ArchReg {
    /// Returns the register number as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Physical register id.
///
/// Ids `0..arch_regs` are reserved for the architectural file and are never
/// handed out by the free list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PhysReg(pub u16);

impl PhysReg {
    /// Returns the register id as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}
