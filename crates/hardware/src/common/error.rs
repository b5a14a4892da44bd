//! Error and rejection types.
//!
//! Nothing in the scheduling core is fatal. This module provides:
//! 1. **Configuration errors:** Returned when a `Config` cannot be parsed or is inconsistent.
//! 2. **Dispatch rejections:** Backpressure values returned when the window cannot accept an instruction.
//! 3. **Audit errors:** Invariant violations reported by `InstructionWindow::audit`.
//! 4. **Program errors:** Returned when a `Program` cannot be loaded.

use thiserror::Error;

use super::reg::{ArchReg, PhysReg};

/// Failure to build or load a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter is out of range or inconsistent with another parameter.
    #[error("invalid configuration: {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// The JSON document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a dispatch was refused.
///
/// A rejected dispatch has no side effects; the caller retries on a later
/// cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DispatchReject {
    /// Every window slot is occupied.
    #[error("instruction window full")]
    WindowFull,
    /// No physical register can be allocated for the destination.
    #[error("no free physical register")]
    NoFreeRegister,
}

/// A broken scheduling invariant found by an audit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuditError {
    /// `head`, `tail` and the occupancy count disagree with the valid flags.
    #[error("window occupancy mismatch: head={head} tail={tail} count={count} valid={valid}")]
    Occupancy {
        /// Head index.
        head: usize,
        /// Tail index.
        tail: usize,
        /// Recorded occupancy.
        count: usize,
        /// Number of slots with the valid flag set.
        valid: usize,
    },

    /// A slot's lifecycle flags are inconsistent (`issued` without `valid`, ...).
    #[error("slot {slot}: {reason}")]
    Lifecycle {
        /// Offending slot index.
        slot: usize,
        /// Which implication failed.
        reason: &'static str,
    },

    /// A physical register is both free and allocated, or allocated twice.
    #[error("physical register {0} is owned more than once")]
    DoubleOwned(PhysReg),

    /// A physical register is neither reserved, free, nor owned by a live entry.
    #[error("physical register {0} leaked")]
    Leaked(PhysReg),

    /// An architectural-reserved id appears in the free list.
    #[error("reserved register {0} is on the free list")]
    ReservedFree(PhysReg),

    /// A live entry's destination is missing from its register's alias-table row.
    #[error("live producer of {arch} in {phys} is not in the alias table")]
    UnmappedProducer {
        /// Architectural register.
        arch: ArchReg,
        /// Physical register.
        phys: PhysReg,
    },

    /// An alias-table bit has no live window entry behind it.
    #[error("alias table maps {arch} to {phys} with no live producer")]
    StaleMapping {
        /// Architectural register.
        arch: ArchReg,
        /// Physical register.
        phys: PhysReg,
    },
}

/// Failure to load a program.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// The JSON document could not be parsed.
    #[error("failed to parse program: {0}")]
    Parse(#[from] serde_json::Error),

    /// The program file could not be read.
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),

    /// The base address is not instruction-aligned.
    #[error("program base {0:#x} is not instruction-aligned")]
    Misaligned(u64),
}
