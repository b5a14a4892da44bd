//! Core scheduling engine.
//!
//! This module contains the out-of-order core: the instruction window and its
//! rename state, the execution units it issues to, the per-cycle pipeline
//! stages, and the controller that sequences them.

/// Committed architectural register file.
pub mod arch;

/// Core controller and execution loop.
pub mod cpu;

/// Frontend and per-cycle stage functions.
pub mod pipeline;

/// Register renaming: free list, alias table, physical register file.
pub mod rename;

/// Execution units and the adapter contract.
pub mod units;

/// Unified instruction window.
pub mod window;

pub use self::cpu::{Core, RunSummary, TickOutcome};
