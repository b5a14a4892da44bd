//! Architectural state.
//!
//! The only architectural state the scheduling core owns is the committed
//! register file; everything else in flight is speculative and lives in the
//! instruction window and the physical register file.

/// Committed register file.
pub mod gpr;

pub use gpr::ArchRegFile;
