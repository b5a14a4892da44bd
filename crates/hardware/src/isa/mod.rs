//! Instruction definitions consumed by the scheduling core.
//!
//! * `opcode`: The operation set, its execution unit class and control/memory flags.
//! * `instruction`: Decoded instruction records and branch predictions.

/// Decoded instruction records and predictions.
pub mod instruction;

/// Operation set and per-operation properties.
pub mod opcode;

pub use instruction::{DecodedInst, INST_BYTES, Prediction};
pub use opcode::Opcode;
