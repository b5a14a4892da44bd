//! Simulation inputs.
//!
//! The core consumes decoded instructions through the `InstructionSource`
//! boundary; [`Program`] is the in-memory source used by tests and tools.

/// In-memory decoded program.
pub mod program;

pub use program::Program;
