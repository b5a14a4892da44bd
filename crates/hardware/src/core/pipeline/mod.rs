//! Per-cycle pipeline around the instruction window.
//!
//! This module contains the pieces the controller sequences every cycle:
//! 1. **Frontend:** Program counter, fetch queue and the instruction source boundary.
//! 2. **Stages:** Commit, complete, advance, issue and dispatch, each a free function
//!    taking the state it mutates by exclusive reference.

/// Program counter, fetch queue and instruction source.
pub mod frontend;

/// Stage functions run by the controller in a fixed order.
pub mod stages;

pub use frontend::{Frontend, InstructionSource};
