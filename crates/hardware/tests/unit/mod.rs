//! # Unit Components
//!
//! Tests grouped by the part of the crate they exercise.


/// Window, rename, execution units and the controller.
pub mod core;

/// Program loading.
pub mod sim;

/// Statistics counters and derived metrics.
pub mod stats_verification;
