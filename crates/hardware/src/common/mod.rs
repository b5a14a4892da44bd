//! Common types shared across the scheduling core.
//!
//! This module provides the fundamental building blocks used by every other component:
//! 1. **Register Ids:** Strong types for architectural and physical registers.
//! 2. **Register Masks:** Fixed-width bit vectors with priority scans.
//! 3. **Error Handling:** Configuration and program errors, dispatch rejections, audit failures.

/// Error and rejection types.
pub mod error;

/// Fixed-width register bit-mask.
pub mod mask;

/// Architectural and physical register ids.
pub mod reg;

pub use error::{AuditError, ConfigError, DispatchReject, ProgramError};
pub use mask::RegMask;
pub use reg::{ArchReg, PhysReg};
