//! Stage functions.
//!
//! The controller runs them once per cycle in this order:
//! 1. **Commit:** Retire up to `commit_width` entries; a misprediction ends the cycle.
//! 2. **Complete:** Drain unit results into the window (wakeups included).
//! 3. **Advance:** Tick every unit and drain committed stores to memory.
//! 4. **Issue:** Select ready entries and route them to units.
//! 5. **Dispatch:** Move fetched instructions into the window.

/// Retires in-order entries and reports mispredictions.
pub mod commit;

/// Delivers unit completions to the window.
pub mod complete;

/// Advances unit-internal progress and the store buffer drain.
pub mod advance;

/// Selects ready entries and hands them to units.
pub mod issue;

/// Renames fetched instructions into the window.
pub mod dispatch;

pub use advance::advance_stage;
pub use commit::commit_stage;
pub use complete::complete_stage;
pub use dispatch::dispatch_stage;
pub use issue::issue_stage;
