//! Register renaming building blocks.
//!
//! 1. **Free List:** Which physical registers are unallocated.
//! 2. **Register Alias Table:** Architectural to physical mappings.
//! 3. **Physical Register File:** Produced values and their ready flags.

/// Physical register free list.
pub mod free_list;

/// Physical register file.
pub mod prf;

/// Bit-vector register alias table.
pub mod rat;

pub use free_list::FreeList;
pub use prf::{PhysRegEntry, PhysRegFile};
pub use rat::RegisterAliasTable;
