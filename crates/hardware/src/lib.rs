//! Out-of-order instruction scheduling core.
//!
//! This crate implements a cycle-level model of an out-of-order core with the following:
//! 1. **Window:** A unified instruction window acting as issue queue, reservation station and
//!    reorder buffer, with age-ordered wakeup/select and precise in-order commit.
//! 2. **Rename:** A bit-vector register alias table, a physical register free list and a
//!    physical register file.
//! 3. **Units:** An adapter contract for functional units plus ALU, multiply, divide and
//!    load/store implementations (store buffer and load-reserved/store-conditional).
//! 4. **Controller:** Per-cycle sequencing (commit, complete, advance, issue, dispatch) and
//!    full-flush recovery from branch mispredictions.
//! 5. **Simulation:** JSON configuration, in-memory programs and statistics.
//!
//! # Examples
//!
//! ```
//! use oocore::isa::{DecodedInst, Opcode};
//! use oocore::{Config, Core, Program};
//!
//! let program = Program::new(0, vec![
//!     DecodedInst::imm(Opcode::Addi, 1, 0, 20),
//!     DecodedInst::imm(Opcode::Addi, 2, 0, 22),
//!     DecodedInst::reg(Opcode::Add, 3, 1, 2),
//! ]);
//! let mut core = Core::new(Config::default(), program).unwrap();
//! let summary = core.run(100);
//! assert!(summary.finished);
//! assert_eq!(core.arch_reg(3), 42);
//! ```

/// Common types (register ids, bit-masks, errors).
pub mod common;
/// Core configuration (defaults, hierarchical config structures, validation).
pub mod config;
/// Scheduling core (window, rename, units, pipeline stages, controller).
pub mod core;
/// Instruction records (opcodes, decoded instructions, predictions).
pub mod isa;
/// Simulation inputs (in-memory programs).
pub mod sim;
/// Core statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main core type; holds the window, units, memory, frontend and stats.
pub use crate::core::Core;
/// In-memory program usable as an instruction source.
pub use crate::sim::Program;
