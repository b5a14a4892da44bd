//! Instruction window entry types.
//!
//! A window slot combines what a reorder buffer, a reservation station and an
//! issue queue would each track separately: identity for in-order commit,
//! renamed operands with their readiness for wakeup/select, and the result and
//! side fields produced by execution.

use std::fmt;

use crate::common::{ArchReg, PhysReg};
use crate::core::units::BranchOutcome;
use crate::isa::{INST_BYTES, Opcode, Prediction};

/// Index of a slot in the instruction window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SlotId(pub usize);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A renamed source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SourceOperand {
    /// Architectural register named by the instruction.
    pub arch: Option<ArchReg>,
    /// Producer's physical register, `None` when read from the architectural file.
    pub phys: Option<PhysReg>,
    /// The operand value is available.
    pub ready: bool,
    /// Captured operand value; meaningful only when `ready`.
    pub value: u64,
}

impl SourceOperand {
    /// An operand whose value is already known.
    pub const fn resolved(arch: Option<ArchReg>, phys: Option<PhysReg>, value: u64) -> Self {
        Self {
            arch,
            phys,
            ready: true,
            value,
        }
    }

    /// An operand waiting on `phys`.
    pub const fn waiting(arch: ArchReg, phys: PhysReg) -> Self {
        Self {
            arch: Some(arch),
            phys: Some(phys),
            ready: false,
            value: 0,
        }
    }
}

/// One in-flight instruction.
#[derive(Clone, Debug, Default)]
pub struct WindowEntry {
    /// Slot is occupied.
    pub valid: bool,
    /// Sent to an execution unit.
    pub issued: bool,
    /// Result available.
    pub executed: bool,
    /// Woken during the current cycle; not eligible for select until the next.
    pub just_woken: bool,

    /// Dispatch sequence number, strictly increasing in program order.
    pub seq: u64,
    /// Program counter.
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// Immediate.
    pub imm: i64,
    /// Architectural destination, `None` when nothing is written.
    pub rd: Option<ArchReg>,
    /// Renamed sources (`rs1`, `rs2`).
    pub src: [SourceOperand; 2],
    /// Physical destination.
    pub dest: Option<PhysReg>,

    /// Produced value.
    pub result: u64,
    /// `result` has been written.
    pub result_valid: bool,

    /// Effective address of a load or store.
    pub mem_addr: Option<u64>,
    /// Data of a store.
    pub store_data: Option<u64>,
    /// Prediction supplied at dispatch for branches and jumps.
    pub prediction: Option<Prediction>,
    /// Realized outcome reported by the execution unit.
    pub outcome: Option<BranchOutcome>,
}

impl WindowEntry {
    /// All source operands are available.
    #[inline]
    pub fn operands_ready(&self) -> bool {
        self.src.iter().all(|s| s.ready)
    }

    /// Candidate for select: valid, not issued, operands ready and not woken this cycle.
    #[inline]
    pub fn is_candidate(&self) -> bool {
        self.valid && !self.issued && !self.just_woken && self.operands_ready()
    }

    /// Branch or jump whose outcome is checked at commit.
    #[inline]
    pub const fn is_control(&self) -> bool {
        self.opcode.is_control()
    }

    /// Touches memory.
    #[inline]
    pub const fn is_memory(&self) -> bool {
        self.opcode.is_load() || self.opcode.is_store()
    }

    /// Compares the realized outcome against the prediction.
    ///
    /// A missing prediction counts as predicted not-taken; a control entry
    /// with no reported outcome counts as not-taken.
    pub fn resolve_branch(&self) -> Option<BranchResolution> {
        if !self.is_control() {
            return None;
        }
        let predicted = self.prediction.unwrap_or_default();
        let actual = self.outcome.unwrap_or_default();
        let mispredicted = predicted.taken != actual.taken
            || (actual.taken && predicted.target != actual.target);
        Some(BranchResolution {
            predicted,
            taken: actual.taken,
            target: actual.target,
            next_pc: if actual.taken {
                actual.target
            } else {
                self.pc.wrapping_add(INST_BYTES)
            },
            mispredicted,
        })
    }
}

/// Realized control-flow outcome, exposed to the predictor at commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchResolution {
    /// What the frontend guessed.
    pub predicted: Prediction,
    /// Realized direction.
    pub taken: bool,
    /// Realized taken-target.
    pub target: u64,
    /// Address of the next instruction on the correct path.
    pub next_pc: u64,
    /// Prediction disagreed with the outcome.
    pub mispredicted: bool,
}

/// Snapshot of an instruction as it leaves the window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetiredEntry {
    /// Slot the instruction occupied.
    pub slot: SlotId,
    /// Dispatch sequence number.
    pub seq: u64,
    /// Program counter.
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// Architectural destination written.
    pub rd: Option<ArchReg>,
    /// Physical register released.
    pub dest: Option<PhysReg>,
    /// Value written to `rd`.
    pub value: u64,
    /// Effective address for memory operations.
    pub mem_addr: Option<u64>,
    /// Control-flow resolution for branches and jumps.
    pub branch: Option<BranchResolution>,
}

impl RetiredEntry {
    /// This retirement flushed everything younger.
    #[inline]
    pub fn mispredicted(&self) -> bool {
        self.branch.is_some_and(|b| b.mispredicted)
    }
}
