//! Execution units and the adapter contract the window issues to.
//!
//! The window never inspects a unit's internals. It hands a unit an
//! [`IssueRequest`] (slot, captured operands, operation) and later receives a
//! [`Completion`] from `poll_result`. Units may take one cycle or many and may
//! finish out of order; the core only reacts to completion events.
//!
//! This module contains:
//! - [`alu`]: integer, branch, multiply and divide operation evaluation.
//! - [`pipe`]: a fixed-latency unit (ALU, multiplier, divider).
//! - [`lsu`]: the load/store unit, store buffer and shared memory.
//! - [`bru`]: the branch predictor boundary.

/// Integer operation evaluation.
pub mod alu;

/// Branch prediction boundary and static predictor.
pub mod bru;

/// Load/store unit with store buffer and reservation.
pub mod lsu;

/// Fixed-latency execution unit.
pub mod pipe;

use std::fmt;

use crate::core::window::SlotId;
use crate::isa::Opcode;

/// Execution-unit class an operation is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitClass {
    /// Integer arithmetic, logic, branches and jumps.
    Alu,
    /// Multiplier.
    Mul,
    /// Divider.
    Div,
    /// Load/store.
    Lsu,
}

impl UnitClass {
    /// Number of classes.
    pub const COUNT: usize = 4;

    /// Every class, in port-table order.
    pub const ALL: [Self; Self::COUNT] = [Self::Alu, Self::Mul, Self::Div, Self::Lsu];

    /// Position in per-class tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alu => "alu",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Lsu => "lsu",
        })
    }
}

/// Operands and operation handed to a unit at issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueRequest {
    /// Window slot to report back to.
    pub slot: SlotId,
    /// Sequence number of the entry, echoed in the completion.
    pub seq: u64,
    /// Program counter.
    pub pc: u64,
    /// Operation.
    pub opcode: Opcode,
    /// First operand (`rs1`).
    pub a: u64,
    /// Second operand (`rs2`).
    pub b: u64,
    /// Immediate.
    pub imm: i64,
}

/// Answer to an issue attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The unit took the operation.
    Accepted,
    /// The unit cannot take an operation this cycle; retry later.
    Busy,
}

/// Realized direction and target of a branch or jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BranchOutcome {
    /// Taken.
    pub taken: bool,
    /// Taken-target.
    pub target: u64,
}

/// Result reported by a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Window slot of the producing instruction.
    pub slot: SlotId,
    /// Sequence number from the issue request.
    pub seq: u64,
    /// Result value (destination register value, if any).
    pub value: u64,
    /// Outcome for branches and jumps.
    pub branch: Option<BranchOutcome>,
    /// Effective address for memory operations.
    pub mem_addr: Option<u64>,
    /// Data written by a store.
    pub store_data: Option<u64>,
}

impl Completion {
    /// A plain value result.
    pub const fn new(slot: SlotId, seq: u64, value: u64) -> Self {
        Self {
            slot,
            seq,
            value,
            branch: None,
            mem_addr: None,
            store_data: None,
        }
    }

    /// A result answering `req`.
    pub const fn for_request(req: &IssueRequest, value: u64) -> Self {
        Self::new(req.slot, req.seq, value)
    }
}

/// The adapter contract every functional unit satisfies.
///
/// Calls per cycle: `tick` once (advance internal progress), then any number
/// of `issue` attempts; `poll_result` is drained at the start of the next
/// cycle's complete stage.
pub trait ExecutionUnit {
    /// Class this unit serves.
    fn class(&self) -> UnitClass;

    /// Whether `issue` would accept an operation now.
    fn can_accept(&self) -> bool;

    /// Offers an operation.
    fn issue(&mut self, req: IssueRequest) -> IssueOutcome;

    /// Advances internal progress by one cycle.
    fn tick(&mut self);

    /// Takes the next finished result, if any.
    fn poll_result(&mut self) -> Option<Completion>;

    /// Drops every operation in progress.
    fn flush(&mut self);

    /// Nothing in progress and nothing waiting to be polled.
    fn is_idle(&self) -> bool;
}
