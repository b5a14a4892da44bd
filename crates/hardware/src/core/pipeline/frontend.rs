//! Frontend: program counter and fetch queue.
//!
//! Fetch/decode is an external collaborator reached through
//! [`InstructionSource`]. Each cycle the frontend fetches up to the dispatch
//! width, asks the predictor about every branch or jump, attaches the guess,
//! and follows the predicted path. Instructions wait in the queue until the
//! window accepts them; a rejected dispatch leaves the instruction at the head.

use std::collections::VecDeque;

use tracing::debug;

use crate::core::units::bru::BranchPredictor;
use crate::isa::{DecodedInst, INST_BYTES};

/// Supplies decoded instructions by address.
pub trait InstructionSource {
    /// The instruction at `pc`, or `None` past the end of the program.
    fn fetch(&self, pc: u64) -> Option<DecodedInst>;

    /// Address execution starts at.
    fn entry(&self) -> u64 {
        0
    }
}

/// Program counter and fetched-but-not-dispatched instructions.
#[derive(Clone, Debug)]
pub struct Frontend {
    pc: u64,
    queue: VecDeque<DecodedInst>,
    capacity: usize,
    exhausted: bool,
}

impl Frontend {
    /// Creates a frontend starting at `pc` with a queue of `capacity` entries.
    pub fn new(pc: u64, capacity: usize) -> Self {
        Self {
            pc,
            queue: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            exhausted: false,
        }
    }

    /// Next address to fetch.
    #[inline]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Instructions waiting for dispatch.
    #[inline]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Fetch has run off the end of the program and the queue is empty.
    #[inline]
    pub fn is_drained(&self) -> bool {
        self.exhausted && self.queue.is_empty()
    }

    /// Fetches up to `width` instructions. Returns how many were fetched.
    pub fn fetch(
        &mut self,
        source: &dyn InstructionSource,
        predictor: &dyn BranchPredictor,
        width: usize,
    ) -> usize {
        let mut fetched = 0;
        while fetched < width && self.queue.len() < self.capacity && !self.exhausted {
            let Some(mut inst) = source.fetch(self.pc) else {
                self.exhausted = true;
                break;
            };
            inst.pc = self.pc;
            if inst.opcode.is_control() {
                let prediction = predictor.predict(self.pc, &inst);
                inst.prediction = Some(prediction);
                self.pc = prediction.next_pc(self.pc);
            } else {
                self.pc = self.pc.wrapping_add(INST_BYTES);
            }
            self.queue.push_back(inst);
            fetched += 1;
        }
        fetched
    }

    /// Oldest undispatched instruction.
    #[inline]
    pub fn peek(&self) -> Option<&DecodedInst> {
        self.queue.front()
    }

    /// Removes the oldest instruction after a successful dispatch.
    #[inline]
    pub fn pop(&mut self) -> Option<DecodedInst> {
        self.queue.pop_front()
    }

    /// Discards queued instructions and restarts fetch at `pc`.
    pub fn redirect(&mut self, pc: u64) {
        debug!(
            from = format_args!("{:#x}", self.pc),
            to = format_args!("{pc:#x}"),
            discarded = self.queue.len(),
            "frontend redirect"
        );
        self.queue.clear();
        self.pc = pc;
        self.exhausted = false;
    }
}
