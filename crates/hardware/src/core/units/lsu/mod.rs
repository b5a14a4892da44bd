//! Load/Store Unit (LSU).
//!
//! Performs its memory access when an operation is accepted and reports the
//! result after the configured load or store latency. Memory operations reach
//! the unit in program order (select holds younger memory operations behind
//! an older one that cannot issue), so performing the access at issue keeps
//! loads, stores and the reservation consistent with program order.
//!
//! - [`memory`]: the shared memory, store buffer and reservation.
//! - [`store_buffer`]: deferred stores awaiting commit.

/// Shared memory subsystem with the reservation register.
pub mod memory;

/// Store buffer for deferred memory writes.
pub mod store_buffer;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::trace;

pub use self::memory::MemorySubsystem;
pub use self::store_buffer::StoreBuffer;
use super::{Completion, ExecutionUnit, IssueOutcome, IssueRequest, UnitClass};
use crate::isa::Opcode;

/// Store-conditional result when the store was performed.
pub const SC_SUCCESS: u64 = 0;

/// Store-conditional result when the reservation was lost.
pub const SC_FAILURE: u64 = 1;

#[derive(Clone, Copy, Debug)]
struct InFlight {
    remaining: u64,
    done: Completion,
}

/// Load/Store Unit.
#[derive(Debug)]
pub struct Lsu {
    memory: Rc<RefCell<MemorySubsystem>>,
    load_latency: u64,
    store_latency: u64,
    in_flight: VecDeque<InFlight>,
    accepted_this_cycle: bool,
}

impl Lsu {
    /// Creates an LSU over the shared `memory`.
    pub fn new(memory: Rc<RefCell<MemorySubsystem>>, load_latency: u64, store_latency: u64) -> Self {
        Self {
            memory,
            load_latency: load_latency.max(1),
            store_latency: store_latency.max(1),
            in_flight: VecDeque::new(),
            accepted_this_cycle: false,
        }
    }

    /// Performs the access for `req`, or `None` if the store buffer is full.
    fn access(&self, req: &IssueRequest) -> Option<(Completion, u64)> {
        let addr = req.a.wrapping_add(req.imm as u64);
        let mut done = Completion::for_request(req, 0);
        done.mem_addr = Some(addr);
        let mut mem = self.memory.borrow_mut();

        let latency = match req.opcode {
            Opcode::Ld => {
                done.value = mem.load(addr);
                self.load_latency
            }
            Opcode::Lr => {
                done.value = mem.load_reserved(req.seq, addr);
                self.load_latency
            }
            Opcode::Sd => {
                if !mem.store(req.seq, addr, req.b) {
                    return None;
                }
                done.store_data = Some(req.b);
                self.store_latency
            }
            Opcode::Sc => {
                if !mem.can_buffer_store() {
                    return None;
                }
                if mem.store_conditional(req.seq, addr, req.b) {
                    done.value = SC_SUCCESS;
                    done.store_data = Some(req.b);
                } else {
                    done.value = SC_FAILURE;
                }
                self.store_latency
            }
            _ => self.load_latency,
        };
        trace!(
            seq = req.seq,
            opcode = ?req.opcode,
            addr = format_args!("{addr:#x}"),
            value = done.value,
            "memory access"
        );
        Some((done, latency))
    }
}

impl ExecutionUnit for Lsu {
    fn class(&self) -> UnitClass {
        UnitClass::Lsu
    }

    fn can_accept(&self) -> bool {
        !self.accepted_this_cycle
    }

    fn issue(&mut self, req: IssueRequest) -> IssueOutcome {
        if !self.can_accept() {
            return IssueOutcome::Busy;
        }
        let Some((done, latency)) = self.access(&req) else {
            return IssueOutcome::Busy;
        };
        self.in_flight.push_back(InFlight {
            remaining: latency - 1,
            done,
        });
        self.accepted_this_cycle = true;
        IssueOutcome::Accepted
    }

    fn tick(&mut self) {
        self.accepted_this_cycle = false;
        for op in &mut self.in_flight {
            op.remaining = op.remaining.saturating_sub(1);
        }
    }

    fn poll_result(&mut self) -> Option<Completion> {
        let ready = self.in_flight.iter().position(|op| op.remaining == 0)?;
        self.in_flight.remove(ready).map(|op| op.done)
    }

    fn flush(&mut self) {
        self.in_flight.clear();
        self.accepted_this_cycle = false;
    }

    fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}
