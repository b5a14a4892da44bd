//! Fixed-latency execution unit.
//!
//! The result of an operation is computed when it is accepted and released
//! `latency` cycles later: an operation issued in cycle `N` is returned by
//! `poll_result` during the complete stage of cycle `N + latency`. A
//! pipelined unit accepts one operation per cycle; an unpipelined unit
//! accepts a new one only once the previous result has been polled.

use std::collections::VecDeque;

use super::alu::Alu;
use super::{Completion, ExecutionUnit, IssueOutcome, IssueRequest, UnitClass};
use crate::config::{Config, LatencyConfig};

/// Computes the completion for an accepted request.
pub type Evaluator = fn(&IssueRequest) -> Completion;

#[derive(Clone, Copy, Debug)]
struct InFlight {
    remaining: u64,
    done: Completion,
}

/// A unit with a constant latency.
#[derive(Clone, Debug)]
pub struct FixedLatencyUnit {
    class: UnitClass,
    latency: u64,
    pipelined: bool,
    eval: Evaluator,
    in_flight: VecDeque<InFlight>,
    accepted_this_cycle: bool,
}

impl FixedLatencyUnit {
    /// Creates a unit of `class` evaluating with `eval`.
    pub fn new(class: UnitClass, latency: u64, pipelined: bool, eval: Evaluator) -> Self {
        Self {
            class,
            latency: latency.max(1),
            pipelined,
            eval,
            in_flight: VecDeque::new(),
            accepted_this_cycle: false,
        }
    }

    /// Pipelined integer ALU.
    pub fn alu(latency: u64) -> Self {
        Self::new(UnitClass::Alu, latency, true, Alu::evaluate)
    }

    /// Pipelined multiplier.
    pub fn mul(latency: u64) -> Self {
        Self::new(UnitClass::Mul, latency, true, Alu::evaluate)
    }

    /// Divider, optionally pipelined.
    pub fn div(latency: u64, pipelined: bool) -> Self {
        Self::new(UnitClass::Div, latency, pipelined, Alu::evaluate)
    }

    /// Builds the ALU, multiplier and divider instances named by `config`.
    pub fn from_config(config: &Config) -> Vec<Self> {
        let LatencyConfig {
            alu,
            mul,
            div,
            div_pipelined,
            ..
        } = config.latency;
        let units = &config.units;
        let mut out = Vec::with_capacity(units.alu + units.mul + units.div);
        out.extend((0..units.alu).map(|_| Self::alu(alu)));
        out.extend((0..units.mul).map(|_| Self::mul(mul)));
        out.extend((0..units.div).map(|_| Self::div(div, div_pipelined)));
        out
    }

    /// Cycles from issue to result.
    #[inline]
    pub const fn latency(&self) -> u64 {
        self.latency
    }

    /// Operations accepted and not yet polled.
    #[inline]
    pub fn occupancy(&self) -> usize {
        self.in_flight.len()
    }
}

impl ExecutionUnit for FixedLatencyUnit {
    fn class(&self) -> UnitClass {
        self.class
    }

    fn can_accept(&self) -> bool {
        !self.accepted_this_cycle && (self.pipelined || self.in_flight.is_empty())
    }

    fn issue(&mut self, req: IssueRequest) -> IssueOutcome {
        if !self.can_accept() {
            return IssueOutcome::Busy;
        }
        self.in_flight.push_back(InFlight {
            remaining: self.latency - 1,
            done: (self.eval)(&req),
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
