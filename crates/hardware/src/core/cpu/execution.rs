//! Main Execution Loop.
//!
//! This module implements the per-cycle sequencing of the core. It performs the following:
//! 1. **Stage Order:** Commit, complete, advance, issue, then fetch and dispatch.
//! 2. **Recovery:** A misprediction found at commit flushes every unit, the speculative
//!    memory state and the frontend, then ends the cycle early.
//! 3. **Run Loop:** Ticks until the program has drained or a cycle limit is hit.

use tracing::{debug, info, trace};

use super::Core;
use crate::core::pipeline::stages::{
    advance_stage, commit_stage, complete_stage, dispatch_stage, issue_stage,
};

/// What happened during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// All stages ran.
    Progress,
    /// A misprediction flushed the core; fetch resumes at `redirect`.
    Flushed {
        /// Address of the first instruction on the correct path.
        redirect: u64,
    },
}

/// Result of [`Core::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles executed by this call.
    pub cycles: u64,
    /// Instructions committed by this call.
    pub committed: u64,
    /// Flushes during this call.
    pub flushes: u64,
    /// The core went idle (program finished) before the cycle limit.
    pub finished: bool,
}

impl Core {
    /// Advances the core by one cycle.
    pub fn tick(&mut self) -> TickOutcome {
        self.stats.cycles += 1;
        self.window.begin_cycle();

        let in_flight = self.window.in_flight_count() as u64;
        let committed_before = self.stats.committed;
        let redirect = commit_stage(
            &mut self.window,
            &self.memory,
            self.predictor.as_mut(),
            &mut self.stats,
            self.config.window.commit_width,
        );
        if let Some(redirect) = redirect {
            let retired = self.stats.committed - committed_before;
            self.recover(redirect, in_flight.saturating_sub(retired));
            return TickOutcome::Flushed { redirect };
        }

        complete_stage(&mut self.window, &mut self.units, &mut self.stats);
        advance_stage(&mut self.units, &self.memory, &mut self.stats);
        issue_stage(
            &mut self.window,
            &mut self.units,
            &self.memory,
            &mut self.stats,
            self.config.window.issue_width,
        );

        let width = self.config.window.dispatch_width;
        self.stats.fetched +=
            self.frontend
                .fetch(self.source.as_ref(), self.predictor.as_ref(), width) as u64;
        dispatch_stage(&mut self.window, &mut self.frontend, &mut self.stats, width);

        trace!(
            cycle = self.stats.cycles,
            in_flight = self.window.in_flight_count(),
            pc = format_args!("{:#x}", self.frontend.pc()),
            "cycle"
        );
        TickOutcome::Progress
    }

    /// Restores the correct-path state after the window flushed itself at commit.
    fn recover(&mut self, redirect: u64, squashed: u64) {
        for unit in &mut self.units {
            unit.flush();
        }
        self.memory.borrow_mut().flush_speculative();
        self.frontend.redirect(redirect);
        self.stats.flushes += 1;
        self.stats.squashed += squashed;
        debug!(
            cycle = self.stats.cycles,
            redirect = format_args!("{redirect:#x}"),
            squashed,
            "pipeline flushed"
        );
    }

    /// Nothing left to do: fetch exhausted, window empty, units idle and stores drained.
    pub fn is_idle(&self) -> bool {
        self.frontend.is_drained()
            && self.window.is_empty()
            && self.units.iter().all(|u| u.is_idle())
            && self.memory.borrow().is_drained()
    }

    /// Ticks until idle or until `max_cycles` cycles have run.
    pub fn run(&mut self, max_cycles: u64) -> RunSummary {
        let start_cycles = self.stats.cycles;
        let start_committed = self.stats.committed;
        let start_flushes = self.stats.flushes;

        while !self.is_idle() && self.stats.cycles - start_cycles < max_cycles {
            let _ = self.tick();
        }

        let summary = RunSummary {
            cycles: self.stats.cycles - start_cycles,
            committed: self.stats.committed - start_committed,
            flushes: self.stats.flushes - start_flushes,
            finished: self.is_idle(),
        };
        info!(
            cycles = summary.cycles,
            committed = summary.committed,
            ipc = self.stats.ipc(),
            finished = summary.finished,
            "run complete"
        );
        summary
    }
}
