//! Core statistics collection and reporting.
//!
//! This module tracks performance metrics for the scheduling core. It provides:
//! 1. **Cycle and IPC:** Total cycles, committed instructions and derived metrics.
//! 2. **Stage throughput:** Instructions fetched, dispatched, issued and completed.
//! 3. **Branch prediction:** Branches committed, mispredictions and flushes.
//! 4. **Stalls:** Dispatch rejections by cause and issue attempts refused by busy units.

use std::fmt;

/// Performance counters of a `Core`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreStats {
    /// Cycles simulated.
    pub cycles: u64,
    /// Instructions fetched into the frontend queue.
    pub fetched: u64,
    /// Instructions accepted by the window.
    pub dispatched: u64,
    /// Instructions handed to an execution unit.
    pub issued: u64,
    /// Completions accepted by the window.
    pub completed: u64,
    /// Instructions retired in program order.
    pub committed: u64,

    /// Branches and jumps retired.
    pub branches: u64,
    /// Branches and jumps whose prediction was wrong.
    pub mispredictions: u64,
    /// Window flushes.
    pub flushes: u64,
    /// In-flight instructions discarded by flushes.
    pub squashed: u64,

    /// Dispatch attempts rejected because the window was full.
    pub stalls_window_full: u64,
    /// Dispatch attempts rejected for lack of a physical register.
    pub stalls_no_register: u64,
    /// Of `stalls_no_register`, rejections while registers were free but none
    /// sorted above the destination's live mapping.
    pub stalls_register_floor: u64,
    /// Selected instructions a unit refused.
    pub issue_busy: u64,
    /// Completions dropped because their slot was no longer waiting for them.
    pub stale_completions: u64,
    /// Committed stores written to memory.
    pub stores_drained: u64,
}

impl CoreStats {
    /// Committed instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.committed as f64 / self.cycles as f64
        }
    }

    /// Fraction of retired branches that were predicted correctly.
    pub fn branch_accuracy(&self) -> f64 {
        if self.branches == 0 {
            1.0
        } else {
            1.0 - self.mispredictions as f64 / self.branches as f64
        }
    }
}

impl fmt::Display for CoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "CORE STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.committed)?;
        writeln!(f, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "PIPELINE")?;
        writeln!(f, "  fetched                {}", self.fetched)?;
        writeln!(f, "  dispatched             {}", self.dispatched)?;
        writeln!(f, "  issued                 {}", self.issued)?;
        writeln!(f, "  completed              {}", self.completed)?;
        writeln!(f, "  committed              {}", self.committed)?;
        writeln!(f, "BRANCH")?;
        writeln!(f, "  branches               {}", self.branches)?;
        writeln!(f, "  mispredictions         {}", self.mispredictions)?;
        writeln!(f, "  accuracy               {:.2}%", self.branch_accuracy() * 100.0)?;
        writeln!(f, "  flushes                {}", self.flushes)?;
        writeln!(f, "  squashed               {}", self.squashed)?;
        writeln!(f, "STALLS")?;
        writeln!(f, "  dispatch.window_full   {}", self.stalls_window_full)?;
        writeln!(f, "  dispatch.no_register   {}", self.stalls_no_register)?;
        writeln!(f, "  dispatch.reg_floor     {}", self.stalls_register_floor)?;
        writeln!(f, "  issue.busy             {}", self.issue_busy)?;
        writeln!(f, "  complete.stale         {}", self.stale_completions)?;
        writeln!(f, "MEMORY")?;
        write!(f, "  stores_drained         {}", self.stores_drained)
    }
}
