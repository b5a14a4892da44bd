//! Core Controller Definition and Initialization.
//!
//! This module defines the `Core` structure, the owner of everything the
//! per-cycle stages touch. It coordinates the following:
//! 1. **Scheduling State:** The instruction window with its rename state.
//! 2. **Execution Units:** ALU, multiplier, divider and load/store instances behind the adapter trait.
//! 3. **Memory:** The memory subsystem shared by the load/store units.
//! 4. **Frontend:** Program counter, fetch queue, instruction source and branch predictor.

/// Per-cycle sequencing, flush recovery and the run loop.
pub mod execution;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use self::execution::{RunSummary, TickOutcome};
use crate::common::{ArchReg, ConfigError};
use crate::config::Config;
use crate::core::pipeline::{Frontend, InstructionSource};
use crate::core::units::ExecutionUnit;
use crate::core::units::bru::{BranchPredictor, StaticPredictor};
use crate::core::units::lsu::{Lsu, MemorySubsystem};
use crate::core::units::pipe::FixedLatencyUnit;
use crate::core::window::InstructionWindow;
use crate::stats::CoreStats;

/// Out-of-order scheduling core.
pub struct Core {
    config: Config,
    window: InstructionWindow,
    units: Vec<Box<dyn ExecutionUnit>>,
    memory: Rc<RefCell<MemorySubsystem>>,
    frontend: Frontend,
    source: Box<dyn InstructionSource>,
    predictor: Box<dyn BranchPredictor>,
    stats: CoreStats,
}

impl Core {
    /// Builds a core with the units named by `config` and a static predictor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn new(
        config: Config,
        source: impl InstructionSource + 'static,
    ) -> Result<Self, ConfigError> {
        let memory = Rc::new(RefCell::new(MemorySubsystem::from_config(&config.memory)));
        let units = Self::default_units(&config, &memory);
        Self::from_parts(config, Box::new(source), memory, units)
    }

    /// Builds a core issuing to `units` instead of the configured ones.
    ///
    /// The unit counts in `config` are ignored; ports follow the units given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn with_units(
        config: Config,
        source: impl InstructionSource + 'static,
        units: Vec<Box<dyn ExecutionUnit>>,
    ) -> Result<Self, ConfigError> {
        let memory = Rc::new(RefCell::new(MemorySubsystem::from_config(&config.memory)));
        Self::from_parts(config, Box::new(source), memory, units)
    }

    /// Builds a core from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn from_parts(
        config: Config,
        source: Box<dyn InstructionSource>,
        memory: Rc<RefCell<MemorySubsystem>>,
        units: Vec<Box<dyn ExecutionUnit>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = InstructionWindow::new(&config);
        let frontend = Frontend::new(source.entry(), config.window.dispatch_width * 2);
        Ok(Self {
            config,
            window,
            units,
            memory,
            frontend,
            source,
            predictor: Box::new(StaticPredictor::new()),
            stats: CoreStats::default(),
        })
    }

    /// The ALU, multiplier, divider and load/store instances `config` asks for.
    pub fn default_units(
        config: &Config,
        memory: &Rc<RefCell<MemorySubsystem>>,
    ) -> Vec<Box<dyn ExecutionUnit>> {
        let mut units: Vec<Box<dyn ExecutionUnit>> = FixedLatencyUnit::from_config(config)
            .into_iter()
            .map(|u| Box::new(u) as Box<dyn ExecutionUnit>)
            .collect();
        for _ in 0..config.units.lsu {
            units.push(Box::new(Lsu::new(
                Rc::clone(memory),
                config.latency.load,
                config.latency.store,
            )));
        }
        units
    }

    /// Replaces the branch predictor.
    #[must_use]
    pub fn with_predictor(mut self, predictor: impl BranchPredictor + 'static) -> Self {
        self.predictor = Box::new(predictor);
        self
    }

    /// Configuration the core was built with.
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The instruction window.
    #[inline]
    pub const fn window(&self) -> &InstructionWindow {
        &self.window
    }

    /// The frontend.
    #[inline]
    pub const fn frontend(&self) -> &Frontend {
        &self.frontend
    }

    /// Shared memory subsystem.
    #[inline]
    pub const fn memory(&self) -> &Rc<RefCell<MemorySubsystem>> {
        &self.memory
    }

    /// Performance counters.
    #[inline]
    pub const fn stats(&self) -> &CoreStats {
        &self.stats
    }

    /// Cycles simulated so far.
    #[inline]
    pub const fn cycle(&self) -> u64 {
        self.stats.cycles
    }

    /// Committed value of architectural register `reg`.
    pub fn arch_reg(&self, reg: u8) -> u64 {
        self.window.arch_regs().read(ArchReg(reg))
    }

    /// Sets the committed value of architectural register `reg`.
    ///
    /// Meant for initial state; in-flight consumers that already captured
    /// the old value are not updated.
    pub fn set_arch_reg(&mut self, reg: u8, value: u64) {
        self.window.arch_regs_mut().write(ArchReg(reg), value);
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("cycle", &self.stats.cycles)
            .field("pc", &format_args!("{:#x}", self.frontend.pc()))
            .field("in_flight", &self.window.in_flight_count())
            .field("units", &self.units.len())
            .finish_non_exhaustive()
    }
}
