//! Configuration system for the scheduling core.
//!
//! This module defines all configuration structures used to parameterize the core. It provides:
//! 1. **Defaults:** Baseline sizes and latencies for the window, register files and units.
//! 2. **Structures:** Hierarchical config for the window, registers, units, latencies and memory.
//! 3. **Validation:** Consistency checks applied before a `Core` is built.
//!
//! Configuration is supplied as JSON (`Config::from_json`, `Config::from_file`) or use `Config::default()`.

use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the core.
mod defaults {
    /// Instruction window slots.
    pub const WINDOW_CAPACITY: usize = 32;

    /// Instructions renamed and dispatched per cycle.
    pub const DISPATCH_WIDTH: usize = 4;

    /// Instructions selected for issue per cycle, across all classes.
    pub const ISSUE_WIDTH: usize = 4;

    /// Instructions retired per cycle.
    pub const COMMIT_WIDTH: usize = 4;

    /// Architectural integer registers.
    pub const ARCH_REGS: usize = 32;

    /// Physical registers, including the reserved architectural ids.
    pub const PHYS_REGS: usize = 96;

    /// ALU instances (also resolve branches and jumps).
    pub const ALU_UNITS: usize = 2;

    /// Multiplier instances.
    pub const MUL_UNITS: usize = 1;

    /// Divider instances.
    pub const DIV_UNITS: usize = 1;

    /// Load/store unit instances.
    pub const LSU_UNITS: usize = 1;

    /// ALU latency in cycles.
    pub const ALU_LATENCY: u64 = 1;

    /// Multiplier latency in cycles.
    pub const MUL_LATENCY: u64 = 3;

    /// Divider latency in cycles.
    pub const DIV_LATENCY: u64 = 12;

    /// Load latency in cycles.
    pub const LOAD_LATENCY: u64 = 2;

    /// Store (address/data resolution) latency in cycles.
    pub const STORE_LATENCY: u64 = 1;

    /// Store buffer entries.
    pub const STORE_BUFFER_SIZE: usize = 8;

    /// Committed stores written to memory per cycle.
    pub const DRAIN_PER_CYCLE: usize = 1;
}

/// Root configuration structure containing all core settings.
///
/// # Examples
///
/// ```
/// use oocore::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.window.capacity, 32);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use oocore::config::Config;
///
/// let json = r#"{
///     "window": { "capacity": 16, "issue_width": 2 },
///     "registers": { "phys_regs": 64 },
///     "units": { "alu": 1 },
///     "latency": { "div": 20, "div_pipelined": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.window.capacity, 16);
/// assert_eq!(config.window.commit_width, 4);
/// assert_eq!(config.registers.phys_regs, 64);
/// assert_eq!(config.units.alu, 1);
/// assert!(config.latency.div_pipelined);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Instruction window sizing and per-cycle widths
    #[serde(default)]
    pub window: WindowConfig,
    /// Architectural and physical register files
    #[serde(default)]
    pub registers: RegisterConfig,
    /// Execution unit instance counts (per-class issue ports)
    #[serde(default)]
    pub units: UnitConfig,
    /// Execution unit latencies
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Store buffer and memory drain
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that every parameter is in range and mutually consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("window.capacity", self.window.capacity)?;
        positive("window.dispatch_width", self.window.dispatch_width)?;
        positive("window.issue_width", self.window.issue_width)?;
        positive("window.commit_width", self.window.commit_width)?;
        positive("registers.arch_regs", self.registers.arch_regs)?;
        if self.registers.arch_regs > usize::from(u8::MAX) + 1 {
            return Err(ConfigError::Invalid {
                field: "registers.arch_regs",
                reason: format!("{} exceeds 256", self.registers.arch_regs),
            });
        }
        if self.registers.phys_regs <= self.registers.arch_regs {
            return Err(ConfigError::Invalid {
                field: "registers.phys_regs",
                reason: format!(
                    "{} must exceed arch_regs ({})",
                    self.registers.phys_regs, self.registers.arch_regs
                ),
            });
        }
        if self.registers.phys_regs > usize::from(u16::MAX) {
            return Err(ConfigError::Invalid {
                field: "registers.phys_regs",
                reason: format!("{} exceeds 65535", self.registers.phys_regs),
            });
        }
        positive("units.alu", self.units.alu)?;
        positive("units.mul", self.units.mul)?;
        positive("units.div", self.units.div)?;
        positive("units.lsu", self.units.lsu)?;
        positive("latency.alu", self.latency.alu as usize)?;
        positive("latency.mul", self.latency.mul as usize)?;
        positive("latency.div", self.latency.div as usize)?;
        positive("latency.load", self.latency.load as usize)?;
        positive("latency.store", self.latency.store as usize)?;
        positive("memory.store_buffer_size", self.memory.store_buffer_size)?;
        positive("memory.drain_per_cycle", self.memory.drain_per_cycle)?;
        Ok(())
    }
}

/// Rejects a zero-valued parameter.
fn positive(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Instruction window configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    /// Number of window slots
    #[serde(default = "WindowConfig::default_capacity")]
    pub capacity: usize,

    /// Instructions dispatched per cycle
    #[serde(default = "WindowConfig::default_dispatch_width")]
    pub dispatch_width: usize,

    /// Instructions issued per cycle across all unit classes
    #[serde(default = "WindowConfig::default_issue_width")]
    pub issue_width: usize,

    /// Instructions committed per cycle
    #[serde(default = "WindowConfig::default_commit_width")]
    pub commit_width: usize,
}

impl WindowConfig {
    /// Returns the default window capacity.
    fn default_capacity() -> usize {
        defaults::WINDOW_CAPACITY
    }

    /// Returns the default dispatch width.
    fn default_dispatch_width() -> usize {
        defaults::DISPATCH_WIDTH
    }

    /// Returns the default issue width.
    fn default_issue_width() -> usize {
        defaults::ISSUE_WIDTH
    }

    /// Returns the default commit width.
    fn default_commit_width() -> usize {
        defaults::COMMIT_WIDTH
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::WINDOW_CAPACITY,
            dispatch_width: defaults::DISPATCH_WIDTH,
            issue_width: defaults::ISSUE_WIDTH,
            commit_width: defaults::COMMIT_WIDTH,
        }
    }
}

/// Register file configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterConfig {
    /// Architectural registers (ids `0..arch_regs` are reserved in the physical space)
    #[serde(default = "RegisterConfig::default_arch_regs")]
    pub arch_regs: usize,

    /// Total physical registers
    #[serde(default = "RegisterConfig::default_phys_regs")]
    pub phys_regs: usize,

    /// Architectural register 0 always reads zero and is never renamed
    #[serde(default = "RegisterConfig::default_hardwired_zero")]
    pub hardwired_zero: bool,
}

impl RegisterConfig {
    /// Returns the default architectural register count.
    fn default_arch_regs() -> usize {
        defaults::ARCH_REGS
    }

    /// Returns the default physical register count.
    fn default_phys_regs() -> usize {
        defaults::PHYS_REGS
    }

    /// Register 0 is hardwired by default.
    fn default_hardwired_zero() -> bool {
        true
    }
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            arch_regs: defaults::ARCH_REGS,
            phys_regs: defaults::PHYS_REGS,
            hardwired_zero: true,
        }
    }
}

/// Execution unit instance counts.
///
/// Each instance accepts at most one instruction per cycle, so the count is
/// also the per-class issue port count.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    /// ALU instances
    #[serde(default = "UnitConfig::default_alu")]
    pub alu: usize,

    /// Multiplier instances
    #[serde(default = "UnitConfig::default_mul")]
    pub mul: usize,

    /// Divider instances
    #[serde(default = "UnitConfig::default_div")]
    pub div: usize,

    /// Load/store unit instances
    #[serde(default = "UnitConfig::default_lsu")]
    pub lsu: usize,
}

impl UnitConfig {
    /// Returns the default ALU count.
    fn default_alu() -> usize {
        defaults::ALU_UNITS
    }

    /// Returns the default multiplier count.
    fn default_mul() -> usize {
        defaults::MUL_UNITS
    }

    /// Returns the default divider count.
    fn default_div() -> usize {
        defaults::DIV_UNITS
    }

    /// Returns the default load/store unit count.
    fn default_lsu() -> usize {
        defaults::LSU_UNITS
    }
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            alu: defaults::ALU_UNITS,
            mul: defaults::MUL_UNITS,
            div: defaults::DIV_UNITS,
            lsu: defaults::LSU_UNITS,
        }
    }
}

/// Execution latencies, in cycles from issue to result.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// ALU, branch and jump latency
    #[serde(default = "LatencyConfig::default_alu")]
    pub alu: u64,

    /// Multiply latency
    #[serde(default = "LatencyConfig::default_mul")]
    pub mul: u64,

    /// Divide/remainder latency
    #[serde(default = "LatencyConfig::default_div")]
    pub div: u64,

    /// Load latency (including load-reserved)
    #[serde(default = "LatencyConfig::default_load")]
    pub load: u64,

    /// Store latency (including store-conditional)
    #[serde(default = "LatencyConfig::default_store")]
    pub store: u64,

    /// Whether a divider accepts a new operation while one is in flight
    #[serde(default)]
    pub div_pipelined: bool,
}

impl LatencyConfig {
    /// Returns the default ALU latency.
    fn default_alu() -> u64 {
        defaults::ALU_LATENCY
    }

    /// Returns the default multiplier latency.
    fn default_mul() -> u64 {
        defaults::MUL_LATENCY
    }

    /// Returns the default divider latency.
    fn default_div() -> u64 {
        defaults::DIV_LATENCY
    }

    /// Returns the default load latency.
    fn default_load() -> u64 {
        defaults::LOAD_LATENCY
    }

    /// Returns the default store latency.
    fn default_store() -> u64 {
        defaults::STORE_LATENCY
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            alu: defaults::ALU_LATENCY,
            mul: defaults::MUL_LATENCY,
            div: defaults::DIV_LATENCY,
            load: defaults::LOAD_LATENCY,
            store: defaults::STORE_LATENCY,
            div_pipelined: false,
        }
    }
}

/// Memory-side configuration of the load/store units.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Store buffer entries
    #[serde(default = "MemoryConfig::default_store_buffer_size")]
    pub store_buffer_size: usize,

    /// Committed stores written to memory per cycle
    #[serde(default = "MemoryConfig::default_drain_per_cycle")]
    pub drain_per_cycle: usize,
}

impl MemoryConfig {
    /// Returns the default store buffer size.
    fn default_store_buffer_size() -> usize {
        defaults::STORE_BUFFER_SIZE
    }

    /// Returns the default drain rate.
    fn default_drain_per_cycle() -> usize {
        defaults::DRAIN_PER_CYCLE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            store_buffer_size: defaults::STORE_BUFFER_SIZE,
            drain_per_cycle: defaults::DRAIN_PER_CYCLE,
        }
    }
}
