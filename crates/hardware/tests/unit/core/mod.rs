/// Controller scenarios and the run loop.
pub mod cpu;


/// Execution units behind the adapter contract.
pub mod units;
