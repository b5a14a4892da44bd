


/// Fixed-latency unit timing.
pub mod pipe;
