/// Run loop, statistics and recovery paths.
pub mod execution;
