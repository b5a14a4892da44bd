/// Program files on disk.
pub mod program_loading;
