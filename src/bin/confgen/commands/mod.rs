//! Command implementations

pub mod check;
pub mod completions;
pub mod explain;
pub mod generate;
pub mod init;
