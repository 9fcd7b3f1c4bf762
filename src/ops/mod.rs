//! High-level operations.
//!
//! This module contains the implementation of confgen commands.

pub mod init;
pub mod report;

pub use init::{init_declaration, DEFAULT_DECLARATION_NAME};
pub use report::{Report, ReportOptions, Summary};
