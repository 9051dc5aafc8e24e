//! Command-line interface module
//!
//! Provides argument parsing and command execution.

pub mod args;
pub mod commands;

pub use args::{Action, Args, parse_args};
pub use commands::{Outcome, execute_command};
