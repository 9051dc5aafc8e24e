//! Utility modules for common functionality
//!
//! Provides process execution with streamed output.

pub mod process;

pub use process::ProcessRunner;
