//! Error types for the instance provisioner
//!
//! Every variant is fatal: the CLI reports it and exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the provisioner
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The Terraform working directory is missing or is not a directory
    #[error("Terraform directory '{}' not found.", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The provisioning binary could not be located on PATH
    #[error(
        "'{tool}' command not found. Please ensure Terraform is installed and in your PATH."
    )]
    ToolNotFound {
        tool: String,
        #[source]
        source: Option<which::Error>,
    },

    /// A sub-invocation exited with a non-zero status
    #[error("Terraform command '{command}' failed with exit code {exit_code}")]
    CommandFailed { command: String, exit_code: i32 },

    /// Anything else that went wrong while supervising the child process
    #[error("An unexpected error occurred: {context}")]
    UnexpectedError {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProvisionError {
    /// Create a new missing directory error
    pub fn directory_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Create a new missing tool error
    pub fn tool_not_found(tool: impl Into<String>, source: Option<which::Error>) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            source,
        }
    }

    /// Create a new failed command error
    pub fn command_failed(command: impl Into<String>, exit_code: i32) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
        }
    }

    /// Create a new unexpected error wrapping an I/O failure
    pub fn unexpected(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::UnexpectedError {
            context: context.into(),
            source,
        }
    }

    /// Process exit status reported for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::DirectoryNotFound { .. }
            | Self::ToolNotFound { .. }
            | Self::CommandFailed { .. }
            | Self::UnexpectedError { .. } => 1,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ProvisionError>;
