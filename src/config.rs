//! Configuration management for the provisioner
//!
//! Centralizes runtime options and performs the pre-flight directory check.

use crate::{cli::Args, error::ProvisionError};
use std::path::PathBuf;

/// Name of the provisioning binary looked up on PATH
pub const DEFAULT_PROGRAM: &str = "terraform";

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Directory holding the Terraform configuration
    pub terraform_dir: PathBuf,
    /// Provisioning binary to invoke
    pub program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            terraform_dir: PathBuf::from("."),
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, ProvisionError> {
        let config = Self {
            debug: args.debug,
            terraform_dir: args.terraform_dir.clone(),
            ..Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Use a different provisioning binary (a name on PATH or a path)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ProvisionError> {
        if !self.terraform_dir.is_dir() {
            return Err(ProvisionError::directory_not_found(&self.terraform_dir));
        }

        Ok(())
    }
}
