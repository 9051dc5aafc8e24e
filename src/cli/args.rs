//! Command-line argument parsing and validation

use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Manage AWS EC2 instances using Terraform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "manage-instances")]
pub struct Args {
    /// Action to perform
    #[arg(value_enum)]
    pub action: Action,

    /// Directory where your Terraform files (.tf) are located
    #[arg(long = "terraform-dir", default_value = ".")]
    pub terraform_dir: PathBuf,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

/// Top-level operations
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Provision the instances
    Create,
    /// Terminate the instances
    Destroy,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Destroy => f.write_str("destroy"),
        }
    }
}

/// Parse command line arguments
pub fn parse_args() -> Result<Args, clap::Error> {
    Args::try_parse()
}
