//! # Instance Provisioner
//!
//! A thin wrapper around Terraform that creates or destroys the EC2
//! instances described by the `.tf` files in a working directory.
//!
//! ## Features
//!
//! - Always runs `terraform init` before anything else
//! - `create` runs `terraform apply -auto-approve`
//! - `destroy` asks for an explicit `yes` before `terraform destroy -auto-approve`
//! - Terraform output is relayed line by line as it is produced
//!
//! ## Example
//!
//! ```no_run
//! use instance_provisioner::{cli::{Action, execute_command}, config::Config};
//!
//! let config = Config::default();
//! let stdin = std::io::stdin();
//! let outcome = execute_command(
//!     &config,
//!     Action::Create,
//!     &mut stdin.lock(),
//!     &mut std::io::stdout(),
//! )?;
//! println!("{outcome:?}");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
///
/// Logs go to stderr; stdout carries the relayed Terraform output.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
