//! Command implementations for the CLI

use crate::{
    cli::Action,
    config::Config,
    core::{confirm::confirm_destroy, terraform::Terraform},
};
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::{info, instrument};

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Instances were provisioned
    Created,
    /// Instances were destroyed
    Destroyed,
    /// The user declined the destroy confirmation
    Cancelled,
}

/// Execute `action` against the configured Terraform directory.
///
/// `init` always runs first. Confirmation for `destroy` is read from
/// `input`; everything the user should see is written to `out`.
#[instrument(skip(config, input, out), fields(dir = %config.terraform_dir.display()))]
pub fn execute_command<R: BufRead, W: Write>(
    config: &Config,
    action: Action,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    let terraform = Terraform::locate(config)?;

    terraform
        .init(out)
        .context("Failed to initialize Terraform")?;

    match action {
        Action::Create => execute_create(&terraform, out),
        Action::Destroy => execute_destroy(&terraform, input, out),
    }
}

/// Execute the create action
#[instrument(skip_all)]
fn execute_create<W: Write>(terraform: &Terraform, out: &mut W) -> anyhow::Result<Outcome> {
    writeln!(
        out,
        "\n--- Applying Terraform to create instances. This may take a few minutes... ---"
    )?;

    terraform
        .apply(out)
        .context("Failed to create instances")?;

    writeln!(out, "\nEC2 instances provisioned successfully!")?;
    writeln!(out, "Check the Terraform output for master and worker IPs.")?;
    out.flush()?;

    info!("Create completed successfully");
    Ok(Outcome::Created)
}

/// Execute the destroy action
#[instrument(skip_all)]
fn execute_destroy<R: BufRead, W: Write>(
    terraform: &Terraform,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    writeln!(
        out,
        "\n--- Destroying Terraform resources. This will terminate your EC2 instances. ---"
    )?;

    let confirmed =
        confirm_destroy(input, out).context("Failed to read destroy confirmation")?;

    if !confirmed {
        writeln!(out, "Destruction cancelled.")?;
        out.flush()?;
        info!("Destroy cancelled by user");
        return Ok(Outcome::Cancelled);
    }

    terraform
        .destroy(out)
        .context("Failed to destroy instances")?;

    writeln!(out, "\nEC2 instances terminated successfully!")?;
    out.flush()?;

    info!("Destroy completed successfully");
    Ok(Outcome::Destroyed)
}
