//! Terraform sub-invocations
//!
//! The three fixed commands this tool issues, each run in the configured
//! working directory with output relayed to the caller's sink.

use crate::{
    config::Config,
    error::{ProvisionError, Result},
    utils::process::ProcessRunner,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Handle to a located Terraform binary bound to one working directory
#[derive(Debug)]
pub struct Terraform {
    name: String,
    program: PathBuf,
    dir: PathBuf,
    runner: ProcessRunner,
}

impl Terraform {
    /// Locate the configured binary on PATH
    #[instrument(skip(config), fields(program = %config.program))]
    pub fn locate(config: &Config) -> Result<Self> {
        let runner = ProcessRunner::new(config.debug);
        let program = runner.locate(&config.program)?;

        let name = Path::new(&config.program)
            .file_name()
            .map_or_else(|| config.program.clone(), |n| n.to_string_lossy().into_owned());

        info!("Using {} at {}", name, program.display());

        Ok(Self {
            name,
            program,
            dir: config.terraform_dir.clone(),
            runner,
        })
    }

    /// `terraform init`
    pub fn init<W: Write>(&self, out: &mut W) -> Result<()> {
        self.run(&["init"], out)
    }

    /// `terraform apply -auto-approve`
    pub fn apply<W: Write>(&self, out: &mut W) -> Result<()> {
        self.run(&["apply", "-auto-approve"], out)
    }

    /// `terraform destroy -auto-approve`
    pub fn destroy<W: Write>(&self, out: &mut W) -> Result<()> {
        self.run(&["destroy", "-auto-approve"], out)
    }

    fn run<W: Write>(&self, args: &[&str], out: &mut W) -> Result<()> {
        let label = format!("{} {}", self.name, args.join(" "));

        writeln!(out, "\n--- Running Terraform: {label} ---")
            .and_then(|()| out.flush())
            .map_err(|e| ProvisionError::unexpected("writing output", e))?;

        self.runner
            .stream_command(&label, &self.program, args, &self.dir, out)?;

        writeln!(out, "--- Terraform: {label} completed successfully ---")
            .map_err(|e| ProvisionError::unexpected("writing output", e))?;

        Ok(())
    }
}
