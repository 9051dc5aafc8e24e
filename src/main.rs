#![allow(clippy::cargo_common_metadata)]
use instance_provisioner::{cli, config::Config, error::ProvisionError, setup_logging};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments; usage errors exit 1, --help/--version exit 0
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(outcome) => {
            tracing::debug!("Finished with {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            e.downcast_ref::<ProvisionError>()
                .map_or(ExitCode::FAILURE, |err| ExitCode::from(err.exit_code()))
        }
    }
}

fn run(args: &cli::Args) -> anyhow::Result<cli::Outcome> {
    // Setup logging based on debug flag
    setup_logging(args.debug)?;

    // Validates the Terraform directory before anything is invoked
    let config = Config::from_args(args)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    cli::execute_command(&config, args.action, &mut stdin.lock(), &mut stdout.lock())
}
