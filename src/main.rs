use clap::Parser;
use poststudio::{logging, print_error, run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            print_error(cli.json, &e);
            ExitCode::FAILURE
        }
    }
}
