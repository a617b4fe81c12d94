use std::io;
use std::process::ExitCode;

use clap::Parser;

use coverage_paths::logging::init_logging;
use coverage_paths::runner::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match run(&cli, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
