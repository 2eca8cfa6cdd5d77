//! `configguard` — structural and secret-leak validation for model
//! configuration files

use clap::Parser;

use configguard::cli::args::Cli;
use configguard::cli::commands;
use configguard::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
