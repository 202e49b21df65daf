mod cli;

use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    // Raw request/response tracing is logged at debug level
    let level = if args.trace {
        args.verbose.log_level_filter().max(LevelFilter::Debug)
    } else {
        args.verbose.log_level_filter()
    };

    if let Err(error) = stderrlog::new()
        .module(module_path!())
        .verbosity(level)
        .init()
    {
        eprintln!("Failed to initialize logging: {error}");
    }

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", foxip::Diagnostic::from(&error));
            ExitCode::FAILURE
        }
    }
}
