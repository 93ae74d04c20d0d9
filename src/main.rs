mod cli;
#[cfg(feature = "gui")]
mod gui;
mod logging;
mod pipeline;

use crate::cli::Args;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(feature = "gui")]
    if std::env::args_os().len() <= 1 {
        logging::init(0);
        return gui::run();
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version land here too, on stdout and successfully.
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        },
    };
    logging::init(args.verbose);
    cli::run(&args)
}
