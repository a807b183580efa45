use hlfetch_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    match Cli::run_from_args() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("hlfetch error: {:#}", err);
            std::process::exit(1);
        }
    }
}
