//! dutyline: reconstruct per-day ON time from a temperature controller log.
//!
//! Parses a controller's switching log, rebuilds the midnight ON/OFF status
//! grid for the analysis window, and writes a per-day CSV table plus bar and
//! line charts of the daily ON hours.

use std::process::ExitCode;

use dutyline::cli;

fn main() -> ExitCode {
    // Run the CLI (logging is initialized by cli::run based on --log-level and --log-format)
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error message
            eprintln!("Error: {e}");

            // Print cause chain in debug mode
            if std::env::var("RUST_BACKTRACE").is_ok() {
                if let Some(source) = std::error::Error::source(&e) {
                    eprintln!("Caused by: {source}");
                }
            }

            // Return appropriate exit code
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
