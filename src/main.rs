//! Binary entrypoint that launches the fragrance advisor console.

use std::process::ExitCode;

use fragrance_advisor::start_fragrance_advisor;

/// Start the advisor and answer stdin messages until EOF.
fn main() -> ExitCode {
    start_fragrance_advisor::run()
}
