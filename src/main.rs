//! Spritekit - Command-line pixel sprite editor

use std::process::ExitCode;

use spritekit::cli;

fn main() -> ExitCode {
    cli::run()
}
