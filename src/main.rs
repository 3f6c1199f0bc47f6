//! # blockhash CLI
//!
//! Command-line interface for block-hash image fingerprints.
//!
//! ## Usage
//! ```bash
//! blockhash hash ~/Photos --bits 16 --method precise
//! blockhash compare 3333 cccc --bits 4
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
