//! # clinicdesk CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/clinicdesk/cli/`, and
//! this file only invokes `cli::run()` and handles process termination. All page
//! behavior is in the `clinicdesk` library; see its crate docs for the layering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
