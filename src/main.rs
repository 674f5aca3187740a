//! Scansh CLI: scan a directory tree; optionally run a command interactively.

use clap::Parser;
use scansh::engine::Cli;
use scansh::engine::handle_run;
use std::time::Instant;

fn main() {
    let start_time = Instant::now();
    let cli = Cli::parse();
    match handle_run(&cli) {
        Ok(code) => {
            log::debug!("Total time: {:?}", start_time.elapsed());
            std::process::exit(code);
        }
        Err(e) => {
            eprintln!("scansh: {e:#}");
            std::process::exit(1);
        }
    }
}
