//! depgate CLI
//!
//! Dependency-change gate: exits 10 when a manifest's dependencies changed
//! since the last check (or the manifest is new) and 11 when they did not.

use clap::Parser;
use depgate_engine::EXIT_FAILURE;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "depgate", version)]
#[command(
    about = "Dependency-change gate for requirements.txt and package.json",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    check: commands::check::CheckArgs,
}

fn main() {
    let cli = Cli::parse();

    let code = match commands::check::execute(cli.check) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}
