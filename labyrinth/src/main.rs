use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use labyrinth_lib::args::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match labyrinth_lib::run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("labyrinth: {e}");
            ExitCode::from(2)
        }
    }
}
