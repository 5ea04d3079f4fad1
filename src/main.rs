// src/main.rs

use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "debsweep")]
#[command(author, version, about = "Interactive removal and upgrade tool for dpkg-based systems", long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _cli = Cli::parse();

    commands::cmd_interactive()
}
