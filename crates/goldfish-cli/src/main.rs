// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! goldfish binary entry point.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use goldfish_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = goldfish::env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let stdout = io::stdout();
    let color = !cli.no_color && stdout.is_terminal();
    ExitCode::from(goldfish_cli::run(&cli, stdout.lock(), color))
}
