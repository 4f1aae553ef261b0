// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Run golden-file suites of command line test cases
#[derive(Parser, Debug, Clone)]
#[command(name = "goldfish", version, about = "Run golden-file test suites")]
pub struct Cli {
    /// Suite files (TOML, or JSON by extension)
    #[arg(value_name = "SUITE", required = true)]
    pub suites: Vec<PathBuf>,

    /// Rewrite every golden file with the observed output
    #[arg(short, long)]
    pub update: bool,

    /// Use this golden directory for every case
    #[arg(long, value_name = "DIR")]
    pub golden_dir: Option<PathBuf>,

    /// Log case progress to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
