//! CLI argument definitions using clap
//!
//! itemvault [FILE]

use clap::Parser;
use std::path::PathBuf;

/// itemvault - interactive manager for game item records
#[derive(Parser, Debug)]
#[command(name = "itemvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Data file to load at startup and save to (prompted for when omitted)
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
