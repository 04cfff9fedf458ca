//! Command-line arguments for the `paso` binary

use log::LevelFilter;
use paso::ScanOptions;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(
    author,
    version,
    about = "Scans and parses PASO programs, then explores the tokens and syntax tree"
)]
pub struct Args {
    /// The PASO source file to read
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Print the token stream to stdout instead of starting the explorer
    #[clap(long)]
    pub tokens: bool,

    /// Print the syntax tree outline to stdout instead of starting the explorer
    #[clap(long)]
    pub ast: bool,

    /// Indentation width of one tab character
    #[clap(long, default_value_t = 8, value_name = "N")]
    pub tab_width: usize,

    /// Drop comment tokens from the scanner output
    #[clap(long)]
    pub no_comments: bool,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[clap(long, default_value = "warn", value_name = "LEVEL")]
    pub log_level: LevelFilter,
}

impl Args {
    /// Scanner configuration selected on the command line
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            tab_width: self.tab_width,
            emit_comments: !self.no_comments,
        }
    }

    /// Whether output goes to stdout rather than the explorer
    pub fn batch_mode(&self) -> bool {
        self.tokens || self.ast
    }
}
