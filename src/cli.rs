//! Command-line interface definitions and argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Render one scatter plot per cluster-assignment column of a CSV table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file (columns: x, y, then one column per clustering)
    pub input: PathBuf,

    /// Directory the PNG images are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter directive, used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Stdout dump line for the process arguments
pub fn invocation_line<I, S>(argv: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    format!("{:?}", argv)
}
