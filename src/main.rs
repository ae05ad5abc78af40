//! clusterplot: one scatter plot per cluster-assignment column
//!
//! Entry point: parses arguments, sets up logging, dumps the loaded table and
//! renders the plots.

use anyhow::Result;
use clap::Parser;
use clusterplot::cli::invocation_line;
use clusterplot::{load_table, viz, Args, Table};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // The argument list is part of the stdout dump, whatever the log filter
    println!("{}", invocation_line(std::env::args()));
    tracing::info!(input = %args.input.display(), "clusterplot starting");

    run(&args)
}

/// Load the table, print it, then write every plot
fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let table = load_table(&args.input)?;
    print_table(&table);

    let rendered = viz::generate_cluster_plots(&table, &args.output_dir)?;

    tracing::info!(
        images = rendered.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "done"
    );

    Ok(())
}

/// Diagnostic dump of the loaded table and its column names
fn print_table(table: &Table) {
    println!("{}", table.frame());
    for name in table.column_names() {
        println!("'{}'", name);
    }
}
