//! clusterplot: scatter plots of precomputed cluster assignments
//!
//! Reads a CSV table with `x` and `y` coordinate columns followed by any number
//! of cluster-assignment columns, and writes one PNG per assignment column with
//! the points coloured by cluster.

pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod palette;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{load_table, Coordinates, Table};
pub use error::PlotError;
pub use model::ClusterAssignment;
pub use palette::hls_palette;
pub use viz::{generate_cluster_plots, render_cluster_plot, RenderedPlot};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
