use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the input table
#[derive(Debug, Error)]
pub enum PlotError {
    /// The input path does not resolve to a file
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The file could not be parsed into uniform rows and columns
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// Fewer than the two coordinate columns are present
    #[error("Insufficient columns: expected at least 2 (x, y), found {found}")]
    InsufficientColumns { found: usize },

    /// A coordinate column is absent
    #[error("Missing required column '{0}'")]
    MissingRequiredColumn(String),
}
