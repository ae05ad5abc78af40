//! Table loading and column extraction using Polars

use crate::error::PlotError;
use crate::model::{ClusterAssignment, MISSING_LABEL};
use polars::prelude::*;
use std::path::Path;

/// Name of the horizontal coordinate column
pub const X_COLUMN: &str = "x";
/// Name of the vertical coordinate column
pub const Y_COLUMN: &str = "y";
/// Position of the first cluster-assignment column; every column from here on is one
pub const FIRST_ASSIGNMENT_COLUMN: usize = 2;

/// Point coordinates taken from the `x` and `y` columns
///
/// Empty cells are stored as NaN and such rows are left out of the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Coordinates {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x, y) pairs in row order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Whether row `row` has both coordinates
    pub fn is_complete(&self, row: usize) -> bool {
        self.x[row].is_finite() && self.y[row].is_finite()
    }
}

/// Input table, read-only after load
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

/// Load a CSV file with a header row into a validated `Table`
///
/// # Errors
/// * `InputNotFound` if the path is not a file
/// * `MalformedTable` if the CSV cannot be parsed
/// * `InsufficientColumns` / `MissingRequiredColumn` from [`Table::from_frame`]
pub fn load_table(path: impl AsRef<Path>) -> crate::Result<Table> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PlotError::InputNotFound(path.to_path_buf()).into());
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| PlotError::MalformedTable(e.to_string()))?;

    tracing::debug!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded table"
    );

    Table::from_frame(frame)
}

impl Table {
    /// Wrap a `DataFrame`, checking that the coordinate columns exist
    pub fn from_frame(frame: DataFrame) -> crate::Result<Self> {
        if frame.width() < FIRST_ASSIGNMENT_COLUMN {
            return Err(PlotError::InsufficientColumns {
                found: frame.width(),
            }
            .into());
        }

        let table = Self { frame };
        let names = table.column_names();
        for required in [X_COLUMN, Y_COLUMN] {
            if !names.iter().any(|name| name == required) {
                return Err(PlotError::MissingRequiredColumn(required.to_string()).into());
            }
        }

        if names[0] != X_COLUMN || names[1] != Y_COLUMN {
            tracing::warn!(
                first = %names[0],
                second = %names[1],
                "coordinate columns are not the first two; \
                 columns from position {} are still treated as cluster assignments",
                FIRST_ASSIGNMENT_COLUMN
            );
        }

        Ok(table)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect()
    }

    /// Number of data rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Number of cluster-assignment columns (all columns after the first two)
    pub fn assignment_column_count(&self) -> usize {
        self.width().saturating_sub(FIRST_ASSIGNMENT_COLUMN)
    }

    /// Extract the `x` and `y` columns as floats
    pub fn coordinates(&self) -> crate::Result<Coordinates> {
        Ok(Coordinates {
            x: self.numeric_column(X_COLUMN)?,
            y: self.numeric_column(Y_COLUMN)?,
        })
    }

    /// Read the cluster-assignment column at `position` (>= 2)
    pub fn cluster_assignment(&self, position: usize) -> crate::Result<ClusterAssignment> {
        if position < FIRST_ASSIGNMENT_COLUMN || position >= self.width() {
            anyhow::bail!(
                "Column position {} is not a cluster-assignment column (valid: {}..{})",
                position,
                FIRST_ASSIGNMENT_COLUMN,
                self.width()
            );
        }

        let series = self.frame.get_columns()[position].as_materialized_series();
        let name = series.name().to_string();
        let as_text = series
            .cast(&DataType::String)
            .map_err(|e| PlotError::MalformedTable(e.to_string()))?;

        let labels = as_text
            .str()
            .map_err(|e| PlotError::MalformedTable(e.to_string()))?
            .into_iter()
            .map(|value| match value.map(str::trim) {
                Some(label) if !label.is_empty() => label.to_string(),
                _ => MISSING_LABEL.to_string(),
            })
            .collect();

        Ok(ClusterAssignment::from_labels(name, position, labels))
    }

    /// All cluster-assignment columns, left to right, read lazily
    pub fn cluster_assignments(
        &self,
    ) -> impl Iterator<Item = crate::Result<ClusterAssignment>> + '_ {
        (FIRST_ASSIGNMENT_COLUMN..self.width())
            .map(move |position| self.cluster_assignment(position))
    }

    /// Read a named column as `f64`, trimming text cells before parsing
    ///
    /// Empty cells become NaN; any other unparsable text is `MalformedTable`.
    fn numeric_column(&self, name: &str) -> crate::Result<Vec<f64>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| PlotError::MissingRequiredColumn(name.to_string()))?;
        let series = column.as_materialized_series();

        let values = if series.dtype() == &DataType::String {
            series
                .str()
                .map_err(|e| PlotError::MalformedTable(e.to_string()))?
                .into_iter()
                .enumerate()
                .map(|(row, cell)| match cell.map(str::trim) {
                    None | Some("") => Ok(f64::NAN),
                    Some(text) => text.parse::<f64>().map_err(|_| {
                        PlotError::MalformedTable(format!(
                            "non-numeric value '{}' in column '{}' at row {}",
                            text,
                            name,
                            row + 1
                        ))
                    }),
                })
                .collect::<std::result::Result<Vec<_>, _>>()?
        } else {
            let floats = series
                .cast(&DataType::Float64)
                .map_err(|e| PlotError::MalformedTable(e.to_string()))?;
            floats
                .f64()
                .map_err(|e| PlotError::MalformedTable(e.to_string()))?
                .into_iter()
                .map(|value| value.unwrap_or(f64::NAN))
                .collect::<Vec<_>>()
        };

        Ok(values)
    }
}
