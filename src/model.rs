//! Cluster assignment columns and their distinct labels

use std::collections::HashMap;

/// Label recorded for an empty cell; it forms its own level and is never drawn
pub const MISSING_LABEL: &str = "NaN";

/// One cluster-assignment column of the input table
///
/// Labels are kept as trimmed strings so numeric and categorical clusterings
/// are handled the same way. The distinct labels (levels) fix the colour order:
/// level `i` is drawn with palette colour `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    /// Column name, also the plot title and image file stem
    pub name: String,
    /// Zero-based column position in the table
    pub position: usize,
    labels: Vec<String>,
    levels: Vec<String>,
    codes: Vec<usize>,
}

impl ClusterAssignment {
    /// Build an assignment from one label per row
    ///
    /// Levels are sorted numerically when every label parses as a number,
    /// otherwise they keep the order in which they first appear. Rows holding
    /// [`MISSING_LABEL`] share one extra level placed after all others.
    pub fn from_labels(name: impl Into<String>, position: usize, labels: Vec<String>) -> Self {
        let mut levels: Vec<String> = Vec::new();
        for label in labels.iter().filter(|label| *label != MISSING_LABEL) {
            if !levels.contains(label) {
                levels.push(label.clone());
            }
        }

        let numeric: Option<Vec<f64>> = levels.iter().map(|l| l.parse::<f64>().ok()).collect();
        if let Some(values) = numeric {
            let mut paired: Vec<(f64, String)> = values.into_iter().zip(levels).collect();
            paired.sort_by(|a, b| a.0.total_cmp(&b.0));
            levels = paired.into_iter().map(|(_, level)| level).collect();
        }

        if labels.iter().any(|label| label == MISSING_LABEL) {
            levels.push(MISSING_LABEL.to_string());
        }

        let codes: Vec<usize> = {
            let index: HashMap<&str, usize> = levels
                .iter()
                .enumerate()
                .map(|(i, level)| (level.as_str(), i))
                .collect();
            labels.iter().map(|label| index[label.as_str()]).collect()
        };

        Self {
            name: name.into(),
            position,
            labels,
            levels,
            codes,
        }
    }

    /// Number of distinct labels, the missing level included
    pub fn k(&self) -> usize {
        self.levels.len()
    }

    /// Index of the level collecting empty cells, if any row has one
    pub fn missing_level(&self) -> Option<usize> {
        self.levels.iter().position(|level| level == MISSING_LABEL)
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Level index of each row, aligned with the table rows
    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows assigned to each level
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &code in &self.codes {
            sizes[code] += 1;
        }
        sizes
    }
}
