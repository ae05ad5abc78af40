//! Visualization functions using Plotters for cluster assignments

use crate::data::{Coordinates, Table};
use crate::model::ClusterAssignment;
use crate::palette::hls_palette;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Extension of every written image
pub const IMAGE_EXTENSION: &str = "png";

const PLOT_SIZE: (u32, u32) = (640, 480);
const POINT_RADIUS: i32 = 3;

/// Summary of one image written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPlot {
    /// Plot title, the assignment column's name
    pub title: String,
    pub path: PathBuf,
    /// Palette size, the missing level included
    pub k: usize,
    /// Points drawn; rows with an empty coordinate or label are skipped
    pub points: usize,
}

/// Path of the image for an assignment column
pub fn image_path(output_dir: &Path, column_name: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", column_name, IMAGE_EXTENSION))
}

/// Render one scatter plot per cluster-assignment column
///
/// Columns are processed left to right, each image is written before the next
/// column is read. The first failure aborts the run; images already written
/// are left in place.
pub fn generate_cluster_plots(
    table: &Table,
    output_dir: &Path,
) -> crate::Result<Vec<RenderedPlot>> {
    let coordinates = table.coordinates()?;
    let mut rendered = Vec::with_capacity(table.assignment_column_count());

    for assignment in table.cluster_assignments() {
        let assignment = assignment?;
        let path = image_path(output_dir, &assignment.name);
        rendered.push(render_cluster_plot(&coordinates, &assignment, &path)?);
    }

    Ok(rendered)
}

/// Draw `coordinates` coloured by `assignment` and save the image to `output_path`
///
/// An existing file at `output_path` is overwritten.
pub fn render_cluster_plot(
    coordinates: &Coordinates,
    assignment: &ClusterAssignment,
    output_path: &Path,
) -> crate::Result<RenderedPlot> {
    if assignment.len() != coordinates.len() {
        anyhow::bail!(
            "Column '{}' has {} labels for {} points",
            assignment.name,
            assignment.len(),
            coordinates.len()
        );
    }

    let palette = hls_palette(assignment.k());
    let missing = assignment.missing_level();
    let drawn: Vec<(usize, (f64, f64))> = assignment
        .codes()
        .iter()
        .copied()
        .zip(coordinates.points())
        .enumerate()
        .filter(|&(row, (code, _))| coordinates.is_complete(row) && Some(code) != missing)
        .map(|(_, member)| member)
        .collect();

    let x_range = axis_range(drawn.iter().map(|&(_, (x, _))| x));
    let y_range = axis_range(drawn.iter().map(|&(_, (_, y))| y));

    let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&assignment.name, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x")
        .y_desc("y")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // One series per level so each cluster gets a legend entry
    for (code, (level, &color)) in assignment.levels().iter().zip(palette.iter()).enumerate() {
        if Some(code) == missing {
            continue;
        }
        let members = drawn
            .iter()
            .filter(move |&&(c, _)| c == code)
            .map(move |&(_, point)| Circle::new(point, POINT_RADIUS, color.filled()));

        chart
            .draw_series(members)?
            .label(level.as_str())
            .legend(move |(x, y)| Circle::new((x, y), POINT_RADIUS, color.filled()));
    }

    if assignment.levels().len() > usize::from(missing.is_some()) {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;

    tracing::info!(
        path = %output_path.display(),
        k = assignment.k(),
        points = drawn.len(),
        "cluster plot saved"
    );
    tracing::debug!(
        column = %assignment.name,
        position = assignment.position,
        skipped = coordinates.len() - drawn.len(),
        sizes = ?assignment.cluster_sizes(),
        "cluster sizes"
    );

    Ok(RenderedPlot {
        title: assignment.name.clone(),
        path: output_path.to_path_buf(),
        k: assignment.k(),
        points: drawn.len(),
    })
}

/// Data range padded by 5% on each side; degenerate ranges get a unit pad
fn axis_range(values: impl Iterator<Item = f64> + Clone) -> Range<f64> {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if max - min < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }

    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}
