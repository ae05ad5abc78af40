//! Integration tests for clusterplot

use clusterplot::{generate_cluster_plots, load_table, PlotError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, NamedTempFile};

/// Create a test CSV file with the given contents
fn create_test_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

/// Five points with two clusterings, as written by the benchmark tool
const TWO_RUNS: &str = "\
x,y,run1,run2
0.1, 0.2,0,1
0.4, 0.1,0,1
5.0, 5.2,1,1
5.3, 4.9,1,0
9.0, 0.3,2,0
";

fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();
    entries
}

fn plot_error(err: &anyhow::Error) -> &PlotError {
    err.downcast_ref::<PlotError>()
        .unwrap_or_else(|| panic!("expected PlotError, got {err:?}"))
}

#[test]
fn test_single_clustering_scenario() {
    let input = create_test_csv("x,y,kmeans_k2\n0,0,A\n1,1,B\n2,0,A\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    let rendered = generate_cluster_plots(&table, out.path()).unwrap();

    assert_eq!(rendered.len(), 1);
    let plot = &rendered[0];
    assert_eq!(plot.title, "kmeans_k2");
    assert_eq!(plot.points, 3);
    assert_eq!(plot.k, 2);
    assert_eq!(plot.path, out.path().join("kmeans_k2.png"));
    assert_eq!(sorted_entries(out.path()), vec![out.path().join("kmeans_k2.png")]);
}

#[test]
fn test_one_image_per_assignment_column() {
    let input = create_test_csv(TWO_RUNS);
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    let rendered = generate_cluster_plots(&table, out.path()).unwrap();

    let titles: Vec<&str> = rendered.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["run1", "run2"]);
    assert_eq!(rendered[0].k, 3);
    assert_eq!(rendered[1].k, 2);
    assert!(rendered.iter().all(|p| p.points == 5));

    assert_eq!(
        sorted_entries(out.path()),
        vec![out.path().join("run1.png"), out.path().join("run2.png")]
    );
}

#[test]
fn test_image_count_matches_column_count() {
    let input = create_test_csv("x,y,a,b,c\n0,0,1,1,1\n1,1,2,1,3\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    let rendered = generate_cluster_plots(&table, out.path()).unwrap();

    assert_eq!(rendered.len(), table.width() - 2);
    assert_eq!(sorted_entries(out.path()).len(), 3);
}

#[test]
fn test_coordinates_only_produces_nothing() {
    let input = create_test_csv("x,y\n0,0\n1,1\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    assert_eq!(table.assignment_column_count(), 0);

    let rendered = generate_cluster_plots(&table, out.path()).unwrap();
    assert!(rendered.is_empty());
    assert!(sorted_entries(out.path()).is_empty());
}

#[test]
fn test_rerun_overwrites_same_files() {
    let input = create_test_csv(TWO_RUNS);
    let out = tempdir().unwrap();
    let table = load_table(input.path()).unwrap();

    let first = generate_cluster_plots(&table, out.path()).unwrap();
    let first_bytes: Vec<Vec<u8>> = first.iter().map(|p| fs::read(&p.path).unwrap()).collect();

    let second = generate_cluster_plots(&table, out.path()).unwrap();
    let second_bytes: Vec<Vec<u8>> = second.iter().map(|p| fs::read(&p.path).unwrap()).collect();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(sorted_entries(out.path()).len(), 2);
}

#[test]
fn test_missing_input() {
    let dir = tempdir().unwrap();
    let err = load_table(dir.path().join("kmeans_fit.csv")).unwrap_err();
    assert!(matches!(plot_error(&err), PlotError::InputNotFound(_)));
}

#[test]
fn test_missing_x_column() {
    let input = create_test_csv("a,y,c\n0,0,1\n");
    let err = load_table(input.path()).unwrap_err();
    assert!(matches!(
        plot_error(&err),
        PlotError::MissingRequiredColumn(name) if name == "x"
    ));
}

#[test]
fn test_malformed_coordinates_abort_before_any_image() {
    let input = create_test_csv("x,y,c\n0,0,A\nfoo,1,B\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    let err = generate_cluster_plots(&table, out.path()).unwrap_err();

    assert!(matches!(plot_error(&err), PlotError::MalformedTable(_)));
    assert!(sorted_entries(out.path()).is_empty());
}

#[test]
fn test_extra_field_is_malformed() {
    let input = create_test_csv("x,y,c\n0,0,A,9\n");
    let err = load_table(input.path()).unwrap_err();
    assert!(matches!(plot_error(&err), PlotError::MalformedTable(_)));
}

#[test]
fn test_header_only_table() {
    let input = create_test_csv("x,y,c\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    assert_eq!(table.height(), 0);

    let rendered = generate_cluster_plots(&table, out.path()).unwrap();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].k, 0);
    assert_eq!(rendered[0].points, 0);
    assert!(out.path().join("c.png").exists());
}

#[test]
fn test_empty_label_counts_as_own_cluster() {
    let input = create_test_csv("x,y,c\n0,0,A\n1,1,\n2,0,B\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    let rendered = generate_cluster_plots(&table, out.path()).unwrap();

    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].k, 3);
    assert_eq!(rendered[0].points, 2);
    assert!(out.path().join("c.png").exists());
}

#[test]
fn test_empty_coordinate_skips_point() {
    let input = create_test_csv("x,y,c\n0,0,A\n,1,B\n2,0,B\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    let rendered = generate_cluster_plots(&table, out.path()).unwrap();

    assert_eq!(rendered[0].k, 2);
    assert_eq!(rendered[0].points, 2);
    assert!(out.path().join("c.png").exists());
}

#[test]
fn test_short_row_is_padded() {
    let input = create_test_csv("x,y,c\n0,0,A\n1,1\n2,0,B\n");
    let out = tempdir().unwrap();

    let table = load_table(input.path()).unwrap();
    let rendered = generate_cluster_plots(&table, out.path()).unwrap();

    assert_eq!(rendered[0].k, 3);
    assert_eq!(rendered[0].points, 2);
}
