//! Integration test: image file -> distribution -> text report.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use chrono::DateTime;
use image::{GrayImage, Luma};
use sedsize_grain::{GrainConfig, GrainSizeDistribution, compute_grain_size_distribution};
use sedsize_io::{
    IoError, ReaderConfig, ReportPaths, read_intensity_matrix, save_greyscale, write_report,
};

/// Rippled sediment: a period-8 texture with row-dependent amplitude and phase.
fn rippled(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let amplitude = 20.0 + f64::from((y * 37) % 40);
        let phase = f64::from(y) * 0.9;
        let v = 128.0 + amplitude * (2.0 * PI * f64::from(x) / 8.0 + phase).sin();
        Luma([v.round() as u8])
    })
}

#[test]
fn image_round_trip_and_crop() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("ripples.png");
    save_greyscale(&path, &rippled(80, 64)).expect("save succeeds");

    let full = read_intensity_matrix(&path, &ReaderConfig::default()).expect("read succeeds");
    assert_eq!((full.n_rows(), full.n_cols()), (64, 80));

    let config = ReaderConfig::default().with_crop_central(true);
    let square = read_intensity_matrix(&path, &config).expect("read succeeds");
    assert_eq!((square.n_rows(), square.n_cols()), (64, 64));
    // x offset 80 / 2 - 64 / 2 = 8
    assert_eq!(square.row(5)[0], full.row(5)[8]);
}

#[test]
fn analyse_image_and_write_report() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let image_path = dir.path().join("ripples.png");
    save_greyscale(&image_path, &rippled(64, 64)).expect("save succeeds");

    let matrix =
        read_intensity_matrix(&image_path, &ReaderConfig::default()).expect("read succeeds");
    let config = GrainConfig::new().with_density(1).with_workers(2);
    let dist = compute_grain_size_distribution(&matrix, &config).expect("analysis succeeds");

    let ts = DateTime::parse_from_rfc3339("2026-10-16T09:30:00+00:00").unwrap();
    let prefix = dir.path().join("ripples");
    let paths = write_report(&prefix, &dist, 1.0, &ts).expect("write succeeds");
    assert_eq!(paths, ReportPaths::from_prefix(&prefix));

    let psd = std::fs::read_to_string(&paths.psd).unwrap();
    let rows: Vec<(f64, f64)> = psd
        .lines()
        .map(|line| {
            let (size, weight) = line.split_once(", ").expect("comma-separated pair");
            (size.parse().unwrap(), weight.parse().unwrap())
        })
        .collect();
    assert_eq!(rows.len(), dist.len());
    assert_eq!(rows, dist.iter().collect::<Vec<_>>());
    assert_relative_eq!(rows.iter().map(|r| r.1).sum::<f64>(), 1.0, epsilon = 1e-6);

    let summary = std::fs::read_to_string(&paths.summary).unwrap();
    let mean: f64 = summary.lines().nth(5).unwrap().parse().unwrap();
    assert_eq!(mean, dist.mean());
}

#[test]
fn summary_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let dist = GrainSizeDistribution::from_weighted(vec![1.0, 3.0], vec![0.5, 0.5]).unwrap();
    let ts = DateTime::parse_from_rfc3339("2026-01-05T21:04:00-03:00").unwrap();

    let paths = write_report(&dir.path().join("pair"), &dist, 0.5, &ts).expect("write succeeds");

    let summary = std::fs::read_to_string(&paths.summary).unwrap();
    let expected = "\
% 9:04PM -0300 on Jan 05, 2026
% grain size results ...
% resolution:
0.5
% mean grain size:
2.0
% sorting :
1.0
% skewness :
0.0
% kurtosis :
0.01
";
    assert_eq!(summary, expected);

    let psd = std::fs::read_to_string(&paths.psd).unwrap();
    assert_eq!(psd, "1.0, 0.5\n3.0, 0.5\n");
}

#[test]
fn undecodable_image() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    let err = read_intensity_matrix(&path, &ReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::Image { .. }));
}
