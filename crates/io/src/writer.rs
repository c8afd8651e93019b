//! Text reports for grain-size distributions.
//!
//! Two files are written per analysed image:
//!
//! - `<prefix>_psd.txt`: one `size, weight` pair per line;
//! - `<prefix>_summary.txt`: `%`-prefixed labels, each followed by its value
//!   on the next line.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use tracing::{info, warn};

use sedsize_grain::GrainSizeDistribution;

use crate::error::IoError;

/// Timestamp layout of the summary header, e.g. ` 3:07PM +0200 on Oct 16, 2026`.
const TIMESTAMP_FORMAT: &str = "%l:%M%p %z on %b %d, %Y";

/// Output locations of the two report files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Distribution table.
    pub psd: PathBuf,
    /// Summary statistics.
    pub summary: PathBuf,
}

impl ReportPaths {
    /// Derives both paths by appending `_psd.txt` and `_summary.txt` to `prefix`.
    pub fn from_prefix(prefix: &Path) -> Self {
        let with_suffix = |suffix: &str| {
            let mut name = prefix.as_os_str().to_owned();
            name.push(suffix);
            PathBuf::from(name)
        };
        Self {
            psd: with_suffix("_psd.txt"),
            summary: with_suffix("_summary.txt"),
        }
    }
}

/// Write the distribution table and summary next to `prefix`.
///
/// The table is written first. If the summary then fails, the table is
/// removed again so a failed report leaves neither file behind.
///
/// # Errors
///
/// Returns [`IoError::Write`] if either file cannot be created or written.
pub fn write_report(
    prefix: &Path,
    distribution: &GrainSizeDistribution,
    resolution: f64,
    timestamp: &DateTime<FixedOffset>,
) -> Result<ReportPaths, IoError> {
    let paths = ReportPaths::from_prefix(prefix);
    write_psd(&paths.psd, distribution)?;
    if let Err(e) = write_summary(&paths.summary, distribution, resolution, timestamp) {
        discard(&paths.psd);
        return Err(e);
    }
    info!(
        psd = %paths.psd.display(),
        summary = %paths.summary.display(),
        "report written"
    );
    Ok(paths)
}

/// Write one `size, weight` line per size class.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be created or written.
pub fn write_psd(path: &Path, distribution: &GrainSizeDistribution) -> Result<(), IoError> {
    write_lines(path, |out| {
        for (size, weight) in distribution.iter() {
            writeln!(out, "{}, {}", decimal(size), decimal(weight))?;
        }
        Ok(())
    })
}

/// Write the summary statistics of a distribution.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be created or written.
pub fn write_summary(
    path: &Path,
    distribution: &GrainSizeDistribution,
    resolution: f64,
    timestamp: &DateTime<FixedOffset>,
) -> Result<(), IoError> {
    write_lines(path, |out| {
        writeln!(out, "%{}", timestamp.format(TIMESTAMP_FORMAT))?;
        writeln!(out, "% grain size results ...")?;
        for (label, value) in [
            ("resolution:", resolution),
            ("mean grain size:", distribution.mean()),
            ("sorting :", distribution.spread()),
            ("skewness :", distribution.skewness()),
            ("kurtosis :", distribution.kurtosis()),
        ] {
            writeln!(out, "% {label}")?;
            writeln!(out, "{}", decimal(value))?;
        }
        Ok(())
    })
}

/// Shortest round-trip form of `value`, keeping a decimal point on whole
/// numbers (`2.0`, not `2`).
fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Create `path` and fill it with `body`. A file left incomplete by a failed
/// write is removed.
fn write_lines<F>(path: &Path, body: F) -> Result<(), IoError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let wrap = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(wrap)?);
    let written = body(&mut out).and_then(|()| out.flush());
    if let Err(source) = written {
        drop(out);
        discard(path);
        return Err(wrap(source));
    }
    Ok(())
}

/// Best-effort removal of a report file that must not outlive a failure.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "could not remove partial report");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_from_prefix() {
        let paths = ReportPaths::from_prefix(Path::new("out/beach_g"));
        assert_eq!(paths.psd, PathBuf::from("out/beach_g_psd.txt"));
        assert_eq!(paths.summary, PathBuf::from("out/beach_g_summary.txt"));
    }

    #[test]
    fn timestamp_layout() {
        let ts = DateTime::parse_from_rfc3339("2026-10-16T15:07:00+02:00").unwrap();
        assert_eq!(ts.format(TIMESTAMP_FORMAT).to_string(), " 3:07PM +0200 on Oct 16, 2026");
    }

    #[test]
    fn whole_numbers_keep_decimal_point() {
        assert_eq!(decimal(2.0), "2.0");
        assert_eq!(decimal(0.0), "0.0");
        assert_eq!(decimal(-3.0), "-3.0");
        assert_eq!(decimal(0.5), "0.5");
        assert_eq!(decimal(0.01), "0.01");
        assert_eq!(decimal(11.843750000000002), "11.843750000000002");
        assert_eq!(decimal(f64::NAN), "NaN");
    }

    #[test]
    fn failed_summary_removes_table() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("blocked");
        let paths = ReportPaths::from_prefix(&prefix);
        // a directory in place of the summary file makes its creation fail
        fs::create_dir(&paths.summary).unwrap();
        let dist = GrainSizeDistribution::from_weighted(vec![1.0, 3.0], vec![0.5, 0.5]).unwrap();
        let ts = DateTime::parse_from_rfc3339("2026-10-16T15:07:00+02:00").unwrap();

        let err = write_report(&prefix, &dist, 1.0, &ts).unwrap_err();

        assert!(
            matches!(err, IoError::Write { ref path, .. } if *path == paths.summary),
            "{err:?}"
        );
        assert!(!paths.psd.exists());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(paths.summary.is_dir());
    }

    #[test]
    fn unwritable_path() {
        let dist = GrainSizeDistribution::from_weighted(vec![1.0, 3.0], vec![0.5, 0.5]).unwrap();
        let err = write_psd(Path::new("/nonexistent/dir/x_psd.txt"), &dist).unwrap_err();
        assert!(matches!(err, IoError::Write { .. }));
    }
}
