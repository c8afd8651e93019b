use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Sedsize configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SedsizeConfig {
    /// Image and report settings.
    #[serde(default)]
    pub io: IoToml,

    /// Grain-size analysis settings.
    #[serde(default)]
    pub analysis: AnalysisToml,

    /// Wavelet scale settings.
    #[serde(default)]
    pub scales: ScalesToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub crop_central: bool,
    pub save_grey: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisToml {
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    #[serde(default = "default_density")]
    pub density: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for AnalysisToml {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            density: default_density(),
            workers: default_workers(),
        }
    }
}

fn default_resolution() -> f64 {
    1.0
}
fn default_density() -> usize {
    10
}
fn default_workers() -> usize {
    8
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalesToml {
    #[serde(default = "default_largest_scale_divisor")]
    pub largest_scale_divisor: usize,
    #[serde(default = "default_notes_per_octave")]
    pub notes_per_octave: usize,
    #[serde(default = "default_scaling")]
    pub scaling: String,
}

impl Default for ScalesToml {
    fn default() -> Self {
        Self {
            largest_scale_divisor: default_largest_scale_divisor(),
            notes_per_octave: default_notes_per_octave(),
            scaling: default_scaling(),
        }
    }
}

fn default_largest_scale_divisor() -> usize {
    3
}
fn default_notes_per_octave() -> usize {
    8
}
fn default_scaling() -> String {
    "log".to_string()
}
