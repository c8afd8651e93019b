//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use crate::config::*;

use sedsize_grain::{GrainConfig, ScaleConfig, Scaling};
use sedsize_io::ReaderConfig;

/// Parses a scaling mode name string into the corresponding enum variant.
pub fn parse_scaling(s: &str) -> Result<Scaling> {
    s.parse::<Scaling>()
        .with_context(|| format!("invalid [scales].scaling {s:?}"))
}

/// Builds a [`ScaleConfig`] from the TOML scales configuration.
pub fn build_scale_config(scales: &ScalesToml) -> Result<ScaleConfig> {
    let cfg = ScaleConfig::new()
        .with_largest_scale_divisor(scales.largest_scale_divisor)
        .with_notes_per_octave(scales.notes_per_octave)
        .with_scaling(parse_scaling(&scales.scaling)?);
    cfg.validate().context("invalid [scales] configuration")?;
    Ok(cfg)
}

/// Builds a validated [`GrainConfig`] from the TOML analysis and scales
/// configuration.
pub fn build_grain_config(analysis: &AnalysisToml, scales: &ScalesToml) -> Result<GrainConfig> {
    let cfg = GrainConfig::new()
        .with_resolution(analysis.resolution)
        .with_density(analysis.density)
        .with_workers(analysis.workers)
        .with_scale_config(build_scale_config(scales)?);
    cfg.validate().context("invalid [analysis] configuration")?;
    Ok(cfg)
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> ReaderConfig {
    ReaderConfig::default().with_crop_central(io.crop_central)
}
