//! Analyze command: image -> grain-size distribution -> text reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span};

use sedsize_grain::compute_grain_size_distribution;
use sedsize_io::{intensity_matrix, read_greyscale, save_greyscale, write_report};

use crate::cli::AnalyzeArgs;
use crate::config::SedsizeConfig;
use crate::convert;

/// Run the analysis pipeline.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();

    // 1. Load optional TOML config
    let mut config = match args.config {
        Some(ref config_path) => {
            let toml_str = std::fs::read_to_string(config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            toml::from_str::<SedsizeConfig>(&toml_str).context("failed to parse TOML config")?
        }
        None => SedsizeConfig::default(),
    };

    // 2. Merge CLI flags; CLI overrides config file values
    if let Some(density) = args.density {
        config.analysis.density = density;
    }
    if let Some(workers) = args.workers {
        config.analysis.workers = workers;
    }
    if let Some(resolution) = args.resolution {
        config.analysis.resolution = resolution;
    }
    if args.crop {
        config.io.crop_central = true;
    }
    if args.output.is_some() {
        config.io.output = args.output;
    }
    if args.save_grey.is_some() {
        config.io.save_grey = args.save_grey;
    }

    // 3. Build library configs
    let grain_cfg = convert::build_grain_config(&config.analysis, &config.scales)?;
    let reader_cfg = convert::build_reader_config(&config.io);

    // 4. Read image
    info!(path = %args.image.display(), "reading image");
    let grey = read_greyscale(&args.image, &reader_cfg)
        .with_context(|| format!("failed to read image: {}", args.image.display()))?;
    if let Some(ref grey_path) = config.io.save_grey {
        save_greyscale(grey_path, &grey)
            .with_context(|| format!("failed to save greyscale image: {}", grey_path.display()))?;
        info!(path = %grey_path.display(), "greyscale image saved");
    }
    let matrix = intensity_matrix(&grey)
        .with_context(|| format!("unusable image: {}", args.image.display()))?;

    // 5. Compute the distribution; nothing is written on failure
    let distribution = compute_grain_size_distribution(&matrix, &grain_cfg)
        .with_context(|| format!("grain-size analysis failed for {}", args.image.display()))?;

    // 6. Write reports
    let prefix = config
        .io
        .output
        .unwrap_or_else(|| default_prefix(&args.image));
    let timestamp = Local::now().fixed_offset();
    let paths = write_report(&prefix, &distribution, grain_cfg.resolution(), &timestamp)
        .with_context(|| format!("failed to write report: {}", prefix.display()))?;

    info!(
        mean = distribution.mean(),
        sorting = distribution.spread(),
        psd = %paths.psd.display(),
        summary = %paths.summary.display(),
        "analysis complete"
    );
    Ok(())
}

/// The image path without its extension.
fn default_prefix(image: &Path) -> PathBuf {
    image.with_extension("")
}
