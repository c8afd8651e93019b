use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sedsize wavelet granulometry.
#[derive(Parser)]
#[command(
    name = "sedsize",
    version,
    about = "Grain-size distributions of sediment from images"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Estimate the grain-size distribution of an image and write reports.
    Analyze(AnalyzeArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Path to the sediment image.
    pub image: PathBuf,

    /// Path to optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output prefix for `<prefix>_psd.txt` and `<prefix>_summary.txt`
    /// (default: the image path without its extension).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the row stride from config.
    #[arg(short, long)]
    pub density: Option<usize>,

    /// Override the worker thread count from config.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Override the physical length per pixel from config.
    #[arg(short, long)]
    pub resolution: Option<f64>,

    /// Crop the image to its central square before analysis.
    #[arg(long)]
    pub crop: bool,

    /// Save the greyscale (and cropped) image that was analysed to this path.
    #[arg(long = "save-grey")]
    pub save_grey: Option<PathBuf>,
}
