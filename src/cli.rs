use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Migra movement-track segmentation.
#[derive(Parser)]
#[command(
    name = "migra",
    version,
    about = "Wavelet sub-band segmentation of animal movement tracks"
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
    /// Decompose a track and label it with both segmentation branches.
    Segment(SegmentArgs),
    /// Write the wavelet sub-bands of a track for parameter selection.
    Decompose(DecomposeArgs),
}

/// Arguments for the `segment` subcommand.
#[derive(clap::Args)]
pub struct SegmentArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "migra.toml")]
    pub config: PathBuf,

    /// Override input track CSV from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `decompose` subcommand.
#[derive(clap::Args)]
pub struct DecomposeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "migra.toml")]
    pub config: PathBuf,

    /// Override input track CSV from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path for the bands CSV (default: `<output_dir>/bands.csv`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
