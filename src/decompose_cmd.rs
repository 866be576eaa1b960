//! Decompose command: dump the sub-bands used to pick segmentation parameters.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use migra_io::{read_track, write_bands_csv};
use migra_wavelet::{TimeSeries, decompose};

use crate::cli::DecomposeArgs;
use crate::config;
use crate::convert;

/// Run the decomposition and write every band.
pub fn run(args: DecomposeArgs) -> Result<()> {
    let _cmd = info_span!("decompose").entered();
    let config = config::load(&args.config)?;
    let filter = convert::parse_wavelet_filter(&config.wavelet)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;

    let input = config.io.resolve_input(args.input)?;
    let track = read_track(&input, &reader_cfg)
        .with_context(|| format!("failed to read track: {}", input.display()))?;
    let series = TimeSeries::new(track.values())
        .with_context(|| format!("track {} cannot be decomposed", input.display()))?;

    let bands = decompose(&series, filter, config.wavelet.levels)
        .with_context(|| format!("failed to decompose {}", input.display()))?;
    for (level, share) in bands.detail_variance_fractions().iter().enumerate() {
        info!(level = level + 1, variance_share = share, "detail band");
    }
    if let Err(e) = convert::build_analysis_config(&config) {
        warn!("segmentation parameters will not work with these bands: {e:#}");
    }

    let output = match args.output {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.io.output_dir).with_context(|| {
                format!(
                    "failed to create output dir: {}",
                    config.io.output_dir.display()
                )
            })?;
            config.io.output_dir.join("bands.csv")
        }
    };
    write_bands_csv(&output, &bands)
        .with_context(|| format!("failed to write bands: {}", output.display()))?;
    Ok(())
}
