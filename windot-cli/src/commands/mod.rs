//! Command implementations for the WinDot CLI

pub mod indels;
pub mod plot;
pub mod stats;

use anyhow::{Context, Result};
use std::path::Path;

use windot_core::io::read_sequence_pair;
use windot_core::{Alignment, AlignmentProvider, DotParams, DotPresets, GlobalAligner, Prealigned};

use crate::config::Config;
use crate::error::CliError;
use crate::Preset;

/// Read the first and last records of `input` and align them
pub fn load_alignment(input: &Path, prealigned: bool) -> Result<Alignment> {
    if !input.exists() {
        return Err(CliError::file_not_found(input.to_path_buf()).into());
    }
    let (first, second) =
        read_sequence_pair(input).with_context(|| format!("Failed to read sequences from {}", input.display()))?;

    let alignment = if prealigned {
        Prealigned.align(&first, &second)
    } else {
        GlobalAligner.align(&first, &second)
    }
    .with_context(|| format!("Failed to align {} with {}", first.id, second.id))?;

    log::info!(
        "Aligned {} with {}: {} columns, identity {:.1}%",
        alignment.id1,
        alignment.id2,
        alignment.len(),
        alignment.identity() * 100.0
    );
    Ok(alignment)
}

/// Explicit flags win over a preset, a preset wins over the configuration file
pub fn resolve_params(config: &Config, preset: Option<Preset>, window: Option<usize>, threshold: Option<usize>) -> Result<DotParams> {
    let base = match preset {
        Some(Preset::Protein) => DotPresets::protein(),
        Some(Preset::Nucleotide) => DotPresets::nucleotide(),
        None => DotParams::new(config.plot.window, config.plot.threshold),
    };
    let params = DotParams::new(window.unwrap_or(base.window), threshold.unwrap_or(base.threshold));
    params
        .validate()
        .map_err(|e| CliError::validation(e.to_string()))?;
    log::debug!("Dot parameters: window {}, threshold {}", params.window, params.threshold);
    Ok(params)
}
