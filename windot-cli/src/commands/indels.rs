//! Indels command: write gap runs of both aligned rows as interval records

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use windot_core::{write_regions, IndelScanner};

use super::load_alignment;
use crate::config::Config;
use crate::error::CliError;

#[derive(Args, Debug, Clone)]
pub struct IndelArgs {
    /// FASTA/FASTQ file; the first and last records are compared
    #[arg(short, long)]
    pub input: PathBuf,

    /// Records are already aligned
    #[arg(long)]
    pub prealigned: bool,

    /// Shortest gap run reported
    #[arg(short = 'm', long)]
    pub min_length: Option<usize>,

    /// Output file; standard output when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn execute(config: &Config, args: IndelArgs) -> Result<()> {
    let min_length = args.min_length.unwrap_or(config.indel.min_length);
    let scanner = IndelScanner::new(min_length)
        .map_err(|e| CliError::validation(e.to_string()))?
        .with_gap(config.indel.gap_byte()?);

    let alignment = load_alignment(&args.input, args.prealigned || config.alignment.prealigned)?;
    let regions = scanner.scan_alignment(&alignment);
    log::info!("Found {} indel regions of at least {} columns", regions.len(), min_length);

    match &args.out {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            write_regions(BufWriter::new(file), &regions)?;
            log::info!("wrote {}", path.display());
        }
        None => write_regions(io::stdout().lock(), &regions)?,
    }
    Ok(())
}
