//! Stats command: match statistics and alignment identity as JSON

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use windot_core::{Alignment, MatchDetector, MatchStatistics};

use super::{load_alignment, resolve_params};
use crate::config::Config;
use crate::Preset;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// FASTA/FASTQ file; the first and last records are compared
    #[arg(short, long)]
    pub input: PathBuf,

    /// Records are already aligned
    #[arg(long)]
    pub prealigned: bool,

    #[arg(long)]
    pub preset: Option<Preset>,

    #[arg(short, long)]
    pub window: Option<usize>,

    #[arg(short, long)]
    pub threshold: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub id1: String,
    pub id2: String,
    pub alignment_length: usize,
    pub alignment_score: i64,
    pub identical_columns: usize,
    pub identity: f64,
    pub matches: MatchStatistics,
}

impl StatsReport {
    pub fn new(alignment: &Alignment, matches: MatchStatistics) -> Self {
        Self {
            id1: alignment.id1.clone(),
            id2: alignment.id2.clone(),
            alignment_length: alignment.len(),
            alignment_score: alignment.score,
            identical_columns: alignment.matches(),
            identity: alignment.identity(),
            matches,
        }
    }
}

pub fn compute(config: &Config, args: &StatsArgs) -> Result<StatsReport> {
    let params = resolve_params(config, args.preset, args.window, args.threshold)?;
    let alignment = load_alignment(&args.input, args.prealigned || config.alignment.prealigned)?;
    let matches = MatchDetector::new(params)?.detect(&alignment.aligned1, &alignment.aligned2);
    Ok(StatsReport::new(&alignment, matches.statistics()))
}

pub fn execute(config: &Config, args: StatsArgs) -> Result<()> {
    let report = compute(config, &args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
