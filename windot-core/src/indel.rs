//! Indel region scanning
//!
//! Finds maximal runs of gap characters in an aligned sequence. A run is only
//! closed when a residue follows it, so a run reaching the end of the string
//! is never reported.

use std::io::Write;

use crate::align::Alignment;
use crate::error::{PlotError, PlotResult};
use crate::types::{GapRun, IndelRegion, GAP};

#[derive(Debug, Clone, Copy)]
pub struct IndelScanner {
    min_length: usize,
    gap: u8,
}

impl IndelScanner {
    pub fn new(min_length: usize) -> PlotResult<Self> {
        if min_length == 0 {
            return Err(PlotError::invalid_parameter("min_length", min_length, "must be at least 1"));
        }
        Ok(Self { min_length, gap: GAP })
    }

    /// Use a gap symbol other than `-`
    pub fn with_gap(mut self, gap: u8) -> Self {
        self.gap = gap;
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Closed gap runs of at least `min_length`, left to right
    pub fn scan(&self, aligned: &[u8]) -> Vec<GapRun> {
        let mut runs = Vec::new();
        let mut open: Option<usize> = None;

        for (i, &c) in aligned.iter().enumerate() {
            match (c == self.gap, open) {
                (true, None) => open = Some(i),
                (false, Some(start)) => {
                    open = None;
                    if i - start >= self.min_length {
                        runs.push(GapRun { start, stop: i });
                    }
                }
                _ => {}
            }
        }

        if let Some(start) = open {
            log::debug!(
                "Trailing gap run [{}, {}) is not closed by a residue and is not reported",
                start,
                aligned.len()
            );
        }
        runs
    }

    pub fn regions(&self, sequence_id: &str, aligned: &[u8]) -> Vec<IndelRegion> {
        self.scan(aligned)
            .into_iter()
            .map(|run| IndelRegion::new(sequence_id, run))
            .collect()
    }

    /// Regions of the first aligned row followed by those of the second
    pub fn scan_alignment(&self, alignment: &Alignment) -> Vec<IndelRegion> {
        let mut regions = self.regions(&alignment.id1, &alignment.aligned1);
        regions.extend(self.regions(&alignment.id2, &alignment.aligned2));
        regions
    }
}

/// Write one `<id> <start> <stop>` line per region
pub fn write_regions<W: Write>(mut writer: W, regions: &[IndelRegion]) -> std::io::Result<()> {
    for region in regions {
        writeln!(writer, "{}", region)?;
    }
    writer.flush()
}
