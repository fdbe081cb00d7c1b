//! Windowed dot-matrix match detection
//!
//! A grid coordinate (x, y) matches when at least `threshold` of the `window`
//! positions starting at `seq1[x]` and `seq2[y]` hold equal characters. The
//! grid is swept twice: first the rows whose leading character in sequence 2
//! is a residue (primary matches), then the rows that start with a gap
//! (secondary matches). Every point carries its tag so renderers never depend
//! on list position.

use crate::error::{PlotError, PlotResult};
use crate::types::{MatchKind, MatchPoint, Position};
use serde::{Deserialize, Serialize};

/// Parameters for windowed match detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotParams {
    /// Number of consecutive positions compared per grid coordinate
    pub window: usize,
    /// Minimum number of equal positions within the window
    pub threshold: usize,
}

impl Default for DotParams {
    fn default() -> Self {
        DotPresets::nucleotide()
    }
}

impl DotParams {
    pub fn new(window: usize, threshold: usize) -> Self {
        Self { window, threshold }
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.window < 1 {
            return Err(PlotError::invalid_parameter("window", self.window, "must be at least 1"));
        }
        if self.threshold < 1 {
            return Err(PlotError::invalid_parameter("threshold", self.threshold, "must be at least 1"));
        }
        if self.threshold > self.window {
            log::warn!(
                "threshold {} exceeds window {}; no point can match",
                self.threshold,
                self.window
            );
        }
        Ok(())
    }
}

/// Recommended settings for common sequence types
pub struct DotPresets;

impl DotPresets {
    /// Amino acid sequences
    pub fn protein() -> DotParams {
        DotParams { window: 3, threshold: 2 }
    }

    /// Nucleotide sequences
    pub fn nucleotide() -> DotParams {
        DotParams { window: 11, threshold: 7 }
    }
}

/// Ordered detection result: primary matches first, then secondary ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    pub points: Vec<MatchPoint>,
    pub primary_count: usize,
    pub params: DotParams,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn primary(&self) -> &[MatchPoint] {
        &self.points[..self.primary_count]
    }

    pub fn secondary(&self) -> &[MatchPoint] {
        &self.points[self.primary_count..]
    }

    /// Largest x and y over all points, `(0, 0)` for an empty set
    pub fn extent(&self) -> (Position, Position) {
        let max_x = self.points.iter().map(|p| p.x).max().unwrap_or(0);
        let max_y = self.points.iter().map(|p| p.y).max().unwrap_or(0);
        (max_x, max_y)
    }

    pub fn statistics(&self) -> MatchStatistics {
        let (max_x, max_y) = self.extent();
        MatchStatistics {
            total: self.points.len(),
            primary: self.primary_count,
            secondary: self.points.len() - self.primary_count,
            max_x,
            max_y,
            window: self.params.window,
            threshold: self.params.threshold,
        }
    }
}

/// Summary of a detection run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub total: usize,
    pub primary: usize,
    pub secondary: usize,
    pub max_x: Position,
    pub max_y: Position,
    pub window: usize,
    pub threshold: usize,
}

/// Windowed match detector
#[derive(Debug, Clone)]
pub struct MatchDetector {
    params: DotParams,
}

impl MatchDetector {
    pub fn new(params: DotParams) -> PlotResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> DotParams {
        self.params
    }

    /// Detect all matching grid coordinates between `seq1` (x) and `seq2` (y)
    pub fn detect(&self, seq1: &[u8], seq2: &[u8]) -> MatchSet {
        let window = self.params.window;
        let mut points = Vec::new();

        if window <= seq1.len() && window <= seq2.len() {
            let columns = seq1.len() - window + 1;
            let rows = seq2.len() - window + 1;

            for kind in [MatchKind::Primary, MatchKind::Secondary] {
                for y in 0..rows {
                    if MatchKind::for_row(seq2[y]) != kind {
                        continue;
                    }
                    for x in 0..columns {
                        if self.window_matches(seq1, x, seq2, y) {
                            points.push(MatchPoint::new(x, y, kind));
                        }
                    }
                }
            }
        }

        let primary_count = points.iter().take_while(|p| p.is_primary()).count();
        log::debug!(
            "Detected {} matches ({} primary, {} in gap rows) over {}x{} with window={} threshold={}",
            points.len(),
            primary_count,
            points.len() - primary_count,
            seq1.len(),
            seq2.len(),
            window,
            self.params.threshold
        );

        MatchSet {
            points,
            primary_count,
            params: self.params,
        }
    }

    /// The window predicate at one grid coordinate
    pub fn window_matches(&self, seq1: &[u8], x: Position, seq2: &[u8], y: Position) -> bool {
        let window = self.params.window;
        if x + window > seq1.len() || y + window > seq2.len() {
            return false;
        }
        let equal = seq1[x..x + window]
            .iter()
            .zip(&seq2[y..y + window])
            .filter(|(a, b)| a == b)
            .count();
        equal >= self.params.threshold
    }
}
