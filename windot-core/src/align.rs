//! Pairwise alignment provider
//!
//! The plot consumes two equal-length gapped strings. `GlobalAligner` builds
//! them with a global alignment (match 1, mismatch 0, no gap penalties);
//! `Prealigned` passes through inputs that were aligned elsewhere.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::types::{Sequence, GAP};

/// Two aligned, equal-length sequences with their identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub id1: String,
    pub id2: String,
    pub aligned1: Vec<u8>,
    pub aligned2: Vec<u8>,
    pub score: i64,
}

impl Alignment {
    pub fn new(id1: String, aligned1: Vec<u8>, id2: String, aligned2: Vec<u8>, score: i64) -> PlotResult<Self> {
        if aligned1.len() != aligned2.len() {
            return Err(PlotError::Alignment(format!(
                "aligned sequences differ in length: {} has {} columns, {} has {}",
                id1,
                aligned1.len(),
                id2,
                aligned2.len()
            )));
        }
        Ok(Self { id1, id2, aligned1, aligned2, score })
    }

    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Columns holding the same residue in both rows
    pub fn matches(&self) -> usize {
        self.columns().filter(|&(a, b)| a == b && a != GAP).count()
    }

    /// Count-based identity over all alignment columns
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.matches() as f64 / self.len() as f64
        }
    }

    /// Four-line text block: row 1, match line, row 2, score
    pub fn report(&self) -> String {
        let marks: String = self
            .columns()
            .map(|(a, b)| match (a, b) {
                (GAP, _) | (_, GAP) => ' ',
                (a, b) if a == b => '|',
                _ => '.',
            })
            .collect();
        format!(
            "{}\n{}\n{}\n  Score={}\n",
            String::from_utf8_lossy(&self.aligned1),
            marks,
            String::from_utf8_lossy(&self.aligned2),
            self.score
        )
    }

    fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.aligned1.iter().copied().zip(self.aligned2.iter().copied())
    }
}

/// Upstream source of a pairwise alignment
pub trait AlignmentProvider {
    fn align(&self, a: &Sequence, b: &Sequence) -> PlotResult<Alignment>;
}

/// Inputs that are already aligned
#[derive(Debug, Clone, Copy, Default)]
pub struct Prealigned;

impl AlignmentProvider for Prealigned {
    fn align(&self, a: &Sequence, b: &Sequence) -> PlotResult<Alignment> {
        let score = a
            .data
            .iter()
            .zip(&b.data)
            .filter(|(x, y)| x == y && **x != GAP)
            .count() as i64;
        Alignment::new(a.id.clone(), a.data.clone(), b.id.clone(), b.data.clone(), score)
    }
}

/// Global alignment scoring one per identical residue and nothing else
#[cfg(feature = "align")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAligner;

#[cfg(feature = "align")]
impl AlignmentProvider for GlobalAligner {
    fn align(&self, a: &Sequence, b: &Sequence) -> PlotResult<Alignment> {
        use bio::alignment::pairwise::Aligner;
        use bio::alignment::AlignmentOperation;

        let x = a.ungapped().data;
        let y = b.ungapped().data;
        if x.is_empty() || y.is_empty() {
            return Err(PlotError::Alignment(format!(
                "cannot align empty sequence ({} has {} residues, {} has {})",
                a.id,
                x.len(),
                b.id,
                y.len()
            )));
        }

        let score = |p: u8, q: u8| if p == q { 1i32 } else { 0i32 };
        let mut aligner = Aligner::with_capacity(x.len(), y.len(), 0, 0, &score);
        let result = aligner.global(&x, &y);
        log::debug!(
            "Global alignment of {} ({} bp) and {} ({} bp): score {}",
            a.id,
            x.len(),
            b.id,
            y.len(),
            result.score
        );

        let mut row1 = Vec::with_capacity(x.len() + y.len());
        let mut row2 = Vec::with_capacity(x.len() + y.len());
        let (mut i, mut j) = (0usize, 0usize);
        for op in &result.operations {
            match *op {
                AlignmentOperation::Match | AlignmentOperation::Subst => {
                    row1.push(x[i]);
                    row2.push(y[j]);
                    i += 1;
                    j += 1;
                }
                AlignmentOperation::Del => {
                    row1.push(GAP);
                    row2.push(y[j]);
                    j += 1;
                }
                AlignmentOperation::Ins => {
                    row1.push(x[i]);
                    row2.push(GAP);
                    i += 1;
                }
                AlignmentOperation::Xclip(n) => {
                    row1.extend_from_slice(&x[i..i + n]);
                    row2.extend(std::iter::repeat(GAP).take(n));
                    i += n;
                }
                AlignmentOperation::Yclip(n) => {
                    row1.extend(std::iter::repeat(GAP).take(n));
                    row2.extend_from_slice(&y[j..j + n]);
                    j += n;
                }
            }
        }

        Alignment::new(a.id.clone(), row1, b.id.clone(), row2, result.score as i64)
    }
}
