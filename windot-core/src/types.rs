use serde::{Deserialize, Serialize};
use std::fmt;

/// Gap symbol used by aligned sequences
pub const GAP: u8 = b'-';

pub type Position = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub data: Vec<u8>,
}

impl Sequence {
    pub fn new(id: String, data: Vec<u8>) -> Self {
        Self {
            id,
            description: None,
            data,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> Position {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sequence with every gap symbol removed
    pub fn ungapped(&self) -> Self {
        Self {
            id: self.id.clone(),
            description: self.description.clone(),
            data: self.data.iter().copied().filter(|&c| c != GAP).collect(),
        }
    }
}

/// Draw-priority class of a match, decided by the row's leading character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    /// Row of sequence 2 starts with a residue
    Primary,
    /// Row of sequence 2 starts with a gap
    Secondary,
}

impl MatchKind {
    pub fn for_row(leading: u8) -> Self {
        if leading == GAP {
            MatchKind::Secondary
        } else {
            MatchKind::Primary
        }
    }
}

/// A grid coordinate where the window predicate holds.
///
/// `x` indexes sequence 1 and `y` indexes sequence 2, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPoint {
    pub x: Position,
    pub y: Position,
    pub kind: MatchKind,
}

impl MatchPoint {
    pub fn new(x: Position, y: Position, kind: MatchKind) -> Self {
        Self { x, y, kind }
    }

    pub fn is_primary(&self) -> bool {
        self.kind == MatchKind::Primary
    }
}

/// Half-open run `[start, stop)` of gap characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GapRun {
    pub start: Position,
    pub stop: Position,
}

impl GapRun {
    pub fn len(&self) -> Position {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }
}

/// Gap run of a named sequence, written as `<id> <start> <stop>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndelRegion {
    pub sequence_id: String,
    pub start: Position,
    pub stop: Position,
}

impl IndelRegion {
    pub fn new(sequence_id: impl Into<String>, run: GapRun) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            start: run.start,
            stop: run.stop,
        }
    }

    pub fn len(&self) -> Position {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }
}

impl fmt::Display for IndelRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.sequence_id, self.start, self.stop)
    }
}
