//! WinDot Core Library
//!
//! Windowed match detection, plot geometry, indel region scanning and the
//! sequence input/alignment collaborators they are fed from.

pub mod error;
pub mod types;
pub mod geometry;
pub mod dot;
pub mod indel;
pub mod align;
pub mod io;

// Re-export commonly used types and functions
pub use error::{PlotError, PlotResult};
pub use types::{GapRun, IndelRegion, MatchKind, MatchPoint, Sequence, GAP};
pub use geometry::{AxisWidths, DevicePoint, PlotDimensions, PlotGeometry};
pub use dot::{DotParams, DotPresets, MatchDetector, MatchSet, MatchStatistics};
pub use indel::{write_regions, IndelScanner};
pub use align::{Alignment, AlignmentProvider, Prealigned};
#[cfg(feature = "align")]
pub use align::GlobalAligner;

/// Version information for the WinDot core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
