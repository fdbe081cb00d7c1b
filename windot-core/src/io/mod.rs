//! Sequence input for WinDot
//!
//! Only FASTA/FASTQ input is needed: the plot compares two records, which may
//! already be aligned.

#[cfg(feature = "io-fasta")] pub mod fasta;

#[cfg(feature = "io-fasta")] pub use fasta::{FastaError, FastaReader, read_sequence_pair};
