//! FASTA/FASTQ sequence file parser
//!
//! Parsing goes through the needletail library; gzipped inputs are decoded
//! with flate2 before being handed to the parser.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;
use needletail::parse_fastx_reader;
use thiserror::Error;

use crate::types::Sequence;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type FastaResult<T> = Result<T, FastaError>;

/// FASTA/FASTQ reader producing owned sequences
pub struct FastaReader;

impl FastaReader {
    pub fn read_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<Sequence>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let sequences = if path.to_string_lossy().ends_with(".gz") {
            Self::read(BufReader::new(GzDecoder::new(file)))?
        } else {
            Self::read(BufReader::new(file))?
        };
        log::debug!("Read {} records from {}", sequences.len(), path.display());
        Ok(sequences)
    }

    /// Parse FASTA/FASTQ data from any readable source
    pub fn read<R: std::io::Read + Send>(reader: R) -> FastaResult<Vec<Sequence>> {
        let mut fastx_reader = parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;

        let mut sequences = Vec::new();
        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            sequences.push(record_to_sequence(&record));
        }

        if sequences.is_empty() {
            Err(FastaError::EmptyFile)
        } else {
            Ok(sequences)
        }
    }
}

fn record_to_sequence(record: &needletail::parser::SequenceRecord) -> Sequence {
    let header = String::from_utf8_lossy(record.id()).into_owned();
    let (id, description) = match header.split_once(char::is_whitespace) {
        Some((id, rest)) if !rest.trim().is_empty() => (id.to_string(), Some(rest.trim().to_string())),
        Some((id, _)) => (id.to_string(), None),
        None => (header, None),
    };

    let sequence = Sequence::new(id, record.seq().to_vec());
    match description {
        Some(desc) => sequence.with_description(desc),
        None => sequence,
    }
}

/// First and last records of a file; a lone record is paired with itself
pub fn read_sequence_pair<P: AsRef<Path>>(path: P) -> FastaResult<(Sequence, Sequence)> {
    let path = path.as_ref();
    let mut records = FastaReader::read_file(path)?;
    let total = records.len();
    let second = records.pop().ok_or(FastaError::EmptyFile)?;
    let first = if records.is_empty() {
        log::warn!(
            "{} holds a single record ({}); comparing it against itself",
            path.display(),
            second.id
        );
        second.clone()
    } else {
        records.swap_remove(0)
    };
    if total > 2 {
        log::warn!(
            "Ignoring {} records between {} and {} in {}",
            total - 2,
            first.id,
            second.id,
            path.display()
        );
    }
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_fasta_reader() {
        let fasta_data = ">seq1 description of sequence 1\n\
                          ATCGATCGATCG\n\
                          >seq2\n\
                          GC-AGCTAG--A\n";

        let sequences = FastaReader::read(Cursor::new(fasta_data)).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].id, "seq1");
        assert_eq!(sequences[0].description, Some("description of sequence 1".to_string()));
        assert_eq!(sequences[0].data, b"ATCGATCGATCG");

        assert_eq!(sequences[1].id, "seq2");
        assert_eq!(sequences[1].description, None);
        assert_eq!(sequences[1].data, b"GC-AGCTAG--A");
    }

    #[test]
    fn test_multiline_fasta() {
        let fasta_data = ">seq1\n\
                          ATCGATCG\n\
                          ATCGATCG\n\
                          GCTAGCTA\n";

        let sequences = FastaReader::read(Cursor::new(fasta_data)).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].data, b"ATCGATCGATCGATCGGCTAGCTA");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(FastaReader::read(Cursor::new("")), Err(FastaError::Parse(_)) | Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_pair_is_first_and_last_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">a\nACGT\n>b\nAGT\n>c\nTTTT\n").unwrap();

        // middle records are skipped
        let (a, b) = read_sequence_pair(file.path()).unwrap();
        assert_eq!(a.id, "a");
        assert_eq!(b.id, "c");
        assert_eq!(b.data, b"TTTT");
    }

    #[test]
    fn test_single_record_pairs_with_itself() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">only\nACGTACGT\n").unwrap();

        let (a, b) = read_sequence_pair(file.path()).unwrap();
        assert_eq!(a, b);
    }
}
