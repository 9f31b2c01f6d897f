use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::ingest::parser::RecordParser;
use crate::types::RawRow;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("no data rows could be parsed from the input")]
    NoRows,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub loaded_at: DateTime<Utc>,
    pub digest: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub dropped_lines: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowSearch<'a> {
    pub rows: Vec<&'a RawRow>,
    pub total: usize,
}

impl Dataset {
    pub fn from_text(text: &str, parser: &RecordParser) -> Result<Self, IngestError> {
        let parsed = parser.parse_text(text);
        if parsed.rows.is_empty() {
            return Err(IngestError::NoRows);
        }
        Ok(Self {
            loaded_at: Utc::now(),
            digest: digest_text(text),
            headers: parsed.headers,
            rows: parsed.rows,
            dropped_lines: parsed.dropped_lines,
        })
    }

    pub fn search(&self, term: &str) -> RowSearch<'_> {
        let needle = term.to_lowercase();
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                needle.is_empty() || row.values().any(|v| v.to_lowercase().contains(&needle))
            })
            .collect();
        RowSearch {
            rows,
            total: self.rows.len(),
        }
    }

    pub fn same_source(&self, other: &Dataset) -> bool {
        self.digest == other.digest
    }
}

pub fn digest_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Number - Name,Area\n15.001 - Optimization,Foundational\n15.002 - Marketing,Subject Matter\n";

    #[test]
    fn zero_rows_is_a_structural_failure() {
        let parser = RecordParser::default();
        assert_eq!(Dataset::from_text("", &parser).unwrap_err(), IngestError::NoRows);
        assert_eq!(
            Dataset::from_text("a,b\n1,2,3\n", &parser).unwrap_err(),
            IngestError::NoRows
        );
    }

    #[test]
    fn search_is_case_insensitive_and_counts_total() {
        let dataset = Dataset::from_text(SAMPLE, &RecordParser::default()).unwrap();
        let hits = dataset.search("MARKET");
        assert_eq!(hits.rows.len(), 1);
        assert_eq!(hits.total, 2);
        assert_eq!(dataset.search("").rows.len(), 2);
        assert!(dataset.search("nothing like this").rows.is_empty());
    }

    #[test]
    fn digest_tracks_content() {
        let parser = RecordParser::default();
        let a = Dataset::from_text(SAMPLE, &parser).unwrap();
        let b = Dataset::from_text(SAMPLE, &parser).unwrap();
        let c = Dataset::from_text("x\n1\n", &parser).unwrap();
        assert!(a.same_source(&b));
        assert!(!a.same_source(&c));
        assert_eq!(a.digest.len(), 64);
    }
}
