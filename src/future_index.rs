//! Future-access reference index

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use crate::error::AnalyzerResult;
use crate::error::ReferenceError;

/// Maps each block address to the ordered access-counter values at which
/// the block will be referenced again
#[derive(Debug, Default)]
pub struct FutureAccessIndex {
    entries: HashMap<String, Vec<u64>>,
}

impl FutureAccessIndex {
    /// Parse a reference dump where a header line carrying an address token
    /// introduces one data line of integers for that address.
    ///
    /// A later header for the same address replaces the earlier entry.
    /// A data line whose integers cannot be parsed degrades that address
    /// to an empty sequence; a data line before any header is an error.
    pub fn parse(content: &str) -> AnalyzerResult<Self> {
        let header_re = Regex::new(r"(0x\w+)").unwrap();
        let int_re = Regex::new(r"\d+").unwrap();

        let mut entries = HashMap::new();
        let mut key: Option<String> = None;

        for (line_num, line) in content.lines().enumerate() {
            if let Some(captures) = header_re.captures(line) {
                key = Some(captures[1].to_string());
            } else if !line.trim().is_empty() {
                let address = key.clone().ok_or_else(|| {
                    ReferenceError::OrphanDataLine(line_num + 1, line.to_string())
                })?;
                entries.insert(address, parse_access_list(line, &int_re));
            }
        }

        Ok(Self { entries })
    }

    /// Read and parse a reference file
    pub fn load(path: &Path) -> AnalyzerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReferenceError::FileReadError(path.to_path_buf(), e)
        })?;
        Self::parse(&content)
    }

    /// Build the index from a per-access address stream, where line `i`
    /// holds the address referenced at access counter `i`
    pub fn from_access_stream(content: &str) -> Self {
        let mut entries: HashMap<String, Vec<u64>> = HashMap::new();
        for (i, line) in content.lines().enumerate() {
            let address = line.trim();
            if address.is_empty() {
                continue;
            }
            entries.entry(address.to_string()).or_default().push(i as u64);
        }
        Self { entries }
    }

    /// Future accesses recorded for the given address.
    /// An unknown address has no future accesses.
    pub fn future_accesses(&self, address: &str) -> &[u64] {
        self.entries.get(address).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, address: &str) -> bool {
        self.entries.contains_key(address)
    }

    /// Number of addresses indexed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect the integer runs of a data line, in input order
fn parse_access_list(line: &str, int_re: &Regex) -> Vec<u64> {
    let mut accesses = Vec::new();
    for token in int_re.find_iter(line) {
        match token.as_str().parse::<u64>() {
            Ok(value) => accesses.push(value),
            Err(_) => return Vec::new(),
        }
    }
    accesses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let content = "0xA\n5, 20\n0xB\n3\n";
        let index = FutureAccessIndex::parse(content).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.future_accesses("0xA"), &[5, 20]);
        assert_eq!(index.future_accesses("0xB"), &[3]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let content = "0x7b2a40\n12 3 77 3\n";
        let index = FutureAccessIndex::parse(content).unwrap();
        assert_eq!(index.future_accesses("0x7b2a40"), &[12, 3, 77, 3]);
    }

    #[test]
    fn test_parse_skips_empty_lines() {
        let content = "\n0xA\n\n1, 2\n\n";
        let index = FutureAccessIndex::parse(content).unwrap();
        assert_eq!(index.future_accesses("0xA"), &[1, 2]);
    }

    #[test]
    fn test_parse_last_header_wins() {
        let content = "0xA\n1\n0xA\n2, 3\n";
        let index = FutureAccessIndex::parse(content).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.future_accesses("0xA"), &[2, 3]);
    }

    #[test]
    fn test_parse_overflowing_integer_degrades_to_empty() {
        // 39 digits cannot fit in a u64
        let content = "0xA\n5, 111111111111111111111111111111111111111\n";
        let index = FutureAccessIndex::parse(content).unwrap();
        assert!(index.contains("0xA"));
        assert_eq!(index.future_accesses("0xA"), &[] as &[u64]);
    }

    #[test]
    fn test_parse_orphan_data_line_is_an_error() {
        let content = "5, 20\n0xA\n1\n";
        assert!(FutureAccessIndex::parse(content).is_err());
    }

    #[test]
    fn test_unknown_address_has_no_future_accesses() {
        let index = FutureAccessIndex::parse("0xA\n1\n").unwrap();
        assert_eq!(index.future_accesses("0xDEAD"), &[] as &[u64]);
        assert!(!index.contains("0xDEAD"));
    }

    #[test]
    fn test_from_access_stream() {
        let content = "0xA\n0xB\n0xA\n0xC\n0xA\n";
        let index = FutureAccessIndex::from_access_stream(content);
        assert_eq!(index.future_accesses("0xA"), &[0, 2, 4]);
        assert_eq!(index.future_accesses("0xB"), &[1]);
        assert_eq!(index.future_accesses("0xC"), &[3]);
    }

    #[test]
    fn test_from_access_stream_counts_blank_lines() {
        // A blank line still consumes an access index
        let content = "0xA\n\n0xA\n";
        let index = FutureAccessIndex::from_access_stream(content);
        assert_eq!(index.future_accesses("0xA"), &[0, 2]);
    }
}
