//! Eviction-episode extraction from simulator debug traces

use std::path::Path;

use regex::Regex;

use crate::error::AnalyzerResult;
use crate::error::TraceError;

/// Null address evicted by the spurious warm-up episode
pub const SENTINEL_ADDRESS: &str = "0x0";

/// Structured payloads describing one complete eviction decision,
/// from the victim-selection entry line to the eviction line
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub lines: Vec<String>,
}

/// Extractor state
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Capturing,
}

/// Episodes found in a trace, plus any payloads that were still buffered
/// when the trace ended without a closing eviction marker
#[derive(Debug, Default)]
pub struct TraceScan {
    pub episodes: Vec<Episode>,
    pub unterminated: Option<Vec<String>>,
}

/// Scan a debug trace for eviction episodes.
///
/// Capturing starts at a victim-selection entry line and ends at the next
/// eviction line; an eviction of the null address discards the buffer
/// instead of emitting it. Lines outside a capture, and lines that do not
/// match the structured `<counter>: <subsystem>: <payload>` pattern, are
/// ignored.
pub fn extract_episodes(content: &str) -> TraceScan {
    let payload_re = Regex::new(r"^\d+: [\w.]+: (.+)").unwrap();
    let enter_re = Regex::new(r"In getVictim").unwrap();
    let evict_re = Regex::new(r"Evicting block with address (\w+)").unwrap();

    let mut state = State::Idle;
    let mut buffer: Vec<String> = Vec::new();
    let mut episodes = Vec::new();

    for line in content.lines() {
        match state {
            State::Idle => {
                if enter_re.is_match(line) {
                    state = State::Capturing;
                    if let Some(captures) = payload_re.captures(line) {
                        buffer.push(captures[1].to_string());
                    }
                }
            }
            State::Capturing => {
                if let Some(captures) = evict_re.captures(line) {
                    if &captures[1] == SENTINEL_ADDRESS {
                        buffer.clear();
                        state = State::Idle;
                        continue;
                    }
                }

                let payload = match payload_re.captures(line) {
                    Some(captures) => captures[1].to_string(),
                    None => continue,
                };
                buffer.push(payload);

                if evict_re.is_match(line) {
                    episodes.push(Episode { lines: std::mem::take(&mut buffer) });
                    state = State::Idle;
                }
            }
        }
    }

    let unterminated = match state {
        State::Capturing if !buffer.is_empty() => Some(buffer),
        _ => None,
    };

    TraceScan { episodes, unterminated }
}

/// Read a trace file and extract its episodes
pub fn scan_trace_file(path: &Path) -> AnalyzerResult<TraceScan> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TraceError::FileReadError(path.to_path_buf(), e))?;
    Ok(extract_episodes(&content))
}
