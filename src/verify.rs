//! Optimal-victim recomputation and comparison

use regex::Regex;

use crate::episode::Episode;
use crate::error::AnalyzerResult;
use crate::error::TraceError;
use crate::future_index::FutureAccessIndex;

/// Structured view of one eviction decision
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRecord {
    /// Logical access clock at eviction time; absent only in malformed
    /// captures
    pub access_counter: Option<u64>,
    /// Candidate addresses in inspection order, duplicates preserved
    pub candidates: Vec<String>,
    /// The address the simulator actually evicted
    pub chosen_victim: String,
}

/// Outcome of recomputing the optimal choice for one episode
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The candidate an optimal policy would evict, if any qualifies
    pub victim: Option<String>,
    /// Set when the victim was selected because it is never referenced
    /// again
    pub dead_block: Option<String>,
}

/// Per-episode comparison of the recomputed choice against the trace
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub record: EpisodeRecord,
    pub prediction: Prediction,
}

impl VerificationResult {
    /// The simulator's choice agrees with the recomputed optimal choice
    pub fn matches(&self) -> bool {
        self.prediction.victim.as_deref() == Some(self.record.chosen_victim.as_str())
    }
}

/// Extract the access counter, candidate list, and evicted address from an
/// episode's payload lines. The last access-counter match wins.
pub fn parse_episode(
    episode: &Episode,
    episode_index: usize,
) -> AnalyzerResult<EpisodeRecord> {
    let counter_re = Regex::new(r"Access counter: (\d+)").unwrap();
    let candidate_re =
        Regex::new(r"Looking at candidate with address (\w+)").unwrap();
    let evict_re = Regex::new(r"Evicting block with address (\w+)").unwrap();

    let mut access_counter = None;
    let mut candidates = Vec::new();
    let mut chosen_victim = None;

    for line in &episode.lines {
        if let Some(captures) = counter_re.captures(line) {
            access_counter = captures[1].parse().ok();
        }
        if let Some(captures) = candidate_re.captures(line) {
            candidates.push(captures[1].to_string());
        }
        if let Some(captures) = evict_re.captures(line) {
            chosen_victim = Some(captures[1].to_string());
        }
    }

    Ok(EpisodeRecord {
        access_counter,
        candidates,
        chosen_victim: chosen_victim
            .ok_or(TraceError::MissingEvictionMarker(episode_index))?,
    })
}

/// Recompute which candidate an optimal policy should have evicted.
///
/// A candidate with no access at or beyond the current counter is dead and
/// selected outright. Otherwise each candidate contributes the first future
/// entry beyond both the access counter and the running best, and the last
/// candidate to raise the running best wins. The per-candidate scan stops
/// at that first qualifying entry rather than the candidate's true furthest
/// use; the simulator's own recomputation works this way, and mismatch
/// detection depends on reproducing it exactly.
pub fn predict_victim(
    record: &EpisodeRecord,
    index: &FutureAccessIndex,
    episode_index: usize,
) -> AnalyzerResult<Prediction> {
    if record.candidates.is_empty() {
        return Ok(Prediction { victim: None, dead_block: None });
    }

    let access_counter = record
        .access_counter
        .ok_or(TraceError::MissingAccessCounter(episode_index))?;

    let mut max_index = 0u64;
    let mut victim: Option<&str> = None;

    for candidate in &record.candidates {
        let future = index.future_accesses(candidate);

        let dead = match future.last() {
            Some(&last) => last < access_counter,
            None => true,
        };
        if dead {
            return Ok(Prediction {
                victim: Some(candidate.clone()),
                dead_block: Some(candidate.clone()),
            });
        }

        for &access_index in future {
            if access_index > access_counter && access_index > max_index {
                max_index = access_index;
                victim = Some(candidate.as_str());
                break;
            }
        }
    }

    Ok(Prediction { victim: victim.map(String::from), dead_block: None })
}

/// Parse one episode and compare the recomputed victim against the
/// simulator's choice
pub fn verify_episode(
    episode: &Episode,
    index: &FutureAccessIndex,
    episode_index: usize,
) -> AnalyzerResult<VerificationResult> {
    let record = parse_episode(episode, episode_index)?;
    let prediction = predict_victim(&record, index, episode_index)?;
    Ok(VerificationResult { record, prediction })
}
