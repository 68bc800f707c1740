use std::env;
use std::error::Error;
use std::path::PathBuf;

use analyzer_lib::episode;
use analyzer_lib::future_index::FutureAccessIndex;
use analyzer_lib::verify;
use analyzer_lib::verify::VerificationResult;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let reference_file = args
        .next()
        .ok_or("You should specify a reference file and a trace file")?;
    let trace_file = args.next().ok_or("You should specify a trace file")?;

    let mut verbose = false;
    for arg in args {
        match arg.as_str() {
            "-v" => verbose = true,
            _ => return Err(format!("Unknown parameter: {}", arg).into()),
        }
    }

    eprintln!("Reading reference file...");
    let index = FutureAccessIndex::load(&PathBuf::from(&reference_file))?;
    if verbose {
        eprintln!("[VERBOSE] {} addresses indexed", index.len());
    }

    eprintln!("Reading trace file...");
    let scan = episode::scan_trace_file(&PathBuf::from(&trace_file))?;
    if let Some(tail) = &scan.unterminated {
        eprintln!(
            "Warning: trace ended mid-episode; dropping {} buffered lines",
            tail.len()
        );
    }
    if verbose {
        eprintln!("[VERBOSE] {} episodes extracted", scan.episodes.len());
    }

    let mut mismatch_count = 0;
    let mut malformed_count = 0;
    for (i, episode) in scan.episodes.iter().enumerate() {
        match verify::verify_episode(episode, &index, i) {
            Ok(result) => {
                report_episode(i, &result, &index);
                if !result.matches() {
                    mismatch_count += 1;
                }
            }
            Err(e) => {
                eprintln!("Warning: Failed to verify episode {}: {}", i + 1, e);
                malformed_count += 1;
            }
        }
    }

    println!(
        "{} episodes verified: {} mismatches, {} malformed",
        scan.episodes.len(),
        mismatch_count,
        malformed_count
    );

    Ok(())
}

/// Print the diagnostic block for one episode
fn report_episode(
    episode_index: usize,
    result: &VerificationResult,
    index: &FutureAccessIndex,
) {
    let record = &result.record;

    for candidate in &record.candidates {
        println!("{}: {:?}", candidate, index.future_accesses(candidate));
    }
    if let Some(counter) = record.access_counter {
        println!("Access counter: {}", counter);
    }
    if let Some(dead) = &result.prediction.dead_block {
        println!("{} is never referenced again", dead);
    }
    if !result.matches() {
        println!(
            "Mismatch in episode {}: predicted victim {} vs evicted {}",
            episode_index + 1,
            result.prediction.victim.as_deref().unwrap_or("none"),
            record.chosen_victim
        );
    }
    println!("-----------------------------------");
}
