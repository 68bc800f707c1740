//! Debug-log reduction to per-access address streams

use std::path::Path;
use std::path::PathBuf;

use regex::Regex;

use crate::error::AnalyzerError;
use crate::error::AnalyzerResult;

/// Addresses the L2 cache responded with, in trace order.
/// One line of the simplified stream per response.
pub fn simplify_content(content: &str) -> Vec<String> {
    let respond_re =
        Regex::new(r"system\.l2: Cache responding to (0x\w+)").unwrap();

    content
        .lines()
        .filter_map(|line| {
            respond_re.captures(line).map(|captures| captures[1].to_string())
        })
        .collect()
}

/// Output directory for the simplified copies of `dir`
pub fn simplified_dir_path(dir: &Path) -> AnalyzerResult<PathBuf> {
    let name = dir
        .file_name()
        .ok_or_else(|| {
            AnalyzerError::ConfigError(format!(
                "'{}' has no directory name to simplify into",
                dir.display()
            ))
        })?
        .to_string_lossy();

    let simplified_name = format!("simplified_{}", name);
    Ok(match dir.parent() {
        Some(parent) => parent.join(simplified_name),
        None => PathBuf::from(simplified_name),
    })
}

/// Simplify every file in `dir`, writing one address stream per input file
/// to a sibling `simplified_<dir>` directory
pub fn simplify_dir(dir: &Path) -> AnalyzerResult<()> {
    let output_dir = simplified_dir_path(dir)?;
    std::fs::create_dir_all(&output_dir)?;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        eprintln!("Reading {}...", entry.path().display());
        let content = std::fs::read_to_string(entry.path())?;
        let addresses = simplify_content(&content);

        eprintln!(
            "Writing {} addresses for {}...",
            addresses.len(),
            entry.file_name().to_string_lossy()
        );
        let mut stream = String::new();
        for address in &addresses {
            stream.push_str(address);
            stream.push('\n');
        }
        std::fs::write(output_dir.join(entry.file_name()), stream)?;
    }

    Ok(())
}
