use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Reference file error: {0}")]
    ReferenceError(#[from] ReferenceError),

    #[error("Trace analysis error: {0}")]
    TraceError(#[from] TraceError),

    #[error("Benchmark runner error: {0}")]
    RunnerError(#[from] RunnerError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Errors related to the future-access reference file
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read reference file '{0}': {1}")]
    FileReadError(PathBuf, #[source] std::io::Error),

    #[error("Data line {0} appears before any address header: '{1}'")]
    OrphanDataLine(usize, String),
}

/// Errors related to simulator debug traces
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace file '{0}': {1}")]
    FileReadError(PathBuf, #[source] std::io::Error),

    #[error("Episode {0} has eviction candidates but no access counter")]
    MissingAccessCounter(usize),

    #[error("Episode {0} has no eviction marker")]
    MissingEvictionMarker(usize),
}

/// Errors related to driving the external simulator
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("'{0}' is not one of the benchmarks available to run")]
    UnknownBenchmark(String),

    #[error("Failed to launch simulator '{0}': {1}")]
    LaunchError(String, #[source] std::io::Error),

    #[error("Simulator exited with status {1} for benchmark '{0}'")]
    SimulatorFailed(String, i32),

    #[error("Failed to read stats file '{0}': {1}")]
    StatsReadError(PathBuf, #[source] std::io::Error),

    #[error("Statistic '{0}' not found in '{1}'")]
    StatNotFound(String, PathBuf),
}

/// Type alias for Result with AnalyzerError
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
