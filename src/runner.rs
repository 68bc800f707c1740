//! Benchmark orchestration around the external simulator

use std::path::PathBuf;
use std::process::Command;

use regex::Regex;

use crate::error::AnalyzerResult;
use crate::error::RunnerError;

/// Benchmark names the simulator's SPEC config accepts
pub const BENCHMARKS: &[&str] = &[
    "perlbench_s", "gcc_s", "bwaves_s", "mcf_s", "cactuBSSN_s", "deepsjeng_s",
    "lbm_s", "omnetpp_s", "wrf_s", "xalancbmk_s", "specrand_is",
    "specrand_fs", "cam4_s", "pop2_s", "imagick_s", "nab_s", "fotonik3d_s",
    "roms_s", "x264_s", "leela_s", "exchange2_s", "xz_s", "perlbench",
    "bzip2", "gcc", "bwaves", "gamess", "mcf", "milc", "zeusmp", "gromacs",
    "cactusADM", "leslie3d", "namd", "gobmk", "dealII", "soplex", "povray",
    "calculix", "hmmer", "sjeng", "GemsFDTD", "libquantum", "h264ref",
    "tonto", "lbm", "omnetpp", "astar", "wrf", "sphinx3", "xalancbmk",
    "specrand_i", "specrand_f",
];

/// SPEC CPU2017 subset
pub const BENCHMARKS_2017: &[&str] = &[
    "bwaves_s", "cactuBSSN_s", "lbm_s", "wrf_s", "cam4_s", "pop2_s",
    "imagick_s", "nab_s", "fotonik3d_s", "rom_s", "specrand_fs",
    "perlbench_s", "gcc_s", "mcf_s", "omnetpp_s", "xalancbmk_s", "x264_s",
    "deepsjeng_s", "leela_s", "exchange2_s", "xz_s", "specrand_is",
    "bwaves_r", "cactuBSSN_r", "lbm_r",
];

/// Configuration for a benchmark batch
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Simulator executable
    pub simulator: PathBuf,
    /// Simulator configuration script passed as its first argument
    pub config_script: PathBuf,
    /// Statistics file the simulator writes after a run
    pub stats_file: PathBuf,

    pub cpu_type: String,
    pub l2_size: String,
    pub l2_assoc: String,
    pub max_insts: u64,

    /// Restrict the batch to a single benchmark
    pub benchmark: Option<String>,
    /// Use the SPEC CPU2017 subset instead of the full list
    pub spec2017: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            simulator: PathBuf::from("./build/ECE565-X86/gem5.opt"),
            config_script: PathBuf::from("configs/spec/spec_se.py"),
            stats_file: PathBuf::from("m5out/stats.txt"),
            cpu_type: "X86O3CPU".to_string(),
            l2_size: "256kB".to_string(),
            l2_assoc: "4".to_string(),
            max_insts: 1_000_000,
            benchmark: None,
            spec2017: false,
        }
    }
}

impl RunnerConfig {
    /// Benchmarks selected by this configuration.
    /// A single-benchmark filter must name a known benchmark.
    pub fn selected_benchmarks(&self) -> AnalyzerResult<Vec<&str>> {
        let list = if self.spec2017 { BENCHMARKS_2017 } else { BENCHMARKS };
        match &self.benchmark {
            Some(benchmark) => {
                if list.contains(&benchmark.as_str()) {
                    Ok(vec![benchmark.as_str()])
                } else {
                    Err(RunnerError::UnknownBenchmark(benchmark.clone()).into())
                }
            }
            None => Ok(list.to_vec()),
        }
    }
}

/// Argument vector passed to the simulator for one benchmark
pub fn simulator_args(config: &RunnerConfig, benchmark: &str) -> Vec<String> {
    vec![
        config.config_script.display().to_string(),
        "-b".to_string(),
        benchmark.to_string(),
        format!("--cpu-type={}", config.cpu_type),
        format!("--maxinsts={}", config.max_insts),
        "--l1d_size=16kB".to_string(),
        "--l1i_size=16kB".to_string(),
        "--l1d_assoc=2".to_string(),
        "--l1i_assoc=2".to_string(),
        "--caches".to_string(),
        "--l2cache".to_string(),
        format!("--l2_size={}", config.l2_size),
        format!("--l2_assoc={}", config.l2_assoc),
    ]
}

/// Extract the value following a statistic's name in simulator stats output
pub fn scrape_stat(contents: &str, stat: &str) -> Option<f64> {
    let stat_re =
        Regex::new(&format!(r"{} *(\S+)", regex::escape(stat))).unwrap();
    let captures = stat_re.captures(contents)?;
    captures[1].parse().ok()
}

/// Run one benchmark to completion and scrape its CPI from the stats file
pub fn run_benchmark(config: &RunnerConfig, benchmark: &str) -> AnalyzerResult<f64> {
    let output = Command::new(&config.simulator)
        .args(simulator_args(config, benchmark))
        .output()
        .map_err(|e| {
            RunnerError::LaunchError(config.simulator.display().to_string(), e)
        })?;

    if !output.status.success() {
        return Err(RunnerError::SimulatorFailed(
            benchmark.to_string(),
            output.status.code().unwrap_or(-1),
        )
        .into());
    }

    let contents = std::fs::read_to_string(&config.stats_file).map_err(|e| {
        RunnerError::StatsReadError(config.stats_file.clone(), e)
    })?;

    match scrape_stat(&contents, "cpi") {
        Some(value) => Ok(value),
        None => Err(RunnerError::StatNotFound(
            "cpi".to_string(),
            config.stats_file.clone(),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_args() {
        let config = RunnerConfig::default();
        let args = simulator_args(&config, "mcf");
        assert_eq!(
            args,
            vec![
                "configs/spec/spec_se.py",
                "-b",
                "mcf",
                "--cpu-type=X86O3CPU",
                "--maxinsts=1000000",
                "--l1d_size=16kB",
                "--l1i_size=16kB",
                "--l1d_assoc=2",
                "--l1i_assoc=2",
                "--caches",
                "--l2cache",
                "--l2_size=256kB",
                "--l2_assoc=4",
            ]
        );
    }

    #[test]
    fn test_simulator_args_follow_config() {
        let config = RunnerConfig {
            l2_size: "512kB".to_string(),
            l2_assoc: "16".to_string(),
            ..Default::default()
        };
        let args = simulator_args(&config, "gcc");
        assert!(args.contains(&"--l2_size=512kB".to_string()));
        assert!(args.contains(&"--l2_assoc=16".to_string()));
    }

    #[test]
    fn test_selected_benchmarks_full_list() {
        let config = RunnerConfig::default();
        assert_eq!(config.selected_benchmarks().unwrap(), BENCHMARKS.to_vec());
    }

    #[test]
    fn test_selected_benchmarks_single() {
        let config = RunnerConfig {
            benchmark: Some("mcf".to_string()),
            ..Default::default()
        };
        assert_eq!(config.selected_benchmarks().unwrap(), vec!["mcf"]);
    }

    #[test]
    fn test_selected_benchmarks_unknown_is_an_error() {
        let config = RunnerConfig {
            benchmark: Some("not-a-benchmark".to_string()),
            ..Default::default()
        };
        assert!(config.selected_benchmarks().is_err());
    }

    #[test]
    fn test_selected_benchmarks_spec2017() {
        let config = RunnerConfig { spec2017: true, ..Default::default() };
        assert_eq!(
            config.selected_benchmarks().unwrap(),
            BENCHMARKS_2017.to_vec()
        );
    }

    #[test]
    fn test_scrape_stat() {
        let contents = "\
sim_seconds   0.002 # seconds simulated\n\
system.cpu.cpi   1.694420 # CPI: cycles per instruction\n\
system.cpu.ipc   0.590173 # IPC\n";
        assert_eq!(scrape_stat(contents, "cpi"), Some(1.694420));
    }

    #[test]
    fn test_scrape_stat_missing() {
        assert_eq!(scrape_stat("sim_seconds 0.002\n", "cpi"), None);
    }
}
