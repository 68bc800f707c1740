use std::env;
use std::error::Error;

use analyzer_lib::runner;
use analyzer_lib::runner::RunnerConfig;

fn main() -> Result<(), Box<dyn Error>> {
    let mut config = RunnerConfig::default();
    let mut output_path = String::from("eval/bench_eval.csv");

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-b" => {
                config.benchmark = Some(
                    args.next()
                        .ok_or("You should specify a benchmark after -b")?,
                );
            }
            "-c" => {
                config.cpu_type =
                    args.next().ok_or("You should specify a CPU type after -c")?;
            }
            "--l2-size" => {
                config.l2_size = args
                    .next()
                    .ok_or("You should specify an L2 size after --l2-size")?;
            }
            "--l2-assoc" => {
                config.l2_assoc = args.next().ok_or(
                    "You should specify an L2 associativity after --l2-assoc",
                )?;
            }
            "-s17" => config.spec2017 = true,
            "-o" => {
                output_path = args
                    .next()
                    .ok_or("You should specify an output file after -o")?;
            }
            _ => return Err(format!("Unknown parameter: {}", arg).into()),
        }
    }

    let benchmarks = config.selected_benchmarks()?;

    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record(["Benchmark", "CPI"])?;

    for benchmark in benchmarks {
        eprintln!("Running {}...", benchmark);

        match runner::run_benchmark(&config, benchmark) {
            Ok(cpi) => {
                writer.write_record([benchmark, &format!("{:.6}", cpi)])?;
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to run benchmark '{}': {}",
                    benchmark, e
                );
                writer.write_record([benchmark, "Error"])?;
            }
        }
    }

    writer.flush()?;
    eprintln!("Wrote {}", output_path);

    Ok(())
}
