use std::path::PathBuf;
use std::process;

use rubble_bench::report;
use rubble_bench::runner::BenchmarkRunner;
use rubble_bench::scenes;
use rubble_core::config::EngineConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_limit = 3000u32;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(arg_value(&args, i)));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(arg_value(&args, i)));
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(arg_value(&args, i)));
            }
            "--regression-threshold" => {
                i += 1;
                regression_threshold = arg_value(&args, i)
                    .parse()
                    .expect("invalid --regression-threshold value");
            }
            "--ticks" => {
                i += 1;
                tick_limit = arg_value(&args, i).parse().expect("invalid --ticks value");
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!("  --config <path>                Engine config (RON)");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --ticks <n>                    Max rebuild ticks per scene (default: 3000)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(ref path) => {
            let text = std::fs::read_to_string(path).expect("failed to read config");
            EngineConfig::from_ron_str(&text).expect("invalid engine config")
        }
        None => EngineConfig::default(),
    };

    let runner = BenchmarkRunner::new(config, tick_limit);
    let results: Vec<_> = scenes::standard_scenes()
        .iter()
        .map(|scene| runner.run_scene(scene))
        .collect();

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: run_timestamp(),
            results: results.clone(),
        };
        report::save_baseline(path, &baseline).expect("failed to save baseline");
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

/// The argument after a flag, or exit with a usage error.
fn arg_value(args: &[String], i: usize) -> &str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Missing value for {}", args[i - 1]);
            process::exit(1);
        }
    }
}

fn run_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
