//! Analyze one result list and print the JSON report
//!
//! Run with:
//!
//! ```text
//! cargo run --example analyze_event -- [input.json] [config.json]
//! RUST_LOG=split_analysis=debug cargo run --example analyze_event
//! ```
//!
//! Without an input file a small synthetic event is analyzed.

use anyhow::Context;
use split_analysis::prelude::*;
use tracing_subscriber::EnvFilter;

fn synthetic_event() -> ResultListInput {
    let course = ["31", "45", "52", "38", "61"];
    let runners = (0..12u32)
        .map(|i| {
            let pace = 1.0 + 0.05 * i as f64;
            let mut runner = RunnerPunches::new(RunnerIdentity::new(1000 + i as u64, i + 1, "H21"))
                .started_at(36_000.0 + 120.0 * i as f64);
            let mut elapsed = 0.0;
            for (leg, code) in course.iter().enumerate() {
                let mut t = 240.0 * pace;
                if i == 4 && leg == 2 {
                    t *= 2.6;
                }
                elapsed += t;
                runner = runner.punch(*code, elapsed);
            }
            runner.finish(elapsed + 60.0 * pace)
        })
        .collect();

    ResultListInput {
        result_list_id: 1,
        event_id: 1,
        classes: vec![ClassInput {
            class_result_short_name: "H21".into(),
            runners,
        }],
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => synthetic_event(),
    };
    let config = match args.next() {
        Some(path) => AnalysisConfig::from_json_file(&path).with_context(|| format!("loading {path}"))?,
        None => AnalysisConfig::default(),
    };

    let engine = AnalysisEngine::new(config)?;
    let report = engine.analyze(&input, &CancellationToken::new())?;
    println!("{}", report.to_json_pretty()?);
    Ok(())
}
