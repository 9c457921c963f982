//! Shared fixtures for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;
use split_core::{AnalysisConfig, RunnerIdentity};
use split_segments::{ClassInput, PerformanceCalculator, PerformanceTable, RunnerPunches, SegmentBuilder};

/// Leg time every runner runs unless overridden
pub const T: f64 = 200.0;
const COURSE: [&str; 4] = ["31", "45", "52", "38"];

/// Eight runners running every leg in `T`; runner 1 takes `multipliers` instead
pub fn class_with_subject(multipliers: [f64; 5]) -> ClassInput {
    let runners = (0..8u32)
        .map(|i| {
            let times: Vec<f64> = if i == 0 {
                multipliers.iter().map(|m| m * T).collect()
            } else {
                vec![T; 5]
            };
            let mut runner = RunnerPunches::new(RunnerIdentity::new(300 + i as u64, i + 1, "D21"));
            let mut elapsed = 0.0;
            for (code, t) in COURSE.iter().zip(&times) {
                elapsed += t;
                runner = runner.punch(*code, elapsed);
            }
            runner.finish(elapsed + times[4])
        })
        .collect();
    ClassInput {
        class_result_short_name: "D21".into(),
        runners,
    }
}

pub fn table(class: &ClassInput) -> PerformanceTable {
    let segments = SegmentBuilder::new().build_class(class).unwrap();
    PerformanceCalculator::from_config(&AnalysisConfig::default()).compute(segments)
}
