//! Shared fixtures for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;
use split_core::{AnalysisConfig, RunnerIdentity};
use split_segments::{ClassInput, PerformanceCalculator, PerformanceTable, RunnerPunches, SegmentBuilder};

pub const BASE: [f64; 5] = [120.0, 240.0, 90.0, 300.0, 45.0];
const COURSE: [&str; 4] = ["31", "45", "52", "38"];

pub fn runner_on(course: &[&str], person_id: u64, race_number: u32, leg_times: &[f64]) -> RunnerPunches {
    let mut runner = RunnerPunches::new(RunnerIdentity::new(person_id, race_number, "H21"));
    let mut elapsed = 0.0;
    for (code, t) in course.iter().zip(leg_times) {
        elapsed += t;
        runner = runner.punch(*code, elapsed);
    }
    match leg_times.get(course.len()) {
        Some(last) => runner.finish(elapsed + last),
        None => runner,
    }
}

/// `count` runners with factor `1 + 0.02 i`; `tweak` may rewrite any runner's leg times
pub fn class_with(count: usize, tweak: impl Fn(usize, &mut Vec<f64>)) -> ClassInput {
    let runners = (0..count)
        .map(|i| {
            let f = 1.0 + 0.02 * i as f64;
            let mut times: Vec<f64> = BASE.iter().map(|t| t * f).collect();
            tweak(i, &mut times);
            runner_on(&COURSE, 500 + i as u64, i as u32 + 1, &times)
        })
        .collect();
    ClassInput {
        class_result_short_name: "H21".into(),
        runners,
    }
}

pub fn table(class: &ClassInput) -> PerformanceTable {
    let segments = SegmentBuilder::new().build_class(class).unwrap();
    PerformanceCalculator::from_config(&AnalysisConfig::default()).compute(segments)
}
