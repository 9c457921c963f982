//! Shared fixtures for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;
use split_core::RunnerIdentity;
use split_segments::{ClassInput, RunnerPunches};

pub const EPSILON: f64 = 1e-10;

/// Controls of the fixture course, start and finish excluded
pub const COURSE: [&str; 4] = ["31", "45", "52", "38"];

/// A runner on [`COURSE`] with the given leg times (one more than controls)
pub fn runner(person_id: u64, race_number: u32, class: &str, leg_times: &[f64]) -> RunnerPunches {
    let mut runner = RunnerPunches::new(RunnerIdentity::new(person_id, race_number, class));
    let mut elapsed = 0.0;
    for (code, t) in COURSE.iter().zip(leg_times) {
        elapsed += t;
        runner = runner.punch(*code, elapsed);
    }
    match leg_times.get(COURSE.len()) {
        Some(last) => runner.finish(elapsed + last),
        None => runner,
    }
}

/// A class where runner `i` runs every leg at `base * (1 + step * i)`
pub fn scaled_class(name: &str, count: usize, base: &[f64], step: f64) -> ClassInput {
    let runners = (0..count)
        .map(|i| {
            let f = 1.0 + step * i as f64;
            let times: Vec<f64> = base.iter().map(|t| t * f).collect();
            runner(1000 + i as u64, i as u32 + 1, name, &times)
        })
        .collect();
    ClassInput {
        class_result_short_name: name.to_string(),
        runners,
    }
}
