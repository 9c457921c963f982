//! Shared fixtures for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;
use split_core::{AnalysisConfig, RunnerIdentity};
use split_segments::{ClassInput, PerformanceCalculator, PerformanceTable, RunnerPunches, SegmentBuilder};

/// Leg bases of an eight-leg course
pub const BASE: [f64; 8] = [300.0, 280.0, 320.0, 310.0, 290.0, 305.0, 330.0, 260.0];
const COURSE: [&str; 7] = ["31", "45", "52", "38", "61", "44", "70"];

pub const PASSENGER: usize = 9;
pub const DRIVER: usize = 2;
/// Zero-based legs on which the passenger ran one second behind the driver
pub const HANGING_LEGS: [usize; 3] = [2, 3, 4];

pub fn runner(person_id: u64, race_number: u32, leg_times: &[f64]) -> RunnerPunches {
    let mut runner = RunnerPunches::new(RunnerIdentity::new(person_id, race_number, "H21"));
    let mut elapsed = 0.0;
    for (code, t) in COURSE.iter().zip(leg_times) {
        elapsed += t;
        runner = runner.punch(*code, elapsed);
    }
    runner.finish(elapsed + leg_times[COURSE.len()])
}

fn factor(i: usize) -> f64 {
    1.0 + 0.04 * i as f64
}

/// Leg times of runner `i` in the ten-runner scenario
pub fn scenario_times(i: usize) -> Vec<f64> {
    BASE.iter()
        .enumerate()
        .map(|(leg, b)| {
            if i == PASSENGER && HANGING_LEGS.contains(&leg) {
                b * factor(DRIVER) + 1.0
            } else {
                b * factor(i)
            }
        })
        .collect()
}

/// Ten runners at least ten seconds apart on every leg, except that the
/// slowest follows the third fastest for three legs
pub fn hanging_scenario(start: impl Fn(usize) -> Option<f64>) -> ClassInput {
    let runners = (0..10)
        .map(|i| {
            let r = runner(2000 + i as u64, i as u32 + 1, &scenario_times(i));
            match start(i) {
                Some(clock) => r.started_at(clock),
                None => r,
            }
        })
        .collect();
    ClassInput {
        class_result_short_name: "H21".into(),
        runners,
    }
}

/// Zero-based leg on which the tie scenario's passenger runs with the twins
pub const TIE_LEG: usize = 2;
/// Race numbers of the twins, listed in runner order
pub const TWIN_RACE_NUMBERS: [u32; 2] = [40, 30];

/// Ten runners where runners 4 and 5 are twins with identical leg times, and
/// the slowest runs one second behind both of them on one leg
pub fn tie_scenario() -> ClassInput {
    let runners = (0..10)
        .map(|i| {
            let (profile, race_number) = match i {
                3 => (3, TWIN_RACE_NUMBERS[0]),
                4 => (3, TWIN_RACE_NUMBERS[1]),
                _ => (i, i as u32 + 1),
            };
            let times: Vec<f64> = BASE
                .iter()
                .enumerate()
                .map(|(leg, b)| {
                    if i == PASSENGER && leg == TIE_LEG {
                        b * factor(3) + 1.0
                    } else {
                        b * factor(profile)
                    }
                })
                .collect();
            runner(2000 + i as u64, race_number, &times)
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
