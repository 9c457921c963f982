//! Shared fixtures for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;
use split_analysis::prelude::*;

pub const RESULT_LIST_ID: u64 = 4711;
pub const EVENT_ID: u64 = 88;

const MEN_COURSE: [&str; 7] = ["31", "45", "52", "38", "61", "44", "70"];
const MEN_BASE: [f64; 8] = [300.0, 280.0, 320.0, 310.0, 290.0, 305.0, 330.0, 260.0];
const WOMEN_COURSE: [&str; 4] = ["45", "31", "38", "52"];

pub fn runner(class: &str, person_id: u64, race_number: u32, course: &[&str], leg_times: &[f64]) -> RunnerPunches {
    let mut runner = RunnerPunches::new(RunnerIdentity::new(person_id, race_number, class));
    let mut elapsed = 0.0;
    for (code, t) in course.iter().zip(leg_times) {
        elapsed += t;
        runner = runner.punch(*code, elapsed);
    }
    runner.finish(elapsed + leg_times[course.len()])
}

/// Ten men; race number 10 follows race number 3 on legs 3 to 5
pub fn men() -> ClassInput {
    let factor = |i: usize| 1.0 + 0.04 * i as f64;
    let runners = (0..10)
        .map(|i| {
            let times: Vec<f64> = MEN_BASE
                .iter()
                .enumerate()
                .map(|(leg, b)| {
                    if i == 9 && (2..=4).contains(&leg) {
                        b * factor(2) + 1.0
                    } else {
                        b * factor(i)
                    }
                })
                .collect();
            runner("H21", 100 + i as u64, i as u32 + 1, &MEN_COURSE, &times)
        })
        .collect();
    ClassInput {
        class_result_short_name: "H21".into(),
        runners,
    }
}

/// Eight women on 200 s legs; race number 21 has a severe mistake on leg 4
/// and race number 28 punched out of order once
pub fn women() -> ClassInput {
    let mut runners: Vec<RunnerPunches> = (0..8u32)
        .map(|i| {
            let times: Vec<f64> = if i == 0 {
                [1.0, 1.0, 1.0, 2.5, 1.05].iter().map(|m| m * 200.0).collect()
            } else {
                vec![200.0; 5]
            };
            runner("D21", 200 + i as u64, 21 + i, &WOMEN_COURSE, &times)
        })
        .collect();
    runners[7].punches[1].time_seconds = 150.0;
    ClassInput {
        class_result_short_name: "D21".into(),
        runners,
    }
}

pub fn empty_class() -> ClassInput {
    ClassInput {
        class_result_short_name: "H10".into(),
        runners: vec![],
    }
}

pub fn event() -> ResultListInput {
    ResultListInput {
        result_list_id: RESULT_LIST_ID,
        event_id: EVENT_ID,
        classes: vec![men(), women(), empty_class()],
    }
}
