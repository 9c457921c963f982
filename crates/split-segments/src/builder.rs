//! Segment construction from raw punches
//!
//! Each runner's punch sequence `S → c1 → … → cn → F` becomes a list of legs.
//! Valid legs are grouped by directed control pair into [`ControlSegment`]s;
//! invalid legs stay in the runner's leg list without a time so leg numbering
//! is preserved, and are counted as excluded splits.

use crate::input::{ClassInput, ResultListInput, RunnerPunches};
use crate::segment::{ControlSegment, RunnerSplit, SegmentKey};
use split_core::{Error, Result, RunnerIdentity, FINISH_CONTROL, START_CONTROL};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, instrument, warn};

/// One leg of one runner, before reference times exist
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub leg_number: u32,
    pub from_control: String,
    pub to_control: String,
    /// Index into the class's segment list, when the pair has a segment
    pub segment_index: Option<usize>,
    /// Valid elapsed time; `None` when the leg was rejected
    pub time_seconds: Option<f64>,
    /// Elapsed time since start at the end of this leg, when the punch is valid
    pub arrival_seconds: Option<f64>,
}

impl Leg {
    /// Directed key of this leg
    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.from_control.clone(), self.to_control.clone())
    }
}

/// A runner's legs in course order
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerLegs {
    pub identity: RunnerIdentity,
    pub start_time_seconds: Option<f64>,
    pub legs: Vec<Leg>,
}

/// Segments and legs of one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSegments {
    pub class_result_short_name: String,
    /// Runners listed in the class, including those without a valid leg
    pub runner_count: usize,
    pub segments: Vec<ControlSegment>,
    /// Ordered by race number, then person id
    pub runners: Vec<RunnerLegs>,
    /// Legs rejected as malformed
    pub excluded_splits: usize,
}

/// A class that could not be turned into segments
#[derive(Debug, Clone, PartialEq)]
pub struct UnavailableClass {
    pub class_result_short_name: String,
    pub reason: String,
}

/// Segments of every usable class in a result list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuiltResultList {
    pub classes: Vec<ClassSegments>,
    pub unavailable: Vec<UnavailableClass>,
}

impl BuiltResultList {
    /// Whether no class produced a valid segment
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Total excluded splits over usable classes
    pub fn excluded_splits(&self) -> usize {
        self.classes.iter().map(|c| c.excluded_splits).sum()
    }
}

/// Builds [`ControlSegment`]s from raw punches
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentBuilder;

impl SegmentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self
    }

    /// Build segments for one class
    ///
    /// `classes` and `bidirectional` only see this class; use
    /// [`SegmentBuilder::build_result_list`] to annotate across classes.
    ///
    /// # Errors
    ///
    /// [`Error::NoValidSegments`] when no runner produced a single valid leg.
    #[instrument(skip_all, fields(class = %class.class_result_short_name))]
    pub fn build_class(&self, class: &ClassInput) -> Result<ClassSegments> {
        let class_name = class.class_result_short_name.clone();

        let mut runners: Vec<RunnerLegs> = class
            .runners
            .iter()
            .map(|runner| runner_legs(runner, &class_name))
            .collect();
        runners.sort_by_key(|r| r.identity.sort_key());

        let excluded_splits = runners
            .iter()
            .flat_map(|r| &r.legs)
            .filter(|leg| leg.time_seconds.is_none())
            .count();
        if excluded_splits > 0 {
            warn!(excluded_splits, "Excluded malformed splits");
        }

        // Group valid legs by directed pair, remembering the earliest leg number
        let mut grouped: BTreeMap<SegmentKey, (u32, Vec<RunnerSplit>)> = BTreeMap::new();
        for runner in &runners {
            for leg in &runner.legs {
                let Some(time_seconds) = leg.time_seconds else {
                    continue;
                };
                let entry = grouped
                    .entry(leg.key())
                    .or_insert_with(|| (leg.leg_number, Vec::new()));
                entry.0 = entry.0.min(leg.leg_number);
                entry.1.push(RunnerSplit {
                    person_id: runner.identity.person_id,
                    race_number: runner.identity.race_number,
                    leg_number: leg.leg_number,
                    time_seconds,
                });
            }
        }

        if grouped.is_empty() {
            return Err(Error::NoValidSegments { class: class_name });
        }

        let mut ordered: Vec<(u32, SegmentKey, Vec<RunnerSplit>)> = grouped
            .into_iter()
            .map(|(key, (first_leg, splits))| (first_leg, key, splits))
            .collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        let segments: Vec<ControlSegment> = ordered
            .into_iter()
            .map(|(_, key, splits)| ControlSegment {
                class_result_short_name: class_name.clone(),
                segment_label: key.label(),
                classes: vec![class_name.clone()],
                bidirectional: false,
                runner_splits: splits,
                reference_time_seconds: None,
                from_control: key.from_control,
                to_control: key.to_control,
            })
            .collect();

        let index: HashMap<SegmentKey, usize> = segments
            .iter()
            .enumerate()
            .map(|(i, s)| (s.key(), i))
            .collect();
        for runner in &mut runners {
            for leg in &mut runner.legs {
                leg.segment_index = index.get(&leg.key()).copied();
            }
        }

        let mut built = ClassSegments {
            class_result_short_name: class_name,
            runner_count: class.runners.len(),
            segments,
            runners,
            excluded_splits,
        };
        annotate(std::slice::from_mut(&mut built));

        debug!(segments = built.segments.len(), runners = built.runner_count, "Built class segments");
        Ok(built)
    }

    /// Build segments for every class and annotate shared and reversed pairs
    ///
    /// Classes without a valid segment are reported in
    /// [`BuiltResultList::unavailable`] instead of failing the whole list.
    #[instrument(skip_all, fields(result_list_id = input.result_list_id, event_id = input.event_id))]
    pub fn build_result_list(&self, input: &ResultListInput) -> BuiltResultList {
        let mut built = BuiltResultList::default();
        for class in &input.classes {
            match self.build_class(class) {
                Ok(segments) => built.classes.push(segments),
                Err(e) => {
                    warn!(class = %class.class_result_short_name, error = %e, "Class has no usable segments");
                    built.unavailable.push(UnavailableClass {
                        class_result_short_name: class.class_result_short_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        annotate(&mut built.classes);
        built
    }
}

/// Turn one runner's punches into legs
fn runner_legs(runner: &RunnerPunches, class_name: &str) -> RunnerLegs {
    let mut identity = runner.identity.clone();
    identity.class_result_short_name = class_name.to_string();

    let points = runner
        .punches
        .iter()
        .map(|p| (p.control_code.trim(), p.time_seconds))
        .chain(runner.finish_time_seconds.map(|t| (FINISH_CONTROL, t)));

    let mut legs = Vec::with_capacity(runner.punches.len() + 1);
    let (mut prev_code, mut prev_time, mut prev_valid) = (START_CONTROL, 0.0_f64, true);

    for (i, (code, time)) in points.enumerate() {
        let point_valid = !code.is_empty() && time.is_finite();
        let elapsed = time - prev_time;
        let time_seconds = (prev_valid && point_valid && elapsed > 0.0).then_some(elapsed);

        legs.push(Leg {
            leg_number: i as u32 + 1,
            from_control: prev_code.to_string(),
            to_control: code.to_string(),
            segment_index: None,
            time_seconds,
            arrival_seconds: point_valid.then_some(time),
        });

        prev_code = code;
        prev_time = time;
        prev_valid = point_valid;
    }

    RunnerLegs {
        identity,
        start_time_seconds: runner.start_time_seconds.filter(|t| t.is_finite()),
        legs,
    }
}

/// Fill `classes` and `bidirectional` across all given classes
fn annotate(classes: &mut [ClassSegments]) {
    let mut sharing: HashMap<SegmentKey, BTreeSet<String>> = HashMap::new();
    for class in classes.iter() {
        for segment in &class.segments {
            sharing
                .entry(segment.key())
                .or_default()
                .insert(class.class_result_short_name.clone());
        }
    }

    for class in classes.iter_mut() {
        for segment in &mut class.segments {
            let key = segment.key();
            if let Some(names) = sharing.get(&key) {
                segment.classes = names.iter().cloned().collect();
            }
            segment.bidirectional =
                key.from_control != key.to_control && sharing.contains_key(&key.reversed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(person_id: u64, race_number: u32) -> RunnerPunches {
        RunnerPunches::new(RunnerIdentity::new(person_id, race_number, "H21"))
    }

    fn class(runners: Vec<RunnerPunches>) -> ClassInput {
        ClassInput {
            class_result_short_name: "H21".into(),
            runners,
        }
    }

    #[test]
    fn test_legs_include_start_and_finish() {
        let input = class(vec![runner(1, 10).punch("31", 120.0).punch("32", 300.0).finish(360.0)]);
        let built = SegmentBuilder::new().build_class(&input).unwrap();

        let labels: Vec<_> = built.segments.iter().map(|s| s.segment_label.as_str()).collect();
        assert_eq!(labels, vec!["S-31", "31-32", "32-F"]);

        let times: Vec<_> = built.runners[0].legs.iter().map(|l| l.time_seconds).collect();
        assert_eq!(times, vec![Some(120.0), Some(180.0), Some(60.0)]);
        assert_eq!(built.excluded_splits, 0);
    }

    #[test]
    fn test_missing_punch_excludes_runner_from_segment() {
        let input = class(vec![
            runner(1, 10).punch("31", 120.0).punch("32", 300.0).finish(360.0),
            runner(2, 11).punch("32", 280.0).finish(350.0),
        ]);
        let built = SegmentBuilder::new().build_class(&input).unwrap();

        let s31_32 = built.segments.iter().find(|s| s.segment_label == "31-32").unwrap();
        assert_eq!(s31_32.split_count(), 1);
        assert_eq!(s31_32.runner_splits[0].person_id, 1);

        // The second runner ran S-32 instead, never a zero-filled 31-32
        assert!(built.segments.iter().any(|s| s.segment_label == "S-32"));
    }

    #[test]
    fn test_malformed_punches_are_rejected_and_counted() {
        let input = class(vec![
            // Empty code invalidates both adjacent legs
            runner(1, 10).punch("31", 120.0).punch("", 200.0).punch("33", 300.0).finish(400.0),
            // Unordered timestamps reject only the negative leg
            runner(2, 11).punch("31", 130.0).punch("32", 110.0).punch("33", 310.0).finish(410.0),
        ]);
        let built = SegmentBuilder::new().build_class(&input).unwrap();

        let first = &built.runners[0].legs;
        assert_eq!(first[1].time_seconds, None);
        assert_eq!(first[2].time_seconds, None);
        assert_eq!(first[3].time_seconds, Some(100.0));

        let second = &built.runners[1].legs;
        assert_eq!(second[1].time_seconds, None);
        assert_eq!(second[2].time_seconds, Some(200.0));

        assert_eq!(built.excluded_splits, 3);
    }

    #[test]
    fn test_zero_valid_segments_is_an_error() {
        let input = class(vec![runner(1, 10), runner(2, 11).punch("", f64::NAN)]);
        let err = SegmentBuilder::new().build_class(&input).unwrap_err();
        assert!(matches!(err, Error::NoValidSegments { ref class } if class == "H21"));
    }

    #[test]
    fn test_splits_are_ordered_by_race_number() {
        let input = class(vec![
            runner(9, 30).punch("31", 100.0),
            runner(7, 10).punch("31", 110.0),
            runner(8, 20).punch("31", 105.0),
        ]);
        let built = SegmentBuilder::new().build_class(&input).unwrap();
        let order: Vec<u32> = built.segments[0].runner_splits.iter().map(|s| s.race_number).collect();
        assert_eq!(order, vec![10, 20, 30]);
    }

    #[test]
    fn test_bidirectional_and_shared_classes() {
        let input = ResultListInput {
            result_list_id: 1,
            event_id: 2,
            classes: vec![
                ClassInput {
                    class_result_short_name: "D21".into(),
                    runners: vec![runner(1, 1).punch("31", 100.0).punch("45", 200.0)],
                },
                ClassInput {
                    class_result_short_name: "H21".into(),
                    runners: vec![runner(2, 2).punch("45", 90.0).punch("31", 210.0)],
                },
                ClassInput {
                    class_result_short_name: "H35".into(),
                    runners: vec![runner(3, 3).punch("31", 95.0).punch("45", 190.0)],
                },
            ],
        };
        let built = SegmentBuilder::new().build_result_list(&input);
        assert!(built.unavailable.is_empty());

        let d21 = &built.classes[0];
        let forward = d21.segments.iter().find(|s| s.segment_label == "31-45").unwrap();
        assert!(forward.bidirectional);
        assert_eq!(forward.classes, vec!["D21".to_string(), "H35".to_string()]);

        let h21 = &built.classes[1];
        let backward = h21.segments.iter().find(|s| s.segment_label == "45-31").unwrap();
        assert!(backward.bidirectional);
        assert_eq!(backward.classes, vec!["H21".to_string()]);

        let start = d21.segments.iter().find(|s| s.segment_label == "S-31").unwrap();
        assert!(!start.bidirectional);
    }

    #[test]
    fn test_unusable_class_is_reported_not_fatal() {
        let input = ResultListInput {
            result_list_id: 1,
            event_id: 2,
            classes: vec![
                ClassInput {
                    class_result_short_name: "D21".into(),
                    runners: vec![runner(1, 1).punch("31", 100.0)],
                },
                ClassInput {
                    class_result_short_name: "EMPTY".into(),
                    runners: vec![],
                },
            ],
        };
        let built = SegmentBuilder::new().build_result_list(&input);
        assert_eq!(built.classes.len(), 1);
        assert_eq!(built.unavailable.len(), 1);
        assert_eq!(built.unavailable[0].class_result_short_name, "EMPTY");
    }
}
