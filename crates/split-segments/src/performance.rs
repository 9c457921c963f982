//! Reference times, performance indices and the two-phase normal PI
//!
//! - reference time of a segment: median of its valid splits, absent below
//!   `min_valid_splits`
//! - PI of a leg: `actual / reference`
//! - normal PI of a runner: computed in two named phases,
//!   [`provisional_normal_pi`] over every PI, then [`final_normal_pi`]
//!   over the PIs that are not mistakes relative to the provisional value

use crate::builder::ClassSegments;
use crate::segment::ControlSegment;
use serde::{Deserialize, Serialize};
use split_core::stats::median;
use split_core::{AnalysisConfig, CohortConfig, RunnerIdentity};
use tracing::{debug, instrument};

/// One leg with its performance index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegPerformance {
    pub leg_number: u32,
    pub from_control: String,
    pub to_control: String,
    pub actual_time_seconds: Option<f64>,
    pub reference_time_seconds: Option<f64>,
    pub performance_index: Option<f64>,
    #[serde(skip)]
    pub segment_index: Option<usize>,
    #[serde(skip)]
    pub arrival_seconds: Option<f64>,
}

/// A runner's legs plus both normal PI phases
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerPerformance {
    pub identity: RunnerIdentity,
    pub start_time_seconds: Option<f64>,
    pub legs: Vec<LegPerformance>,
    pub provisional_normal_pi: Option<f64>,
    pub normal_pi: Option<f64>,
}

impl RunnerPerformance {
    /// Ratio of a leg's PI to this runner's normal PI
    pub fn ratio_to_normal(&self, leg: &LegPerformance) -> Option<f64> {
        ratio(leg.performance_index, self.normal_pi)
    }

    /// Clock time at which the runner finished the given leg
    pub fn clock_arrival(&self, leg: &LegPerformance) -> Option<f64> {
        Some(self.start_time_seconds? + leg.arrival_seconds?)
    }

    /// PIs of legs that have one, in leg order
    pub fn indices(&self) -> Vec<f64> {
        self.legs.iter().filter_map(|l| l.performance_index).collect()
    }
}

/// Everything the analyzers need about one class
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTable {
    pub class_result_short_name: String,
    pub class_runner_count: usize,
    pub reliable_data: bool,
    pub segments: Vec<ControlSegment>,
    /// Ordered by race number, then person id
    pub runners: Vec<RunnerPerformance>,
    pub excluded_splits: usize,
    /// For each segment, `(runner index, leg index)` of every leg with a PI
    members: Vec<Vec<(usize, usize)>>,
}

impl PerformanceTable {
    /// Legs with a PI on the given segment
    pub fn segment_members(&self, segment_index: usize) -> &[(usize, usize)] {
        self.members
            .get(segment_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of segments with a reference time
    pub fn referenced_segment_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.reference_time_seconds.is_some())
            .count()
    }
}

/// Turns class segments into a [`PerformanceTable`]
#[derive(Debug, Clone)]
pub struct PerformanceCalculator {
    cohort: CohortConfig,
    mistake_ratio: f64,
}

impl PerformanceCalculator {
    /// Create a calculator
    ///
    /// # Arguments
    /// * `cohort` - minimum class and segment sample sizes
    /// * `mistake_ratio` - legs above this ratio to the provisional normal PI
    ///   are left out of the final normal PI
    pub fn new(cohort: CohortConfig, mistake_ratio: f64) -> Self {
        Self {
            cohort,
            mistake_ratio,
        }
    }

    /// Create a calculator using the moderate mistake threshold for exclusion
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.cohort.clone(), config.mistake.moderate)
    }

    /// Reference time of a segment, `None` below the minimum valid splits
    pub fn reference_time(&self, segment: &ControlSegment) -> Option<f64> {
        if segment.split_count() < self.cohort.min_valid_splits {
            return None;
        }
        median(&segment.times()).filter(|t| *t > 0.0)
    }

    /// Compute reference times, PIs and normal PIs for one class
    #[instrument(skip_all, fields(class = %class.class_result_short_name))]
    pub fn compute(&self, class: ClassSegments) -> PerformanceTable {
        let mut segments = class.segments;
        for segment in &mut segments {
            segment.reference_time_seconds = self.reference_time(segment);
        }

        let runners: Vec<RunnerPerformance> = class
            .runners
            .into_iter()
            .map(|runner| {
                let legs: Vec<LegPerformance> = runner
                    .legs
                    .into_iter()
                    .map(|leg| {
                        let reference = leg
                            .segment_index
                            .and_then(|i| segments[i].reference_time_seconds);
                        LegPerformance {
                            leg_number: leg.leg_number,
                            from_control: leg.from_control,
                            to_control: leg.to_control,
                            actual_time_seconds: leg.time_seconds,
                            reference_time_seconds: reference,
                            performance_index: ratio(leg.time_seconds, reference),
                            segment_index: leg.segment_index,
                            arrival_seconds: leg.arrival_seconds,
                        }
                    })
                    .collect();

                let indices: Vec<f64> = legs.iter().filter_map(|l| l.performance_index).collect();
                let provisional = provisional_normal_pi(&indices);
                let normal = provisional.map(|p| final_normal_pi(&indices, p, self.mistake_ratio));

                RunnerPerformance {
                    identity: runner.identity,
                    start_time_seconds: runner.start_time_seconds,
                    legs,
                    provisional_normal_pi: provisional,
                    normal_pi: normal,
                }
            })
            .collect();

        let mut members = vec![Vec::new(); segments.len()];
        for (r, runner) in runners.iter().enumerate() {
            for (l, leg) in runner.legs.iter().enumerate() {
                if let (Some(s), Some(_)) = (leg.segment_index, leg.performance_index) {
                    members[s].push((r, l));
                }
            }
        }

        let reliable_data = class.runner_count >= self.cohort.min_cohort_size;
        debug!(
            runners = runners.len(),
            reliable_data,
            "Computed performance indices"
        );

        PerformanceTable {
            class_result_short_name: class.class_result_short_name,
            class_runner_count: class.runner_count,
            reliable_data,
            segments,
            runners,
            excluded_splits: class.excluded_splits,
            members,
        }
    }
}

/// Phase one: median of every PI the runner has
pub fn provisional_normal_pi(indices: &[f64]) -> Option<f64> {
    median(indices)
}

/// Phase two: median of the PIs whose ratio to `provisional` does not exceed `mistake_ratio`
///
/// Falls back to `provisional` when every leg would be excluded.
pub fn final_normal_pi(indices: &[f64], provisional: f64, mistake_ratio: f64) -> f64 {
    let kept: Vec<f64> = indices
        .iter()
        .copied()
        .filter(|pi| pi / provisional <= mistake_ratio)
        .collect();
    median(&kept).unwrap_or(provisional)
}

/// `numerator / denominator` when both are present and the denominator is positive
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0.0 && n.is_finite() && d.is_finite() => Some(n / d),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SegmentBuilder;
    use crate::input::{ClassInput, RunnerPunches};
    use approx::assert_relative_eq;

    fn class_of(times: &[&[f64]]) -> ClassSegments {
        // Every runner runs S-31-32-F with the given leg times
        let runners = times
            .iter()
            .enumerate()
            .map(|(i, legs)| {
                let mut elapsed = 0.0;
                let mut runner =
                    RunnerPunches::new(RunnerIdentity::new(i as u64 + 1, i as u32 + 1, "H21"));
                for (code, t) in ["31", "32"].iter().zip(legs.iter()) {
                    elapsed += t;
                    runner = runner.punch(*code, elapsed);
                }
                runner.finish(elapsed + legs[2])
            })
            .collect();
        SegmentBuilder::new()
            .build_class(&ClassInput {
                class_result_short_name: "H21".into(),
                runners,
            })
            .unwrap()
    }

    fn calculator() -> PerformanceCalculator {
        PerformanceCalculator::from_config(&AnalysisConfig::default())
    }

    #[test]
    fn test_reference_is_median() {
        let table = calculator().compute(class_of(&[
            &[100.0, 200.0, 50.0],
            &[110.0, 220.0, 55.0],
            &[120.0, 900.0, 60.0],
        ]));
        let refs: Vec<_> = table.segments.iter().map(|s| s.reference_time_seconds).collect();
        assert_eq!(refs, vec![Some(110.0), Some(220.0), Some(55.0)]);
        assert_relative_eq!(table.runners[0].legs[0].performance_index.unwrap(), 100.0 / 110.0);
    }

    #[test]
    fn test_too_few_splits_gives_no_reference() {
        let table = calculator().compute(class_of(&[&[100.0, 200.0, 50.0], &[110.0, 220.0, 55.0]]));
        assert!(table.segments.iter().all(|s| s.reference_time_seconds.is_none()));
        assert!(table.runners[0].legs.iter().all(|l| l.performance_index.is_none()));
        assert_eq!(table.runners[0].normal_pi, None);
        assert!(!table.reliable_data);
    }

    #[test]
    fn test_two_phase_normal_pi_drops_mistakes() {
        let indices = [1.0, 1.02, 0.98, 2.4, 1.01];
        let provisional = provisional_normal_pi(&indices).unwrap();
        assert_relative_eq!(provisional, 1.01);

        let fin = final_normal_pi(&indices, provisional, 1.2);
        assert_relative_eq!(fin, 1.005);
    }

    #[test]
    fn test_final_normal_pi_falls_back_to_provisional() {
        // Both ratios to 1.35 exceed 0.5, so no leg survives the second phase
        assert_relative_eq!(final_normal_pi(&[1.3, 1.4], 1.35, 0.5), 1.35);
    }

    #[test]
    fn test_members_index_legs_with_pi() {
        let table = calculator().compute(class_of(&[
            &[100.0, 200.0, 50.0],
            &[110.0, 220.0, 55.0],
            &[120.0, 230.0, 60.0],
        ]));
        assert_eq!(table.segment_members(1), &[(0, 1), (1, 1), (2, 1)]);
        assert!(table.segment_members(99).is_empty());
        assert_eq!(table.referenced_segment_count(), 3);
    }

    #[test]
    fn test_ratio_guards() {
        assert_eq!(ratio(Some(2.0), Some(4.0)), Some(0.5));
        assert_eq!(ratio(Some(2.0), Some(0.0)), None);
        assert_eq!(ratio(None, Some(1.0)), None);
        assert_eq!(ratio(Some(f64::NAN), Some(1.0)), None);
    }
}
