//! The split-time analysis record: segments plus per-runner leg PIs

use crate::builder::UnavailableClass;
use crate::performance::{LegPerformance, PerformanceTable};
use crate::segment::ControlSegment;
use serde::{Deserialize, Serialize};
use split_core::{AnalysisKey, RunnerIdentity};

/// One runner's legs with their PIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerSplitProfile {
    #[serde(flatten)]
    pub identity: RunnerIdentity,
    pub class_runner_count: usize,
    pub reliable_data: bool,
    #[serde(rename = "normalPI")]
    pub normal_pi: Option<f64>,
    pub legs: Vec<LegPerformance>,
}

/// Counts over a split-time analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitTimeStatistics {
    pub class_count: usize,
    pub runner_count: usize,
    pub segment_count: usize,
    /// Splits that entered a segment
    pub valid_split_count: usize,
    /// Splits rejected as malformed
    pub excluded_split_count: usize,
    /// Segments with too few splits for a reference time
    pub no_reference_segment_count: usize,
    pub unavailable_classes: Vec<String>,
}

impl SplitTimeStatistics {
    /// Reduce a set of tables
    pub fn from_tables(tables: &[PerformanceTable], unavailable: &[UnavailableClass]) -> Self {
        let segments = tables.iter().flat_map(|t| t.segments.iter());
        let (segment_count, valid_split_count, no_reference_segment_count) =
            segments.fold((0, 0, 0), |(n, splits, missing), s| {
                (
                    n + 1,
                    splits + s.split_count(),
                    missing + usize::from(s.reference_time_seconds.is_none()),
                )
            });

        Self {
            class_count: tables.len(),
            runner_count: tables.iter().map(|t| t.runners.len()).sum(),
            segment_count,
            valid_split_count,
            excluded_split_count: tables.iter().map(|t| t.excluded_splits).sum::<usize>(),
            no_reference_segment_count,
            unavailable_classes: unavailable
                .iter()
                .map(|u| u.class_result_short_name.clone())
                .collect(),
        }
    }
}

/// Segments and leg PIs of one result list, or of one class of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitTimeAnalysis {
    #[serde(flatten)]
    pub key: AnalysisKey,
    pub segments: Vec<ControlSegment>,
    pub runners: Vec<RunnerSplitProfile>,
    pub statistics: SplitTimeStatistics,
}

impl SplitTimeAnalysis {
    /// Assemble the record from computed tables
    pub fn from_tables(
        key: AnalysisKey,
        tables: &[PerformanceTable],
        unavailable: &[UnavailableClass],
    ) -> Self {
        let segments = tables.iter().flat_map(|t| t.segments.iter().cloned()).collect();
        let runners = tables
            .iter()
            .flat_map(|t| {
                t.runners.iter().map(move |r| RunnerSplitProfile {
                    identity: r.identity.clone(),
                    class_runner_count: t.class_runner_count,
                    reliable_data: t.reliable_data,
                    normal_pi: r.normal_pi,
                    legs: r.legs.clone(),
                })
            })
            .collect();

        Self {
            key,
            segments,
            runners,
            statistics: SplitTimeStatistics::from_tables(tables, unavailable),
        }
    }
}
