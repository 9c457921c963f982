//! Control segments and the per-runner splits run on them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directed control pair; `(A, B)` and `(B, A)` are different keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey {
    pub from_control: String,
    pub to_control: String,
}

impl SegmentKey {
    pub fn new(from_control: impl Into<String>, to_control: impl Into<String>) -> Self {
        Self {
            from_control: from_control.into(),
            to_control: to_control.into(),
        }
    }

    /// The same pair run in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            from_control: self.to_control.clone(),
            to_control: self.from_control.clone(),
        }
    }

    /// Human-readable `"{from}-{to}"` label
    pub fn label(&self) -> String {
        format!("{}-{}", self.from_control, self.to_control)
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from_control, self.to_control)
    }
}

/// One runner's elapsed time on a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerSplit {
    pub person_id: u64,
    pub race_number: u32,
    /// Position of this leg in the runner's own course
    pub leg_number: u32,
    pub time_seconds: f64,
}

/// All valid splits of one class on one directed control pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSegment {
    pub class_result_short_name: String,
    pub from_control: String,
    pub to_control: String,
    pub segment_label: String,
    /// Classes of the result list whose runners ran this directed pair
    pub classes: Vec<String>,
    /// Whether the reversed pair also occurs in the result list
    pub bidirectional: bool,
    /// Ordered by race number, then person id
    pub runner_splits: Vec<RunnerSplit>,
    /// Median valid split, absent when too few splits exist
    pub reference_time_seconds: Option<f64>,
}

impl ControlSegment {
    /// Directed key of this segment
    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(self.from_control.clone(), self.to_control.clone())
    }

    /// Number of valid splits
    pub fn split_count(&self) -> usize {
        self.runner_splits.len()
    }

    /// Elapsed times in split order
    pub fn times(&self) -> Vec<f64> {
        self.runner_splits.iter().map(|s| s.time_seconds).collect()
    }
}

impl fmt::Display for ControlSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment {} [{}] ({} splits{})",
            self.segment_label,
            self.class_result_short_name,
            self.split_count(),
            if self.bidirectional { ", bidirectional" } else { "" }
        )
    }
}
