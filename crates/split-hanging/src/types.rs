//! Records produced by hanging detection

use serde::{Deserialize, Serialize};
use split_core::{AnalysisKey, RunnerIdentity};
use std::fmt;

/// How strongly a runner appears to have followed others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HangingClassification {
    NoHanging,
    ModerateHanging,
    HighHanging,
    InsufficientData,
}

impl HangingClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoHanging => "NO_HANGING",
            Self::ModerateHanging => "MODERATE_HANGING",
            Self::HighHanging => "HIGH_HANGING",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl fmt::Display for HangingClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leg on which the profile's runner followed a bus driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangingPair {
    pub leg_number: u32,
    pub from_control: String,
    pub to_control: String,
    /// Person id of the runner followed
    pub bus_driver_id: u64,
    pub bus_driver_race_number: u32,
    /// Absolute difference of the two elapsed times on the leg
    pub time_delta_seconds: f64,
    #[serde(rename = "passengerPI")]
    pub passenger_pi: f64,
    #[serde(rename = "busDriverPI")]
    pub bus_driver_pi: f64,
    /// Score in `[0, 100]`
    pub hanging_index: f64,
    /// How much faster than expected the passenger ran the leg
    pub improvement_percent: f64,
}

/// Hanging result for one runner as passenger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangingProfile {
    #[serde(flatten)]
    pub identity: RunnerIdentity,
    pub class_runner_count: usize,
    pub reliable_data: bool,
    #[serde(rename = "normalPI")]
    pub normal_pi: Option<f64>,
    /// Pairs at or above the minimum hanging index
    pub counted_pair_count: usize,
    pub max_hanging_index: Option<f64>,
    pub classification: HangingClassification,
    pub pairs: Vec<HangingPair>,
}

/// Aggregates over a set of hanging profiles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangingStatistics {
    pub runner_count: usize,
    pub no_hanging_count: usize,
    pub moderate_hanging_count: usize,
    pub high_hanging_count: usize,
    pub insufficient_data_count: usize,
    pub pair_count: usize,
    /// Distinct runners who appear as bus driver
    pub bus_driver_count: usize,
    pub mean_hanging_index: Option<f64>,
    pub median_hanging_index: Option<f64>,
    pub mean_improvement_percent: Option<f64>,
    pub excluded_split_count: usize,
    pub unavailable_classes: Vec<String>,
}

/// Hanging analysis of one result list, or of one class of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HangingAnalysis {
    #[serde(flatten)]
    pub key: AnalysisKey,
    pub runners: Vec<HangingProfile>,
    pub statistics: HangingStatistics,
}
