//! Records produced by anomaly detection

use serde::{Deserialize, Serialize};
use split_core::{AnalysisKey, RunnerIdentity};
use std::fmt;

/// Suspicion level of a leg or a runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyClassification {
    NoSuspicion,
    ModerateSuspicion,
    HighSuspicion,
    NoData,
}

impl AnomalyClassification {
    /// Ordering used to pick a runner's worst leg; `NoData` ranks lowest
    pub fn severity(&self) -> u8 {
        match self {
            Self::NoData => 0,
            Self::NoSuspicion => 1,
            Self::ModerateSuspicion => 2,
            Self::HighSuspicion => 3,
        }
    }

    /// Lower to at most `ModerateSuspicion`
    pub fn capped(self) -> Self {
        match self {
            Self::HighSuspicion => Self::ModerateSuspicion,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSuspicion => "NO_SUSPICION",
            Self::ModerateSuspicion => "MODERATE_SUSPICION",
            Self::HighSuspicion => "HIGH_SUSPICION",
            Self::NoData => "NO_DATA",
        }
    }
}

impl fmt::Display for AnomalyClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anomaly evidence for one leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomaliesIndexInformation {
    pub leg_number: u32,
    pub from_control: String,
    pub to_control: String,
    pub actual_time_seconds: Option<f64>,
    pub reference_time_seconds: Option<f64>,
    pub performance_index: Option<f64>,
    /// `performanceIndex / normalPI`
    pub anomalies_index: Option<f64>,
    pub classification: AnomalyClassification,
}

/// Anomaly result for one runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyProfile {
    #[serde(flatten)]
    pub identity: RunnerIdentity,
    pub class_runner_count: usize,
    pub reliable_data: bool,
    #[serde(rename = "normalPI")]
    pub normal_pi: Option<f64>,
    /// Smallest anomalies index over the runner's legs
    pub minimum_anomalies_index: Option<f64>,
    pub minimum_anomalies_leg_number: Option<u32>,
    pub classification: AnomalyClassification,
    pub legs: Vec<AnomaliesIndexInformation>,
}

impl AnomalyProfile {
    /// Legs classified as moderate or high suspicion
    pub fn suspicious_legs(&self) -> impl Iterator<Item = &AnomaliesIndexInformation> {
        self.legs.iter().filter(|l| {
            matches!(
                l.classification,
                AnomalyClassification::ModerateSuspicion | AnomalyClassification::HighSuspicion
            )
        })
    }
}

/// Aggregates over a set of anomaly profiles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyStatistics {
    pub runner_count: usize,
    pub no_suspicion_count: usize,
    pub moderate_suspicion_count: usize,
    pub high_suspicion_count: usize,
    pub no_data_count: usize,
    pub unreliable_runner_count: usize,
    pub suspicious_leg_count: usize,
    pub mean_minimum_anomalies_index: Option<f64>,
    pub median_minimum_anomalies_index: Option<f64>,
    pub excluded_split_count: usize,
    pub unavailable_classes: Vec<String>,
}

/// Anomaly analysis of one result list, or of one class of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyAnalysis {
    #[serde(flatten)]
    pub key: AnalysisKey,
    pub runners: Vec<AnomalyProfile>,
    pub statistics: AnomalyStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_strings() {
        let json = serde_json::to_string(&AnomalyClassification::ModerateSuspicion).unwrap();
        assert_eq!(json, "\"MODERATE_SUSPICION\"");
        assert_eq!(AnomalyClassification::NoData.to_string(), "NO_DATA");
    }

    #[test]
    fn test_cap_only_lowers_high() {
        assert_eq!(
            AnomalyClassification::HighSuspicion.capped(),
            AnomalyClassification::ModerateSuspicion
        );
        assert_eq!(AnomalyClassification::NoData.capped(), AnomalyClassification::NoData);
    }
}
