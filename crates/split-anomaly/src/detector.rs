//! Anomaly detector
//!
//! A leg's anomalies index is its PI divided by the runner's normal PI. An
//! index well below 1.0 means the runner was much faster than their own
//! baseline on that leg, which is what this detector flags.

use crate::types::{AnomaliesIndexInformation, AnomalyClassification, AnomalyProfile};
use split_core::stats::argmin;
use split_core::{AnomalyConfig, Result};
use split_segments::{ClassAnalyzer, LegScanner, LegView, PerformanceTable, RunnerPerformance};

/// Classifies legs and runners by suspicion level
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl AnomalyDetector {
    /// Create a detector after validating the thresholds
    pub fn new(config: AnomalyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    /// Classify an anomalies index
    ///
    /// Total over every input: missing or non-finite indices are `NoData`, and
    /// an index exactly on a threshold takes the lower severity.
    pub fn classify_index(&self, index: Option<f64>) -> AnomalyClassification {
        match index {
            Some(i) if i.is_finite() => {
                if i < self.config.high {
                    AnomalyClassification::HighSuspicion
                } else if i < self.config.moderate {
                    AnomalyClassification::ModerateSuspicion
                } else {
                    AnomalyClassification::NoSuspicion
                }
            }
            _ => AnomalyClassification::NoData,
        }
    }

    /// Classify a leg, applying the reliability cap
    pub fn classify_leg(&self, index: Option<f64>, reliable_data: bool) -> AnomalyClassification {
        let classification = self.classify_index(index);
        if reliable_data {
            classification
        } else {
            classification.capped()
        }
    }
}

impl LegScanner for AnomalyDetector {
    type Evidence = AnomaliesIndexInformation;

    fn scan_leg(&self, view: &LegView<'_>) -> Option<AnomaliesIndexInformation> {
        let leg = view.leg();
        let anomalies_index = view.ratio_to_normal();
        Some(AnomaliesIndexInformation {
            leg_number: leg.leg_number,
            from_control: leg.from_control.clone(),
            to_control: leg.to_control.clone(),
            actual_time_seconds: leg.actual_time_seconds,
            reference_time_seconds: leg.reference_time_seconds,
            performance_index: leg.performance_index,
            anomalies_index,
            classification: self.classify_leg(anomalies_index, view.table().reliable_data),
        })
    }
}

impl ClassAnalyzer for AnomalyDetector {
    type Profile = AnomalyProfile;

    fn analysis_name(&self) -> &'static str {
        "anomaly"
    }

    fn build_profile(
        &self,
        table: &PerformanceTable,
        runner: &RunnerPerformance,
        legs: Vec<AnomaliesIndexInformation>,
    ) -> AnomalyProfile {
        let classification = legs
            .iter()
            .map(|l| l.classification)
            .max_by_key(|c| c.severity())
            .unwrap_or(AnomalyClassification::NoData);

        // NaN marks legs without an index so positions stay aligned
        let indices: Vec<f64> = legs
            .iter()
            .map(|l| l.anomalies_index.unwrap_or(f64::NAN))
            .collect();
        let minimum = argmin(&indices);

        AnomalyProfile {
            identity: runner.identity.clone(),
            class_runner_count: table.class_runner_count,
            reliable_data: table.reliable_data,
            normal_pi: runner.normal_pi,
            minimum_anomalies_index: minimum.map(|(_, v)| v),
            minimum_anomalies_leg_number: minimum.map(|(i, _)| legs[i].leg_number),
            classification,
            legs,
        }
    }
}

/// Builder for [`AnomalyDetector`]
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetectorBuilder {
    config: AnomalyConfig,
}

impl AnomalyDetectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index below which a leg is moderately suspicious
    pub fn moderate(mut self, moderate: f64) -> Self {
        self.config.moderate = moderate;
        self
    }

    /// Index below which a leg is highly suspicious
    pub fn high(mut self, high: f64) -> Self {
        self.config.high = high;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<AnomalyDetector> {
        AnomalyDetector::new(self.config)
    }
}
