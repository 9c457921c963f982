//! The combined output of one analysis run

use serde::{Deserialize, Serialize};
use split_anomaly::AnomalyAnalysis;
use split_core::{AnalysisKey, AnalysisOutcome, AnalysisType, Result};
use split_hanging::HangingAnalysis;
use split_mental::MentalResilienceAnalysis;
use split_segments::SplitTimeAnalysis;

/// All four analysis records of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub key: AnalysisKey,
    pub split_time: AnalysisOutcome<SplitTimeAnalysis>,
    pub anomaly: AnalysisOutcome<AnomalyAnalysis>,
    pub hanging: AnalysisOutcome<HangingAnalysis>,
    pub mental_resilience: AnalysisOutcome<MentalResilienceAnalysis>,
}

impl AnalysisReport {
    /// A report whose every record is unavailable for `reason`
    pub fn unavailable(key: AnalysisKey, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            key,
            split_time: AnalysisOutcome::unavailable(reason.clone()),
            anomaly: AnalysisOutcome::unavailable(reason.clone()),
            hanging: AnalysisOutcome::unavailable(reason.clone()),
            mental_resilience: AnalysisOutcome::unavailable(reason),
        }
    }

    /// Whether any record is available
    pub fn is_available(&self) -> bool {
        self.split_time.is_available()
            || self.anomaly.is_available()
            || self.hanging.is_available()
            || self.mental_resilience.is_available()
    }

    /// Clone out the record of one analysis type
    pub fn record(&self, analysis_type: AnalysisType) -> AnalysisRecord {
        match analysis_type {
            AnalysisType::SplitTime => AnalysisRecord::SplitTime(self.split_time.clone()),
            AnalysisType::Anomaly => AnalysisRecord::Anomaly(self.anomaly.clone()),
            AnalysisType::Hanging => AnalysisRecord::Hanging(self.hanging.clone()),
            AnalysisType::MentalResilience => {
                AnalysisRecord::MentalResilience(self.mental_resilience.clone())
            }
        }
    }

    /// Split into records, in [`AnalysisType::ALL`] order
    pub fn into_records(self) -> Vec<AnalysisRecord> {
        vec![
            AnalysisRecord::SplitTime(self.split_time),
            AnalysisRecord::Anomaly(self.anomaly),
            AnalysisRecord::Hanging(self.hanging),
            AnalysisRecord::MentalResilience(self.mental_resilience),
        ]
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One analysis record of any type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisRecord {
    SplitTime(AnalysisOutcome<SplitTimeAnalysis>),
    Anomaly(AnalysisOutcome<AnomalyAnalysis>),
    Hanging(AnalysisOutcome<HangingAnalysis>),
    MentalResilience(AnalysisOutcome<MentalResilienceAnalysis>),
}

impl AnalysisRecord {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            Self::SplitTime(_) => AnalysisType::SplitTime,
            Self::Anomaly(_) => AnalysisType::Anomaly,
            Self::Hanging(_) => AnalysisType::Hanging,
            Self::MentalResilience(_) => AnalysisType::MentalResilience,
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            Self::SplitTime(o) => o.is_available(),
            Self::Anomaly(o) => o.is_available(),
            Self::Hanging(o) => o.is_available(),
            Self::MentalResilience(o) => o.is_available(),
        }
    }
}
