//! Identity and envelope types shared by every analysis crate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Implicit control code of the start
pub const START_CONTROL: &str = "S";

/// Implicit control code of the finish
pub const FINISH_CONTROL: &str = "F";

/// Who a split belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerIdentity {
    pub person_id: u64,
    pub race_number: u32,
    pub class_result_short_name: String,
}

impl RunnerIdentity {
    /// Create a new identity
    pub fn new(person_id: u64, race_number: u32, class_result_short_name: impl Into<String>) -> Self {
        Self {
            person_id,
            race_number,
            class_result_short_name: class_result_short_name.into(),
        }
    }

    /// Deterministic ordering key: race number first, then person id
    pub fn sort_key(&self) -> (u32, u64) {
        (self.race_number, self.person_id)
    }
}

impl fmt::Display for RunnerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} (person {}, {})",
            self.race_number, self.person_id, self.class_result_short_name
        )
    }
}

/// The analysis families produced by one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisType {
    SplitTime,
    Anomaly,
    Hanging,
    MentalResilience,
}

impl AnalysisType {
    /// All analysis types in report order
    pub const ALL: [AnalysisType; 4] = [
        AnalysisType::SplitTime,
        AnalysisType::Anomaly,
        AnalysisType::Hanging,
        AnalysisType::MentalResilience,
    ];

    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::SplitTime => "split_time",
            Self::Anomaly => "anomaly",
            Self::Hanging => "hanging",
            Self::MentalResilience => "mental_resilience",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of one analysis record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisKey {
    pub result_list_id: u64,
    pub event_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_result_short_name: Option<String>,
}

/// Either a complete analysis record or an explicit statement that none exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> AnalysisOutcome<T> {
    /// Construct an unavailable outcome
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether a record is present
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Borrow the record, if present
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    /// Map the record, keeping unavailability untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AnalysisOutcome<U> {
        match self {
            Self::Available(value) => AnalysisOutcome::Available(f(value)),
            Self::Unavailable { reason } => AnalysisOutcome::Unavailable { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_serializes_camel_case() {
        let id = RunnerIdentity::new(17, 104, "H21E");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(
            json,
            r#"{"personId":17,"raceNumber":104,"classResultShortName":"H21E"}"#
        );
    }

    #[test]
    fn test_outcome_wire_shape() {
        #[derive(Serialize)]
        struct Payload {
            value: u32,
        }

        let ok = AnalysisOutcome::Available(Payload { value: 3 });
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"status":"available","value":3}"#
        );

        let missing: AnalysisOutcome<Payload> = AnalysisOutcome::unavailable("no valid segments");
        assert_eq!(
            serde_json::to_string(&missing).unwrap(),
            r#"{"status":"unavailable","reason":"no valid segments"}"#
        );
        assert!(!missing.is_available());
    }

    #[test]
    fn test_analysis_type_strings() {
        assert_eq!(
            serde_json::to_string(&AnalysisType::MentalResilience).unwrap(),
            r#""MENTAL_RESILIENCE""#
        );
        assert_eq!(AnalysisType::Hanging.to_string(), "hanging");
    }
}
