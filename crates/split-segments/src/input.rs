//! Raw timing input supplied by the results-ingestion side

use serde::{Deserialize, Serialize};
use split_core::{AnalysisKey, RunnerIdentity};

/// One control punch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Punch {
    /// Control code as printed on the map
    pub control_code: String,
    /// Seconds elapsed since the runner's start
    pub time_seconds: f64,
}

impl Punch {
    pub fn new(control_code: impl Into<String>, time_seconds: f64) -> Self {
        Self {
            control_code: control_code.into(),
            time_seconds,
        }
    }
}

/// Everything recorded for one runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerPunches {
    #[serde(flatten)]
    pub identity: RunnerIdentity,
    /// Clock offset of the start in seconds, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_seconds: Option<f64>,
    /// Punches in the order they were recorded
    #[serde(default)]
    pub punches: Vec<Punch>,
    /// Seconds elapsed at the finish line, if the runner finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time_seconds: Option<f64>,
}

impl RunnerPunches {
    /// Create a runner with no punches
    pub fn new(identity: RunnerIdentity) -> Self {
        Self {
            identity,
            start_time_seconds: None,
            punches: Vec::new(),
            finish_time_seconds: None,
        }
    }

    /// Append a punch
    pub fn punch(mut self, control_code: impl Into<String>, time_seconds: f64) -> Self {
        self.punches.push(Punch::new(control_code, time_seconds));
        self
    }

    /// Set the finish time
    pub fn finish(mut self, time_seconds: f64) -> Self {
        self.finish_time_seconds = Some(time_seconds);
        self
    }

    /// Set the clock start time
    pub fn started_at(mut self, clock_seconds: f64) -> Self {
        self.start_time_seconds = Some(clock_seconds);
        self
    }
}

/// All runners of one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInput {
    pub class_result_short_name: String,
    #[serde(default)]
    pub runners: Vec<RunnerPunches>,
}

/// One result list of one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultListInput {
    pub result_list_id: u64,
    pub event_id: u64,
    #[serde(default)]
    pub classes: Vec<ClassInput>,
}

impl ResultListInput {
    /// Key of records covering the whole result list
    pub fn key(&self) -> AnalysisKey {
        AnalysisKey {
            result_list_id: self.result_list_id,
            event_id: self.event_id,
            class_result_short_name: None,
        }
    }

    /// Key of records restricted to one class
    pub fn class_key(&self, class_result_short_name: &str) -> AnalysisKey {
        AnalysisKey {
            class_result_short_name: Some(class_result_short_name.to_string()),
            ..self.key()
        }
    }

    /// Find a class by its short name
    pub fn class(&self, class_result_short_name: &str) -> Option<&ClassInput> {
        self.classes
            .iter()
            .find(|c| c.class_result_short_name == class_result_short_name)
    }
}
