//! Records produced by the mental-resilience analysis

use serde::{Deserialize, Serialize};
use split_core::{AnalysisKey, RunnerIdentity};
use std::fmt;

/// How far a mistake leg exceeded the runner's baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeSeverity {
    Moderate,
    Major,
    Severe,
}

impl fmt::Display for MistakeSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Moderate => "moderate",
            Self::Major => "major",
            Self::Severe => "severe",
        })
    }
}

/// Reaction to one mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentalClassification {
    /// Little or no recovery on the reaction leg
    Panic,
    /// Quick recovery to baseline
    IceMan,
    /// Settled on a slower plateau
    Resigner,
    /// The reaction leg was itself a mistake
    ChainError,
}

/// Runner-level outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerMentalClassification {
    Panic,
    IceMan,
    Resigner,
    ChainError,
    NoMistakes,
    InsufficientData,
}

impl From<MentalClassification> for RunnerMentalClassification {
    fn from(c: MentalClassification) -> Self {
        match c {
            MentalClassification::Panic => Self::Panic,
            MentalClassification::IceMan => Self::IceMan,
            MentalClassification::Resigner => Self::Resigner,
            MentalClassification::ChainError => Self::ChainError,
        }
    }
}

/// A mistake leg and the leg right after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeReactionPair {
    pub mistake_leg_number: u32,
    pub reaction_leg_number: u32,
    pub mistake_severity: MistakeSeverity,
    /// Mistake leg PI over normal PI
    #[serde(rename = "mistakePI")]
    pub mistake_pi: f64,
    /// Reaction leg PI over normal PI
    #[serde(rename = "reactionPI")]
    pub reaction_pi: f64,
    /// Seconds above the runner's expected time on the mistake leg
    pub time_lost_seconds: f64,
    pub mri: f64,
    pub classification: MentalClassification,
}

/// Mental-resilience result for one runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalProfile {
    #[serde(flatten)]
    pub identity: RunnerIdentity,
    pub class_runner_count: usize,
    pub reliable_data: bool,
    #[serde(rename = "normalPI")]
    pub normal_pi: Option<f64>,
    pub mean_mri: Option<f64>,
    pub total_time_lost_seconds: f64,
    pub classification: RunnerMentalClassification,
    pub pairs: Vec<MistakeReactionPair>,
}

/// Aggregates over a set of mental profiles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MriStatistics {
    pub runner_count: usize,
    pub pair_count: usize,
    pub panic_count: usize,
    pub ice_man_count: usize,
    pub resigner_count: usize,
    pub chain_error_count: usize,
    pub no_mistakes_count: usize,
    pub insufficient_data_count: usize,
    pub mean_mri: Option<f64>,
    pub median_mri: Option<f64>,
    pub excluded_split_count: usize,
    pub unavailable_classes: Vec<String>,
}

/// Mental-resilience analysis of one result list, or of one class of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalResilienceAnalysis {
    #[serde(flatten)]
    pub key: AnalysisKey,
    pub runners: Vec<MentalProfile>,
    pub statistics: MriStatistics,
}
