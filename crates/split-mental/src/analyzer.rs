//! Mistake / reaction pairing and the mistake reaction index
//!
//! With `r = PI / normalPI`, a leg is a mistake when `r` exceeds the moderate
//! threshold. The next leg is its reaction. The MRI measures how much of the
//! excess the reaction leg gave back:
//!
//! ```text
//! mri = (r_mistake - r_reaction) / (r_mistake - 1)
//! ```
//!
//! 1.0 is a full return to baseline and 0.0 no recovery at all. A reaction
//! that is itself a mistake is a chain error whatever its MRI; any other
//! reaction is banded by the MRI thresholds.

use crate::types::{
    MentalClassification, MentalProfile, MistakeReactionPair, MistakeSeverity,
    RunnerMentalClassification,
};
use split_core::stats::mean;
use split_core::{AnalysisConfig, MistakeConfig, MriConfig, Result};
use split_segments::{ratio, ClassAnalyzer, LegScanner, LegView, PerformanceTable, RunnerPerformance};

/// Pairs mistakes with reactions and classifies them
#[derive(Debug, Clone, Default)]
pub struct MentalResilienceAnalyzer {
    mistake: MistakeConfig,
    mri: MriConfig,
}

impl MentalResilienceAnalyzer {
    /// Create an analyzer after validating both threshold sets
    pub fn new(mistake: MistakeConfig, mri: MriConfig) -> Result<Self> {
        mistake.validate()?;
        mri.validate()?;
        Ok(Self { mistake, mri })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(config.mistake.clone(), config.mri.clone())
    }

    /// Severity of a leg with ratio `r`, `None` when it is not a mistake
    ///
    /// A ratio exactly on a threshold takes the lower severity.
    pub fn severity(&self, r: f64) -> Option<MistakeSeverity> {
        if !r.is_finite() || r <= self.mistake.moderate {
            None
        } else if r > self.mistake.severe {
            Some(MistakeSeverity::Severe)
        } else if r > self.mistake.major {
            Some(MistakeSeverity::Major)
        } else {
            Some(MistakeSeverity::Moderate)
        }
    }

    /// Mistake reaction index of a pair
    pub fn mri(&self, mistake_ratio: f64, reaction_ratio: f64) -> f64 {
        (mistake_ratio - reaction_ratio) / (mistake_ratio - 1.0)
    }

    /// Classify a pair from its reaction ratio and MRI
    ///
    /// Rules are tried in order and the first match wins. A value exactly on
    /// a band threshold takes the lower band.
    pub fn classify_pair(&self, reaction_ratio: f64, mri: f64) -> MentalClassification {
        if self.severity(reaction_ratio).is_some() {
            MentalClassification::ChainError
        } else if mri > self.mri.ice_man_threshold {
            MentalClassification::IceMan
        } else if mri > self.mri.panic_threshold {
            MentalClassification::Resigner
        } else {
            MentalClassification::Panic
        }
    }

    /// Runner-level classification from the pairs in leg order
    ///
    /// Any chain of consecutive mistakes makes the runner a chain error;
    /// otherwise the earliest of the most severe mistakes decides.
    pub fn classify_runner(
        &self,
        reliable_data: bool,
        normal_pi: Option<f64>,
        pairs: &[MistakeReactionPair],
    ) -> RunnerMentalClassification {
        if !reliable_data || normal_pi.is_none() {
            return RunnerMentalClassification::InsufficientData;
        }
        if pairs.iter().any(|p| p.classification == MentalClassification::ChainError) {
            return RunnerMentalClassification::ChainError;
        }
        // Strictly greater keeps the earliest of equally severe mistakes
        let worst = pairs.iter().fold(None, |worst: Option<&MistakeReactionPair>, p| match worst {
            Some(w) if p.mistake_severity <= w.mistake_severity => Some(w),
            _ => Some(p),
        });
        worst.map_or(RunnerMentalClassification::NoMistakes, |p| p.classification.into())
    }
}

impl LegScanner for MentalResilienceAnalyzer {
    type Evidence = MistakeReactionPair;

    fn scan_leg(&self, view: &LegView<'_>) -> Option<MistakeReactionPair> {
        let normal_pi = view.normal_pi()?;
        let mistake_ratio = view.ratio_to_normal()?;
        let severity = self.severity(mistake_ratio)?;
        let reaction = view.next_leg()?;
        let reaction_ratio = ratio(reaction.performance_index, Some(normal_pi))?;

        let leg = view.leg();
        let expected = normal_pi * leg.reference_time_seconds?;
        let mri = self.mri(mistake_ratio, reaction_ratio);

        Some(MistakeReactionPair {
            mistake_leg_number: leg.leg_number,
            reaction_leg_number: reaction.leg_number,
            mistake_severity: severity,
            mistake_pi: mistake_ratio,
            reaction_pi: reaction_ratio,
            time_lost_seconds: leg.actual_time_seconds? - expected,
            mri,
            classification: self.classify_pair(reaction_ratio, mri),
        })
    }
}

impl ClassAnalyzer for MentalResilienceAnalyzer {
    type Profile = MentalProfile;

    fn analysis_name(&self) -> &'static str {
        "mental_resilience"
    }

    fn build_profile(
        &self,
        table: &PerformanceTable,
        runner: &RunnerPerformance,
        pairs: Vec<MistakeReactionPair>,
    ) -> MentalProfile {
        let mris: Vec<f64> = pairs.iter().map(|p| p.mri).collect();
        MentalProfile {
            identity: runner.identity.clone(),
            class_runner_count: table.class_runner_count,
            reliable_data: table.reliable_data,
            normal_pi: runner.normal_pi,
            mean_mri: mean(&mris),
            total_time_lost_seconds: pairs.iter().map(|p| p.time_lost_seconds).sum(),
            classification: self.classify_runner(table.reliable_data, runner.normal_pi, &pairs),
            pairs,
        }
    }
}
