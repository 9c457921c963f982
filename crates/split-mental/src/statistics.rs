//! Aggregates derived from mental profiles

use crate::types::{MentalProfile, MriStatistics, RunnerMentalClassification};
use split_core::stats::{mean, median};

impl MriStatistics {
    /// Reduce a profile collection
    pub fn from_profiles(
        profiles: &[MentalProfile],
        excluded_split_count: usize,
        unavailable_classes: Vec<String>,
    ) -> Self {
        let count = |c: RunnerMentalClassification| {
            profiles.iter().filter(|p| p.classification == c).count()
        };
        let mris: Vec<f64> = profiles
            .iter()
            .flat_map(|p| &p.pairs)
            .map(|p| p.mri)
            .collect();

        Self {
            runner_count: profiles.len(),
            pair_count: mris.len(),
            panic_count: count(RunnerMentalClassification::Panic),
            ice_man_count: count(RunnerMentalClassification::IceMan),
            resigner_count: count(RunnerMentalClassification::Resigner),
            chain_error_count: count(RunnerMentalClassification::ChainError),
            no_mistakes_count: count(RunnerMentalClassification::NoMistakes),
            insufficient_data_count: count(RunnerMentalClassification::InsufficientData),
            mean_mri: mean(&mris),
            median_mri: median(&mris),
            excluded_split_count,
            unavailable_classes,
        }
    }
}
