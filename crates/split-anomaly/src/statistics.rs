//! Aggregates derived from anomaly profiles

use crate::types::{AnomalyClassification, AnomalyProfile, AnomalyStatistics};
use split_core::stats::{mean, median};

impl AnomalyStatistics {
    /// Reduce a profile collection
    ///
    /// # Arguments
    /// * `profiles` - every analyzed runner
    /// * `excluded_split_count` - malformed splits dropped while building segments
    /// * `unavailable_classes` - classes without a valid segment
    pub fn from_profiles(
        profiles: &[AnomalyProfile],
        excluded_split_count: usize,
        unavailable_classes: Vec<String>,
    ) -> Self {
        let count = |c: AnomalyClassification| {
            profiles.iter().filter(|p| p.classification == c).count()
        };
        let minima: Vec<f64> = profiles
            .iter()
            .filter_map(|p| p.minimum_anomalies_index)
            .collect();

        Self {
            runner_count: profiles.len(),
            no_suspicion_count: count(AnomalyClassification::NoSuspicion),
            moderate_suspicion_count: count(AnomalyClassification::ModerateSuspicion),
            high_suspicion_count: count(AnomalyClassification::HighSuspicion),
            no_data_count: count(AnomalyClassification::NoData),
            unreliable_runner_count: profiles.iter().filter(|p| !p.reliable_data).count(),
            suspicious_leg_count: profiles.iter().map(|p| p.suspicious_legs().count()).sum(),
            mean_minimum_anomalies_index: mean(&minima),
            median_minimum_anomalies_index: median(&minima),
            excluded_split_count,
            unavailable_classes,
        }
    }
}
