//! Aggregates derived from hanging profiles

use crate::types::{HangingClassification, HangingProfile, HangingStatistics};
use split_core::stats::{mean, median};
use std::collections::BTreeSet;

impl HangingStatistics {
    /// Reduce a profile collection
    pub fn from_profiles(
        profiles: &[HangingProfile],
        excluded_split_count: usize,
        unavailable_classes: Vec<String>,
    ) -> Self {
        let count = |c: HangingClassification| {
            profiles.iter().filter(|p| p.classification == c).count()
        };
        let pairs = || profiles.iter().flat_map(|p| &p.pairs);
        let indices: Vec<f64> = pairs().map(|p| p.hanging_index).collect();
        let improvements: Vec<f64> = pairs().map(|p| p.improvement_percent).collect();
        let drivers: BTreeSet<u64> = pairs().map(|p| p.bus_driver_id).collect();

        Self {
            runner_count: profiles.len(),
            no_hanging_count: count(HangingClassification::NoHanging),
            moderate_hanging_count: count(HangingClassification::ModerateHanging),
            high_hanging_count: count(HangingClassification::HighHanging),
            insufficient_data_count: count(HangingClassification::InsufficientData),
            pair_count: indices.len(),
            bus_driver_count: drivers.len(),
            mean_hanging_index: mean(&indices),
            median_hanging_index: median(&indices),
            mean_improvement_percent: mean(&improvements),
            excluded_split_count,
            unavailable_classes,
        }
    }
}
