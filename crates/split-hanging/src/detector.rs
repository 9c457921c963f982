//! Hanging detector
//!
//! On every leg the runner is compared with the other runners of the same
//! directed segment. A peer is a candidate bus driver when the two elapsed
//! times lie inside the closeness window and the peer's normal PI is better
//! by more than the minimum gap. The closest candidate wins.

use crate::types::{HangingClassification, HangingPair, HangingProfile};
use split_core::{HangingConfig, Result};
use split_segments::{ClassAnalyzer, LegScanner, LegView, PerformanceTable, RunnerPerformance};
use tracing::trace;

/// Detects bus driver / passenger pairs
#[derive(Debug, Clone, Default)]
pub struct HangingDetector {
    config: HangingConfig,
}

impl HangingDetector {
    /// Create a detector after validating the parameters
    pub fn new(config: HangingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HangingConfig {
        &self.config
    }

    /// Score of a pair, in `[0, 100]`
    ///
    /// Rises as the time delta shrinks inside `window` and as the normal PI
    /// `gap` grows towards the saturation point.
    pub fn hanging_index(&self, delta: f64, window: f64, gap: f64) -> f64 {
        if !(window > 0.0) || !delta.is_finite() || !gap.is_finite() {
            return 0.0;
        }
        let closeness = (1.0 - delta.abs() / window).clamp(0.0, 1.0);
        let gap_factor = (gap / self.config.gap_saturation).clamp(0.0, 1.0);
        100.0 * closeness.powf(self.config.closeness_weight) * gap_factor.powf(self.config.gap_weight)
    }

    /// Runner-level classification from the number of counted pairs
    pub fn classify(&self, reliable_data: bool, normal_pi: Option<f64>, counted_pairs: usize) -> HangingClassification {
        if !reliable_data || normal_pi.is_none() {
            HangingClassification::InsufficientData
        } else if counted_pairs >= self.config.high_min_pairs {
            HangingClassification::HighHanging
        } else if counted_pairs >= self.config.moderate_min_pairs {
            HangingClassification::ModerateHanging
        } else {
            HangingClassification::NoHanging
        }
    }
}

/// `(delta, race number, view)` of the best candidate so far
type Candidate<'a> = (f64, u32, LegView<'a>);

impl LegScanner for HangingDetector {
    type Evidence = HangingPair;

    fn scan_leg(&self, view: &LegView<'_>) -> Option<HangingPair> {
        let leg = view.leg();
        let passenger_pi = view.normal_pi()?;
        let actual = leg.actual_time_seconds?;
        let reference = leg.reference_time_seconds?;
        let window = self.config.closeness.window_seconds(reference);
        if !(window > 0.0) {
            return None;
        }
        let arrival = view.runner().clock_arrival(leg);

        let mut best: Option<Candidate<'_>> = None;
        for peer in view.peers() {
            let (Some(driver_pi), Some(peer_time)) = (peer.normal_pi(), peer.leg().actual_time_seconds) else {
                continue;
            };
            if passenger_pi - driver_pi <= self.config.min_pi_gap {
                continue;
            }
            let delta = (actual - peer_time).abs();
            if delta >= window {
                continue;
            }
            if self.config.require_same_arrival {
                let peer_arrival = peer.runner().clock_arrival(peer.leg());
                if let (Some(a), Some(b)) = (arrival, peer_arrival) {
                    if (a - b).abs() >= window {
                        continue;
                    }
                }
            }
            let race_number = peer.runner().identity.race_number;
            let closer = match &best {
                None => true,
                Some((d, r, _)) => delta < *d || (delta == *d && race_number < *r),
            };
            if closer {
                best = Some((delta, race_number, peer));
            }
        }

        let (delta, _, driver) = best?;
        let driver_pi = driver.normal_pi()?;
        let expected = passenger_pi * reference;
        let pair = HangingPair {
            leg_number: leg.leg_number,
            from_control: leg.from_control.clone(),
            to_control: leg.to_control.clone(),
            bus_driver_id: driver.runner().identity.person_id,
            bus_driver_race_number: driver.runner().identity.race_number,
            time_delta_seconds: delta,
            passenger_pi,
            bus_driver_pi: driver_pi,
            hanging_index: self.hanging_index(delta, window, passenger_pi - driver_pi),
            improvement_percent: (expected - actual) / expected * 100.0,
        };
        trace!(
            passenger = view.runner().identity.race_number,
            driver = pair.bus_driver_race_number,
            leg = pair.leg_number,
            "Hanging pair"
        );
        Some(pair)
    }
}

impl ClassAnalyzer for HangingDetector {
    type Profile = HangingProfile;

    fn analysis_name(&self) -> &'static str {
        "hanging"
    }

    fn build_profile(
        &self,
        table: &PerformanceTable,
        runner: &RunnerPerformance,
        pairs: Vec<HangingPair>,
    ) -> HangingProfile {
        let counted_pair_count = pairs
            .iter()
            .filter(|p| p.hanging_index >= self.config.min_hanging_index)
            .count();
        let max_hanging_index = pairs.iter().map(|p| p.hanging_index).reduce(f64::max);

        HangingProfile {
            identity: runner.identity.clone(),
            class_runner_count: table.class_runner_count,
            reliable_data: table.reliable_data,
            normal_pi: runner.normal_pi,
            counted_pair_count,
            max_hanging_index,
            classification: self.classify(table.reliable_data, runner.normal_pi, counted_pair_count),
            pairs,
        }
    }
}

/// Builder for [`HangingDetector`]
#[derive(Debug, Clone, Default)]
pub struct HangingDetectorBuilder {
    config: HangingConfig,
}

impl HangingDetectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed-time window in seconds
    pub fn window_seconds(mut self, seconds: f64) -> Self {
        self.config.closeness = split_core::ClosenessWindow::Seconds { seconds };
        self
    }

    /// Elapsed-time window as a fraction of the segment's reference time
    pub fn window_fraction(mut self, fraction: f64) -> Self {
        self.config.closeness = split_core::ClosenessWindow::ReferenceFraction { fraction };
        self
    }

    pub fn min_pi_gap(mut self, gap: f64) -> Self {
        self.config.min_pi_gap = gap;
        self
    }

    pub fn require_same_arrival(mut self, require: bool) -> Self {
        self.config.require_same_arrival = require;
        self
    }

    /// Counted pairs needed for the moderate and high buckets
    pub fn pair_thresholds(mut self, moderate: usize, high: usize) -> Self {
        self.config.moderate_min_pairs = moderate;
        self.config.high_min_pairs = high;
        self
    }

    pub fn min_hanging_index(mut self, index: f64) -> Self {
        self.config.min_hanging_index = index;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<HangingDetector> {
        HangingDetector::new(self.config)
    }
}
