//! Configuration for the analysis thresholds
//!
//! Every threshold is a calibration knob. The `Default` values below are
//! PLACEHOLDERS chosen to make the classifiers behave sensibly on synthetic
//! data; they have not been validated against real event data and are
//! expected to be overridden from a JSON configuration file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete threshold set for one analysis run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cohort-size rules shared by every analyzer
    pub cohort: CohortConfig,
    /// Suspicion thresholds for the anomaly detector
    pub anomaly: AnomalyConfig,
    /// Pair detection and bucketing for the hanging detector
    pub hanging: HangingConfig,
    /// Severity thresholds defining a mistake leg
    pub mistake: MistakeConfig,
    /// Recovery bands for the mistake reaction index
    pub mri: MriConfig,
}

/// Minimum sample sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    /// Runners a class needs before its classifications count as reliable
    pub min_cohort_size: usize,
    /// Valid splits a segment needs before a reference time is computed
    pub min_valid_splits: usize,
}

/// Thresholds on `legPI / normalPI`; lower ratios are more suspicious
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Below this ratio a leg is MODERATE_SUSPICION
    pub moderate: f64,
    /// Below this ratio a leg is HIGH_SUSPICION
    pub high: f64,
}

/// How close two elapsed times must be to count as running together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClosenessWindow {
    /// Fixed window in seconds
    Seconds { seconds: f64 },
    /// Window as a fraction of the segment's reference time
    ReferenceFraction { fraction: f64 },
}

impl ClosenessWindow {
    /// Window width in seconds for a segment with the given reference time
    pub fn window_seconds(&self, reference_time: f64) -> f64 {
        match *self {
            Self::Seconds { seconds } => seconds,
            Self::ReferenceFraction { fraction } => fraction * reference_time,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Seconds { seconds } => ensure_positive("hanging.closeness.seconds", seconds),
            Self::ReferenceFraction { fraction } => {
                ensure_positive("hanging.closeness.fraction", fraction)
            }
        }
    }
}

/// Hanging (bus driver / passenger) detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HangingConfig {
    /// Elapsed-time window inside which two runners count as together
    pub closeness: ClosenessWindow,
    /// Minimum normalPI gap between passenger and bus driver
    pub min_pi_gap: f64,
    /// Gap at which the gap factor of the hanging index saturates
    pub gap_saturation: f64,
    /// Exponent applied to the closeness factor
    pub closeness_weight: f64,
    /// Exponent applied to the gap factor
    pub gap_weight: f64,
    /// Pairs scoring below this index do not count towards classification
    pub min_hanging_index: f64,
    /// Counted pairs needed for MODERATE_HANGING
    pub moderate_min_pairs: usize,
    /// Counted pairs needed for HIGH_HANGING
    pub high_min_pairs: usize,
    /// Also require matching clock arrival times when both starts are known
    pub require_same_arrival: bool,
}

/// Thresholds on `legPI / normalPI` that make a leg a mistake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MistakeConfig {
    pub moderate: f64,
    pub major: f64,
    pub severe: f64,
}

/// Mistake reaction index bands
///
/// A reaction that is not a mistake itself falls in one of three bands:
/// `mri <= panic_threshold` is `panic`, `mri > ice_man_threshold` is
/// `ice_man`, anything in between is `resigner`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MriConfig {
    /// At or below this MRI a reaction is classified `panic`
    pub panic_threshold: f64,
    /// Above this MRI a reaction is classified `ice_man`
    pub ice_man_threshold: f64,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            min_cohort_size: 5,
            min_valid_splits: 3,
        }
    }
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            moderate: 0.8,
            high: 0.65,
        }
    }
}

impl Default for HangingConfig {
    fn default() -> Self {
        Self {
            closeness: ClosenessWindow::Seconds { seconds: 3.0 },
            min_pi_gap: 0.05,
            gap_saturation: 0.25,
            closeness_weight: 1.0,
            gap_weight: 1.0,
            min_hanging_index: 0.0,
            moderate_min_pairs: 1,
            high_min_pairs: 3,
            require_same_arrival: true,
        }
    }
}

impl Default for MistakeConfig {
    fn default() -> Self {
        Self {
            moderate: 1.2,
            major: 1.5,
            severe: 2.0,
        }
    }
}

impl Default for MriConfig {
    fn default() -> Self {
        Self {
            panic_threshold: 0.3,
            ice_man_threshold: 0.8,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check ranges and orderings of every threshold
    pub fn validate(&self) -> Result<()> {
        self.cohort.validate()?;
        self.anomaly.validate()?;
        self.hanging.validate()?;
        self.mistake.validate()?;
        self.mri.validate()
    }
}

impl CohortConfig {
    /// Check ranges and orderings
    pub fn validate(&self) -> Result<()> {
        if self.min_cohort_size == 0 {
            return Err(Error::Config("cohort.min_cohort_size must be at least 1".into()));
        }
        if self.min_valid_splits == 0 {
            return Err(Error::Config("cohort.min_valid_splits must be at least 1".into()));
        }
        Ok(())
    }
}

impl AnomalyConfig {
    /// Check ranges and orderings
    pub fn validate(&self) -> Result<()> {
        ensure_positive("anomaly.high", self.high)?;
        ensure_positive("anomaly.moderate", self.moderate)?;
        if self.moderate > 1.0 {
            return Err(Error::invalid_threshold("anomaly.moderate", self.moderate, "at most 1.0"));
        }
        if self.high >= self.moderate {
            return Err(Error::unordered_thresholds("anomaly.high", "anomaly.moderate"));
        }
        Ok(())
    }
}

impl HangingConfig {
    /// Check ranges and orderings
    pub fn validate(&self) -> Result<()> {
        self.closeness.validate()?;
        ensure_non_negative("hanging.min_pi_gap", self.min_pi_gap)?;
        ensure_positive("hanging.gap_saturation", self.gap_saturation)?;
        ensure_positive("hanging.closeness_weight", self.closeness_weight)?;
        ensure_positive("hanging.gap_weight", self.gap_weight)?;
        if !(0.0..=100.0).contains(&self.min_hanging_index) {
            return Err(Error::invalid_threshold(
                "hanging.min_hanging_index",
                self.min_hanging_index,
                "within [0, 100]",
            ));
        }
        if self.moderate_min_pairs == 0 {
            return Err(Error::Config("hanging.moderate_min_pairs must be at least 1".into()));
        }
        if self.high_min_pairs < self.moderate_min_pairs {
            return Err(Error::Config(
                "hanging.high_min_pairs must not be below hanging.moderate_min_pairs".into(),
            ));
        }
        Ok(())
    }
}

impl MistakeConfig {
    /// Check ranges and orderings
    pub fn validate(&self) -> Result<()> {
        ensure_positive("mistake.moderate", self.moderate)?;
        if self.moderate <= 1.0 {
            return Err(Error::invalid_threshold("mistake.moderate", self.moderate, "above 1.0"));
        }
        if self.moderate >= self.major {
            return Err(Error::unordered_thresholds("mistake.moderate", "mistake.major"));
        }
        if self.major >= self.severe || !self.severe.is_finite() {
            return Err(Error::unordered_thresholds("mistake.major", "mistake.severe"));
        }
        Ok(())
    }
}

impl MriConfig {
    /// Check ranges and orderings
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("mri.panic_threshold", self.panic_threshold)?;
        ensure_positive("mri.ice_man_threshold", self.ice_man_threshold)?;
        if self.panic_threshold >= self.ice_man_threshold {
            return Err(Error::unordered_thresholds("mri.panic_threshold", "mri.ice_man_threshold"));
        }
        Ok(())
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_threshold(name, value, "finite and positive"))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_threshold(name, value, "finite and non-negative"))
    }
}
