//! Anomaly detection over performance tables
//!
//! Flags legs that a runner ran much faster than their own baseline and
//! classifies each runner by the worst of those legs.
//!
//! # Example
//!
//! ```rust
//! use split_anomaly::{AnomalyClassification, AnomalyDetectorBuilder};
//!
//! let detector = AnomalyDetectorBuilder::new().moderate(0.8).high(0.65).build().unwrap();
//! assert_eq!(detector.classify_index(Some(0.5)), AnomalyClassification::HighSuspicion);
//! assert_eq!(detector.classify_index(None), AnomalyClassification::NoData);
//! ```

pub mod detector;
pub mod statistics;
pub mod types;

pub use detector::{AnomalyDetector, AnomalyDetectorBuilder};
pub use types::{
    AnomaliesIndexInformation, AnomalyAnalysis, AnomalyClassification, AnomalyProfile,
    AnomalyStatistics,
};
