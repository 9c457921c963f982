//! Runner performance analysis over race split times
//!
//! This crate ties the workspace together:
//!
//! - [`split_core`]: errors, configuration, execution engines, cancellation
//! - [`split_segments`]: control segments, reference times and performance indices
//! - [`split_anomaly`]: legs run suspiciously fast against the runner's own baseline
//! - [`split_hanging`]: bus driver / passenger pairs
//! - [`split_mental`]: mistake / reaction pairs and the mistake reaction index
//!
//! [`AnalysisEngine`] runs all of them over one result list and returns an
//! [`AnalysisReport`]; [`AnalysisCache`] memoizes reports per result list.
//!
//! # Example
//!
//! ```rust
//! use split_analysis::prelude::*;
//!
//! let runners = (1..=6u32)
//!     .map(|n| {
//!         RunnerPunches::new(RunnerIdentity::new(n as u64, n, "H21"))
//!             .punch("31", 100.0 + 3.0 * n as f64)
//!             .punch("45", 260.0 + 5.0 * n as f64)
//!             .finish(330.0 + 6.0 * n as f64)
//!     })
//!     .collect();
//! let input = ResultListInput {
//!     result_list_id: 1,
//!     event_id: 1,
//!     classes: vec![ClassInput { class_result_short_name: "H21".into(), runners }],
//! };
//!
//! let engine = AnalysisEngine::new(AnalysisConfig::default()).unwrap();
//! let report = engine.analyze(&input, &CancellationToken::new()).unwrap();
//! assert_eq!(report.anomaly.as_available().unwrap().runners.len(), 6);
//! ```

pub mod cache;
pub mod engine;
pub mod report;

// Re-export workspace crates
pub use split_anomaly;
pub use split_core;
pub use split_hanging;
pub use split_mental;
pub use split_segments;

pub use cache::{AnalysisCache, CacheStats};
pub use engine::{analyze, AnalysisEngine};
pub use report::{AnalysisRecord, AnalysisReport};

pub use split_core::{
    AnalysisConfig, AnalysisKey, AnalysisOutcome, AnalysisType, CancellationToken, Error, Result,
    RunnerIdentity,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AnalysisCache, AnalysisEngine, AnalysisRecord, AnalysisReport};
    pub use split_anomaly::{AnomalyClassification, AnomalyDetector};
    pub use split_core::prelude::*;
    pub use split_core::AnalysisType;
    pub use split_hanging::{HangingClassification, HangingDetector};
    pub use split_mental::{MentalClassification, MentalResilienceAnalyzer, RunnerMentalClassification};
    pub use split_segments::{ClassInput, Punch, ResultListInput, RunnerPunches, SegmentBuilder};
}
