//! Control segments and performance indices
//!
//! The first two stages of every analysis run:
//!
//! 1. [`SegmentBuilder`] turns raw punches into directed [`ControlSegment`]s
//! 2. [`PerformanceCalculator`] derives reference times, leg PIs and each
//!    runner's two-phase normal PI, producing a [`PerformanceTable`]
//!
//! The [`scan`] module holds the leg scan shared by the downstream analyzers.
//!
//! # Example
//!
//! ```rust
//! use split_core::{AnalysisConfig, RunnerIdentity};
//! use split_segments::{ClassInput, PerformanceCalculator, RunnerPunches, SegmentBuilder};
//!
//! let runners = (1..=3)
//!     .map(|n| {
//!         RunnerPunches::new(RunnerIdentity::new(n, n as u32, "H21"))
//!             .punch("31", 100.0 + n as f64)
//!             .finish(180.0 + n as f64)
//!     })
//!     .collect();
//! let class = ClassInput { class_result_short_name: "H21".into(), runners };
//!
//! let segments = SegmentBuilder::new().build_class(&class).unwrap();
//! let table = PerformanceCalculator::from_config(&AnalysisConfig::default()).compute(segments);
//! assert_eq!(table.segments[0].reference_time_seconds, Some(102.0));
//! ```

pub mod analysis;
pub mod builder;
pub mod input;
pub mod performance;
pub mod scan;
pub mod segment;

pub use analysis::{RunnerSplitProfile, SplitTimeAnalysis, SplitTimeStatistics};
pub use builder::{BuiltResultList, ClassSegments, Leg, RunnerLegs, SegmentBuilder, UnavailableClass};
pub use input::{ClassInput, Punch, ResultListInput, RunnerPunches};
pub use performance::{
    final_normal_pi, provisional_normal_pi, ratio, LegPerformance, PerformanceCalculator,
    PerformanceTable, RunnerPerformance,
};
pub use scan::{scan_runner, scan_table, ClassAnalyzer, LegScanner, LegView};
pub use segment::{ControlSegment, RunnerSplit, SegmentKey};
