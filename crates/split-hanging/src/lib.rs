//! Hanging (bus driver / passenger) detection
//!
//! A passenger is a runner who, on some legs, ran within seconds of a
//! clearly stronger runner. Each such leg yields a [`HangingPair`] scored by
//! a hanging index; the number of well-scored pairs sets the runner's
//! [`HangingClassification`].
//!
//! # Example
//!
//! ```rust
//! use split_hanging::HangingDetectorBuilder;
//!
//! let detector = HangingDetectorBuilder::new().window_seconds(3.0).build().unwrap();
//! let index = detector.hanging_index(1.0, 3.0, 0.25);
//! assert!((index - 100.0 * 2.0 / 3.0).abs() < 1e-9);
//! ```

pub mod detector;
pub mod statistics;
pub mod types;

pub use detector::{HangingDetector, HangingDetectorBuilder};
pub use types::{HangingAnalysis, HangingClassification, HangingPair, HangingProfile, HangingStatistics};
