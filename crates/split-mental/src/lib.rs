//! Mental resilience: how runners react to their own mistakes
//!
//! Every mistake leg is paired with the following leg. The pair gets a
//! mistake reaction index (MRI) and one of four classifications. A runner with
//! a chain of mistakes is a chain error; otherwise the runner takes the
//! classification of their most severe mistake.
//!
//! # Example
//!
//! ```rust
//! use split_mental::{MentalClassification, MentalResilienceAnalyzer};
//!
//! let analyzer = MentalResilienceAnalyzer::default();
//! let mri = analyzer.mri(2.5, 1.05);
//! assert_eq!(analyzer.classify_pair(1.05, mri), MentalClassification::IceMan);
//! ```

pub mod analyzer;
pub mod statistics;
pub mod types;

pub use analyzer::MentalResilienceAnalyzer;
pub use types::{
    MentalClassification, MentalProfile, MentalResilienceAnalysis, MistakeReactionPair,
    MistakeSeverity, MriStatistics, RunnerMentalClassification,
};
