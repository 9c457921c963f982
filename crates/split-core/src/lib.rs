//! Core types, configuration and execution engines for split-time analysis
//!
//! This crate provides the foundation shared by the segment builder and the
//! three analyzers:
//!
//! - [`Error`] / [`Result`]: one error type for every crate in the workspace
//! - [`stats`]: NaN-safe median, mean and ordering helpers
//! - [`execution`]: sequential and Rayon-backed engines with order-preserving batches
//! - [`CancellationToken`]: cooperative cancellation checked between phases
//! - [`AnalysisConfig`]: every threshold, loadable from JSON
//! - [`RunnerIdentity`], [`AnalysisOutcome`]: identity and envelope types
//!
//! # Example
//!
//! ```rust
//! use split_core::{execution::sequential, stats::median, AnalysisConfig, ExecutionEngine};
//!
//! let config = AnalysisConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let engine = sequential();
//! let medians = engine.execute_batch(2, |i| median(&[1.0 + i as f64, 2.0, 9.0]));
//! assert_eq!(medians, vec![Some(2.0), Some(2.0)]);
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod execution;
pub mod stats;
pub mod types;

// Re-export core types
pub use cancel::CancellationToken;
pub use config::{
    AnalysisConfig, AnomalyConfig, ClosenessWindow, CohortConfig, HangingConfig, MistakeConfig,
    MriConfig,
};
pub use error::{Error, Result};
pub use execution::{auto_engine, sequential, AutoEngine, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};
pub use types::{
    AnalysisKey, AnalysisOutcome, AnalysisType, RunnerIdentity, FINISH_CONTROL, START_CONTROL,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisConfig, AnalysisOutcome, CancellationToken, Error, ExecutionEngine, Result,
        RunnerIdentity, SequentialEngine,
    };

    #[cfg(feature = "parallel")]
    pub use crate::ParallelEngine;
}
