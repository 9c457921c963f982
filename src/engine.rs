//! Analysis engine facade
//!
//! One run is a pure function of the input and the configuration:
//!
//! 1. build control segments for every class
//! 2. compute reference times, PIs and normal PIs
//! 3. run the anomaly, hanging and mental-resilience analyzers concurrently
//! 4. merge profiles and derive statistics
//!
//! The cancellation token is checked between phases and once more before
//! merging, so a cancelled run never exposes partial output.

use crate::report::AnalysisReport;
use split_anomaly::{AnomalyAnalysis, AnomalyDetector, AnomalyStatistics};
use split_core::{
    auto_engine, AnalysisConfig, AnalysisOutcome, AutoEngine, CancellationToken,
    Error, ExecutionEngine, Result,
};
use split_hanging::{HangingAnalysis, HangingDetector, HangingStatistics};
use split_mental::{MentalResilienceAnalysis, MentalResilienceAnalyzer, MriStatistics};
use split_segments::{
    BuiltResultList, ClassAnalyzer, PerformanceCalculator, PerformanceTable, ResultListInput,
    SegmentBuilder, SplitTimeAnalysis,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Runs every analysis over one result list
#[derive(Debug, Clone)]
pub struct AnalysisEngine<E: ExecutionEngine = AutoEngine> {
    config: AnalysisConfig,
    execution: E,
    builder: SegmentBuilder,
    calculator: PerformanceCalculator,
    anomaly: AnomalyDetector,
    hanging: HangingDetector,
    mental: MentalResilienceAnalyzer,
}

impl AnalysisEngine<AutoEngine> {
    /// Create an engine on the default execution engine
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Self::with_engine(config, auto_engine())
    }
}

impl<E: ExecutionEngine> AnalysisEngine<E> {
    /// Create an engine on an explicit execution engine
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when a threshold is out of range or out of order.
    pub fn with_engine(config: AnalysisConfig, execution: E) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            builder: SegmentBuilder::new(),
            calculator: PerformanceCalculator::from_config(&config),
            anomaly: AnomalyDetector::new(config.anomaly.clone())?,
            hanging: HangingDetector::new(config.hanging.clone())?,
            mental: MentalResilienceAnalyzer::from_config(&config)?,
            config,
            execution,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn execution(&self) -> &E {
        &self.execution
    }

    /// Analyze every class of a result list
    pub fn analyze(&self, input: &ResultListInput, token: &CancellationToken) -> Result<AnalysisReport> {
        self.run(input, None, token)
    }

    /// Analyze a single class; segment sharing still reflects the whole list
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when the result list has no such class.
    pub fn analyze_class(
        &self,
        input: &ResultListInput,
        class_result_short_name: &str,
        token: &CancellationToken,
    ) -> Result<AnalysisReport> {
        if input.class(class_result_short_name).is_none() {
            return Err(Error::InvalidInput(format!(
                "result list {} has no class {class_result_short_name}",
                input.result_list_id
            )));
        }
        self.run(input, Some(class_result_short_name), token)
    }

    #[instrument(
        skip_all,
        fields(
            trace_id = %Uuid::new_v4(),
            result_list_id = input.result_list_id,
            event_id = input.event_id,
            class = class.unwrap_or("*"),
            engine = ?self.execution.strategy(),
        )
    )]
    fn run(
        &self,
        input: &ResultListInput,
        class: Option<&str>,
        token: &CancellationToken,
    ) -> Result<AnalysisReport> {
        token.check()?;
        let key = match class {
            Some(name) => input.class_key(name),
            None => input.key(),
        };

        let mut built = self.builder.build_result_list(input);
        if let Some(name) = class {
            built.classes.retain(|c| c.class_result_short_name == name);
            built.unavailable.retain(|u| u.class_result_short_name == name);
        }
        if built.is_empty() {
            let reason = unavailable_reason(&built);
            warn!(%reason, "Nothing to analyze");
            return Ok(AnalysisReport::unavailable(key, reason));
        }
        token.check()?;

        let unavailable = built.unavailable;
        let mut tables = Vec::with_capacity(built.classes.len());
        for class in built.classes {
            token.check()?;
            tables.push(self.calculator.compute(class));
        }
        debug!(classes = tables.len(), "Performance tables ready");

        let (anomaly, (hanging, mental)) = self.execution.join(
            || self.profiles(&self.anomaly, &tables, token),
            || {
                self.execution.join(
                    || self.profiles(&self.hanging, &tables, token),
                    || self.profiles(&self.mental, &tables, token),
                )
            },
        );
        let (anomaly, hanging, mental) = (anomaly?, hanging?, mental?);
        token.check()?;

        let excluded: usize = tables.iter().map(|t| t.excluded_splits).sum();
        let unavailable_names: Vec<String> = unavailable
            .iter()
            .map(|u| u.class_result_short_name.clone())
            .collect();

        let report = AnalysisReport {
            split_time: AnalysisOutcome::Available(SplitTimeAnalysis::from_tables(
                key.clone(),
                &tables,
                &unavailable,
            )),
            anomaly: AnalysisOutcome::Available(AnomalyAnalysis {
                key: key.clone(),
                statistics: AnomalyStatistics::from_profiles(&anomaly, excluded, unavailable_names.clone()),
                runners: anomaly,
            }),
            hanging: AnalysisOutcome::Available(HangingAnalysis {
                key: key.clone(),
                statistics: HangingStatistics::from_profiles(&hanging, excluded, unavailable_names.clone()),
                runners: hanging,
            }),
            mental_resilience: AnalysisOutcome::Available(MentalResilienceAnalysis {
                key: key.clone(),
                statistics: MriStatistics::from_profiles(&mental, excluded, unavailable_names),
                runners: mental,
            }),
            key,
        };

        info!(
            classes = tables.len(),
            runners = tables.iter().map(|t| t.runners.len()).sum::<usize>(),
            excluded_splits = excluded,
            "Analysis complete"
        );
        Ok(report)
    }

    /// Profiles of one analyzer over every table, in class then runner order
    fn profiles<A: ClassAnalyzer>(
        &self,
        analyzer: &A,
        tables: &[PerformanceTable],
        token: &CancellationToken,
    ) -> Result<Vec<A::Profile>> {
        let mut profiles = Vec::new();
        for table in tables {
            token.check()?;
            profiles.extend(analyzer.analyze_class(table, &self.execution));
        }
        Ok(profiles)
    }
}

fn unavailable_reason(built: &BuiltResultList) -> String {
    if built.unavailable.is_empty() {
        return "result list has no classes".to_string();
    }
    let names: Vec<&str> = built
        .unavailable
        .iter()
        .map(|u| u.class_result_short_name.as_str())
        .collect();
    format!("no valid segments in classes: {}", names.join(", "))
}

/// Analyze with the default configuration on the default engine
pub fn analyze(input: &ResultListInput) -> Result<AnalysisReport> {
    AnalysisEngine::new(AnalysisConfig::default())?.analyze(input, &CancellationToken::new())
}
