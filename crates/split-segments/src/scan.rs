//! Shared leg scan used by every analyzer
//!
//! Each analyzer is a [`LegScanner`]: given one leg in the context of its
//! class table, it either emits a piece of evidence or nothing. The scan loop
//! itself lives here once. A runner's legs are always walked sequentially in
//! leg order; runners are mapped through an [`ExecutionEngine`] and come back
//! in table order.

use crate::performance::{LegPerformance, PerformanceTable, RunnerPerformance};
use split_core::ExecutionEngine;
use tracing::{debug, instrument};

/// One leg of one runner, with access to the rest of the class
#[derive(Debug, Clone, Copy)]
pub struct LegView<'a> {
    table: &'a PerformanceTable,
    runner_index: usize,
    leg_index: usize,
}

impl<'a> LegView<'a> {
    /// View of `table.runners[runner_index].legs[leg_index]`
    ///
    /// Returns `None` when either index is out of range.
    pub fn new(table: &'a PerformanceTable, runner_index: usize, leg_index: usize) -> Option<Self> {
        let runner = table.runners.get(runner_index)?;
        runner.legs.get(leg_index)?;
        Some(Self {
            table,
            runner_index,
            leg_index,
        })
    }

    pub fn table(&self) -> &'a PerformanceTable {
        self.table
    }

    pub fn runner_index(&self) -> usize {
        self.runner_index
    }

    pub fn leg_index(&self) -> usize {
        self.leg_index
    }

    pub fn runner(&self) -> &'a RunnerPerformance {
        &self.table.runners[self.runner_index]
    }

    pub fn leg(&self) -> &'a LegPerformance {
        &self.runner().legs[self.leg_index]
    }

    /// The runner's following leg, if any
    pub fn next_leg(&self) -> Option<&'a LegPerformance> {
        self.runner().legs.get(self.leg_index + 1)
    }

    pub fn normal_pi(&self) -> Option<f64> {
        self.runner().normal_pi
    }

    /// `PI / normalPI` of this leg
    pub fn ratio_to_normal(&self) -> Option<f64> {
        self.runner().ratio_to_normal(self.leg())
    }

    /// Other runners' PI-bearing legs on the same directed segment
    pub fn peers(&self) -> impl Iterator<Item = LegView<'a>> + 'a {
        let table = self.table;
        let own = self.runner_index;
        let members: &'a [(usize, usize)] = match self.leg().segment_index {
            Some(s) => table.segment_members(s),
            None => &[],
        };
        members
            .iter()
            .filter(move |(r, _)| *r != own)
            .map(move |&(runner_index, leg_index)| LegView {
                table,
                runner_index,
                leg_index,
            })
    }
}

/// Per-leg strategy of an analyzer
pub trait LegScanner: Sync {
    /// What the scanner emits for a leg
    type Evidence: Send;

    /// Inspect one leg, returning evidence or nothing
    fn scan_leg(&self, view: &LegView<'_>) -> Option<Self::Evidence>;
}

/// Walk one runner's legs in order, collecting evidence
pub fn scan_runner<S: LegScanner + ?Sized>(
    table: &PerformanceTable,
    runner_index: usize,
    scanner: &S,
) -> Vec<S::Evidence> {
    let Some(runner) = table.runners.get(runner_index) else {
        return Vec::new();
    };
    (0..runner.legs.len())
        .filter_map(|leg_index| {
            let view = LegView {
                table,
                runner_index,
                leg_index,
            };
            scanner.scan_leg(&view)
        })
        .collect()
}

/// Scan every runner of a table through `engine`, in runner order
pub fn scan_table<S, E>(table: &PerformanceTable, scanner: &S, engine: &E) -> Vec<Vec<S::Evidence>>
where
    S: LegScanner,
    E: ExecutionEngine,
{
    engine.execute_batch(table.runners.len(), |r| scan_runner(table, r, scanner))
}

/// One analyzer applied to a whole class
pub trait ClassAnalyzer: LegScanner {
    /// Per-runner output record
    type Profile: Send;

    /// Stable name used in logs
    fn analysis_name(&self) -> &'static str;

    /// Reduce a runner's evidence to its profile
    fn build_profile(
        &self,
        table: &PerformanceTable,
        runner: &RunnerPerformance,
        evidence: Vec<Self::Evidence>,
    ) -> Self::Profile;

    /// One profile per runner, in table order
    #[instrument(skip_all, fields(analysis = self.analysis_name(), class = %table.class_result_short_name))]
    fn analyze_class<E: ExecutionEngine>(
        &self,
        table: &PerformanceTable,
        engine: &E,
    ) -> Vec<Self::Profile>
    where
        Self: Sized,
    {
        let profiles = engine.execute_batch(table.runners.len(), |r| {
            let evidence = scan_runner(table, r, self);
            self.build_profile(table, &table.runners[r], evidence)
        });
        debug!(profiles = profiles.len(), "Class analyzed");
        profiles
    }
}
