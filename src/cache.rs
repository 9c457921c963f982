//! Result cache keyed by `(resultListId, analysisType)`
//!
//! A miss on any analysis type runs the whole analysis once and stores all
//! four records. Concurrent callers for the same result list wait on one
//! slot, so each result list is computed at most once until invalidated.
//! Failed and cancelled runs store nothing.

use crate::engine::AnalysisEngine;
use crate::report::AnalysisRecord;
use dashmap::DashMap;
use split_core::{AnalysisType, CancellationToken, Error, ExecutionEngine, Result};
use split_segments::ResultListInput;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

type Records = BTreeMap<AnalysisType, Arc<AnalysisRecord>>;
type Slot = Arc<Mutex<Option<Records>>>;

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of records currently cached
    pub entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

/// Memoizes analysis records per result list
#[derive(Debug, Default)]
pub struct AnalysisCache {
    slots: DashMap<u64, Slot>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached record, without computing or touching statistics
    pub fn get(&self, result_list_id: u64, analysis_type: AnalysisType) -> Option<Arc<AnalysisRecord>> {
        let slot = self.slots.get(&result_list_id)?.value().clone();
        let guard = slot.lock().ok()?;
        guard.as_ref()?.get(&analysis_type).cloned()
    }

    /// Cached record, or run `engine` over `input` and cache every record it yields
    pub fn get_or_analyze<E: ExecutionEngine>(
        &self,
        engine: &AnalysisEngine<E>,
        input: &ResultListInput,
        analysis_type: AnalysisType,
        token: &CancellationToken,
    ) -> Result<Arc<AnalysisRecord>> {
        // Clone the slot out so the shard lock is released before computing
        let slot = self
            .slots
            .entry(input.result_list_id)
            .or_default()
            .value()
            .clone();
        let mut guard = slot
            .lock()
            .map_err(|_| Error::Execution("analysis cache slot poisoned".into()))?;

        if let Some(records) = guard.as_ref() {
            if let Some(record) = records.get(&analysis_type) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Arc::clone(record));
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(result_list_id = input.result_list_id, %analysis_type, "Analysis cache miss");
        let records: Records = engine
            .analyze(input, token)?
            .into_records()
            .into_iter()
            .map(|r| (r.analysis_type(), Arc::new(r)))
            .collect();
        let record = records
            .get(&analysis_type)
            .cloned()
            .ok_or_else(|| Error::Execution(format!("report has no {analysis_type} record")))?;
        *guard = Some(records);
        Ok(record)
    }

    /// Drop every record of one result list
    pub fn invalidate(&self, result_list_id: u64) {
        self.slots.remove(&result_list_id);
    }

    /// Drop everything and reset statistics
    pub fn clear(&self) {
        self.slots.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let entries = self
            .slots
            .iter()
            .map(|slot| {
                slot.value()
                    .lock()
                    .map(|g| g.as_ref().map_or(0, BTreeMap::len))
                    .unwrap_or(0)
            })
            .sum();

        CacheStats {
            hits,
            misses,
            entries,
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
        }
    }
}
