//! Run ledger
//!
//! Hands out generation numbers and keeps a short history of runs.
//! A run is current only while no newer run has started.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::FilterError;
use crate::filter::FilterType;
use crate::run::{FilterRun, RunState};
use crate::Result;

const DEFAULT_HISTORY: usize = 64;

#[derive(Debug, Default)]
struct Inner {
    runs: HashMap<String, FilterRun>,
    generation: u64,
}

pub struct RunLedger {
    inner: Arc<RwLock<Inner>>,
    /// Runs beyond this many are forgotten, oldest first. The current
    /// run is never evicted while it is still loading.
    max_history: usize,
}

impl RunLedger {
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }

    pub fn with_history(max_history: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            max_history: max_history.max(1),
        }
    }

    /// Start a run; it becomes the current generation
    pub fn start_run(&self, filter: FilterType) -> FilterRun {
        let mut inner = self.inner.write();
        inner.generation += 1;
        let run = FilterRun::new(filter, inner.generation);
        inner.runs.insert(run.id.clone(), run.clone());
        self.prune(&mut inner);

        tracing::info!(
            run_id = %run.id,
            filter = %run.filter,
            generation = run.generation,
            "Started filter run"
        );

        run
    }

    pub fn current_generation(&self) -> u64 {
        self.inner.read().generation
    }

    pub fn is_current(&self, run: &FilterRun) -> bool {
        run.generation == self.current_generation()
    }

    pub fn get_run(&self, id: &str) -> Result<FilterRun> {
        self.inner
            .read()
            .runs
            .get(id)
            .cloned()
            .ok_or_else(|| FilterError::RunNotFound(id.to_string()))
    }

    pub fn complete_run(&self, id: &str, result_count: usize) -> Result<FilterRun> {
        let run = self.update(id, |run| {
            run.result_count = Some(result_count);
            run.finish(RunState::Completed);
        })?;

        tracing::info!(
            run_id = %id,
            filter = %run.filter,
            results = result_count,
            "Completed filter run"
        );

        Ok(run)
    }

    pub fn fail_run(&self, id: &str, reason: &str) -> Result<FilterRun> {
        let run = self.update(id, |run| {
            run.failure = Some(reason.to_string());
            run.finish(RunState::Failed);
        })?;

        tracing::warn!(run_id = %id, filter = %run.filter, error = %reason, "Filter run failed");

        Ok(run)
    }

    pub fn supersede_run(&self, id: &str) -> Result<FilterRun> {
        let run = self.update(id, |run| run.finish(RunState::Superseded))?;

        tracing::debug!(
            run_id = %id,
            generation = run.generation,
            "Dropped response from superseded run"
        );

        Ok(run)
    }

    /// Mark a run abandoned by its caller. Runs that already finished keep
    /// their state.
    pub fn cancel_run(&self, id: &str) -> Result<FilterRun> {
        let run = self.update(id, |run| {
            if run.state == RunState::Loading {
                run.finish(RunState::Cancelled);
            }
        })?;

        tracing::debug!(run_id = %id, state = %run.state, "Filter run abandoned");

        Ok(run)
    }

    /// Runs oldest first
    pub fn list_runs(&self) -> Vec<FilterRun> {
        let mut runs: Vec<FilterRun> = self.inner.read().runs.values().cloned().collect();
        runs.sort_by_key(|r| r.generation);
        runs
    }

    pub fn latest_run(&self) -> Option<FilterRun> {
        self.inner
            .read()
            .runs
            .values()
            .max_by_key(|r| r.generation)
            .cloned()
    }

    /// Runs still waiting on the backend, superseded or not
    pub fn in_flight(&self) -> Vec<FilterRun> {
        self.list_runs()
            .into_iter()
            .filter(|r| r.state == RunState::Loading)
            .collect()
    }

    fn update<F>(&self, id: &str, f: F) -> Result<FilterRun>
    where
        F: FnOnce(&mut FilterRun),
    {
        let mut inner = self.inner.write();
        let run = inner
            .runs
            .get_mut(id)
            .ok_or_else(|| FilterError::RunNotFound(id.to_string()))?;
        f(run);
        Ok(run.clone())
    }

    fn prune(&self, inner: &mut Inner) {
        if inner.runs.len() <= self.max_history {
            return;
        }

        // A loading run from an older generation can never render, so it is
        // as evictable as a finished one.
        let current = inner.generation;
        let mut evictable: Vec<(u64, String)> = inner
            .runs
            .values()
            .filter(|r| r.state.is_finished() || r.generation < current)
            .map(|r| (r.generation, r.id.clone()))
            .collect();
        evictable.sort();

        let excess = inner.runs.len() - self.max_history;
        for (_, id) in evictable.into_iter().take(excess) {
            inner.runs.remove(&id);
        }
    }
}

impl Default for RunLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RunLedger {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            max_history: self.max_history,
        }
    }
}
