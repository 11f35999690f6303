//! # cur-state
//!
//! Persisted automation state for Curator.
//!
//! One small JSON record survives across invocations: cumulative counters,
//! the last-iteration summary, per-category counts, and the registry of
//! every application generated so far (the dedup source of truth).
//!
//! Load is forgiving: an absent or corrupt file becomes a default state.
//! Save is strict and atomic: the record is written to a temp file in the
//! same directory and renamed into place, exactly once per run.

mod error;
mod store;

pub use error::StateError;
pub use store::StateStore;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use cur_core::AppRecord;
use serde::{Deserialize, Serialize};

const STATE_VERSION: &str = "1.0.0";

/// Cumulative counters across all runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_apps_generated: u64,
    #[serde(default)]
    pub total_bugs_fixed: u64,
}

/// Summary of the most recent iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastIteration {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub new_apps: Vec<String>,
    #[serde(default)]
    pub bugs_fixed: Vec<String>,
}

/// The only state that survives across invocations.
///
/// Owned by the orchestrator: loaded at run start, mutated in memory,
/// persisted once at run end. All fields default so the record stays
/// loadable across partial schema evolution; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationState {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "Utc::now")]
    pub initialized_at: DateTime<Utc>,
    #[serde(default)]
    pub last_iteration: Option<LastIteration>,
    #[serde(default)]
    pub stats: Stats,
    /// Apps generated per category, used to bias category sampling.
    #[serde(default)]
    pub category_counts: BTreeMap<String, u64>,
    /// Registry of every generated application, keyed by uniqueness key.
    #[serde(default)]
    pub registry: Vec<AppRecord>,
}

fn default_version() -> String {
    STATE_VERSION.to_string()
}

impl Default for AutomationState {
    fn default() -> Self {
        Self {
            version: default_version(),
            initialized_at: Utc::now(),
            last_iteration: None,
            stats: Stats::default(),
            category_counts: BTreeMap::new(),
            registry: Vec::new(),
        }
    }
}

impl AutomationState {
    /// Whether `key` is already registered.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.registry.iter().any(|record| record.key == key)
    }

    /// Add a record to the registry.
    ///
    /// Returns `false` (and leaves the registry untouched) when the key is
    /// already present — registry keys are unique by invariant.
    pub fn register(&mut self, record: AppRecord) -> bool {
        if self.contains_key(&record.key) {
            return false;
        }
        *self
            .category_counts
            .entry(record.category.clone())
            .or_default() += 1;
        self.registry.push(record);
        true
    }

    /// All registered app names, in registration order.
    #[must_use]
    pub fn app_names(&self) -> Vec<String> {
        self.registry.iter().map(|r| r.name.clone()).collect()
    }

    /// App names in one category.
    #[must_use]
    pub fn names_in_category(&self, category: &str) -> Vec<String> {
        self.registry
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.name.clone())
            .collect()
    }

    /// Total registered apps.
    #[must_use]
    pub fn total_apps(&self) -> usize {
        self.registry.len()
    }

    /// Apps generated in `category` so far.
    #[must_use]
    pub fn category_count(&self, category: &str) -> u64 {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Registry keys ordered least-recently-reviewed first.
    ///
    /// Never-reviewed apps come first (oldest registration first), then
    /// reviewed apps by ascending `last_reviewed_at`.
    #[must_use]
    pub fn review_queue(&self) -> Vec<String> {
        let mut order: Vec<(usize, &AppRecord)> = self.registry.iter().enumerate().collect();
        order.sort_by_key(|(index, record)| (record.last_reviewed_at, *index));
        order
            .into_iter()
            .map(|(_, record)| record.key.clone())
            .collect()
    }

    /// Look up a record by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AppRecord> {
        self.registry.iter().find(|record| record.key == key)
    }

    /// Stamp a record as reviewed at `at`. No-op for unknown keys.
    pub fn mark_reviewed(&mut self, key: &str, at: DateTime<Utc>) {
        if let Some(record) = self.registry.iter_mut().find(|record| record.key == key) {
            record.last_reviewed_at = Some(at);
        }
    }
}
