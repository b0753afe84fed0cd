use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use crate::classify::{ChangeAssessment, ChangeEngine, Tier};
use crate::error::{PolicyDriftError, Result};
use crate::snapshot::Snapshot;
use super::store::SnapshotStore;

#[derive(Debug, Clone, Serialize)]
pub struct MonitorEntry {
    pub url: String,
    pub extracted_at: DateTime<Utc>,
    pub assessment: ChangeAssessment,
    pub persisted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitorFailure {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct MonitorReport {
    pub entries: Vec<MonitorEntry>,
    pub failures: Vec<MonitorFailure>,
}

impl MonitorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<&MonitorEntry> {
        self.entries
            .iter()
            .filter(|e| e.assessment.should_notify())
            .collect()
    }

    pub fn persisted_count(&self) -> usize {
        self.entries.iter().filter(|e| e.persisted).count()
    }

    pub fn by_url(&self) -> BTreeMap<&str, Vec<&MonitorEntry>> {
        let mut grouped: BTreeMap<&str, Vec<&MonitorEntry>> = BTreeMap::new();
        for e in &self.entries {
            grouped.entry(e.url.as_str()).or_default().push(e);
        }
        grouped
    }

    pub fn summary(&self) -> HashMap<Tier, usize> {
        let mut counts: HashMap<Tier, usize> = HashMap::new();
        for e in &self.entries {
            *counts.entry(e.assessment.tier).or_default() += 1;
        }
        counts
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Feeds fetched snapshots through the engine against a snapshot store and
/// applies the persist-iff-changed rule.
#[derive(Clone)]
pub struct ChangeMonitor {
    engine: Arc<ChangeEngine>,
    store: Arc<dyn SnapshotStore>,
}

impl ChangeMonitor {
    pub fn new(engine: Arc<ChangeEngine>, store: Arc<dyn SnapshotStore>) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &ChangeEngine {
        &self.engine
    }

    /// Assesses one snapshot against the last persisted one for its URL.
    pub async fn process(&self, current: Snapshot) -> Result<MonitorEntry> {
        let previous = self.store.latest(&current.url).await?;

        let engine = Arc::clone(&self.engine);
        let (assessment, current) = tokio::task::spawn_blocking(move || {
            let assessment = engine.assess(previous.as_ref(), &current);
            (assessment, current)
        })
        .await
        .map_err(|e| PolicyDriftError::Task(e.to_string()))?;

        let url = current.url.clone();
        let extracted_at = current.extracted_at;
        let persisted = assessment.should_persist();
        if persisted {
            self.store.persist(current).await?;
        }

        debug!(url = %url, tier = %assessment.tier, persisted, "snapshot processed");

        Ok(MonitorEntry {
            url,
            extracted_at,
            assessment,
            persisted,
        })
    }

    /// Processes many snapshots. URLs run concurrently; snapshots of one URL
    /// run one at a time in `extracted_at` order, so each is compared against
    /// the baseline its predecessor left behind. A failing URL stops its own
    /// history and is reported without affecting the others.
    pub async fn process_batch(&self, snapshots: Vec<Snapshot>) -> MonitorReport {
        let mut by_url: BTreeMap<String, Vec<Snapshot>> = BTreeMap::new();
        for snapshot in snapshots {
            by_url.entry(snapshot.url.clone()).or_default().push(snapshot);
        }

        info!("Processing {} snapshot histories", by_url.len());

        let mut tasks = JoinSet::new();
        for (url, mut history) in by_url {
            history.sort_by_key(|s| s.extracted_at);
            let monitor = self.clone();
            tasks.spawn(async move {
                let mut entries = Vec::with_capacity(history.len());
                for snapshot in history {
                    match monitor.process(snapshot).await {
                        Ok(entry) => entries.push(entry),
                        Err(e) => return (url, entries, Some(e.to_string())),
                    }
                }
                (url, entries, None)
            });
        }

        let mut report = MonitorReport::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, entries, error)) => {
                    report.entries.extend(entries);
                    if let Some(error) = error {
                        warn!(url = %url, error = %error, "snapshot history aborted");
                        report.failures.push(MonitorFailure { url, error });
                    }
                }
                Err(e) => {
                    warn!(error = %e, "snapshot history task failed");
                    report.failures.push(MonitorFailure {
                        url: String::new(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report
            .entries
            .sort_by(|a, b| a.url.cmp(&b.url).then(a.extracted_at.cmp(&b.extracted_at)));
        report.failures.sort_by(|a, b| a.url.cmp(&b.url));

        report
    }
}
