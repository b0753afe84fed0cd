use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::error::Result;
use crate::snapshot::Snapshot;

/// Where the last persisted snapshot of each URL lives.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn latest(&self, url: &str) -> Result<Option<Snapshot>>;

    /// Replaces the stored baseline for `snapshot.url`.
    async fn persist(&self, snapshot: Snapshot) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshots: RwLock<HashMap<String, Snapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshots(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        let snapshots = snapshots
            .into_iter()
            .map(|s| (s.url.clone(), s))
            .collect();
        Self {
            snapshots: RwLock::new(snapshots),
        }
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn latest(&self, url: &str) -> Result<Option<Snapshot>> {
        Ok(self.snapshots.read().await.get(url).cloned())
    }

    async fn persist(&self, snapshot: Snapshot) -> Result<()> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.url.clone(), snapshot);
        Ok(())
    }
}
