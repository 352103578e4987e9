//! In-memory record of completed uploads

use tokio::sync::RwLock;

/// Ordered, append-only list of storage names for uploads that finished.
///
/// Appends are serialized by the write lock; readers get a snapshot and see
/// either the state before or after any concurrent append. Entries live for
/// the lifetime of the process.
#[derive(Debug, Default)]
pub struct UploadRegistry {
    entries: RwLock<Vec<String>>,
}

impl UploadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the ingestion pipeline records uploads, after the file is synced and closed.
    pub(crate) async fn append(&self, storage_name: String) {
        let mut entries = self.entries.write().await;
        entries.push(storage_name);
    }

    /// Snapshot of every recorded storage name, oldest first.
    pub async fn list(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
