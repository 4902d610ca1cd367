//! In-Memory Handoff Adapter
//!
//! Keeps the serialized report card in a key-value map, the way a browser
//! keeps it in local storage. Values go through the JSON handoff format on
//! every write and read.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::grading::ReportCard;
use crate::ports::{HandoffError, ReportCardHandoff, HANDOFF_KEY};

/// In-memory handoff slot
#[derive(Debug, Clone, Default)]
pub struct InMemoryHandoff {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a card is currently stored.
    pub async fn is_occupied(&self) -> bool {
        self.entries.read().await.contains_key(HANDOFF_KEY)
    }

    #[cfg(test)]
    async fn put_raw(&self, raw: &str) {
        self.entries
            .write()
            .await
            .insert(HANDOFF_KEY.to_string(), raw.to_string());
    }
}

#[async_trait]
impl ReportCardHandoff for InMemoryHandoff {
    async fn get(&self) -> Result<Option<ReportCard>, HandoffError> {
        let entries = self.entries.read().await;
        entries
            .get(HANDOFF_KEY)
            .map(|raw| {
                serde_json::from_str(raw)
                    .map_err(|e| HandoffError::DeserializationFailed(e.to_string()))
            })
            .transpose()
    }

    async fn set(&self, card: &ReportCard) -> Result<(), HandoffError> {
        let raw = serde_json::to_string(card)
            .map_err(|e| HandoffError::SerializationFailed(e.to_string()))?;
        self.entries
            .write()
            .await
            .insert(HANDOFF_KEY.to_string(), raw);
        Ok(())
    }

    async fn clear(&self) -> Result<(), HandoffError> {
        self.entries.write().await.remove(HANDOFF_KEY);
        Ok(())
    }
}
