use std::{collections::HashMap, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::trace;

/// An in-process store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<HashMap<String, serde_json::Value>>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.0.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.0.read().await.is_empty()
    }

    pub async fn remove(&self, key: &str) {
        self.0.write().await.remove(key);
    }
}

impl super::KvStore for MemoryStore {
    type Error = serde_json::Error;

    async fn get<T>(&self, key: &str) -> Result<Option<T>, Self::Error>
    where
        T: DeserializeOwned,
    {
        let value = self.0.read().await.get(key).cloned();

        trace!(key, found = value.is_some());

        value.map(serde_json::from_value).transpose()
    }

    async fn set<T>(&self, key: &str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(value)?;

        trace!(key, "storing value");

        self.0.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}
