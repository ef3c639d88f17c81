use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::store::{Collection, CollectionClient, RawCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Create,
    Patch,
}

/// In-process stand-in for the document store. Keeps insertion order and can
/// be told to fail any operation.
#[derive(Default)]
pub struct MemoryCollectionClient {
    collections: Mutex<HashMap<Collection, RawCollection>>,
    failing: Mutex<HashSet<Operation>>,
    next_key: AtomicU64,
    requests: AtomicUsize,
}

impl MemoryCollectionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, collection: Collection, key: &str, record: Value) {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection)
            .or_default()
            .insert(key.to_string(), record);
    }

    pub async fn snapshot(&self, collection: Collection) -> RawCollection {
        let collections = self.collections.lock().await;
        collections.get(&collection).cloned().unwrap_or_default()
    }

    pub async fn set_failing(&self, operation: Operation, failing: bool) {
        let mut set = self.failing.lock().await;
        if failing {
            set.insert(operation);
        } else {
            set.remove(&operation);
        }
    }

    /// Number of requests served, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn check(&self, operation: Operation) -> Result<(), String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().await.contains(&operation) {
            return Err(format!("simulated network error during {:?}", operation));
        }
        Ok(())
    }
}

#[async_trait]
impl CollectionClient for MemoryCollectionClient {
    async fn fetch_all(&self, collection: Collection) -> Result<Option<RawCollection>, AppError> {
        self.check(Operation::Fetch).await.map_err(AppError::FetchFailed)?;

        let collections = self.collections.lock().await;
        Ok(collections
            .get(&collection)
            .filter(|records| !records.is_empty())
            .cloned())
    }

    async fn create(&self, collection: Collection, record: &Value) -> Result<String, AppError> {
        self.check(Operation::Create).await.map_err(AppError::CreateFailed)?;

        let key = format!("-mem{:08}", self.next_key.fetch_add(1, Ordering::SeqCst));
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection)
            .or_default()
            .insert(key.clone(), record.clone());
        Ok(key)
    }

    async fn patch(&self, collection: Collection, id: &str, partial: &Value) -> Result<(), AppError> {
        self.check(Operation::Patch).await.map_err(AppError::PatchFailed)?;

        let Value::Object(fields) = partial else {
            return Err(AppError::PatchFailed("patch body must be an object".to_string()));
        };

        let mut collections = self.collections.lock().await;
        let stored = collections
            .entry(collection)
            .or_default()
            .entry(id.to_string())
            .or_insert_with(|| Value::Object(RawCollection::new()));
        if let Value::Object(existing) = stored {
            for (name, value) in fields {
                existing.insert(name.clone(), value.clone());
            }
        } else {
            *stored = partial.clone();
        }
        Ok(())
    }
}
