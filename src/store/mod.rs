pub mod dto;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;

pub use memory::{MemoryCollectionClient, Operation};

/// A container as the store returns it: opaque key to record, in body order.
pub type RawCollection = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Courses,
    EnrolledCourses,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Courses => "courses",
            Collection::EnrolledCourses => "enrolledCourses",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait CollectionClient: Send + Sync {
    /// `Ok(None)` when the container does not exist or is empty.
    async fn fetch_all(&self, collection: Collection) -> Result<Option<RawCollection>, AppError>;
    /// Returns the key the store assigned to the new record.
    async fn create(&self, collection: Collection, record: &Value) -> Result<String, AppError>;
    async fn patch(&self, collection: Collection, id: &str, partial: &Value) -> Result<(), AppError>;
}

pub struct HttpCollectionClient {
    client: Client,
    base_url: String,
}

impl HttpCollectionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}.json", self.base_url, collection)
    }

    fn record_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}/{}.json", self.base_url, collection, id)
    }
}

/// Fails with the status and body of a non-success response.
async fn check_status(response: Response) -> Result<Response, String> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(format!("Store returned {}: {}", status, body))
}

#[async_trait]
impl CollectionClient for HttpCollectionClient {
    async fn fetch_all(&self, collection: Collection) -> Result<Option<RawCollection>, AppError> {
        let url = self.collection_url(collection);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::FetchFailed(format!("Request to {} failed: {}", url, e)))?;
        let response = check_status(response).await.map_err(AppError::FetchFailed)?;

        let body_text = response
            .text()
            .await
            .map_err(|e| AppError::FetchFailed(format!("Failed to read {} response: {}", collection, e)))?;
        if body_text.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&body_text)
            .map_err(|e| AppError::FetchFailed(format!("Failed to parse {} response: {}", collection, e)))?;
        dto::into_raw_collection(value)
            .map_err(|e| AppError::FetchFailed(format!("Unexpected {} response: {}", collection, e)))
    }

    async fn create(&self, collection: Collection, record: &Value) -> Result<String, AppError> {
        let url = self.collection_url(collection);
        debug!("POST {}", url);

        let response = self.client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| AppError::CreateFailed(format!("Request to {} failed: {}", url, e)))?;
        let response = check_status(response).await.map_err(AppError::CreateFailed)?;

        let created = response
            .json::<dto::CreateResponse>()
            .await
            .map_err(|e| AppError::CreateFailed(format!("Failed to parse create response: {}", e)))?;
        Ok(created.name)
    }

    async fn patch(&self, collection: Collection, id: &str, partial: &Value) -> Result<(), AppError> {
        let url = self.record_url(collection, id);
        debug!("PATCH {}", url);

        let response = self.client
            .patch(&url)
            .json(partial)
            .send()
            .await
            .map_err(|e| AppError::PatchFailed(format!("Request to {} failed: {}", url, e)))?;
        check_status(response).await.map_err(AppError::PatchFailed)?;

        Ok(())
    }
}
