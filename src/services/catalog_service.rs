use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::catalog::normalize;
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::models::{Course, CoursePatch, EnrolledCourse, Record};
use crate::store::CollectionClient;
use crate::views::{CourseDetailState, CourseListState, DashboardState, LikeRequest};

/// Data access for the views. Views reach the store only through here.
pub struct CatalogService {
    store: Arc<dyn CollectionClient>,
    ids: Arc<dyn IdGenerator>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CollectionClient>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// Fetches a whole collection as an ordered list.
    pub async fn load<T: Record>(&self) -> Result<Vec<T>, AppError> {
        let raw = self.store.fetch_all(T::COLLECTION).await?;
        let records = normalize::<T>(raw);
        debug!("Fetched {} records from {}", records.len(), T::COLLECTION);
        Ok(records)
    }

    pub async fn send_like(&self, request: &LikeRequest) -> Result<(), AppError> {
        let patch = CoursePatch { likes: request.new_likes };
        let body = serde_json::to_value(&patch)
            .map_err(|e| AppError::PatchFailed(format!("Failed to encode patch: {}", e)))?;
        self.store.patch(Course::COLLECTION, &request.id, &body).await
    }

    /// Creates `record` and returns the key the store assigned. The stored
    /// `_id` is then rewritten to that key so later loads agree with it.
    pub async fn send_create(&self, record: &Course) -> Result<String, AppError> {
        let body = serde_json::to_value(record)
            .map_err(|e| AppError::CreateFailed(format!("Failed to encode course: {}", e)))?;
        let key = self.store.create(Course::COLLECTION, &body).await?;

        // The record exists at this point; a failed rewrite only leaves a stale `_id`.
        if let Err(e) = self.store.patch(Course::COLLECTION, &key, &json!({ "_id": key })).await {
            warn!("Course {} created but its _id was not updated: {}", key, e);
        }
        Ok(key)
    }

    pub async fn mount_course_list(&self) -> CourseListState {
        let mut state = CourseListState::new(self.ids());
        state.apply_loaded(self.load::<Course>().await);
        state
    }

    pub async fn mount_course_detail(&self, course_id: &str) -> CourseDetailState {
        let mut state = CourseDetailState::new(course_id);
        state.apply_loaded(self.load::<Course>().await);
        state
    }

    pub async fn mount_dashboard(&self) -> DashboardState {
        let mut state = DashboardState::new();
        state.apply_loaded(self.load::<EnrolledCourse>().await);
        state
    }

    /// Full like round trip against a view state owned by the caller.
    pub async fn toggle_like(&self, state: &mut CourseListState, id: &str) -> Result<(), AppError> {
        let request = state.begin_like(id)?;
        let result = self.send_like(&request).await;
        state.finish_like(request, result)
    }

    /// Full create round trip for the state's current draft.
    pub async fn submit_draft(&self, state: &mut CourseListState) -> Result<(), AppError> {
        let record = state.begin_create(self.ids())?;
        let result = self.send_create(&record).await;
        if let Err(e) = &result {
            warn!("Create of {} failed: {}", record.id, e);
        }
        state.finish_create(record, result, self.ids())
    }
}
