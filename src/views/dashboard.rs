use std::collections::HashSet;

use serde::Serialize;
use tracing::{error, info};

use crate::catalog::{LIST_SEARCH_FIELDS, filter};
use crate::error::AppError;
use crate::models::{EnrolledCourse, Record};

pub const LOAD_FAILED: &str = "Failed to load courses.";

#[derive(Debug)]
pub struct DashboardState {
    loading: bool,
    error: Option<String>,
    enrolled: Vec<EnrolledCourse>,
    search_term: String,
    completed: HashSet<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCard {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub description: String,
    pub image: Option<String>,
    pub access: Option<String>,
    pub progress: f64,
    pub completed: bool,
    pub action_label: &'static str,
    pub action_disabled: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub loading: bool,
    pub error: String,
    pub search_term: String,
    pub courses: Vec<DashboardCard>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            loading: true,
            error: None,
            enrolled: Vec::new(),
            search_term: String::new(),
            completed: HashSet::new(),
        }
    }

    pub fn apply_loaded(&mut self, result: Result<Vec<EnrolledCourse>, AppError>) {
        match result {
            Ok(enrolled) => {
                info!("Loaded {} enrolled courses", enrolled.len());
                self.enrolled = enrolled;
                self.error = None;
            }
            Err(e) => {
                error!("Error fetching enrolled courses: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn enrolled(&self) -> &[EnrolledCourse] {
        &self.enrolled
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn visible(&self) -> Vec<&EnrolledCourse> {
        filter(&self.enrolled, &self.search_term, LIST_SEARCH_FIELDS)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Moves `id` in or out of the completed set; returns the new membership.
    pub fn toggle_completed(&mut self, id: &str) -> Result<bool, AppError> {
        if !self.enrolled.iter().any(|course| course.key() == id) {
            return Err(AppError::NotFound(format!("Enrolled course {} not found", id)));
        }

        if self.completed.remove(id) {
            Ok(false)
        } else {
            self.completed.insert(id.to_string());
            Ok(true)
        }
    }

    pub fn render(&self) -> DashboardView {
        let courses = self
            .visible()
            .into_iter()
            .map(|course| {
                let completed = self.is_completed(course.key());
                DashboardCard {
                    id: course.key().to_string(),
                    title: course.title.clone(),
                    instructor: course.instructor.clone(),
                    description: course.description.clone(),
                    image: course.image.clone(),
                    access: course.access.clone(),
                    progress: course.progress.unwrap_or(0.0),
                    completed,
                    action_label: if completed { "Completed" } else { "Mark as Complete" },
                    action_disabled: completed,
                }
            })
            .collect();

        DashboardView {
            loading: self.loading,
            error: self.error.clone().unwrap_or_default(),
            search_term: self.search_term.clone(),
            courses,
        }
    }
}
