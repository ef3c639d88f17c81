use serde::Serialize;
use tracing::{error, info};

use crate::error::AppError;
use crate::models::{Course, Record, SyllabusEntry};

pub const LOAD_FAILED: &str = "Failed to load course.";
pub const NOT_FOUND: &str = "Course not found.";

const MISSING: &str = "N/A";

#[derive(Debug)]
pub struct CourseDetailState {
    course_id: String,
    loading: bool,
    error: Option<String>,
    course: Option<Course>,
    syllabus: Vec<SyllabusEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInfo {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub description: String,
    pub image: Option<String>,
    pub enrollment_status: String,
    pub duration: String,
    pub schedule: String,
    pub location: String,
    pub prerequisites: String,
    pub likes: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusRow {
    pub week: u32,
    pub topic: String,
    pub expanded: bool,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailView {
    pub loading: bool,
    pub error: String,
    pub course: Option<CourseInfo>,
    pub syllabus: Vec<SyllabusRow>,
}

fn or_missing(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}

impl CourseDetailState {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            loading: true,
            error: None,
            course: None,
            syllabus: Vec::new(),
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Picks this view's course out of a full course load, by store key.
    pub fn apply_loaded(&mut self, result: Result<Vec<Course>, AppError>) {
        match result {
            Ok(courses) => match courses.into_iter().find(|course| course.key() == self.course_id) {
                Some(course) => {
                    info!("Loaded course {}", self.course_id);
                    self.syllabus = course.syllabus.clone();
                    self.course = Some(course);
                    self.error = None;
                }
                None => {
                    self.error = Some(NOT_FOUND.to_string());
                }
            },
            Err(e) => {
                error!("Error fetching course {}: {}", self.course_id, e);
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

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn syllabus(&self) -> &[SyllabusEntry] {
        &self.syllabus
    }

    /// Flips `expanded` on the entry at `index`. Positions are ordinals into
    /// the syllabus as loaded. Returns false when there is no such entry.
    pub fn toggle_expand(&mut self, index: usize) -> bool {
        match self.syllabus.get_mut(index) {
            Some(entry) => {
                entry.expanded = !entry.expanded;
                true
            }
            None => false,
        }
    }

    pub fn render(&self) -> CourseDetailView {
        let course = self.course.as_ref().map(|course| CourseInfo {
            id: course.key().to_string(),
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            description: course.description.clone(),
            image: course.image.clone(),
            enrollment_status: or_missing(&course.enrollment_status),
            duration: or_missing(&course.duration),
            schedule: or_missing(&course.schedule),
            location: or_missing(&course.location),
            prerequisites: or_missing(&course.prerequisites),
            likes: course.likes(),
        });

        let syllabus = self
            .syllabus
            .iter()
            .map(|entry| SyllabusRow {
                week: entry.week,
                topic: entry.topic.clone(),
                expanded: entry.expanded,
                content: entry
                    .expanded
                    .then(|| format!("Detailed content for {}.", entry.topic)),
            })
            .collect();

        CourseDetailView {
            loading: self.loading,
            error: self.error.clone().unwrap_or_default(),
            course,
            syllabus,
        }
    }
}
