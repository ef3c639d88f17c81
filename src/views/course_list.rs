use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::catalog::{LIST_SEARCH_FIELDS, filter};
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::models::{Course, Record};
use crate::views::draft::{CourseDraft, DraftField, DraftView};

pub const LOAD_FAILED: &str = "Failed to load courses.";
pub const LIKE_FAILED: &str = "Failed to update likes.";
pub const CREATE_FAILED: &str = "Failed to add course.";

/// Like status of one course for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeState {
    #[default]
    Unliked,
    Liking { was_liked: bool },
    Liked,
    LikeFailed { was_liked: bool },
}

impl LikeState {
    /// The flag shown to the user; only a confirmed patch changes it.
    pub fn is_liked(&self) -> bool {
        match self {
            LikeState::Liked => true,
            LikeState::Unliked => false,
            LikeState::Liking { was_liked } | LikeState::LikeFailed { was_liked } => *was_liked,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LikeState::Liking { .. })
    }
}

/// A like toggle that has been started but not yet confirmed. `id` is the
/// store key of the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeRequest {
    pub id: String,
    pub new_likes: u32,
    was_liked: bool,
}

#[derive(Debug)]
pub struct CourseListState {
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    courses: Vec<Course>,
    search_term: String,
    likes: HashMap<String, LikeState>,
    draft: CourseDraft,
    form_visible: bool,
    submitting: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCard {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub description: String,
    pub image: Option<String>,
    pub likes: u32,
    pub liked: bool,
    pub like_pending: bool,
    pub link: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListView {
    pub loading: bool,
    pub error: String,
    pub notice: String,
    pub search_term: String,
    pub courses: Vec<CourseCard>,
    pub form: Option<DraftView>,
}

impl CourseListState {
    pub fn new(ids: &dyn IdGenerator) -> Self {
        Self {
            loading: true,
            error: None,
            notice: None,
            courses: Vec::new(),
            search_term: String::new(),
            likes: HashMap::new(),
            draft: CourseDraft::new(ids.generate()),
            form_visible: false,
            submitting: false,
        }
    }

    pub fn apply_loaded(&mut self, result: Result<Vec<Course>, AppError>) {
        match result {
            Ok(courses) => {
                info!("Loaded {} courses", courses.len());
                self.courses = courses;
                self.error = None;
            }
            Err(e) => {
                error!("Error fetching courses: {}", e);
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

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Courses matching the current search term, in backend order.
    pub fn visible(&self) -> Vec<&Course> {
        filter(&self.courses, &self.search_term, LIST_SEARCH_FIELDS)
    }

    pub fn like_state(&self, id: &str) -> LikeState {
        self.likes.get(id).copied().unwrap_or_default()
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.like_state(id).is_liked()
    }

    /// Starts a like toggle. Nothing visible changes until `finish_like`
    /// confirms it; a toggle already in flight for the course is refused.
    pub fn begin_like(&mut self, id: &str) -> Result<LikeRequest, AppError> {
        let course = self
            .courses
            .iter()
            .find(|course| course.key() == id)
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))?;

        let state = self.like_state(id);
        if state.is_pending() {
            return Err(AppError::Conflict(format!("Like for course {} is already in flight", id)));
        }

        let was_liked = state.is_liked();
        let current = course.likes();
        let new_likes = if was_liked {
            current.saturating_sub(1)
        } else {
            current + 1
        };

        debug!("Like toggle on {}: {} -> {}", id, current, new_likes);
        self.notice = None;
        self.likes.insert(id.to_string(), LikeState::Liking { was_liked });

        Ok(LikeRequest {
            id: id.to_string(),
            new_likes,
            was_liked,
        })
    }

    pub fn finish_like(&mut self, request: LikeRequest, result: Result<(), AppError>) -> Result<(), AppError> {
        match result {
            Ok(()) => {
                if let Some(course) = self.courses.iter_mut().find(|course| course.key() == request.id) {
                    course.likes = Some(request.new_likes);
                }
                let next = if request.was_liked {
                    LikeState::Unliked
                } else {
                    LikeState::Liked
                };
                self.likes.insert(request.id, next);
                Ok(())
            }
            Err(e) => {
                error!("Error updating likes for {}: {}", request.id, e);
                self.likes.insert(
                    request.id,
                    LikeState::LikeFailed {
                        was_liked: request.was_liked,
                    },
                );
                self.notice = Some(LIKE_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    /// Shows the creation form. Opening gives the draft a fresh identifier;
    /// values already typed are kept.
    pub fn open_form(&mut self, ids: &dyn IdGenerator) {
        if !self.form_visible {
            self.draft.reassign_id(ids.generate());
            self.form_visible = true;
        }
    }

    pub fn close_form(&mut self) {
        self.form_visible = false;
    }

    pub fn edit_draft(&mut self, field: DraftField, value: impl Into<String>) -> Result<(), AppError> {
        self.ensure_editable()?;
        self.draft.set_field(field, value);
        Ok(())
    }

    pub fn edit_syllabus_topic(&mut self, index: usize, topic: impl Into<String>) -> Result<(), AppError> {
        self.ensure_editable()?;
        self.draft.set_syllabus_topic(index, topic)
    }

    fn ensure_editable(&self) -> Result<(), AppError> {
        if !self.form_visible {
            return Err(AppError::Conflict("Course form is not open".to_string()));
        }
        if self.submitting {
            return Err(AppError::Conflict("Course is being submitted".to_string()));
        }
        Ok(())
    }

    /// Validates the draft and returns the record to create, under an
    /// identifier different from the draft's.
    pub fn begin_create(&mut self, ids: &dyn IdGenerator) -> Result<Course, AppError> {
        self.ensure_editable()?;
        self.draft.validate()?;

        let mut id = ids.generate();
        if id == self.draft.id() {
            id = ids.generate();
        }
        if id == self.draft.id() {
            return Err(AppError::Conflict("Identifier generator repeated itself".to_string()));
        }

        self.notice = None;
        self.submitting = true;
        Ok(self.draft.to_submission(id))
    }

    /// On success appends the record under the key the store assigned, as both
    /// its key and `_id`, and resets the form. On failure the list and the
    /// draft stay as they were.
    pub fn finish_create(
        &mut self,
        mut submitted: Course,
        result: Result<String, AppError>,
        ids: &dyn IdGenerator,
    ) -> Result<(), AppError> {
        self.submitting = false;
        match result {
            Ok(assigned) => {
                info!("Course {} created as {}", submitted.id, assigned);
                submitted.id = assigned.clone();
                submitted.set_key(assigned);
                self.courses.push(submitted);
                self.draft = CourseDraft::new(ids.generate());
                self.form_visible = false;
                Ok(())
            }
            Err(e) => {
                error!("Error adding course: {}", e);
                self.notice = Some(CREATE_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn render(&self) -> CourseListView {
        let courses = self
            .visible()
            .into_iter()
            .map(|course| {
                let state = self.like_state(course.key());
                CourseCard {
                    id: course.key().to_string(),
                    title: course.title.clone(),
                    instructor: course.instructor.clone(),
                    description: course.description.clone(),
                    image: course.image.clone(),
                    likes: course.likes(),
                    liked: state.is_liked(),
                    like_pending: state.is_pending(),
                    link: format!("/courses/{}", course.key()),
                }
            })
            .collect();

        CourseListView {
            loading: self.loading,
            error: self.error.clone().unwrap_or_default(),
            notice: self.notice.clone().unwrap_or_default(),
            search_term: self.search_term.clone(),
            courses,
            form: self.form_visible.then(|| DraftView {
                record: self.draft.record().clone(),
                submitting: self.submitting,
            }),
        }
    }
}
