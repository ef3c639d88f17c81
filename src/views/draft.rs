use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;
use crate::models::{Course, SyllabusEntry};

pub const SYLLABUS_WEEKS: u32 = 3;

/// A form field of the new-course draft, named as the store names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Instructor,
    Description,
    Image,
    EnrollmentStatus,
    Duration,
    Schedule,
    Location,
    Prerequisites,
}

impl FromStr for DraftField {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "title" => Ok(DraftField::Title),
            "instructor" => Ok(DraftField::Instructor),
            "description" => Ok(DraftField::Description),
            "image" => Ok(DraftField::Image),
            "enrollmentStatus" => Ok(DraftField::EnrollmentStatus),
            "duration" => Ok(DraftField::Duration),
            "schedule" => Ok(DraftField::Schedule),
            "location" => Ok(DraftField::Location),
            "Prerequisites" => Ok(DraftField::Prerequisites),
            other => Err(AppError::BadRequest(format!("Unknown course field: {}", other))),
        }
    }
}

/// The not-yet-submitted course behind the creation form.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    record: Course,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    #[serde(flatten)]
    pub record: Course,
    pub submitting: bool,
}

impl CourseDraft {
    /// A blank draft with `SYLLABUS_WEEKS` empty weeks numbered from 1.
    pub fn new(id: String) -> Self {
        let syllabus = (1..=SYLLABUS_WEEKS)
            .map(|week| SyllabusEntry::new(week, ""))
            .collect();

        Self {
            record: Course {
                id,
                key: String::new(),
                title: String::new(),
                instructor: String::new(),
                description: String::new(),
                image: None,
                enrollment_status: None,
                duration: None,
                schedule: None,
                location: None,
                prerequisites: None,
                syllabus,
                likes: None,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn record(&self) -> &Course {
        &self.record
    }

    pub(crate) fn reassign_id(&mut self, id: String) {
        self.record.id = id;
    }

    /// Last write wins. Blank optional fields are left out of the record.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        let optional = (!value.trim().is_empty()).then(|| value.clone());

        match field {
            DraftField::Title => self.record.title = value,
            DraftField::Instructor => self.record.instructor = value,
            DraftField::Description => self.record.description = value,
            DraftField::Image => self.record.image = optional,
            DraftField::EnrollmentStatus => self.record.enrollment_status = optional,
            DraftField::Duration => self.record.duration = optional,
            DraftField::Schedule => self.record.schedule = optional,
            DraftField::Location => self.record.location = optional,
            DraftField::Prerequisites => self.record.prerequisites = optional,
        }
    }

    pub fn set_syllabus_topic(&mut self, index: usize, topic: impl Into<String>) -> Result<(), AppError> {
        let entry = self.record.syllabus.get_mut(index).ok_or_else(|| {
            AppError::BadRequest(format!("Syllabus has no week at position {}", index))
        })?;
        entry.topic = topic.into();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.record.title),
            ("instructor", &self.record.instructor),
            ("description", &self.record.description),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{} is required", name)));
            }
        }
        Ok(())
    }

    /// The record to send, carrying `id` instead of the draft's own.
    pub fn to_submission(&self, id: String) -> Course {
        let mut record = self.record.clone();
        record.id = id;
        record
    }
}
