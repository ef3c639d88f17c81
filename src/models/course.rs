use serde::{Deserialize, Serialize};

use crate::catalog::{SearchField, Searchable};
use crate::models::{Record, blank_as_none};
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(skip)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub enrollment_status: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        rename = "Prerequisites",
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub prerequisites: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub syllabus: Vec<SyllabusEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
}

impl Course {
    pub fn likes(&self) -> u32 {
        self.likes.unwrap_or(0)
    }
}

/// One week of a course syllabus. `expanded` is view state and never
/// crosses the wire in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusEntry {
    pub week: u32,
    #[serde(default)]
    pub topic: String,
    #[serde(skip)]
    pub expanded: bool,
}

impl SyllabusEntry {
    pub fn new(week: u32, topic: impl Into<String>) -> Self {
        Self { week, topic: topic.into(), expanded: false }
    }
}

/// Partial course sent with PATCH.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursePatch {
    pub likes: u32,
}

impl Record for Course {
    const COLLECTION: Collection = Collection::Courses;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn key(&self) -> &str {
        if self.key.is_empty() { &self.id } else { &self.key }
    }

    fn set_key(&mut self, key: String) {
        self.key = key;
    }
}

impl Searchable for Course {
    fn search_field(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Title => Some(&self.title),
            SearchField::Instructor => Some(&self.instructor),
            SearchField::Description => Some(&self.description),
        }
    }
}
