use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{SearchField, Searchable};
use crate::models::{Record, blank_as_none};
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
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
    pub access: Option<String>,
    #[serde(
        default,
        deserialize_with = "clamped_progress",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress: Option<f64>,
}

fn clamped_progress<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|p| p.is_finite()).map(|p| p.clamp(0.0, 100.0)))
}

impl Record for EnrolledCourse {
    const COLLECTION: Collection = Collection::EnrolledCourses;

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

impl Searchable for EnrolledCourse {
    fn search_field(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Title => Some(&self.title),
            SearchField::Instructor => Some(&self.instructor),
            SearchField::Description => Some(&self.description),
        }
    }
}
