pub mod course;
pub mod enrolled;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::Collection;

pub use course::{Course, CoursePatch, SyllabusEntry};
pub use enrolled::EnrolledCourse;

/// A record stored in one of the backend's flat collections.
///
/// `key` is where the store files the record and is what views link to and
/// patches address. It falls back to `_id` for records built outside a load.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn key(&self) -> &str;
    fn set_key(&mut self, key: String);
}

/// Reads an optional text field, treating `""` as absent.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}
