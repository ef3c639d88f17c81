use tracing::warn;

use crate::models::Record;
use crate::store::RawCollection;

/// Turns a fetched container into records, in the order the backend sent them.
///
/// A missing container is an empty list. Records that do not decode are
/// skipped. Every record remembers its container key, and one without its
/// own `_id` takes the key as `_id` too.
pub fn normalize<T: Record>(raw: Option<RawCollection>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        match serde_json::from_value::<T>(value) {
            Ok(mut record) => {
                if record.id().is_empty() {
                    record.set_id(key.clone());
                }
                record.set_key(key);
                records.push(record);
            }
            Err(e) => {
                warn!("Skipping malformed {} record {}: {}", T::COLLECTION, key, e);
            }
        }
    }
    records
}
