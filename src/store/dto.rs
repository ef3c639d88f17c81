use serde::Deserialize;
use serde_json::Value;

use crate::store::RawCollection;

/// Body returned by the store for a POST: the key it assigned.
#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    pub name: String,
}

/// Reads a container body. `null` means no records yet. The store renders
/// containers with small integer keys as arrays, so those are folded back
/// into a keyed map, skipping holes.
pub fn into_raw_collection(value: Value) -> Result<Option<RawCollection>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .enumerate()
                .filter(|(_, item)| !item.is_null())
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
        )),
        other => Err(format!("expected an object or null, got {}", other)),
    }
}
