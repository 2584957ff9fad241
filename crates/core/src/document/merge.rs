use serde_json::Value;

use super::model::Fields;

/// Apply a field-level merge write: nested maps merge recursively, any other
/// value in `patch` replaces the stored one. Keys absent from `patch` are kept.
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, incoming) in patch {
        match (target.get_mut(&key), incoming) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_fields(existing, nested);
            }
            (_, incoming) => {
                target.insert(key, incoming);
            }
        }
    }
}
