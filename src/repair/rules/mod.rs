//! The individual rules and the file helpers they share.

pub mod bundler;
pub mod dependencies;
pub mod dywo_config;
pub mod ignore;
pub mod lint;
pub mod package;
pub mod readme;
pub mod sources;
pub mod structure;
pub mod transpiler;

use std::path::Path;

use serde_json::{Map, Value};

use crate::context::ServiceContext;

/// JSON object type with insertion order preserved.
pub type JsonObject = Map<String, Value>;

/// Reads `path` as a JSON object.
///
/// Returns `None` when the file is missing, unreadable, not valid JSON or
/// not an object; callers treat all of these as "absent".
#[must_use]
pub fn read_json_object(ctx: &ServiceContext, path: &Path) -> Option<JsonObject> {
    let text = ctx.fs.read_to_string(path).ok()?;
    match serde_json::from_str::<Value>(&text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Writes `object` to `path` pretty-printed with a trailing newline.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn write_json_object(
    ctx: &ServiceContext,
    path: &Path,
    object: &JsonObject,
) -> Result<(), String> {
    let mut text = serde_json::to_string_pretty(object)
        .map_err(|e| format!("Failed to serialize {}: {e}", path.display()))?;
    text.push('\n');
    ctx.fs
        .write(path, &text)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Follows a dotted path (`scripts.dev`) and returns the value if it is
/// present and not `null`.
#[must_use]
pub fn lookup<'a>(object: &'a JsonObject, dotted: &str) -> Option<&'a Value> {
    let mut parts = dotted.split('.');
    let mut current = object.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    (!current.is_null()).then_some(current)
}

/// Inserts each `(key, value)` from `defaults` that `target` lacks or holds
/// as `null`. Returns the keys that were filled.
pub fn fill_missing(target: &mut JsonObject, defaults: &JsonObject) -> Vec<String> {
    let mut filled = Vec::new();
    for (key, value) in defaults {
        if target.get(key).map_or(true, Value::is_null) {
            target.insert(key.clone(), value.clone());
            filled.push(key.clone());
        }
    }
    filled
}

/// Converts a `json!({...})` literal into an object.
pub(crate) fn object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}
