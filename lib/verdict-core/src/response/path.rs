//! Field-path navigation over parsed JSON bodies.
//!
//! A field path is a dot-separated address into a JSON tree: object keys are
//! matched by name and array elements by zero-based index. The empty path
//! (or a lone `.`) addresses the whole body.

use serde_json::Value;

use crate::error::AssertionError;

/// Resolves a field path against a JSON tree.
///
/// Returns a reference to the addressed node, or
/// [`AssertionError::FieldNotFound`] carrying the full attempted path when a
/// segment does not exist or the current node cannot be indexed.
pub(crate) fn resolve<'a>(body: &'a Value, path: &str) -> Result<&'a Value, AssertionError> {
    let mut current = body;
    for segment in segments(path) {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        };
        current = next.ok_or_else(|| AssertionError::FieldNotFound {
            path: path.to_string(),
        })?;
    }
    Ok(current)
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|segment| !segment.is_empty())
}
