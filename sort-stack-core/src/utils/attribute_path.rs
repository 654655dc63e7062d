//! Dotted-path reader over JSON trees.

use serde_json::Value;

/// Resolves a dotted path such as `attributes.battery.level` against `root`.
///
/// Empty segments are ignored, so `"a..b"` and `".a.b."` both read `a.b`. Array
/// elements are reachable through numeric segments (`"forecast.0.temperature"`).
/// Returns `None` as soon as a segment is missing, a scalar is descended into, or a
/// `null` is met; an empty path resolves to nothing.
pub fn read_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.').filter(|s| !s.is_empty()).peekable();
    segments.peek()?;

    segments.try_fold(root, |current, segment| {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }?;
        (!next.is_null()).then_some(next)
    })
}
