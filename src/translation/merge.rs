/*!
 * Structural merging of translated content.
 *
 * All functions here are pure: inputs are borrowed and a fresh mapping is
 * returned, so source and target documents never alias.
 */

use serde_json::Value;

use crate::document::Entries;

/// Merge `translated` into a copy of `original`.
///
/// Keys present in both as objects are merged recursively, keeping untouched
/// siblings from `original`. Any other translated value replaces the original
/// one; keys only in `translated` are appended.
pub fn merge_into_structure(original: &Entries, translated: &Entries) -> Entries {
    let mut merged = original.clone();
    for (key, value) in translated {
        let replacement = match (merged.get(key), value) {
            (Some(Value::Object(base)), Value::Object(update)) => {
                Value::Object(merge_into_structure(base, update))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), replacement);
    }
    merged
}

/// Rebuild `target` in the key order of `source`, dropping keys absent from `source`
pub fn reorganize(source: &Entries, target: &Entries) -> Entries {
    source
        .keys()
        .filter_map(|key| target.get(key).map(|value| (key.clone(), value.clone())))
        .collect()
}

/// Whether a target value still needs translating.
///
/// Only strings are inspected: nested objects and arrays count as present
/// as soon as their key exists.
pub fn needs_translation(target_value: Option<&Value>) -> bool {
    match target_value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

/// Entries of `source` whose counterpart in `target` is missing or blank
pub fn missing_entries(source: &Entries, target: &Entries) -> Entries {
    source
        .iter()
        .filter(|(key, _)| needs_translation(target.get(key.as_str())))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
