/*!
 * Key-based projection of structured documents.
 */

use regex::Regex;
use serde_json::Value;

use crate::document::Entries;

/// Keeps only the entries whose key names match a pattern.
///
/// A matching key is kept with its whole subtree. A non-matching key is kept
/// only if filtering its nested object or array leaves something behind.
/// The filter never adds or reorders keys.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    regex: Regex,
}

impl KeyFilter {
    /// Compile a filter. The pattern is anchored at the start of the key name.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Filter a document's top-level entries; `None` when nothing matched
    pub fn apply(&self, entries: &Entries) -> Option<Entries> {
        let filtered = self.filter_object(entries);
        if filtered.is_empty() { None } else { Some(filtered) }
    }

    fn filter_object(&self, entries: &Entries) -> Entries {
        let mut kept = Entries::new();
        for (key, value) in entries {
            if self.matches(key) {
                kept.insert(key.clone(), value.clone());
            } else if let Some(nested) = self.filter_value(value) {
                kept.insert(key.clone(), nested);
            }
        }
        kept
    }

    fn filter_value(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Object(entries) => {
                let kept = self.filter_object(entries);
                (!kept.is_empty()).then_some(Value::Object(kept))
            }
            Value::Array(items) => {
                let kept: Vec<Value> = items
                    .iter()
                    .filter_map(|item| self.filter_value(item))
                    .collect();
                (!kept.is_empty()).then_some(Value::Array(kept))
            }
            // Scalars carry no keys of their own
            _ => None,
        }
    }
}
