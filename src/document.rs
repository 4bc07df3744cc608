/*!
 * Localization document model.
 *
 * A source file is either a structured key/value resource (a JSON object whose
 * key order is significant) or an opaque block of text. Classification never
 * fails: anything that is not a JSON object is unstructured.
 */

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

/// Ordered key/value mapping backing a structured document
pub type Entries = Map<String, Value>;

/// A parsed localization file
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Ordered key/value content (nested objects and arrays allowed)
    Structured(Entries),
    /// Raw text kept verbatim
    Unstructured(String),
}

impl Document {
    /// Classify raw file content.
    ///
    /// Malformed JSON, or JSON whose top level is not an object, yields
    /// `Document::Unstructured` wrapping the input unchanged.
    pub fn parse(raw: &str) -> Self {
        match try_parse_entries(raw) {
            Some(entries) => Document::Structured(entries),
            None => Document::Unstructured(raw.to_string()),
        }
    }

    /// Render the document back to file content.
    ///
    /// Structured documents use 4-space indentation, keep key order and
    /// write non-ASCII characters as-is. Unstructured text is returned unchanged.
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        match self {
            Document::Structured(entries) => serialize_entries(entries),
            Document::Unstructured(text) => Ok(text.clone()),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Document::Structured(_))
    }

    /// Structured entries, if any
    pub fn entries(&self) -> Option<&Entries> {
        match self {
            Document::Structured(entries) => Some(entries),
            Document::Unstructured(_) => None,
        }
    }
}

/// Parse raw text as a JSON object, returning `None` for anything else
pub fn try_parse_entries(raw: &str) -> Option<Entries> {
    parse_entries(raw).ok()
}

/// Parse raw text as a JSON object, describing why it is not one
pub fn parse_entries(raw: &str) -> Result<Entries, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(entries)) => Ok(entries),
        Ok(_) => Err("top-level value is not an object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Pretty-print entries the way localization files are stored on disk
pub fn serialize_entries(entries: &Entries) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    entries.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
