/*!
 * Tests for document classification and serialization
 */

use l10nmate::document::Document;

#[test]
fn test_parse_withObject_shouldBeStructuredInSourceOrder() {
    let doc = Document::parse(r#"{"zeta": "Z", "alpha": "A", "mid": {"b": "1", "a": "2"}}"#);

    let entries = doc.entries().expect("object should be structured");
    let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_parse_withNonObjectJson_shouldBeUnstructured() {
    for raw in ["[1, 2, 3]", "\"just a string\"", "42", "key=value", ""] {
        let doc = Document::parse(raw);
        assert_eq!(doc, Document::Unstructured(raw.to_string()), "input: {:?}", raw);
    }
}

#[test]
fn test_serialize_shouldUseFourSpacesAndKeepUnicode() {
    let doc = Document::parse(r#"{"greeting":"Grüß Gott","nested":{"emoji":"✓"}}"#);

    let text = doc.serialize().unwrap();

    let expected = "{\n    \"greeting\": \"Grüß Gott\",\n    \"nested\": {\n        \"emoji\": \"✓\"\n    }\n}";
    assert_eq!(text, expected);
}

#[test]
fn test_serialize_withUnstructured_shouldReturnTextVerbatim() {
    let raw = "line one\r\nline two\n\n";
    assert_eq!(Document::parse(raw).serialize().unwrap(), raw);
}
