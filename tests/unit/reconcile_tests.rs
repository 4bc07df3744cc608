/*!
 * Tests for the reconciliation engine through the public API
 */

use std::sync::Arc;

use l10nmate::document::Document;
use l10nmate::errors::ReconcileError;
use l10nmate::providers::mock::MockProvider;
use l10nmate::translation::{
    KeyFilter, ReconcileOptions, ReconcilePath, ReconcileRequest, Reconciler, TranslationOptions,
    TranslationService, TRANSLATION_ERROR_SENTINEL,
};

use crate::common::{keys_of, translating_provider};

fn reconciler(provider: &MockProvider, options: ReconcileOptions) -> Reconciler {
    let service = TranslationService::new(
        Arc::new(provider.clone()),
        TranslationOptions {
            model: "mock".to_string(),
            temperature: 0.0,
            json_mode: true,
            instructions: String::new(),
        },
    );
    Reconciler::new(service, options)
}

fn request<'a>(source: &'a Document, existing: Option<&'a str>) -> ReconcileRequest<'a> {
    ReconcileRequest {
        source,
        existing_target: existing,
        source_language: "en",
        target_language: "fr",
    }
}

fn as_json(document: &Document) -> serde_json::Value {
    serde_json::from_str(&document.serialize().unwrap()).unwrap()
}

#[tokio::test]
async fn test_reconcile_withPagination_shouldSendOrderedBatches() {
    let provider = translating_provider();
    let options = ReconcileOptions { max_items_per_batch: 2, ..Default::default() };
    let source = Document::parse(r#"{"a": "1", "b": "2", "c": "3", "d": "4", "e": "5"}"#);

    let outcome = reconciler(&provider, options).reconcile(request(&source, None)).await.unwrap();

    assert_eq!(outcome.provider_calls, 3);
    let payloads: Vec<Vec<String>> = provider
        .requests()
        .iter()
        .map(|r| keys_of(&serde_json::from_str(&r.user).unwrap()))
        .collect();
    assert_eq!(payloads, vec![vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
    assert_eq!(keys_of(&as_json(&outcome.document)), vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_reconcile_withSecondBatchFailing_shouldIsolateFailure() {
    let provider = MockProvider::fail_on_call(2).with_responder(crate::common::translate_payload);
    let options = ReconcileOptions { max_items_per_batch: 2, ..Default::default() };
    let source = Document::parse(r#"{"a": "1", "b": "2", "c": "3", "d": "4"}"#);

    let outcome = reconciler(&provider, options).reconcile(request(&source, None)).await.unwrap();

    let json = as_json(&outcome.document);
    assert_eq!(json["a"], "T:1");
    assert_eq!(json["b"], "T:2");
    assert_eq!(json["c"], TRANSLATION_ERROR_SENTINEL);
    assert_eq!(json["d"], TRANSLATION_ERROR_SENTINEL);
    assert_eq!(outcome.failed_batches, 1);
}

#[tokio::test]
async fn test_reconcile_withExistingTarget_shouldOnlySendMissingKeys() {
    let provider = translating_provider();
    let options = ReconcileOptions { update_existing: true, ..Default::default() };
    let source = Document::parse(r#"{"title": "Hello", "body": "World", "footer": "Bye"}"#);
    let existing = r#"{"footer": "Au revoir", "title": "Bonjour", "stale": "x", "body": "  "}"#;

    let outcome = reconciler(&provider, options)
        .reconcile(request(&source, Some(existing)))
        .await
        .unwrap();

    assert_eq!(outcome.path, ReconcilePath::ExistingTargetValid);
    assert_eq!(provider.call_count(), 1);
    assert_eq!(keys_of(&serde_json::from_str(&provider.requests()[0].user).unwrap()), vec!["body"]);

    let json = as_json(&outcome.document);
    assert_eq!(keys_of(&json), vec!["title", "body", "footer"]);
    assert_eq!(json["title"], "Bonjour");
    assert_eq!(json["body"], "T:World");
    assert_eq!(json["footer"], "Au revoir");
}

#[tokio::test]
async fn test_reconcile_withFilterAndMerge_shouldKeepUnmatchedSourceValues() {
    let provider = translating_provider();
    let options = ReconcileOptions {
        key_filter: Some(KeyFilter::new("btn_").unwrap()),
        merge_into_structure: true,
        ..Default::default()
    };
    let source = Document::parse(r#"{"title": "Home", "btn_ok": "OK", "btn_cancel": "Cancel"}"#);

    let outcome = reconciler(&provider, options).reconcile(request(&source, None)).await.unwrap();

    let json = as_json(&outcome.document);
    assert_eq!(keys_of(&json), vec!["title", "btn_ok", "btn_cancel"]);
    assert_eq!(json["title"], "Home");
    assert_eq!(json["btn_ok"], "T:OK");
    assert_eq!(json["btn_cancel"], "T:Cancel");
}

#[tokio::test]
async fn test_reconcile_withNonObjectAnswer_shouldReportMalformedResponse() {
    let provider = MockProvider::fixed("Désolé, je ne peux pas");
    let source = Document::parse(r#"{"a": "1"}"#);

    let result = reconciler(&provider, ReconcileOptions::default())
        .reconcile(request(&source, None))
        .await;

    assert!(matches!(result, Err(ReconcileError::MalformedResponse { batch: 1, .. })));
}
