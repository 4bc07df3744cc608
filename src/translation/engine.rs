/*!
 * Translation-state reconciliation.
 *
 * Given a source document and an optional existing target, the reconciler
 * decides which entries need a provider call, issues those calls batch by
 * batch, and folds the answers back into a target document that follows the
 * source structure.
 */

use log::{debug, info, warn};
use serde_json::Value;
use std::fmt;

use crate::app_config::Config;
use crate::document::{parse_entries, try_parse_entries, Document, Entries};
use crate::errors::ReconcileError;

use super::batch::BatchPlanner;
use super::core::{TranslationService, TRANSLATION_ERROR_SENTINEL};
use super::filter::KeyFilter;
use super::merge::{merge_into_structure, missing_entries, reorganize};

/// Mode flags controlling a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Keep non-empty values of an existing target and translate only the gaps
    pub update_existing: bool,
    /// Maximum keys per provider call; 0 sends everything at once
    pub max_items_per_batch: usize,
    /// Keep only matching keys of a fresh translation
    pub key_filter: Option<KeyFilter>,
    /// Fold a fresh translation back into the source structure
    pub merge_into_structure: bool,
}

impl ReconcileOptions {
    /// Derive the pass options from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, regex::Error> {
        let key_filter = config
            .key_filter
            .as_deref()
            .map(KeyFilter::new)
            .transpose()?;
        Ok(Self {
            update_existing: config.update_existing,
            max_items_per_batch: config.max_items_per_request,
            key_filter,
            merge_into_structure: config.merge_into_structure,
        })
    }
}

/// Input of a single reconciliation pass
#[derive(Debug, Clone, Copy)]
pub struct ReconcileRequest<'a> {
    pub source: &'a Document,
    /// Raw content of the current target file, if one exists
    pub existing_target: Option<&'a str>,
    pub source_language: &'a str,
    pub target_language: &'a str,
}

/// Which branch a pass took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePath {
    /// Plain text, translated in one call
    Unstructured,
    /// No usable target: full translation
    NoExistingTarget,
    /// Existing structured target: only missing entries translated
    ExistingTargetValid,
    /// Existing target unreadable as structured content: full re-translation
    ExistingTargetInvalid,
}

impl fmt::Display for ReconcilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unstructured => "unstructured",
            Self::NoExistingTarget => "no existing target",
            Self::ExistingTargetValid => "existing target",
            Self::ExistingTargetInvalid => "invalid existing target",
        };
        write!(f, "{}", name)
    }
}

/// Result of a reconciliation pass
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The reconciled target document
    pub document: Document,
    pub path: ReconcilePath,
    /// Keys sent to the provider, in source order
    pub translated_keys: Vec<String>,
    /// Keys whose existing target value was kept
    pub carried_keys: Vec<String>,
    /// Number of provider calls issued
    pub provider_calls: usize,
    /// Number of calls that failed and were replaced by the error sentinel
    pub failed_batches: usize,
}

impl ReconcileOutcome {
    /// Serialize the reconciled document for writing
    pub fn render(&self) -> Result<String, ReconcileError> {
        Ok(self.document.serialize()?)
    }
}

/// Classified plan for a pass, carrying the parsed target when valid
enum Plan {
    Unstructured(String),
    Fresh(ReconcilePath),
    Update(Entries),
}

/// Translated entries of one or more batches
#[derive(Default)]
struct BatchResults {
    entries: Entries,
    calls: usize,
    failed: usize,
}

/// Reconciliation engine
#[derive(Debug, Clone)]
pub struct Reconciler {
    service: TranslationService,
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(service: TranslationService, options: ReconcileOptions) -> Self {
        Self { service, options }
    }

    /// Run one pass for a source document and a target language
    pub async fn reconcile(
        &self,
        request: ReconcileRequest<'_>,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        match self.classify(request) {
            Plan::Unstructured(text) => Ok(self.reconcile_text(&text, request).await),
            Plan::Fresh(path) => {
                let source = request.source.entries().cloned().unwrap_or_default();
                self.reconcile_fresh(&source, path, request).await
            }
            Plan::Update(target) => {
                let source = request.source.entries().cloned().unwrap_or_default();
                self.reconcile_existing(&source, target, request).await
            }
        }
    }

    fn classify(&self, request: ReconcileRequest<'_>) -> Plan {
        let plan = match request.source {
            Document::Unstructured(text) => Plan::Unstructured(text.clone()),
            Document::Structured(_) => match request.existing_target {
                Some(raw) if self.options.update_existing => match try_parse_entries(raw) {
                    Some(target) => Plan::Update(target),
                    None => {
                        warn!("Existing target is not valid JSON. Proceeding to translate all.");
                        Plan::Fresh(ReconcilePath::ExistingTargetInvalid)
                    }
                },
                _ => Plan::Fresh(ReconcilePath::NoExistingTarget),
            },
        };
        let path = match &plan {
            Plan::Unstructured(_) => ReconcilePath::Unstructured,
            Plan::Fresh(path) => *path,
            Plan::Update(_) => ReconcilePath::ExistingTargetValid,
        };
        debug!(
            "Reconciling {} -> {} via {} path",
            request.source_language, request.target_language, path
        );
        plan
    }

    async fn reconcile_text(&self, text: &str, request: ReconcileRequest<'_>) -> ReconcileOutcome {
        let result = self
            .service
            .translate(text, request.source_language, request.target_language)
            .await;
        let failed = usize::from(result.is_err());
        let translated = result.unwrap_or_else(|_| TRANSLATION_ERROR_SENTINEL.to_string());

        ReconcileOutcome {
            document: Document::Unstructured(translated),
            path: ReconcilePath::Unstructured,
            translated_keys: Vec::new(),
            carried_keys: Vec::new(),
            provider_calls: 1,
            failed_batches: failed,
        }
    }

    async fn reconcile_fresh(
        &self,
        source: &Entries,
        path: ReconcilePath,
        request: ReconcileRequest<'_>,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let results = self.translate_batches(source, request).await?;
        let mut translated = results.entries;

        if let Some(filter) = &self.options.key_filter {
            translated = filter.apply(&translated).unwrap_or_default();
            debug!("Key filter kept {} top-level entries", translated.len());
        }

        if self.options.merge_into_structure {
            translated = merge_into_structure(source, &translated);
        }

        Ok(ReconcileOutcome {
            document: Document::Structured(translated),
            path,
            translated_keys: source.keys().cloned().collect(),
            carried_keys: Vec::new(),
            provider_calls: results.calls,
            failed_batches: results.failed,
        })
    }

    async fn reconcile_existing(
        &self,
        source: &Entries,
        mut target: Entries,
        request: ReconcileRequest<'_>,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        debug!("Existing target content keys: {:?}", target.keys().collect::<Vec<_>>());

        let to_translate = missing_entries(source, &target);
        let translated_keys: Vec<String> = to_translate.keys().cloned().collect();
        let carried_keys: Vec<String> = source
            .keys()
            .filter(|key| !to_translate.contains_key(key.as_str()))
            .cloned()
            .collect();

        let (calls, failed) = if to_translate.is_empty() {
            info!("Target already up to date, no translation needed");
            (0, 0)
        } else {
            info!("Keys to translate: {:?}", translated_keys);
            let results = self.translate_batches(&to_translate, request).await?;
            for (key, value) in results.entries {
                target.insert(key, value);
            }
            (results.calls, results.failed)
        };

        Ok(ReconcileOutcome {
            document: Document::Structured(reorganize(source, &target)),
            path: ReconcilePath::ExistingTargetValid,
            translated_keys,
            carried_keys,
            provider_calls: calls,
            failed_batches: failed,
        })
    }

    /// Translate `entries` batch by batch, strictly in order.
    ///
    /// A failed call marks every key of its batch with the error sentinel;
    /// an answer that is not a JSON object aborts the pass.
    async fn translate_batches(
        &self,
        entries: &Entries,
        request: ReconcileRequest<'_>,
    ) -> Result<BatchResults, ReconcileError> {
        let planner = BatchPlanner::new(self.options.max_items_per_batch);
        let total = planner.batch_count(entries.len());
        let mut results = BatchResults::default();

        for (index, batch) in planner.plan(entries).enumerate() {
            let number = index + 1;
            debug!("Translating batch {} of {} ({} keys)", number, total, batch.len());
            let payload = serde_json::to_string(&batch)?;
            results.calls += 1;

            let answer = self
                .service
                .translate(&payload, request.source_language, request.target_language)
                .await;

            let (translated, call_failed) = match answer {
                Ok(text) => {
                    let entries = parse_entries(&text)
                        .map_err(|reason| ReconcileError::MalformedResponse { batch: number, reason })?;
                    (entries, false)
                }
                Err(e) => {
                    warn!("Batch {} of {} failed, marking its keys: {}", number, total, e);
                    results.failed += 1;
                    (Entries::new(), true)
                }
            };

            // Only keys that were sent are taken from the answer, in batch order
            for key in batch.keys() {
                let value = match translated.get(key.as_str()) {
                    Some(value) => value.clone(),
                    None => {
                        if !call_failed {
                            warn!("Provider dropped key '{}' in batch {}", key, number);
                        }
                        Value::String(TRANSLATION_ERROR_SENTINEL.to_string())
                    }
                };
                results.entries.insert(key.clone(), value);
            }
            let extra = translated.keys().filter(|key| !batch.contains_key(key.as_str())).count();
            if extra > 0 {
                warn!("Ignoring {} key(s) in batch {} that were not requested", extra, number);
            }
        }

        Ok(results)
    }
}
