/*!
 * Translation of localization documents using AI providers.
 *
 * This module contains the reconciliation engine and its building blocks:
 *
 * - `core`: Translation service wrapping a provider, prompt construction
 * - `batch`: Order-preserving pagination of key sets
 * - `filter`: Key-pattern projection of structured documents
 * - `merge`: Pure structural merge and reordering helpers
 * - `engine`: Reconciliation of a source document against an existing target
 */

// Re-export main types for easier usage
pub use self::batch::BatchPlanner;
pub use self::core::{TranslationOptions, TranslationService, TRANSLATION_ERROR_SENTINEL};
pub use self::engine::{ReconcileOptions, ReconcileOutcome, ReconcilePath, ReconcileRequest, Reconciler};
pub use self::filter::KeyFilter;

// Submodules
pub mod batch;
pub mod core;
pub mod engine;
pub mod filter;
pub mod merge;
