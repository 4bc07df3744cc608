/*!
 * # L10nMate - localization files translated with AI
 *
 * A Rust library for translating localization resources (JSON/ARB key-value
 * files and plain text) with an OpenAI-compatible chat completion API.
 *
 * ## Features
 *
 * - Watch an input folder and translate each file into several target languages
 * - Reconcile JSON resources against existing translations: only missing or
 *   empty keys are sent to the provider, existing values are kept verbatim
 * - Source key order preserved in every output
 * - Optional pagination of large documents into fixed-size key batches
 * - Optional key filtering with a regex, merged back into the source structure
 * - Per-batch failure isolation with a visible `Translation error` marker
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Folder orchestrator driving scans and writes
 * - `document`: Structured/unstructured document parsing and serialization
 * - `translation`: Reconciliation engine and its building blocks:
 *   - `translation::core`: Prompting and the failure sentinel policy
 *   - `translation::batch`: Order-preserving key pagination
 *   - `translation::filter`: Key-pattern projection
 *   - `translation::merge`: Structural merge and reordering
 *   - `translation::engine`: Source/target reconciliation
 * - `file_utils`: File system operations
 * - `language_utils`: Language tag utilities
 * - `providers`: Text-generation clients (OpenAI-compatible and a mock)
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ScanReport};
pub use document::Document;
pub use errors::{AppError, ProviderError, ReconcileError};
pub use translation::{Reconciler, TranslationService};
