use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::document::Document;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::openai::OpenAI;
use crate::translation::{
    ReconcileOptions, ReconcileRequest, Reconciler, TranslationOptions, TranslationService,
};

// @module: Application controller watching the input folder

/// Counters collected during one scan of the input folder
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Accepted files that were picked up
    pub files_processed: usize,
    /// File/target-language pairs written to disk
    pub units_written: usize,
    /// Pairs left alone (existing output, unknown source language)
    pub units_skipped: usize,
    /// Pairs that failed and produced no output
    pub units_failed: usize,
    /// Files whose post-processing failed (e.g. input deletion)
    pub files_failed: usize,
}

/// What happened to a single file/target-language pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Written(PathBuf),
    Skipped,
}

/// Main application controller: the folder orchestrator
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Reconciliation engine shared by every file
    reconciler: Reconciler,
}

impl Controller {
    // @method: Create a controller talking to the configured OpenAI-compatible endpoint
    pub fn with_config(config: Config) -> Result<Self> {
        let provider = OpenAI::new(
            config.provider.api_key.clone(),
            config.provider.endpoint.clone(),
            config.provider.timeout_secs,
        );
        Self::with_provider(config, Arc::new(provider))
    }

    // @method: Create a controller with an explicit provider (mock or real)
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Result<Self> {
        let options = ReconcileOptions::from_config(&config).context("Invalid key filter regex")?;
        let service = TranslationService::new(provider, TranslationOptions::from(&config.provider));
        Ok(Self {
            reconciler: Reconciler::new(service, options),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan the input folder once, or forever in continuous monitoring mode
    pub async fn run(&self) -> Result<()> {
        FileManager::ensure_dir(&self.config.input_folder)?;
        if !self.config.update_source {
            FileManager::ensure_dir(&self.config.output_folder)?;
        }

        info!("Monitoring the input folder: {:?}", self.config.input_folder);

        loop {
            let start_time = Instant::now();
            let report = self.scan_once().await?;
            if report.files_processed > 0 {
                info!(
                    "Scan finished in {:?}: {} file(s), {} written, {} skipped, {} failed, {} file error(s)",
                    start_time.elapsed(),
                    report.files_processed,
                    report.units_written,
                    report.units_skipped,
                    report.units_failed,
                    report.files_failed
                );
            }

            if !self.config.continuous_monitoring {
                info!("Continuous monitoring is disabled. Stopping.");
                return Ok(());
            }

            tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
        }
    }

    /// Process every accepted file currently in the input folder, one at a time
    pub async fn scan_once(&self) -> Result<ScanReport> {
        let files = FileManager::find_accepted_files(
            &self.config.input_folder,
            &self.config.accepted_extensions,
            self.config.source_file.as_deref(),
        )?;
        debug!("Files to process: {:?}", files);

        let mut report = ScanReport::default();
        for file in files {
            if let Err(e) = self.process_file(&file, &mut report).await {
                error!("Error processing file {:?}: {:#}", file, e);
                report.files_failed += 1;
            }
        }
        Ok(report)
    }

    async fn process_file(&self, path: &Path, report: &mut ScanReport) -> Result<()> {
        info!("Processing file: {:?}", path);
        report.files_processed += 1;

        let source_language = match self.resolve_source_language(path) {
            Some(language) => language,
            None => {
                warn!("Cannot infer the source language of {:?} (expected name_<lang>.ext), skipping", path);
                report.units_skipped += self.config.target_languages.len();
                return Ok(());
            }
        };

        let mut failures = 0;
        for target_language in &self.config.target_languages {
            info!(
                "Translating {:?} from {} to {}",
                path,
                language_utils::describe(&source_language),
                language_utils::describe(target_language)
            );
            match self.process_unit(path, &source_language, target_language).await {
                Ok(UnitOutcome::Written(output)) => {
                    info!("File saved to: {:?}", output);
                    report.units_written += 1;
                }
                Ok(UnitOutcome::Skipped) => report.units_skipped += 1,
                Err(e) => {
                    error!("Failed to translate {:?} to {}: {}", path, target_language, e);
                    report.units_failed += 1;
                    failures += 1;
                }
            }
        }

        if self.config.delete_input && !self.config.update_source {
            if failures == 0 {
                FileManager::remove_file(path)?;
                info!("Input file deleted: {:?}", path);
            } else {
                warn!("Keeping input file {:?}: {} translation(s) failed", path, failures);
            }
        }

        Ok(())
    }

    fn resolve_source_language(&self, path: &Path) -> Option<String> {
        self.config
            .source_language
            .clone()
            .or_else(|| language_utils::language_from_filename(path))
    }

    /// Reconcile one file for one target language and write the result
    pub async fn process_unit(
        &self,
        path: &Path,
        source_language: &str,
        target_language: &str,
    ) -> Result<UnitOutcome, AppError> {
        let source_raw = FileManager::read_to_string(path)?;
        let source = Document::parse(&source_raw);
        if !source.is_structured() {
            debug!("File {:?} is not valid JSON, translating it as plain text", path);
        }

        let (output_path, existing) = if self.config.update_source {
            // The source itself is the target being updated
            (path.to_path_buf(), Some(source_raw.clone()))
        } else {
            let output_path = FileManager::generate_output_path(
                path,
                &self.config.output_folder,
                target_language,
            );
            let existing = FileManager::read_if_exists(&output_path)?;
            (output_path, existing)
        };

        if !self.config.update_source
            && existing.is_some()
            && !self.config.overwrite_existing
            && !self.config.update_existing
        {
            warn!("Skipping {:?}, output already exists (enable overwrite to replace it)", output_path);
            return Ok(UnitOutcome::Skipped);
        }

        let outcome = self
            .reconciler
            .reconcile(ReconcileRequest {
                source: &source,
                existing_target: existing.as_deref(),
                source_language,
                target_language,
            })
            .await?;

        debug!(
            "{} path: {} key(s) translated, {} carried over, {} call(s), {} failed",
            outcome.path,
            outcome.translated_keys.len(),
            outcome.carried_keys.len(),
            outcome.provider_calls,
            outcome.failed_batches
        );
        if outcome.failed_batches > 0 {
            warn!(
                "{} provider call(s) failed for {:?}; affected content is marked in the output",
                outcome.failed_batches, output_path
            );
        }

        let rendered = outcome.render()?;
        if self.config.update_source {
            FileManager::replace_atomically(&output_path, &rendered)?;
            info!("Original source file updated: {:?}", output_path);
        } else {
            FileManager::write_to_file(&output_path, &rendered)?;
        }

        Ok(UnitOutcome::Written(output_path))
    }
}
