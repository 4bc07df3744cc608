use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::errors::AppError;
use crate::translation::KeyFilter;

// Application configuration module
// This module handles the application configuration: defaults, sentinel
// handling and validation. The configuration is built once at start-up and
// passed by reference afterwards.

/// Value meaning "not set" for optional string settings
pub const NULL_SENTINEL: &str = "null";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Folder scanned for source files
    pub input_folder: PathBuf,

    /// Folder receiving translated files
    pub output_folder: PathBuf,

    /// Source language; `None` infers it from each filename
    pub source_language: Option<String>,

    /// Languages to translate into
    pub target_languages: Vec<String>,

    /// File extensions (without dot) that are processed
    pub accepted_extensions: Vec<String>,

    /// Remove each input file once all its translations are written
    pub delete_input: bool,

    /// Keep scanning the input folder until the process is stopped
    pub continuous_monitoring: bool,

    /// Overwrite output files that already exist
    pub overwrite_existing: bool,

    /// Only process this file name from the input folder
    pub source_file: Option<String>,

    /// Translate only missing or empty keys of an existing target
    pub update_existing: bool,

    /// Write the result over the source file itself
    pub update_source: bool,

    /// Merge translated content back into the source structure
    pub merge_into_structure: bool,

    /// Regex selecting keys to keep in fresh translations
    pub key_filter: Option<String>,

    /// Maximum keys per provider request; 0 disables pagination
    pub max_items_per_request: usize,

    /// Delay between scans in continuous monitoring mode
    pub poll_interval_secs: u64,

    /// Provider settings
    pub provider: ProviderSettings,

    /// Log level
    pub log_level: LogLevel,
}

/// Settings of the OpenAI-compatible text-generation provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderSettings {
    /// Model name
    pub model: String,

    /// API key
    pub api_key: String,

    /// API base URL
    pub endpoint: String,

    /// Temperature parameter for text generation
    pub temperature: f32,

    /// Request a JSON-constrained response
    pub json_mode: bool,

    /// Extra instructions appended to the system prompt
    pub instructions: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            json_mode: false,
            instructions: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_input_folder() -> PathBuf {
    PathBuf::from("input_files")
}

fn default_output_folder() -> PathBuf {
    PathBuf::from("output_files")
}

fn default_target_languages() -> Vec<String> {
    vec!["fr".to_string(), "de".to_string()]
}

fn default_accepted_extensions() -> Vec<String> {
    vec!["txt".to_string(), "properties".to_string(), "arb".to_string()]
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    120
}

/// Interpret an optional string setting, treating blanks and `null` as unset
pub fn optional_setting(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NULL_SENTINEL) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a boolean flag: `true` in any case is true, anything else false
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Split a comma-separated list, dropping blank items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.target_languages.is_empty() {
            return Err(AppError::Config("At least one target language is required".to_string()));
        }

        if self.accepted_extensions.is_empty() {
            return Err(AppError::Config("At least one accepted extension is required".to_string()));
        }

        if self.provider.model.trim().is_empty() {
            return Err(AppError::Config("A model name is required".to_string()));
        }

        if self.provider.api_key.trim().is_empty() {
            return Err(AppError::Config("Translation API key is required (OPENAI_API_KEY)".to_string()));
        }

        if let Some(pattern) = &self.key_filter {
            KeyFilter::new(pattern)
                .map_err(|e| AppError::Config(format!("Invalid key filter regex '{}': {}", pattern, e)))?;
        }

        // Unknown tags are allowed; providers understand more than ISO 639
        let languages = self.source_language.iter().chain(self.target_languages.iter());
        for code in languages {
            if crate::language_utils::get_language_name(code).is_err() {
                warn!("Language '{}' is not a known ISO 639 code, passing it through as-is", code);
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_folder: default_input_folder(),
            output_folder: default_output_folder(),
            source_language: None,
            target_languages: default_target_languages(),
            accepted_extensions: default_accepted_extensions(),
            delete_input: false,
            continuous_monitoring: true,
            overwrite_existing: false,
            source_file: None,
            update_existing: false,
            update_source: false,
            merge_into_structure: false,
            key_filter: None,
            max_items_per_request: 0,
            poll_interval_secs: default_poll_interval_secs(),
            provider: ProviderSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}
