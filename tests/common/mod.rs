/*!
 * Common test utilities for the l10nmate test suite
 */

use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use l10nmate::app_config::Config;
use l10nmate::app_controller::Controller;
use l10nmate::providers::CompletionRequest;
use l10nmate::providers::mock::MockProvider;

/// Prefix added by the translating mock to every string it translates
pub const TRANSLATED_PREFIX: &str = "T:";

/// Input and output folders of one test run
pub struct Workspace {
    pub root: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        let root = TempDir::new()?;
        let input = root.path().join("input");
        let output = root.path().join("output");
        fs::create_dir_all(&input)?;
        fs::create_dir_all(&output)?;
        Ok(Self { root, input, output })
    }

    /// Configuration for a single scan over this workspace
    pub fn config(&self, targets: &[&str]) -> Config {
        let mut config = Config::default();
        config.input_folder = self.input.clone();
        config.output_folder = self.output.clone();
        config.target_languages = targets.iter().map(|t| t.to_string()).collect();
        config.accepted_extensions = vec!["json".to_string(), "arb".to_string(), "txt".to_string()];
        config.continuous_monitoring = false;
        config.provider.api_key = "sk-test".to_string();
        config
    }
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Prefix every string of a JSON payload, or the whole text when it is not JSON
pub fn translate_payload(request: &CompletionRequest) -> String {
    match serde_json::from_str::<Value>(&request.user) {
        Ok(value @ Value::Object(_)) => prefix_strings(value).to_string(),
        _ => format!("{}{}", TRANSLATED_PREFIX, request.user),
    }
}

fn prefix_strings(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(format!("{}{}", TRANSLATED_PREFIX, text)),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, prefix_strings(v))).collect()),
        Value::Array(items) => Value::Array(items.into_iter().map(prefix_strings).collect()),
        other => other,
    }
}

/// Mock provider that "translates" by prefixing every string
pub fn translating_provider() -> MockProvider {
    MockProvider::echo().with_responder(translate_payload)
}

/// Controller wired to the given mock provider
pub fn controller(config: Config, provider: &MockProvider) -> Result<Controller> {
    Controller::with_provider(config, Arc::new(provider.clone()))
}

/// Parse a written JSON file
pub fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Top-level keys of a JSON object, in file order
pub fn keys_of(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}
