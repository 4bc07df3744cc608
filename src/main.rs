// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use l10nmate::app_config::{self, Config, optional_setting, parse_flag, split_list};
use l10nmate::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for l10nmate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// L10nMate - localization files translated with AI
///
/// Watches an input folder and translates every accepted file into the
/// configured target languages. JSON resource files are reconciled key by key
/// so existing translations are kept and only missing entries are sent out.
#[derive(Parser, Debug)]
#[command(name = "l10nmate")]
#[command(version)]
#[command(about = "AI-powered localization file translator")]
#[command(long_about = "L10nMate translates localization files (JSON/ARB resources or plain text) with an \
OpenAI-compatible chat completion API.

Every option can also be set through the environment variable shown in its help.
Values from --config are applied first, then environment variables and flags.

EXAMPLES:
    l10nmate                                        # Watch ./input_files, write ./output_files
    l10nmate --target-language es,it                # Translate into Spanish and Italian
    l10nmate --update-existing true                 # Only fill keys missing from existing targets
    l10nmate --continuous-monitoring false          # Process the folder once and exit
    l10nmate --config l10nmate.json                 # Load settings from a JSON file
    l10nmate completions bash > l10nmate.bash       # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file applied before flags and environment
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder scanned for source files
    #[arg(long, env = "INPUT_FOLDER")]
    input_folder: Option<PathBuf>,

    /// Folder receiving translated files
    #[arg(long, env = "OUTPUT_FOLDER")]
    output_folder: Option<PathBuf>,

    /// API key of the translation endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model name to use for translation
    #[arg(short, long, env = "OPENAI_MODEL")]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_ENDPOINT")]
    endpoint: Option<String>,

    /// Source language code, `null` to infer it from each file name
    #[arg(short, long, env = "SOURCE_LANGUAGE")]
    source_language: Option<String>,

    /// Comma-separated target language codes (e.g. 'fr,de')
    #[arg(short, long, env = "TARGET_LANGUAGE")]
    target_language: Option<String>,

    /// Comma-separated file extensions to process (without dot)
    #[arg(long, env = "ACCEPTED_EXTENSIONS")]
    accepted_extensions: Option<String>,

    /// Delete each input file after translating it (true/false)
    #[arg(long, env = "DELETE_INPUT")]
    delete_input: Option<String>,

    /// Keep watching the input folder (true/false)
    #[arg(long, env = "CONTINUOUS_MONITORING")]
    continuous_monitoring: Option<String>,

    /// Overwrite output files that already exist (true/false)
    #[arg(long, env = "OVERWRITE_EXISTING")]
    overwrite_existing: Option<String>,

    /// Only process this file from the input folder
    #[arg(long, env = "SOURCE_FILE")]
    source_file: Option<String>,

    /// Translate only keys missing from existing JSON targets (true/false)
    #[arg(long, env = "UPDATE_EXISTING_JSON")]
    update_existing: Option<String>,

    /// Ask the provider for a JSON object response (true/false)
    #[arg(long, env = "JSON_MODE")]
    json_mode: Option<String>,

    /// Write results over the source file itself (true/false)
    #[arg(long, env = "UPDATE_SOURCE")]
    update_source: Option<String>,

    /// Merge filtered translations back into the source structure (true/false)
    #[arg(long, env = "MERGE_INTO_STRUCTURE")]
    merge_into_structure: Option<String>,

    /// Regex selecting the keys to translate, `null` to disable
    #[arg(long, env = "KEYS_FILTER_REGEX")]
    keys_filter: Option<String>,

    /// Maximum keys per request, 0 disables pagination
    #[arg(long, env = "MAX_ITEMS_PER_REQUEST", allow_negative_numbers = true)]
    max_items_per_request: Option<i64>,

    /// Extra instructions appended to the translation prompt
    #[arg(long, env = "INSTRUCTIONS")]
    instructions: Option<String>,

    /// Sampling temperature
    #[arg(long, env = "TEMPERATURE")]
    temperature: Option<f32>,

    /// Seconds between scans in continuous monitoring mode
    #[arg(long, env = "POLL_INTERVAL_SECS")]
    poll_interval_secs: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Set logging level
    #[arg(short, long, value_enum, env = "LOG_LEVEL", ignore_case = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at trace so the configured level can be applied after loading
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "l10nmate", &mut std::io::stdout());
        return Ok(());
    }

    let config = build_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;

    info!(
        "Translating {:?} -> {:?} into {}",
        config.input_folder,
        if config.update_source { &config.input_folder } else { &config.output_folder },
        config.target_languages.join(", ")
    );

    let controller = Controller::with_config(config)?;
    controller.run().await
}

/// Load the optional config file, then apply flags and environment variables
fn build_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open config file: {:?}", path))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).with_context(|| format!("Failed to parse config file: {:?}", path))
}

fn apply_overrides(config: &mut Config, cli: &CommandLineOptions) {
    if let Some(folder) = &cli.input_folder {
        config.input_folder = folder.clone();
    }
    if let Some(folder) = &cli.output_folder {
        config.output_folder = folder.clone();
    }
    if let Some(key) = &cli.api_key {
        config.provider.api_key = key.trim().to_string();
    }
    if let Some(model) = &cli.model {
        config.provider.model = model.trim().to_string();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.provider.endpoint = endpoint.trim().trim_end_matches('/').to_string();
    }
    if let Some(language) = &cli.source_language {
        config.source_language = optional_setting(language);
    }
    if let Some(languages) = &cli.target_language {
        config.target_languages = split_list(languages);
    }
    if let Some(extensions) = &cli.accepted_extensions {
        config.accepted_extensions = split_list(extensions);
    }
    if let Some(file) = &cli.source_file {
        config.source_file = optional_setting(file);
    }
    if let Some(pattern) = &cli.keys_filter {
        config.key_filter = optional_setting(pattern);
    }
    if let Some(max_items) = cli.max_items_per_request {
        config.max_items_per_request = usize::try_from(max_items).unwrap_or(0);
    }
    if let Some(instructions) = &cli.instructions {
        config.provider.instructions = instructions.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.provider.temperature = temperature;
    }
    if let Some(secs) = cli.poll_interval_secs {
        config.poll_interval_secs = secs;
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.provider.timeout_secs = secs;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    let flags: [(&Option<String>, &mut bool); 7] = [
        (&cli.delete_input, &mut config.delete_input),
        (&cli.continuous_monitoring, &mut config.continuous_monitoring),
        (&cli.overwrite_existing, &mut config.overwrite_existing),
        (&cli.update_existing, &mut config.update_existing),
        (&cli.json_mode, &mut config.provider.json_mode),
        (&cli.update_source, &mut config.update_source),
        (&cli.merge_into_structure, &mut config.merge_into_structure),
    ];
    for (value, flag) in flags {
        if let Some(value) = value {
            *flag = parse_flag(value);
        }
    }
}
