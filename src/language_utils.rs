use anyhow::{Result, anyhow};
use isolang::Language;
use std::path::Path;

// Language utilities for language tag handling
//
// This module provides helpers for the language tags used in localization
// file names (`messages_en.json`, `app_pt-BR.arb`) and for turning ISO 639
// codes into readable names for log output.

/// Primary language subtag of a tag such as `pt-BR` or `zh_Hant`
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Get the English language name for an ISO 639-1 or ISO 639-3 code
///
/// Region or script suffixes are ignored (`pt-BR` resolves to Portuguese).
pub fn get_language_name(code: &str) -> Result<String> {
    let primary = primary_subtag(code);
    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Human-readable label for logs, e.g. `fr (French)`
pub fn describe(code: &str) -> String {
    match get_language_name(code) {
        Ok(name) => format!("{} ({})", code, name),
        Err(_) => code.to_string(),
    }
}

/// Infer the source language from a file name.
///
/// The tag is the part after the last `_` and before the first `.` that
/// follows it: `strings_en.json` gives `en`. Names without `_` carry no tag.
pub fn language_from_filename<P: AsRef<Path>>(path: P) -> Option<String> {
    let file_name = path.as_ref().file_name()?.to_string_lossy().to_string();
    let (_, suffix) = file_name.rsplit_once('_')?;
    let tag = suffix.split('.').next().unwrap_or_default();
    if tag.is_empty() { None } else { Some(tag.to_string()) }
}
