/*!
 * End-to-end tests for folder scanning and output writing
 */

use anyhow::Result;
use std::fs;

use l10nmate::app_controller::ScanReport;
use l10nmate::providers::mock::MockProvider;

use crate::common::{self, Workspace, keys_of, read_json, translating_provider};

#[test]
fn test_scanOnce_withJsonSource_shouldWriteOneFilePerTarget() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "app_en.json", r#"{"hello": "Hello", "bye": "Goodbye"}"#)?;
    let provider = translating_provider();
    let controller = common::controller(ws.config(&["fr", "de"]), &provider)?;

    let report = tokio_test::block_on(controller.scan_once())?;

    assert_eq!(
        report,
        ScanReport {
            files_processed: 1,
            units_written: 2,
            units_skipped: 0,
            units_failed: 0,
            files_failed: 0,
        }
    );
    for target in ["fr", "de"] {
        let json = read_json(&ws.output.join(format!("app_{}.json", target)))?;
        assert_eq!(keys_of(&json), vec!["hello", "bye"]);
        assert_eq!(json["hello"], "T:Hello");
    }
    let system_prompts: Vec<String> = provider.requests().into_iter().map(|r| r.system).collect();
    assert!(system_prompts[0].contains("from en to fr"));
    assert!(system_prompts[1].contains("from en to de"));
    Ok(())
}

#[test]
fn test_scanOnce_withPlainText_shouldWriteProviderTextVerbatim() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "notes_en.txt", "not json at all\n")?;
    let provider = MockProvider::echo();
    let controller = common::controller(ws.config(&["fr"]), &provider)?;

    tokio_test::block_on(controller.scan_once())?;

    assert_eq!(fs::read_to_string(ws.output.join("notes_fr.txt"))?, "not json at all\n");
    Ok(())
}

#[test]
fn test_scanOnce_withFailingProvider_shouldWriteSentinelFile() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "notes_en.txt", "Hello")?;
    let controller = common::controller(ws.config(&["fr"]), &MockProvider::failing())?;

    let report = tokio_test::block_on(controller.scan_once())?;

    assert_eq!(report.units_written, 1);
    assert_eq!(fs::read_to_string(ws.output.join("notes_fr.txt"))?, "Translation error");
    Ok(())
}

#[test]
fn test_scanOnce_withExistingOutput_shouldSkipUnlessOverwriting() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "app_en.json", r#"{"hello": "Hello"}"#)?;
    let existing = common::create_test_file(&ws.output, "app_fr.json", r#"{"hello": "Salut"}"#)?;
    let provider = translating_provider();

    let controller = common::controller(ws.config(&["fr"]), &provider)?;
    let report = tokio_test::block_on(controller.scan_once())?;
    assert_eq!(report.units_skipped, 1);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(read_json(&existing)?["hello"], "Salut");

    let mut config = ws.config(&["fr"]);
    config.overwrite_existing = true;
    let controller = common::controller(config, &provider)?;
    tokio_test::block_on(controller.scan_once())?;
    assert_eq!(read_json(&existing)?["hello"], "T:Hello");
    Ok(())
}

#[test]
fn test_scanOnce_withMalformedAnswer_shouldFailOnlyThatUnit() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "app_en.json", r#"{"hello": "Hello"}"#)?;
    common::create_test_file(&ws.input, "notes_en.txt", "Hello")?;
    let controller = common::controller(ws.config(&["fr"]), &MockProvider::fixed("no json here"))?;

    let report = tokio_test::block_on(controller.scan_once())?;

    assert_eq!(report.files_processed, 2);
    assert_eq!(report.units_failed, 1);
    assert_eq!(report.units_written, 1);
    assert!(!ws.output.join("app_fr.json").exists());
    assert_eq!(fs::read_to_string(ws.output.join("notes_fr.txt"))?, "no json here");
    Ok(())
}

#[test]
fn test_scanOnce_shouldFilterExtensionsAndSourceFile() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "a_en.json", r#"{"k": "v"}"#)?;
    common::create_test_file(&ws.input, "b_en.json", r#"{"k": "v"}"#)?;
    common::create_test_file(&ws.input, "c_en.yaml", "k: v")?;

    let mut config = ws.config(&["fr"]);
    config.source_file = Some("b_en.json".to_string());
    let controller = common::controller(config, &translating_provider())?;

    let report = tokio_test::block_on(controller.scan_once())?;

    assert_eq!(report.files_processed, 1);
    assert!(ws.output.join("b_fr.json").exists());
    assert!(!ws.output.join("a_fr.json").exists());
    Ok(())
}

#[test]
fn test_scanOnce_withoutLanguageSuffix_shouldSkipFile() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "strings.json", r#"{"k": "v"}"#)?;
    let provider = translating_provider();
    let controller = common::controller(ws.config(&["fr", "de"]), &provider)?;

    let report = tokio_test::block_on(controller.scan_once())?;

    assert_eq!(report.units_skipped, 2);
    assert_eq!(provider.call_count(), 0);
    Ok(())
}

#[test]
fn test_scanOnce_withConfiguredSourceLanguage_shouldUseIt() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "strings.json", r#"{"k": "v"}"#)?;
    let provider = translating_provider();
    let mut config = ws.config(&["it"]);
    config.source_language = Some("es".to_string());
    let controller = common::controller(config, &provider)?;

    tokio_test::block_on(controller.scan_once())?;

    assert!(provider.requests()[0].system.contains("from es to it"));
    assert!(ws.output.join("strings_it.json").exists());
    Ok(())
}

#[test]
fn test_scanOnce_withDeleteInput_shouldRemoveSourceAfterAllTargets() -> Result<()> {
    let ws = Workspace::new()?;
    let source = common::create_test_file(&ws.input, "app_en.json", r#"{"k": "v"}"#)?;
    let mut config = ws.config(&["fr", "de"]);
    config.delete_input = true;
    let controller = common::controller(config, &translating_provider())?;

    tokio_test::block_on(controller.scan_once())?;

    assert!(!source.exists());
    assert!(ws.output.join("app_fr.json").exists());
    assert!(ws.output.join("app_de.json").exists());
    Ok(())
}

#[test]
fn test_run_withoutContinuousMonitoring_shouldStopAfterOneScan() -> Result<()> {
    let ws = Workspace::new()?;
    common::create_test_file(&ws.input, "app_en.arb", r#"{"k": "v"}"#)?;
    let mut config = ws.config(&["fr"]);
    config.output_folder = ws.root.path().join("created_on_start");
    let controller = common::controller(config, &translating_provider())?;

    tokio_test::block_on(controller.run())?;

    assert!(ws.root.path().join("created_on_start").join("app_fr.arb").exists());
    Ok(())
}

/// Translates like the prefixing mock, but first removes the file named by `remove_me`
fn removing_translator(request: &l10nmate::providers::CompletionRequest) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(&request.user) {
        if let Some(path) = map.get("remove_me").and_then(|v| v.as_str()) {
            let _ = fs::remove_file(path);
        }
    }
    common::translate_payload(request)
}

#[test]
fn test_scanOnce_withFailedInputDeletion_shouldContinueWithNextFile() -> Result<()> {
    let ws = Workspace::new()?;
    let first = ws.input.join("a_en.json");
    let payload = serde_json::json!({ "remove_me": first.to_string_lossy() });
    common::create_test_file(&ws.input, "a_en.json", &payload.to_string())?;
    let second = common::create_test_file(&ws.input, "b_en.json", r#"{"k": "v"}"#)?;

    let mut config = ws.config(&["fr"]);
    config.delete_input = true;
    let provider = MockProvider::echo().with_responder(removing_translator);
    let controller = common::controller(config, &provider)?;

    let report = tokio_test::block_on(controller.scan_once())?;

    assert_eq!(report.files_processed, 2);
    assert_eq!(report.files_failed, 1);
    assert_eq!(report.units_written, 2);
    assert!(ws.output.join("b_fr.json").exists());
    assert!(!second.exists());
    Ok(())
}
