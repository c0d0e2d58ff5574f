/*!
 * Integration tests for application lifecycle
 */

use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use serde_json::json;
use locpipe::app_config::{Config, TranslationProvider};
use locpipe::app_controller::Controller;
use locpipe::providers::mock::MockProvider;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert_eq!(controller.config().merged_locale, "en-US");
    assert!(controller.pipeline().state().sources.is_empty());
    Ok(())
}

/// Test that a provider without credentials is rejected up front
#[test]
fn test_controller_initialization_withAnthropicAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    assert!(Controller::with_config(config).is_err());
}

/// Test the combined merge and translate run through the controller
#[test]
fn test_controller_run_withMockTranslator_shouldProduceBothFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let source = common::create_localization_file(dir, "src/ui.localization", Some("s"), json!({"k": "glt werte"}))?;
    let out = dir.join("nested").join("out");

    let mut controller = Controller::with_translator(Config::default(), Arc::new(MockProvider::working()))?;
    let (merged, outcome) = tokio_test::block_on(controller.run(&[source], &out, "release"))?;

    assert_eq!(merged, out.join("release.localization"));
    assert_eq!(outcome.output_path, out.join("translated_release.localization"));
    assert_eq!(common::read_json(&outcome.output_path)?["localizedText"]["k"], json!("[en] GLT Werte"));
    Ok(())
}

/// Test that a failed merge does not create the output folder
#[test]
fn test_controller_run_merge_withBrokenSource_shouldNotCreateOutputDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let broken = common::create_test_file(dir, "broken.localization", "{oops")?;
    let out = dir.join("never").join("created");

    let mut controller = Controller::with_translator(Config::default(), Arc::new(MockProvider::working()))?;
    assert!(tokio_test::block_on(controller.run_merge(&[broken], &out, "merged")).is_err());
    assert!(tokio_test::block_on(controller.run_merge(&[dir.join("missing.localization")], &out, "merged")).is_err());

    assert!(!dir.join("never").exists());
    Ok(())
}

/// Test translating an existing merged file into another folder
#[test]
fn test_controller_run_translate_withExplicitFile_shouldUseOutputDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let merged = common::create_localization_file(dir, "merged.localization", Some("s"), json!({"k": "hallo"}))?;
    let out = dir.join("translated");

    let mut controller = Controller::with_translator(Config::default(), Arc::new(MockProvider::working()))?;
    let outcome = tokio_test::block_on(controller.run_translate(Some(merged.as_path()), Some(out.as_path())))?;

    assert_eq!(outcome.output_path, out.join("translated_merged.localization"));
    Ok(())
}

/// Test the connection check against an unavailable provider
#[test]
fn test_controller_check_connection_withFailingProvider_shouldFail() -> Result<()> {
    let controller = Controller::with_translator(Config::default(), Arc::new(MockProvider::failing()))?;
    assert!(tokio_test::block_on(controller.check_connection()).is_err());

    let controller = Controller::with_translator(Config::default(), Arc::new(MockProvider::working()))?;
    assert!(tokio_test::block_on(controller.check_connection()).is_ok());
    Ok(())
}

/// Test human readable durations
#[test]
fn test_format_duration_withVariousLengths_shouldPickUnits() {
    assert_eq!(Controller::format_duration(Duration::from_millis(1500)), "1.500s");
    assert_eq!(Controller::format_duration(Duration::from_secs(125)), "2m 5s");
    assert_eq!(Controller::format_duration(Duration::from_secs(3725)), "1h 2m 5s");
}
