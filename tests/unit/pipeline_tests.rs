/*!
 * Tests for the pipeline orchestrator state
 */

use std::sync::Arc;
use anyhow::Result;
use serde_json::json;
use locpipe::app_config::Config;
use locpipe::errors::PipelineError;
use locpipe::pipeline::Pipeline;
use locpipe::providers::mock::MockProvider;
use crate::common;

fn pipeline_with(provider: MockProvider) -> Result<Pipeline> {
    Pipeline::from_config(&Config::default(), Arc::new(provider))
}

/// Test that a blank destination is rejected
#[test]
fn test_select_destination_withEmptyPath_shouldFail() -> Result<()> {
    let mut pipeline = pipeline_with(MockProvider::working())?;
    assert!(matches!(pipeline.select_destination(""), Err(PipelineError::NoDestination)));
    assert_eq!(pipeline.state().destination, None);
    Ok(())
}

/// Test that a missing source path is an invalid selection
#[test]
fn test_select_sources_withMissingFile_shouldRejectSelection() -> Result<()> {
    let mut pipeline = pipeline_with(MockProvider::working())?;
    let result = pipeline.select_sources(&["/no/such/file.localization"]);
    assert!(matches!(result, Err(PipelineError::InvalidSelection(_))));
    Ok(())
}

/// Test that the output name gets the extension exactly once
#[tokio::test]
async fn test_merge_files_withExtensionInName_shouldNotDoubleIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let source = common::create_localization_file(dir, "a.localization", None, json!({"k": "v"}))?;

    let mut pipeline = pipeline_with(MockProvider::working())?;
    pipeline.select_sources(&[source])?;
    pipeline.select_destination(dir.join("out"))?;

    let merged = pipeline.merge_files("all.localization", |_| {}).await?;
    assert_eq!(merged, dir.join("out").join("all.localization"));
    assert!(merged.exists());
    Ok(())
}

/// Test that a failed merge keeps the previous merged path unset
#[tokio::test]
async fn test_merge_files_withInvalidSource_shouldNotRecordMergedPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let source = common::create_test_file(dir, "bad.localization", "")?;

    let mut pipeline = pipeline_with(MockProvider::working())?;
    pipeline.select_sources(&[source])?;
    pipeline.select_destination(dir)?;

    let err = pipeline.merge_files("merged", |_| {}).await.unwrap_err();
    match err {
        PipelineError::Localization(inner) => assert_eq!(inner.kind(), "EmptyFileError"),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(pipeline.state().merged_path, None);
    assert!(!dir.join("merged.localization").exists());
    Ok(())
}

/// Test that a merged file deleted between stages is reported
#[tokio::test]
async fn test_translate_merged_file_withDeletedMergedFile_shouldReportMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let source = common::create_localization_file(dir, "a.localization", None, json!({"k": "v"}))?;

    let mut pipeline = pipeline_with(MockProvider::working())?;
    pipeline.select_sources(&[source])?;
    pipeline.select_destination(dir)?;
    let merged = pipeline.merge_files("merged", |_| {}).await?;
    std::fs::remove_file(&merged)?;

    let err = pipeline.translate_merged_file(|_| {}).await.unwrap_err();
    assert!(matches!(err, PipelineError::MergedFileMissing { .. }));
    assert_eq!(pipeline.state().translated_path, None);
    Ok(())
}

/// Test that an adopted file is translated next to itself without a destination
#[tokio::test]
async fn test_translate_merged_file_withAdoptedFileAndNoDestination_shouldWriteBesideIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let merged = common::create_localization_file(dir, "ready.localization", Some("s"), json!({"k": "wert"}))?;

    let mut pipeline = pipeline_with(MockProvider::working())?;
    pipeline.adopt_merged_file(&merged)?;
    let outcome = pipeline.run_translate(|_| {}).await?;

    assert_eq!(outcome.output_path, dir.join("translated_ready.localization"));
    assert_eq!(pipeline.state().translated_path.as_deref(), Some(outcome.output_path.as_path()));
    Ok(())
}

/// Test that adopting a missing file fails
#[test]
fn test_adopt_merged_file_withMissingFile_shouldFail() -> Result<()> {
    let mut pipeline = pipeline_with(MockProvider::working())?;
    let result = pipeline.adopt_merged_file("/no/such/merged.localization");
    assert!(matches!(result, Err(PipelineError::MergedFileMissing { .. })));
    Ok(())
}
