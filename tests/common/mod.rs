/*!
 * Common test utilities for the locpipe test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use std::sync::{Arc, Mutex};
use anyhow::Result;
use serde_json::Value;
use tempfile::TempDir;

use locpipe::localization::ProgressReport;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a localization file from a schema and `localizedText` entries
pub fn create_localization_file(dir: &Path, filename: &str, schema: Option<&str>, entries: Value) -> Result<PathBuf> {
    let mut document = serde_json::Map::new();
    if let Some(schema) = schema {
        document.insert("$schema".to_string(), Value::String(schema.to_string()));
    }
    document.insert("localizedText".to_string(), entries);
    create_test_file(dir, filename, &serde_json::to_string_pretty(&Value::Object(document))?)
}

/// Reads a JSON file written by the pipeline
pub fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Names of the entries in `dir`, sorted
pub fn dir_entries(dir: &Path) -> Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().to_string()))
        .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Progress callback that records every report
pub fn progress_recorder() -> (Arc<Mutex<Vec<ProgressReport>>>, impl Fn(ProgressReport) + Send + Sync + 'static) {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    (reports, move |report| sink.lock().unwrap().push(report))
}
