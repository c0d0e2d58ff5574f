/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use locpipe::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.localization", "{}")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that find_files only returns matching files, sorted
#[test]
fn test_find_files_withNestedFolders_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "b.localization", "{}")?;
    common::create_test_file(dir, "a.localization", "{}")?;
    common::create_test_file(dir, "nested/c.LOCALIZATION", "{}")?;
    common::create_test_file(dir, "notes.txt", "")?;

    let files = FileManager::find_files(dir, ".localization")?;

    assert_eq!(files, vec![
        dir.join("a.localization"),
        dir.join("b.localization"),
        dir.join("nested").join("c.LOCALIZATION"),
    ]);

    Ok(())
}

/// Test that explicit files keep the user's order around expanded folders
#[test]
fn test_collect_sources_withFilesAndFolder_shouldKeepSelectionOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let last = common::create_test_file(dir, "z.localization", "{}")?;
    let folder = dir.join("group");
    common::create_test_file(&folder, "2.localization", "{}")?;
    common::create_test_file(&folder, "1.localization", "{}")?;

    let sources = FileManager::collect_sources(&[last.clone(), folder.clone()], "localization")?;

    assert_eq!(sources, vec![last, folder.join("1.localization"), folder.join("2.localization")]);
    Ok(())
}

/// Test that a missing input is rejected
#[test]
fn test_collect_sources_withMissingPath_shouldFail() {
    let result = FileManager::collect_sources(&[Path::new("/definitely/not/here.localization")], "localization");
    assert!(result.is_err());
}

/// Test that invalid UTF-8 surfaces as an I/O error
#[test]
fn test_read_localization_text_withInvalidUtf8_shouldReportIo() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.localization");
    fs::write(&path, [0x7b, 0xe4, 0x7d])?;

    let err = FileManager::read_localization_text(&path).unwrap_err();
    assert_eq!(err.kind(), "IoError");

    Ok(())
}

/// Test that write_atomic replaces existing content in one step
#[test]
fn test_write_atomic_withExistingFile_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "out.localization", "old")?;

    FileManager::write_atomic(&path, "new")?;

    assert_eq!(fs::read_to_string(&path)?, "new");
    assert_eq!(common::dir_entries(temp_dir.path())?, vec!["out.localization".to_string()]);
    Ok(())
}

/// Test that ensure_extension does not double the suffix
#[test]
fn test_ensure_extension_withSuffixPresent_shouldKeepName() {
    assert_eq!(FileManager::ensure_extension("merged.localization", "localization"), "merged.localization");
    assert_eq!(FileManager::ensure_extension("merged.json", "localization"), "merged.json.localization");
}
