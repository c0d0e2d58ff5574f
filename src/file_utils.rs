use anyhow::{Result, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::errors::LocalizationError;

// @module: File and directory utilities

const BYTE_ORDER_MARK: char = '\u{feff}';

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(extension) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Expand a user selection into source files.
    ///
    /// Files are kept in the given order; each directory contributes its
    /// matching files in path order at the position it was named.
    pub fn collect_sources<P: AsRef<Path>>(inputs: &[P], extension: &str) -> Result<Vec<PathBuf>> {
        let mut sources = Vec::new();
        for input in inputs {
            let input = input.as_ref();
            if input.is_dir() {
                sources.extend(Self::find_files(input, extension)?);
            } else if input.is_file() {
                sources.push(input.to_path_buf());
            } else {
                return Err(anyhow::anyhow!("Input path does not exist: {:?}", input));
            }
        }
        Ok(sources)
    }

    /// Read a localization file as UTF-8, dropping a leading byte-order mark
    pub fn read_localization_text<P: AsRef<Path>>(path: P) -> Result<String, LocalizationError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LocalizationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = String::from_utf8(bytes).map_err(|e| LocalizationError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        Ok(match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    /// Write a file in one step: the content lands in a sibling temp file
    /// which is renamed over the target, so a failure leaves no partial output.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), LocalizationError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| LocalizationError::Io {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(io_err)?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(io_err)?;
        temp.write_all(content.as_bytes()).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(path).map_err(|e| io_err(e.error))?;

        Ok(())
    }

    /// Append `.{extension}` unless the name already ends with it
    pub fn ensure_extension(name: &str, extension: &str) -> String {
        let suffix = format!(".{}", extension.trim_start_matches('.'));
        if name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{}{}", name, suffix)
        }
    }

    // @generates: Output path for the translated document
    // @params: merged_path, output_dir, extension
    pub fn translated_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        merged_path: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let stem = merged_path.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = String::from("translated_");
        output_filename.push_str(&stem.to_string_lossy());
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));

        output_dir.as_ref().join(output_filename)
    }
}
