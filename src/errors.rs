/*!
 * Error types for the locpipe application.
 *
 * This module contains custom error types for the merge and translation
 * stages, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
///
/// These are recovered per key by the translation engine: the original
/// value is kept and the batch continues.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider answered but returned no text
    #[error("Provider returned an empty translation")]
    EmptyTranslation,
}

/// Errors raised while reading, validating or writing localization documents
#[derive(Error, Debug)]
pub enum LocalizationError {
    /// The file was blank after trimming
    #[error("File {} is empty", .path.display())]
    EmptyFile {
        path: PathBuf,
    },

    /// The file content is not valid JSON
    #[error("Failed to decode JSON in file {}: {source}", .path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is valid but lacks a usable `localizedText` section
    #[error("File {} does not have a valid 'localizedText' section: {reason}", .path.display())]
    InvalidSchema {
        path: PathBuf,
        reason: String,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a document failed
    #[error("Failed to serialize localization document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl LocalizationError {
    /// Short, stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyFile { .. } => "EmptyFileError",
            Self::MalformedJson { .. } => "MalformedJsonError",
            Self::InvalidSchema { .. } => "InvalidSchemaError",
            Self::Io { .. } => "IoError",
            Self::Serialize(_) => "IoError",
        }
    }
}

/// Errors surfaced by the pipeline orchestrator
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No files selected. Please select localization files.")]
    NoSourcesSelected,

    #[error("Invalid source selection: {0}")]
    InvalidSelection(String),

    #[error("No destination folder selected. Please select a destination folder.")]
    NoDestination,

    #[error("Please enter a name for the output file.")]
    EmptyOutputName,

    #[error("No merged file available. Please merge the files first.")]
    NoMergedFile,

    #[error("Merged file does not exist: {}", .path.display())]
    MergedFileMissing {
        path: PathBuf,
    },

    /// Error from a merge or translation stage
    #[error(transparent)]
    Localization(#[from] LocalizationError),

    /// The background worker could not complete
    #[error("Background worker failed: {0}")]
    Worker(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error from document handling
    #[error("Localization error: {0}")]
    Localization(#[from] LocalizationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
