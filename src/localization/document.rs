/*!
 * Localization document model.
 *
 * A localization document is a JSON object with a `localizedText` map of
 * opaque keys to display strings, plus optional `$schema` and `locale`
 * fields. Key order is kept exactly as read.
 */

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::Path;

use crate::errors::LocalizationError;
use crate::file_utils::FileManager;

pub const SCHEMA_FIELD: &str = "$schema";
pub const LOCALE_FIELD: &str = "locale";
pub const LOCALIZED_TEXT_FIELD: &str = "localizedText";

const INDENT: &[u8] = b"    ";

/// A parsed localization document
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizationDocument {
    /// Top-level fields in document order. The `localizedText` slot only
    /// marks its position; the entries live in `localized_text`.
    fields: Map<String, Value>,

    /// Key/value entries; values are any JSON value, only strings get translated
    pub localized_text: Map<String, Value>,
}

impl LocalizationDocument {
    /// Create an empty document with the given schema and locale
    pub fn new(schema: impl Into<Value>, locale: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(SCHEMA_FIELD.to_string(), schema.into());
        fields.insert(LOCALE_FIELD.to_string(), Value::String(locale.into()));
        fields.insert(LOCALIZED_TEXT_FIELD.to_string(), Value::Null);

        Self {
            fields,
            localized_text: Map::new(),
        }
    }

    /// Parse and validate document text; `path` is only used in errors
    pub fn parse(path: &Path, text: &str) -> Result<Self, LocalizationError> {
        if text.trim().is_empty() {
            return Err(LocalizationError::EmptyFile { path: path.to_path_buf() });
        }

        let value: Value = serde_json::from_str(text).map_err(|source| LocalizationError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_value(path, value)
    }

    /// Validate an already parsed JSON value
    pub fn from_value(path: &Path, value: Value) -> Result<Self, LocalizationError> {
        let invalid = |reason: &str| LocalizationError::InvalidSchema {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let Value::Object(mut fields) = value else {
            return Err(invalid("top level is not a JSON object"));
        };

        let localized_text = match fields.get_mut(LOCALIZED_TEXT_FIELD) {
            Some(Value::Object(entries)) => std::mem::take(entries),
            Some(_) => return Err(invalid("'localizedText' is not an object")),
            None => return Err(invalid("'localizedText' is missing")),
        };
        // Keep the slot so the field is written back at the same position
        fields.insert(LOCALIZED_TEXT_FIELD.to_string(), Value::Null);

        Ok(Self { fields, localized_text })
    }

    /// Same top-level fields, in the same order, with new entries
    pub fn with_localized_text(&self, localized_text: Map<String, Value>) -> Self {
        Self {
            fields: self.fields.clone(),
            localized_text,
        }
    }

    /// `$schema` exactly as read, whatever its JSON type
    pub fn schema(&self) -> Option<&Value> {
        self.fields.get(SCHEMA_FIELD)
    }

    /// Replace `$schema`, keeping its position when already present
    pub fn set_schema(&mut self, schema: Value) {
        self.fields.insert(SCHEMA_FIELD.to_string(), schema);
    }

    /// `locale` when it is a string
    pub fn locale(&self) -> Option<&str> {
        self.fields.get(LOCALE_FIELD).and_then(Value::as_str)
    }

    /// Any top-level field other than `localizedText`
    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            LOCALIZED_TEXT_FIELD => None,
            _ => self.fields.get(name),
        }
    }

    /// Top-level field names in document order, `localizedText` included
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Top-level fields besides `$schema`, `locale` and `localizedText`
    pub fn extra_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| ![SCHEMA_FIELD, LOCALE_FIELD, LOCALIZED_TEXT_FIELD].contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Read and validate a document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LocalizationError> {
        let path = path.as_ref();
        let text = FileManager::read_localization_text(path)?;
        Self::parse(path, &text)
    }

    /// Render as 4-space indented JSON with non-ASCII characters left literal
    pub fn to_json_string(&self) -> Result<String, LocalizationError> {
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the document to `path`; nothing is left behind on failure
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LocalizationError> {
        let json = self.to_json_string()?;
        FileManager::write_atomic(path, &json)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.localized_text.len()
    }

    /// True when `localizedText` holds no entries
    pub fn is_empty(&self) -> bool {
        self.localized_text.is_empty()
    }

    /// Number of entries whose value is a string
    pub fn translatable_count(&self) -> usize {
        self.localized_text.values().filter(|v| v.is_string()).count()
    }
}

impl Serialize for LocalizationDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            if key == LOCALIZED_TEXT_FIELD {
                map.serialize_entry(key, &self.localized_text)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
