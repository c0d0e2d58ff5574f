use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Validates the source and target codes from the configuration and
/// resolves display names for the LLM prompt templates.
/// Language code type
#[derive(Debug, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
}

/// Region suffixes such as `en-US` or `de_DE` are ignored
fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = primary_subtag(code);

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-3 if no ISO 639-1 code exists
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = primary_subtag(code);

    let lang = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang.to_639_1().map(str::to_string).unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part1(code1), normalize_to_part1(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part1(code)?;
    let lang = if normalized.len() == 2 {
        Language::from_639_1(&normalized)
    } else {
        Language::from_639_3(&normalized)
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
