/*!
 * Text normalization for translated labels.
 */

/// Capitalize the first character of every whitespace-separated word.
///
/// Runs of whitespace collapse to a single space. Only the first character
/// of each word is touched, so `WORLD` or `EnBW` keep their casing.
pub fn capitalize_words(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
