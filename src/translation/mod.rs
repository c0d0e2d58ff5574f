/*!
 * Translation stage of the localization pipeline.
 *
 * - `core`: the `TextTranslator` seam and the config-driven `TranslationService`
 * - `engine`: per-key translation of merged documents
 * - `terms`: protected-term casing
 * - `formatting`: word capitalization
 * - `cache`: per-run cache of provider results
 */

// Re-export main types for easier usage
pub use self::cache::{CacheStats, TranslationCache};
pub use self::core::{TextTranslator, TranslationService};
pub use self::engine::{TranslationEngine, TranslationOutcome, TranslationStats};
pub use self::formatting::capitalize_words;
pub use self::terms::{preserve_case, TermPreserver};

// Submodules
pub mod cache;
pub mod core;
pub mod engine;
pub mod formatting;
pub mod terms;
