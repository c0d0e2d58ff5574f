/*!
 * Localization documents and the merge stage.
 *
 * - `document`: parsing, validation and serialization of `.localization` files
 * - `merge`: the merge engine
 * - `progress`: progress reports shared by both pipeline stages
 */

pub use self::document::LocalizationDocument;
pub use self::merge::MergeEngine;
pub use self::progress::ProgressReport;

pub mod document;
pub mod merge;
pub mod progress;
