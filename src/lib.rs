#![warn(missing_docs)]

//! Matching, ranking and selection core for a searchable dropdown.
//!
//! `matchselect` filters a host-supplied option list against typed text
//! using three match tiers (first word, whole substring, any character),
//! orders each tier by accent-insensitive label, annotates matched
//! characters for highlighting, and manages a single or multi selection
//! whose projected values are pushed to the host on every change.
//!
//! Rendering is left to the caller: feed [`SelectEvent`]s into a
//! [`Select`] and draw its [`SelectView`].

/// Configuration errors.
pub mod error;

/// Field access for host options and value projection.
pub mod keys;

/// Tiered matching of labels against a query.
pub mod matching;

/// Lowercasing, diacritics stripping and query deduplication.
pub mod normalize;

/// Construction-time configuration for a select.
pub mod options;

/// Selection state machine, events and view.
pub mod select;

/// Label ordering within a match tier.
pub mod sort;

// Re-export primary public API types and functions at the crate root.
pub use error::ConfigError;
pub use keys::{KeysConfig, Record, ValueProjection, pick_fields, project};
pub use matching::{
    LabelChar, PreparedQuery, Ranked, Tier, classify, filter_options, highlight, matches_any_char,
    matches_first_word, matches_substring,
};
pub use normalize::{dedupe, normalize};
pub use options::{ChangeCallback, SelectOptions};
pub use select::{Candidate, Select, SelectEvent, SelectView};
pub use sort::{compare_labels, sort_by_label};
