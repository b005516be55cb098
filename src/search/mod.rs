//! Fuzzy search over the proposal corpus
//!
//! Approximate substring matching, weighted multi-field ranking, and display
//! helpers for the ranked results.

pub mod engine;
pub mod fuzzy;
pub mod ranking;
pub mod snippet;

#[cfg(test)]
mod property_tests;

pub use engine::{FieldMatch, FuzzyIndex, SearchResult};
pub use fuzzy::{normalize_for_matching, FuzzyMatch, FuzzyMatcher, Pattern};
pub use ranking::{FieldWeights, MatchScore, SearchField};
pub use snippet::{highlight, snippet, DEFAULT_SNIPPET_RADIUS};
