//! Search core for a corpus of observing-proposal records
//!
//! Loads markdown records with YAML front matter, indexes them for weighted
//! fuzzy search, and cross-matches batches of terms against the corpus.

pub mod config;
pub mod corpus;
pub mod crossmatch;
pub mod error;
pub mod listing;
pub mod report;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests_crossmatch_scenario;

pub use config::{load_config, SearchConfig};
pub use corpus::{Document, DocumentStore, ProposalMetadata};
pub use crossmatch::{CrossMatchEngine, CrossMatchRow};
pub use error::AppError;
pub use service::ProposalIndex;
