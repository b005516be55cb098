//! Fuzzy index over the document store
//!
//! Field texts are normalized once at build time; a query is compiled once
//! and matched against every indexed field of every document. Results are
//! ranked closest first, ties keeping store order.

use super::fuzzy::{normalize_for_matching, FuzzyMatcher, Pattern};
use super::ranking::{FieldWeights, MatchScore, SearchField};
use crate::config::SearchConfig;
use crate::corpus::{Document, DocumentStore};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Where a query matched inside one field of a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: SearchField,
    /// Per-field match score, 0.0 for an exact occurrence
    pub score: f64,
    pub errors: usize,
    /// Character range in the normalized field text, end exclusive
    pub span: (usize, usize),
}

/// Search result with the matched document and its match detail
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a> {
    pub document: &'a Document,
    pub score: MatchScore,
    /// Every field that matched, in field weight order
    pub matches: Vec<FieldMatch>,
}

/// Normalized field texts of one document
#[derive(Debug)]
struct IndexedRecord {
    fields: Vec<(SearchField, Vec<char>)>,
}

/// Weighted multi-field approximate index, built once from a store snapshot
#[derive(Debug)]
pub struct FuzzyIndex {
    store: Arc<DocumentStore>,
    records: Vec<IndexedRecord>,
    matcher: FuzzyMatcher,
    weights: FieldWeights,
}

impl FuzzyIndex {
    pub fn build(store: Arc<DocumentStore>, config: &SearchConfig) -> Self {
        let started = Instant::now();

        let records: Vec<IndexedRecord> = store
            .get_all()
            .iter()
            .map(|doc| IndexedRecord {
                fields: SearchField::ALL
                    .iter()
                    .filter_map(|&field| {
                        field
                            .extract(doc)
                            .map(|text| (field, normalize_for_matching(&text).chars().collect()))
                    })
                    .collect(),
            })
            .collect();

        let field_count: usize = records.iter().map(|r| r.fields.len()).sum();
        info!(
            "Fuzzy index built: {} documents, {} fields in {:?}",
            records.len(),
            field_count,
            started.elapsed()
        );

        Self {
            store,
            records,
            matcher: FuzzyMatcher::new(config.threshold, config.min_match_char_length),
            weights: config.weights.clone(),
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    /// Search the index with a query string.
    ///
    /// A blank query yields no results. Otherwise every document with at
    /// least one matching field is returned, closest first.
    pub fn search(&self, query: &str) -> Vec<SearchResult<'_>> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let pattern = Pattern::new(query);

        let mut results: Vec<SearchResult<'_>> = self
            .store
            .get_all()
            .iter()
            .zip(&self.records)
            .filter_map(|(document, record)| self.match_record(document, record, &pattern))
            .collect();

        // Stable sort: equal scores stay in store order
        results.sort_by(|a, b| MatchScore::closer_first(&a.score, &b.score));

        debug!(
            "Query {:?} matched {} documents in {:?}",
            query,
            results.len(),
            started.elapsed()
        );
        results
    }

    fn match_record<'a>(
        &self,
        document: &'a Document,
        record: &IndexedRecord,
        pattern: &Pattern,
    ) -> Option<SearchResult<'a>> {
        let matches: Vec<FieldMatch> = record
            .fields
            .iter()
            .filter_map(|(field, text)| {
                self.matcher.find(pattern, text).map(|m| FieldMatch {
                    field: *field,
                    score: m.score,
                    errors: m.errors,
                    span: m.span,
                })
            })
            .collect();

        if matches.is_empty() {
            return None;
        }

        let score = MatchScore::combine(
            matches
                .iter()
                .map(|m| (m.score, self.weights.normalized(m.field))),
        );

        Some(SearchResult {
            document,
            score,
            matches,
        })
    }
}
