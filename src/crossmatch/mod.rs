//! Batch cross-match of many terms against the whole corpus
//!
//! Each term is evaluated three independent ways:
//! - fuzzy: the fuzzy index's ranked results
//! - contains: case-insensitive substring of the body or key metadata fields,
//!   or a substring of the program id
//! - exact: whole-word occurrence in the same fields, or the program id
//!   equal to the term
//!
//! Every row carries deduplicated program ids rendered as text.

pub mod export;


use crate::corpus::{Document, DocumentStore};
use crate::search::FuzzyIndex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

pub use export::to_csv;

/// Separator between terms in pasted input
pub const TERM_SEPARATOR: char = ',';

/// Characters outside this class count as word boundaries
const WORD_CHARS: &str = "a-zA-Z0-9_";

/// One output row per input term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossMatchRow {
    pub term: String,
    pub fuzzy: Vec<String>,
    pub contains: Vec<String>,
    pub exact: Vec<String>,
}

/// Split comma-separated input into trimmed, non-empty terms
pub fn parse_terms(input: &str) -> Vec<String> {
    normalize_terms(input.split(TERM_SEPARATOR))
}

/// Trim terms and drop the empty ones, keeping order and duplicates
pub fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Case-folded scan fields and id text of one document
#[derive(Debug)]
struct ScanRecord {
    key: Option<String>,
    fields: [String; 4],
}

impl ScanRecord {
    fn from_document(doc: &Document) -> Self {
        Self {
            key: doc.program_key(),
            fields: doc.scan_fields().map(str::to_lowercase),
        }
    }
}

fn scan_records(store: &DocumentStore) -> Vec<ScanRecord> {
    store.get_all().iter().map(ScanRecord::from_document).collect()
}

/// Collect ids in order, skipping documents without one and repeats
fn unique_ids<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|key| seen.insert(*key))
        .map(str::to_string)
        .collect()
}

/// Program ids among the fuzzy results for `term`, in rank order
pub fn fuzzy_ids(index: &FuzzyIndex, term: &str) -> Vec<String> {
    let keys: Vec<String> = index
        .search(term)
        .iter()
        .filter_map(|result| result.document.program_key())
        .collect();
    unique_ids(keys.iter().map(String::as_str))
}

/// Program ids of documents containing `term`
pub fn contains_ids(store: &DocumentStore, term: &str) -> Vec<String> {
    contains_in(&scan_records(store), term)
}

/// Program ids of documents containing `term` as a whole word
pub fn exact_ids(store: &DocumentStore, term: &str) -> Vec<String> {
    exact_in(&scan_records(store), term)
}

fn contains_in(records: &[ScanRecord], term: &str) -> Vec<String> {
    let folded = term.to_lowercase();

    unique_ids(records.iter().filter_map(|record| {
        let key = record.key.as_deref()?;
        let text_hit = record.fields.iter().any(|f| f.contains(&folded));
        let id_hit = key.contains(term);
        (text_hit || id_hit).then_some(key)
    }))
}

fn exact_in(records: &[ScanRecord], term: &str) -> Vec<String> {
    let folded = term.to_lowercase();
    let boundary = match whole_word_regex(&folded) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Cannot build whole-word matcher for {:?}: {}", term, e);
            None
        }
    };

    unique_ids(records.iter().filter_map(|record| {
        let key = record.key.as_deref()?;
        let text_hit = boundary
            .as_ref()
            .is_some_and(|re| record.fields.iter().any(|f| re.is_match(f)));
        let id_hit = key == term;
        (text_hit || id_hit).then_some(key)
    }))
}

/// Whole-word matcher for a literal term: the term bounded on each side by
/// a non-word character or the edge of the text
pub fn whole_word_regex(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "(?:^|[^{w}]){term}(?:[^{w}]|$)",
        w = WORD_CHARS,
        term = regex::escape(term)
    ))
}

/// Runs cross-match batches against one fuzzy index
pub struct CrossMatchEngine<'a> {
    index: &'a FuzzyIndex,
    records: Vec<ScanRecord>,
}

impl<'a> CrossMatchEngine<'a> {
    pub fn new(index: &'a FuzzyIndex) -> Self {
        Self {
            index,
            records: scan_records(index.store()),
        }
    }

    /// Evaluate one term in all three modes
    pub fn match_term(&self, term: &str) -> CrossMatchRow {
        CrossMatchRow {
            term: term.to_string(),
            fuzzy: fuzzy_ids(self.index, term),
            contains: contains_in(&self.records, term),
            exact: exact_in(&self.records, term),
        }
    }

    /// Evaluate a batch, one row per non-empty term in input order
    pub fn run<I, S>(&self, terms: I) -> Vec<CrossMatchRow>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = normalize_terms(terms);
        if terms.is_empty() {
            debug!("Cross-match called with no terms");
            return Vec::new();
        }

        let started = Instant::now();
        let rows: Vec<CrossMatchRow> = terms.iter().map(|t| self.match_term(t)).collect();
        info!(
            "Cross-matched {} terms against {} documents in {:?}",
            rows.len(),
            self.records.len(),
            started.elapsed()
        );
        rows
    }

    /// Evaluate comma-separated input
    pub fn run_input(&self, input: &str) -> Vec<CrossMatchRow> {
        self.run(parse_terms(input))
    }
}
