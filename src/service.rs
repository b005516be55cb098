//! Shared, read-only proposal index
//!
//! Built once per corpus and handed to every caller by cheap clone.

use crate::config::SearchConfig;
use crate::corpus::{Document, DocumentStore, ProposalMetadata};
use crate::crossmatch::{CrossMatchEngine, CrossMatchRow};
use crate::error::AppError;
use crate::listing::{list_metadata, ListingQuery, MetadataPage};
use crate::search::{FuzzyIndex, SearchResult};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ProposalIndex {
    index: Arc<FuzzyIndex>,
}

impl ProposalIndex {
    /// Build the store and fuzzy index. Fails only on an invalid configuration.
    pub fn new(documents: Vec<Document>, config: &SearchConfig) -> Result<Self, AppError> {
        config.validate()?;
        let store = Arc::new(DocumentStore::new(documents));
        Ok(Self {
            index: Arc::new(FuzzyIndex::build(store, config)),
        })
    }

    fn store(&self) -> &DocumentStore {
        self.index.store()
    }

    pub fn get_all_documents(&self) -> &[Document] {
        self.store().get_all()
    }

    pub fn get_metadata(&self) -> Vec<&ProposalMetadata> {
        self.store().get_metadata_list()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Document> {
        self.store().get_by_id(id)
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult<'_>> {
        self.index.search(query)
    }

    /// Ranked documents only, without match detail
    pub fn search_documents(&self, query: &str) -> Vec<&Document> {
        self.index.search(query).into_iter().map(|r| r.document).collect()
    }

    pub fn cross_match<I, S>(&self, terms: I) -> Vec<CrossMatchRow>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CrossMatchEngine::new(&self.index).run(terms)
    }

    /// Cross-match comma-separated input
    pub fn cross_match_input(&self, input: &str) -> Vec<CrossMatchRow> {
        CrossMatchEngine::new(&self.index).run_input(input)
    }

    pub fn list_metadata(&self, query: &ListingQuery) -> MetadataPage<'_> {
        list_metadata(&self.get_metadata(), query)
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn doc(id: u64, title: &str) -> Document {
        let metadata = ProposalMetadata {
            id: Some(id),
            program_title: Some(title.to_string()),
            ..Default::default()
        };
        Document::new(format!("{}.md", id), metadata, format!("Body of {}", title))
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig::default().with_threshold(2.0);
        assert!(matches!(
            ProposalIndex::new(vec![], &config),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_snapshots_in_load_order() {
        let index = ProposalIndex::new(vec![doc(2, "Two"), doc(1, "One")], &SearchConfig::default()).unwrap();
        let ids: Vec<Option<u64>> = index.get_metadata().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![Some(2), Some(1)]);
        assert_eq!(index.get_all_documents().len(), 2);
        assert_eq!(index.get_by_id("1").map(|d| d.title.as_str()), Some("One"));
        assert!(index.get_by_id("3").is_none());
    }

    #[test]
    fn test_shared_across_threads() {
        let index = ProposalIndex::new(vec![doc(7, "Brown Dwarfs")], &SearchConfig::default()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let index = index.clone();
                thread::spawn(move || index.search_documents("brown dwarfs").len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }

    #[test]
    fn test_listing_through_index() {
        let index = ProposalIndex::new(vec![doc(1, "Alpha"), doc(2, "Beta")], &SearchConfig::default()).unwrap();
        let page = index.list_metadata(&ListingQuery::default());
        assert_eq!(page.total, 2);
        assert!(index.cross_match_input("").is_empty());
        assert_eq!(index.cross_match(["beta"])[0].contains, vec!["2"]);
    }
}
