//! In-memory document store
//!
//! Holds the parsed corpus in load order. Read-only after construction.

use super::document::{Document, ProposalMetadata};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
    by_program_id: HashMap<u64, usize>,
}

impl DocumentStore {
    /// Build the store. The first document wins when two share a program id.
    pub fn new(documents: Vec<Document>) -> Self {
        let mut by_program_id = HashMap::with_capacity(documents.len());
        let mut missing_ids = 0usize;

        for (position, doc) in documents.iter().enumerate() {
            match doc.program_id() {
                Some(id) => {
                    if by_program_id.contains_key(&id) {
                        warn!("Duplicate program id {} in {}, keeping first occurrence", id, doc.id);
                    } else {
                        by_program_id.insert(id, position);
                    }
                }
                None => missing_ids += 1,
            }
        }

        if missing_ids > 0 {
            warn!("{} documents have no program id and cannot be looked up", missing_ids);
        }
        info!("Document store loaded with {} documents", documents.len());

        Self {
            documents,
            by_program_id,
        }
    }

    /// All documents in load order
    pub fn get_all(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by its program id given as text.
    ///
    /// Surrounding whitespace is ignored and leading zeros are insignificant.
    pub fn get_by_id(&self, key: &str) -> Option<&Document> {
        let id: u64 = key.trim().parse().ok()?;
        self.by_program_id.get(&id).map(|&pos| &self.documents[pos])
    }

    /// Metadata of every document, in load order
    pub fn get_metadata_list(&self) -> Vec<&ProposalMetadata> {
        self.documents.iter().map(|doc| &doc.metadata).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
