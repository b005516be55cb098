//! Proposal record types
//!
//! A `Document` is one corpus record: the front-matter metadata plus the
//! markdown body. Documents are created once by the loader and never mutated.

use serde::{Deserialize, Serialize};

/// Title used when a record carries no `program_title`
pub const UNTITLED: &str = "Untitled";

/// Fixed-shape metadata header of a proposal record.
///
/// Every field is optional so that a record without front matter still has a
/// (empty) metadata record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    /// Numeric program identifier, the external-facing key
    pub id: Option<u64>,
    pub proposal_type: Option<String>,
    pub cycle: Option<String>,
    pub exclusive_access_period_months: Option<i64>,
    pub instrument_mode: Option<String>,
    /// Free text of investigator names
    pub pi_and_co_pis: Option<String>,
    /// Kept as text: the corpus uses ranges such as "10-12"
    pub prime_parallel_time_hours: Option<String>,
    pub program_title: Option<String>,
    /// Category code
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ProposalMetadata {
    /// Program id rendered as display text
    pub fn id_text(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A parsed corpus record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Source name of the blob (file name), unique across the store
    pub id: String,
    pub title: String,
    /// Markdown body with the front matter removed
    pub content: String,
    pub metadata: ProposalMetadata,
}

impl Document {
    pub fn new(source: impl Into<String>, metadata: ProposalMetadata, content: String) -> Self {
        let title = metadata
            .program_title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        Self {
            id: source.into(),
            title,
            content,
            metadata,
        }
    }

    pub fn program_id(&self) -> Option<u64> {
        self.metadata.id
    }

    /// Program id as text, the form used in cross-match output and links
    pub fn program_key(&self) -> Option<String> {
        self.metadata.id_text()
    }

    /// The text fields scanned by substring and whole-word matching,
    /// in a fixed order: body, title, investigators, instrument mode.
    pub fn scan_fields(&self) -> [&str; 4] {
        [
            self.content.as_str(),
            self.metadata.program_title.as_deref().unwrap_or(""),
            self.metadata.pi_and_co_pis.as_deref().unwrap_or(""),
            self.metadata.instrument_mode.as_deref().unwrap_or(""),
        ]
    }
}
