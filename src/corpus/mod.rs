//! Proposal corpus: record types, front-matter parsing, loading and storage

pub mod document;
pub mod frontmatter;
pub mod loader;
pub mod store;

pub use document::{Document, ProposalMetadata, UNTITLED};
pub use frontmatter::FrontMatterError;
pub use loader::{load_directory, load_documents, parse_document, RawDocument};
pub use store::DocumentStore;
