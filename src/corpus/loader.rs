//! Corpus loading
//!
//! Turns raw text blobs into `Document`s. Loading is fail-soft: a blob whose
//! front matter cannot be decoded keeps its full text as content and gets an
//! empty metadata record.

use super::document::{Document, ProposalMetadata};
use super::frontmatter::{decode_metadata, normalize_body, split_front_matter};
use crate::error::AppError;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const MARKDOWN_EXTENSION: &str = "md";

/// A raw corpus blob tagged with its source name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub source: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// Parse a single blob
pub fn parse_document(raw: &RawDocument) -> Document {
    let Some((header, body)) = split_front_matter(&raw.text) else {
        debug!("No front matter in {}", raw.source);
        return Document::new(&raw.source, ProposalMetadata::default(), raw.text.clone());
    };

    match decode_metadata(header) {
        Ok(metadata) => Document::new(&raw.source, metadata, normalize_body(body)),
        Err(e) => {
            warn!("Malformed front matter in {}: {}", raw.source, e);
            Document::new(&raw.source, ProposalMetadata::default(), raw.text.clone())
        }
    }
}

/// Parse a batch of blobs, one `Document` per blob, in input order
pub fn load_documents<I>(blobs: I) -> Vec<Document>
where
    I: IntoIterator<Item = RawDocument>,
{
    blobs.into_iter().map(|raw| parse_document(&raw)).collect()
}

/// Read every markdown file in `dir` (non-recursive), ordered by file name.
///
/// Unreadable files are skipped with a warning; a missing or unreadable
/// directory is an error.
pub fn load_directory(dir: &Path) -> Result<Vec<Document>, AppError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION));
        if path.is_file() && is_markdown {
            paths.push(path);
        }
    }
    paths.sort();

    let mut blobs = Vec::with_capacity(paths.len());
    for path in paths {
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match fs::read_to_string(&path) {
            Ok(text) => blobs.push(RawDocument::new(source, text)),
            Err(e) => warn!("Skipping unreadable corpus file {}: {}", path.display(), e),
        }
    }

    info!("Read {} corpus files from {}", blobs.len(), dir.display());
    Ok(load_documents(blobs))
}
