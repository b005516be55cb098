//! Markdown rendering of search, lookup, listing and cross-match output

use crate::corpus::Document;
use crate::crossmatch::CrossMatchRow;
use crate::error::Result;
use crate::listing::{MetadataColumn, MetadataPage};
use crate::search::{highlight, snippet, SearchResult, DEFAULT_SNIPPET_RADIUS};
use serde::Serialize;

const MISSING: &str = "-";

fn program_label(doc: &Document) -> String {
    doc.program_key().unwrap_or_else(|| doc.id.clone())
}

/// Ranked results with highlighted snippets, at most `limit` entries
pub fn format_search_results(results: &[SearchResult<'_>], query: &str, limit: usize) -> String {
    let shown = results.len().min(limit);
    let mut md = format!(
        "# Search Results · {} proposals\n\n",
        results.len()
    );

    for result in results.iter().take(limit) {
        let doc = result.document;
        md.push_str(&format!(
            "## {} · {}\n\n",
            program_label(doc),
            highlight(&doc.title, query)
        ));
        md.push_str(&format!("relevance {:.2}\n\n", result.score.relevance()));

        let excerpt = snippet(&doc.content, query, DEFAULT_SNIPPET_RADIUS);
        md.push_str(&format!("> {}\n\n", highlight(&excerpt, query).replace('\n', "\n> ")));
        md.push_str("---\n\n");
    }

    if shown < results.len() {
        md.push_str(&format!("{} more not shown\n", results.len() - shown));
    }
    md
}

/// Full record: metadata table followed by the body
pub fn format_document(doc: &Document) -> String {
    let mut md = format!("# {} · {}\n\n", program_label(doc), doc.title);
    for column in MetadataColumn::ALL {
        let value = column.render(&doc.metadata);
        md.push_str(&format!(
            "- **{}**: {}\n",
            column.name(),
            value.as_deref().unwrap_or(MISSING)
        ));
    }
    md.push('\n');
    md.push_str(&doc.content);
    md.push('\n');
    md
}

fn table_cell(value: Option<String>) -> String {
    value
        .map(|v| v.replace('|', "\\|").replace('\n', " "))
        .unwrap_or_else(|| MISSING.to_string())
}

/// One page of the metadata table
pub fn format_metadata_page(page: &MetadataPage<'_>) -> String {
    let names: Vec<&str> = MetadataColumn::ALL.iter().map(|c| c.name()).collect();
    let mut md = format!("| {} |\n", names.join(" | "));
    md.push_str(&format!("|{}\n", "---|".repeat(names.len())));

    for metadata in &page.rows {
        let cells: Vec<String> = MetadataColumn::ALL
            .iter()
            .map(|c| table_cell(c.render(metadata)))
            .collect();
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    md.push_str(&format!(
        "\nShowing {}-{} of {} · page {}/{}\n",
        page.start_index, page.end_index, page.total, page.page, page.total_pages
    ));
    md
}

/// Cross-match rows as a markdown table
pub fn format_cross_match(rows: &[CrossMatchRow]) -> String {
    let mut md = String::from("| Term | Fuzzy | Contains | Exact |\n|---|---|---|---|\n");
    for row in rows {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.term.replace('|', "\\|"),
            row.fuzzy.join(", "),
            row.contains.join(", "),
            row.exact.join(", ")
        ));
    }
    md
}

/// Pretty-printed JSON for any command output
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
