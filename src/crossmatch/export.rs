//! CSV export of cross-match rows
//!
//! Four columns per row: the term and the three id lists. Every cell is
//! quoted, with embedded quotes doubled.

use super::CrossMatchRow;

pub const CSV_HEADER: [&str; 4] = [
    "Terms",
    "Fuzzy Search Results",
    "Contains Match Results",
    "Exact Match Results",
];

/// Separator between ids inside one cell
pub const ID_DELIMITER: &str = ", ";

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_line<'a, I>(cells: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    cells.into_iter().map(csv_cell).collect::<Vec<_>>().join(",")
}

/// Render rows as CSV text, header first, lines joined by `\n`
pub fn to_csv(rows: &[CrossMatchRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(CSV_HEADER));

    for row in rows {
        let fuzzy = row.fuzzy.join(ID_DELIMITER);
        let contains = row.contains.join(ID_DELIMITER);
        let exact = row.exact.join(ID_DELIMITER);
        lines.push(csv_line([
            row.term.as_str(),
            fuzzy.as_str(),
            contains.as_str(),
            exact.as_str(),
        ]));
    }

    lines.join("\n")
}
