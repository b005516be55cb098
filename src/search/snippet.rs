//! Result display helpers: content snippets and markdown highlighting

use aho_corasick::{AhoCorasick, MatchKind};
use unicode_segmentation::UnicodeSegmentation;

/// Characters kept on each side of the first query occurrence
pub const DEFAULT_SNIPPET_RADIUS: usize = 100;

const ELLIPSIS: &str = "...";

/// Excerpt of `content` around the first case-insensitive occurrence of
/// `query`, or its opening when the query does not occur verbatim.
pub fn snippet(content: &str, query: &str, radius: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    let query = query.trim();

    let found = if query.is_empty() {
        None
    } else {
        find_char_index(&chars, query)
    };

    match found {
        Some((start, len)) => {
            let from = start.saturating_sub(radius);
            let to = (start + len + radius).min(chars.len());
            let excerpt: String = chars[from..to].iter().collect();
            format!("{}{}{}", ELLIPSIS, excerpt, ELLIPSIS)
        }
        None => {
            let excerpt: String = chars.iter().take(radius * 2).collect();
            format!("{}{}", excerpt, ELLIPSIS)
        }
    }
}

/// Case-insensitive search by character position, returning (start, length)
fn find_char_index(chars: &[char], query: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() || needle.len() > chars.len() {
        return None;
    }

    let lowered: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    lowered
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, needle.len()))
}

/// Wrap each occurrence of the query's words in `**bold**`.
///
/// Occurrences are found case-insensitively (ASCII case folding). Ranges
/// that overlap or are separated by a single space or line break are merged
/// into one bold run.
pub fn highlight(text: &str, query: &str) -> String {
    let words: Vec<&str> = query.unicode_words().collect();
    if words.is_empty() {
        return text.to_string();
    }

    let automaton = match AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostLongest)
        .build(&words)
    {
        Ok(automaton) => automaton,
        Err(_) => return text.to_string(),
    };

    let mut ranges: Vec<(usize, usize)> = automaton
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            Some(last) if is_word_gap(&text[last.1..start]) => last.1 = end,
            _ => merged.push((start, end)),
        }
    }

    let mut result = String::with_capacity(text.len() + merged.len() * 4);
    let mut last_idx = 0usize;
    for (start, end) in merged {
        result.push_str(&text[last_idx..start]);
        result.push_str("**");
        result.push_str(&text[start..end]);
        result.push_str("**");
        last_idx = end;
    }
    result.push_str(&text[last_idx..]);

    result
}

/// A single space or line break between two highlighted words joins them
fn is_word_gap(gap: &str) -> bool {
    matches!(gap, " " | "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_around_match() {
        let content = format!("{}M82 starburst{}", "a".repeat(150), "b".repeat(150));
        let s = snippet(&content, "m82", 100);
        assert!(s.starts_with("..."));
        assert!(s.ends_with("..."));
        assert!(s.contains("M82 starburst"));
        // 100 before, the match, 100 after, plus both ellipses
        assert_eq!(s.chars().count(), 100 + 3 + 100 + 6);
    }

    #[test]
    fn test_snippet_near_start() {
        let s = snippet("M82 is a galaxy", "m82", 100);
        assert_eq!(s, "...M82 is a galaxy...");
    }

    #[test]
    fn test_snippet_without_match() {
        let content = "x".repeat(500);
        let s = snippet(&content, "absent", 100);
        assert_eq!(s.chars().count(), 200 + 3);
        assert!(!s.starts_with("..."));
    }

    #[test]
    fn test_snippet_empty_query() {
        assert_eq!(snippet("short", "", 100), "short...");
    }

    #[test]
    fn test_snippet_multibyte() {
        let content = format!("{}é target é{}", "ü".repeat(20), "ö".repeat(20));
        let s = snippet(&content, "TARGET", 5);
        assert_eq!(s, "...üüüé target éööö...");
    }

    #[test]
    fn test_highlight_words() {
        let out = highlight("We study M82 in detail", "m82 detail");
        assert_eq!(out, "We study **M82** in **detail**");
    }

    #[test]
    fn test_highlight_merges_adjacent() {
        let out = highlight("NGC 1068 hosts an active nucleus", "ngc 1068");
        assert_eq!(out, "**NGC 1068** hosts an active nucleus");
    }

    #[test]
    fn test_highlight_single_newline_merges_double_does_not() {
        assert_eq!(highlight("a\nb", "a b"), "**a\nb**");
        assert_eq!(highlight("a\n\nb", "a b"), "**a**\n\n**b**");
    }

    #[test]
    fn test_highlight_no_match() {
        assert_eq!(highlight("nothing here", "xyz"), "nothing here");
        assert_eq!(highlight("nothing here", ""), "nothing here");
    }
}
