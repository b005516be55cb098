use proptest::prelude::*;
use proptest::char::range as char_range;
use std::sync::Arc;
use crate::config::SearchConfig;
use crate::corpus::{Document, DocumentStore, ProposalMetadata};
use crate::search::{highlight, FuzzyIndex, FuzzyMatcher, Pattern};

fn index_of(titles: &[String]) -> FuzzyIndex {
    let docs = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let metadata = ProposalMetadata {
                id: Some(i as u64 + 1),
                program_title: Some(title.clone()),
                ..Default::default()
            };
            Document::new(format!("{}.md", i + 1), metadata, String::new())
        })
        .collect();
    FuzzyIndex::build(Arc::new(DocumentStore::new(docs)), &SearchConfig::default())
}

// Property test: whitespace-only queries never match anything
proptest! {
    #[test]
    fn blank_query_is_empty(query in "[ \t\n\r]{0,8}", titles in proptest::collection::vec("[a-z ]{0,20}", 0..5)) {
        let index = index_of(&titles);
        prop_assert!(index.search(&query).is_empty());
    }
}

// Property test: searching a document's exact title finds that document
proptest! {
    #[test]
    fn exact_title_is_recalled(titles in proptest::collection::vec("[a-z]{2,10}( [a-z]{2,10}){0,3}", 1..6), pick in 0usize..6) {
        let index = index_of(&titles);
        let target = pick % titles.len();
        let results = index.search(&titles[target]);
        let ids: Vec<u64> = results.iter().filter_map(|r| r.document.program_id()).collect();
        prop_assert!(ids.contains(&(target as u64 + 1)));
    }
}

// Property test: results are ordered closest first
proptest! {
    #[test]
    fn results_sorted_by_score(titles in proptest::collection::vec("[a-e]{3,12}", 1..8), query in "[a-e]{2,5}") {
        let index = index_of(&titles);
        let results = index.search(&query);
        for pair in results.windows(2) {
            prop_assert!(pair[0].score.value <= pair[1].score.value);
        }
    }
}

// Property test: a pattern occurring verbatim is an exact match at threshold 0
proptest! {
    #[test]
    fn verbatim_occurrence_has_no_errors(before in "[a-z ]{0,20}", needle in "[a-z]{2,12}", after in "[a-z ]{0,20}") {
        let text: Vec<char> = format!("{}{}{}", before, needle, after).chars().collect();
        let matcher = FuzzyMatcher::new(0.0, 2);
        let found = matcher.find(&Pattern::new(&needle), &text);
        prop_assert!(found.is_some());
        prop_assert_eq!(found.map(|m| m.errors), Some(0));
    }
}

// Property test: single newline between matches should allow merge, double newline should not
proptest! {
    #[test]
    fn highlight_newline_merge_behaviour(a in char_range('a', 'z'), b in char_range('a', 'z')) {
        let query = format!("{} {}", a, b);

        let single = highlight(&format!("{}\n{}", a, b), &query);
        prop_assert_eq!(single, format!("**{}\n{}**", a, b));

        let double = highlight(&format!("{}\n\n{}", a, b), &query);
        prop_assert_eq!(double, format!("**{}**\n\n**{}**", a, b));
    }
}
