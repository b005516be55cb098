use crate::config::SearchConfig;
use crate::corpus::{load_documents, RawDocument};
use crate::crossmatch::to_csv;
use crate::service::ProposalIndex;

fn blob(id: u64, title: &str, content: &str) -> RawDocument {
    RawDocument::new(
        format!("{}.md", id),
        format!(
            "---\nid: {}\nprogram_title: \"{}\"\ncycle: \"4\"\ninstrument_mode: NIRCam Imaging\n---\n\n{}\n",
            id, title, content
        ),
    )
}

fn scenario_index() -> ProposalIndex {
    let documents = load_documents(vec![
        blob(101, "Deep Survey of M82", "We study M82 in detail"),
        blob(102, "NGC 1068 AGN", "NGC 1068 hosts an active nucleus"),
        blob(103, "Unrelated Target", "no relevant keywords here"),
    ]);
    ProposalIndex::new(documents, &SearchConfig::default()).unwrap()
}

#[test]
fn test_scenario_blobs_parse() {
    let index = scenario_index();
    let a = index.get_by_id("101").unwrap();
    assert_eq!(a.title, "Deep Survey of M82");
    assert_eq!(a.content, "We study M82 in detail");
    assert_eq!(a.metadata.cycle.as_deref(), Some("4"));
}

#[test]
fn test_scenario_id_round_trip() {
    let index = scenario_index();
    for doc in index.get_all_documents() {
        let key = doc.metadata.id.unwrap().to_string();
        assert_eq!(index.get_by_id(&key), Some(doc));
    }
}

#[test]
fn test_scenario_cross_match() {
    let index = scenario_index();
    let rows = index.cross_match_input("M82, NGC 1068, 999");
    assert_eq!(rows.len(), 3);

    let m82 = &rows[0];
    assert_eq!(m82.term, "M82");
    assert_eq!(m82.contains, vec!["101"]);
    assert_eq!(m82.exact, vec!["101"]);
    assert!(m82.fuzzy.contains(&"101".to_string()));

    let ngc = &rows[1];
    assert_eq!(ngc.term, "NGC 1068");
    assert_eq!(ngc.contains, vec!["102"]);
    assert_eq!(ngc.exact, vec!["102"]);

    let miss = &rows[2];
    assert_eq!(miss.term, "999");
    assert!(miss.contains.is_empty());
    assert!(miss.exact.is_empty());
    assert!(miss.fuzzy.is_empty());
}

#[test]
fn test_scenario_csv_export() {
    let index = scenario_index();
    let csv = to_csv(&index.cross_match_input("999"));
    assert_eq!(csv.lines().nth(1), Some("\"999\",\"\",\"\",\"\""));
}

#[test]
fn test_scenario_search_ranks_exact_title_first() {
    let index = scenario_index();
    let results = index.search_documents("Deep Survey of M82");
    assert_eq!(results.first().and_then(|d| d.metadata.id), Some(101));
}
