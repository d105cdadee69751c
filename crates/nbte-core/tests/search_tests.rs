use nbte_core::{Compound, Document, NodePath, ParseError, SearchIndex, SearchQuery, Tag};

fn query(text: &str) -> SearchQuery {
    SearchQuery {
        text: text.to_string(),
        case_sensitive: false,
        use_regex: false,
    }
}

fn sample_doc() -> Document {
    let mut doc = Document::new();
    let root = NodePath::root();
    doc.insert_child(&root, "Level", Tag::Compound(Compound::new()))
        .unwrap();
    let level = NodePath::parse("/Level");
    doc.insert_child(&level, "Name", Tag::String("World".into()))
        .unwrap();
    doc.insert_child(&level, "Health", Tag::Int(20)).unwrap();
    doc.insert_child(&level, "health_max", Tag::Int(100))
        .unwrap();
    doc
}

#[test]
fn substring_folds_case_by_default() {
    let doc = sample_doc();
    let index = SearchIndex::build(&doc, &query("health")).unwrap();
    let paths: Vec<String> = index.matches().iter().map(|p| p.to_string()).collect();
    assert_eq!(paths, vec!["/Level/Health", "/Level/health_max"]);

    let mut q = query("health");
    q.case_sensitive = true;
    let index = SearchIndex::build(&doc, &q).unwrap();
    let paths: Vec<String> = index.matches().iter().map(|p| p.to_string()).collect();
    assert_eq!(paths, vec!["/Level/health_max"]);
}

#[test]
fn values_of_leaf_nodes_are_searched() {
    let doc = sample_doc();
    // "World" only appears as the value of /Level/Name
    let index = SearchIndex::build(&doc, &query("world")).unwrap();
    let paths: Vec<String> = index.matches().iter().map(|p| p.to_string()).collect();
    assert_eq!(paths, vec!["/Level/Name"]);

    // container value summaries ("2 entries") do not match
    let index = SearchIndex::build(&doc, &query("entries")).unwrap();
    assert!(index.is_empty());
}

#[test]
fn regex_matching() {
    let doc = sample_doc();
    let mut q = query("^He");
    q.use_regex = true;
    q.case_sensitive = true;
    let index = SearchIndex::build(&doc, &q).unwrap();
    let paths: Vec<String> = index.matches().iter().map(|p| p.to_string()).collect();
    assert_eq!(paths, vec!["/Level/Health"]);

    let mut q = query("(");
    q.use_regex = true;
    let err = SearchIndex::build(&doc, &q).unwrap_err();
    assert!(matches!(err, ParseError::InvalidRegex(_)));
}

#[test]
fn circular_navigation() {
    let doc = sample_doc();
    let mut index = SearchIndex::build(&doc, &query("health")).unwrap();
    assert_eq!(index.len(), 2);
    assert!(index.current().is_none());

    assert_eq!(index.next_match().unwrap().to_string(), "/Level/Health");
    assert_eq!(index.next_match().unwrap().to_string(), "/Level/health_max");
    // wraps around
    assert_eq!(index.next_match().unwrap().to_string(), "/Level/Health");
    assert_eq!(index.prev_match().unwrap().to_string(), "/Level/health_max");

    // from the initial position, the backward step is (-1 - 1) mod len:
    // with two matches that is match 0
    let mut fresh = SearchIndex::build(&doc, &query("health")).unwrap();
    assert_eq!(fresh.prev_match().unwrap().to_string(), "/Level/Health");
}

#[test]
fn backward_from_initial_position_skips_the_last_match() {
    let mut doc = sample_doc();
    doc.insert_child(&NodePath::root(), "health_bonus", Tag::Int(5))
        .unwrap();
    let mut index = SearchIndex::build(&doc, &query("health")).unwrap();
    let paths: Vec<String> = index.matches().iter().map(|p| p.to_string()).collect();
    assert_eq!(
        paths,
        vec!["/Level/Health", "/Level/health_max", "/health_bonus"]
    );
    // second-to-last first, then stepping back continues the cycle
    assert_eq!(index.prev_match().unwrap().to_string(), "/Level/health_max");
    assert_eq!(index.prev_match().unwrap().to_string(), "/Level/Health");
    assert_eq!(index.prev_match().unwrap().to_string(), "/health_bonus");
}

#[test]
fn empty_index_navigation() {
    let doc = sample_doc();
    let mut index = SearchIndex::build(&doc, &query("zzz")).unwrap();
    assert!(index.is_empty());
    assert!(index.next_match().is_none());
    assert!(index.prev_match().is_none());
    assert!(index.current().is_none());
}
