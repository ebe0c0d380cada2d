//! End-to-end query evaluation over a written-and-reloaded index

use scour::index::{write_index, IndexBuilder, IndexReader};
use scour::query::{sequence_search, QueryParser};
use tempfile::TempDir;

fn open_index(docs: &[&str]) -> (TempDir, IndexReader) {
    let mut builder = IndexBuilder::new();
    for (i, text) in docs.iter().enumerate() {
        builder.add_document(&format!("http://d/{i}"), &format!("doc{i}"), text);
    }
    let tmp = TempDir::new().unwrap();
    write_index(&builder, tmp.path()).unwrap();
    let index = IndexReader::open(tmp.path()).unwrap();
    (tmp, index)
}

fn run(index: &IndexReader, query: &str) -> Vec<u32> {
    QueryParser::new(query).parse().execute(index).unwrap()
}

#[test]
fn stemming_unifies_query_and_corpus_forms() {
    let (_tmp, index) = open_index(&["cats eat fish", "the cat ate fish"]);

    // "cats" and "cat" both stem to "cat"
    assert_eq!(run(&index, "cat"), vec![0, 1]);
    assert_eq!(run(&index, "cats"), vec![0, 1]);
}

#[test]
fn conjunction_and_negation() {
    let (_tmp, index) = open_index(&["cats eat fish", "the cat ate fish"]);

    assert_eq!(run(&index, "cat && fish"), vec![0, 1]);
    assert_eq!(run(&index, "cat && !fish"), Vec::<u32>::new());
}

#[test]
fn disjunction_with_unknown_term() {
    let (_tmp, index) = open_index(&["cats eat fish", "the cat ate fish"]);

    assert_eq!(run(&index, "cats || dogs"), vec![0, 1]);
    assert_eq!(run(&index, "dogs"), Vec::<u32>::new());
}

#[test]
fn implicit_and_matches_explicit() {
    let (_tmp, index) = open_index(&["cats eat fish", "the cat ate fish", "fish tank"]);

    assert_eq!(run(&index, "cat fish"), run(&index, "cat && fish"));
}

#[test]
fn grouping_and_precedence() {
    let (_tmp, index) = open_index(&["alpha beta", "alpha gamma", "beta gamma"]);

    // && binds tighter: alpha || (beta && gamma)
    assert_eq!(run(&index, "alpha || beta && gamma"), vec![0, 1, 2]);
    // grouping flips it: (alpha || beta) && gamma
    assert_eq!(run(&index, "(alpha || beta) && gamma"), vec![1, 2]);
}

#[test]
fn de_morgan_duality_holds() {
    let (_tmp, index) = open_index(&["alpha beta", "alpha gamma", "beta gamma", "delta"]);

    for (x, y) in [("alpha", "beta"), ("alpha", "delta"), ("beta", "gamma")] {
        let lhs = run(&index, &format!("!({x} && {y})"));
        let rhs = run(&index, &format!("!{x} || !{y}"));
        assert_eq!(lhs, rhs, "duality for {x}, {y}");
    }
}

#[test]
fn exact_phrase_query() {
    let (_tmp, index) = open_index(&[
        "the quick brown fox jumps over the lazy dog",
        "brown quick fox",
    ]);

    assert_eq!(run(&index, "\"quick brown fox\""), vec![0]);
    assert_eq!(run(&index, "\"quick fox brown\""), Vec::<u32>::new());
}

#[test]
fn proximity_query_window() {
    let (_tmp, index) = open_index(&["alpha beta gamma delta"]);

    assert_eq!(run(&index, "\"alpha delta\"/3"), vec![0]);
    assert_eq!(run(&index, "\"alpha delta\"/2"), Vec::<u32>::new());
}

#[test]
fn phrase_syntax_matches_direct_sequence_search() {
    let (_tmp, index) = open_index(&[
        "the quick brown fox jumps over the lazy dog",
        "quick thinking saves the fox",
    ]);

    let terms = vec!["quick".to_string(), "fox".to_string()];
    for window in 2..6 {
        let direct = sequence_search(&index, &terms, window).unwrap();
        let parsed = run(&index, &format!("\"quick fox\"/{window}"));
        assert_eq!(parsed, direct, "window {window}");
    }
}

#[test]
fn phrase_composes_with_boolean_operators() {
    let (_tmp, index) = open_index(&[
        "rust systems programming",
        "systems programming in c",
        "rust web programming",
    ]);

    assert_eq!(run(&index, "\"systems programming\" && !rust"), vec![1]);
    assert_eq!(run(&index, "\"systems programming\" || rust"), vec![0, 1, 2]);
}

#[test]
fn malformed_queries_degrade_gracefully() {
    let (_tmp, index) = open_index(&["cats eat fish", "the cat ate fish"]);

    assert_eq!(run(&index, "&& cat"), run(&index, "cat"));
    assert_eq!(run(&index, "cat &&"), Vec::<u32>::new());
    assert_eq!(run(&index, "(cat"), run(&index, "cat"));
    assert_eq!(run(&index, ""), Vec::<u32>::new());
    assert_eq!(run(&index, "!"), vec![0, 1]);
}

#[test]
fn results_are_ascending_doc_ids() {
    let (_tmp, index) = open_index(&[
        "common alpha",
        "common beta",
        "common gamma",
        "common alpha beta",
    ]);

    for query in ["common", "alpha || beta || gamma", "!gamma", "common && alpha"] {
        let results = run(&index, query);
        assert!(results.windows(2).all(|w| w[0] < w[1]), "query {query}");
    }
}
