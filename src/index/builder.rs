//! In-memory index builder
//!
//! Consumes `(url, title, text)` records in order, assigning dense doc_ids,
//! and accumulates a positional inverted index: a docs table plus a
//! `term -> posting list` map. Because documents arrive in doc_id order and
//! tokens in position order, doc_ids are strictly ascending within every
//! term and positions strictly ascending within every posting, with no
//! sorting pass needed.

use std::collections::HashMap;

use crate::tokenizer::tokenize;

use super::types::{DocId, DocRecord, Posting};

/// Accumulates a corpus into memory before it is written out.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    docs: Vec<DocRecord>,
    terms: HashMap<String, Vec<Posting>>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document, assigning the next doc_id; returns it.
    pub fn add_document(&mut self, url: &str, title: &str, text: &str) -> DocId {
        let doc_id = self.docs.len() as DocId;
        self.docs.push(DocRecord::new(url, title));

        for (position, token) in tokenize(text).into_iter().enumerate() {
            let postings = self.terms.entry(token).or_default();
            match postings.last_mut() {
                Some(last) if last.doc_id == doc_id => last.positions.push(position as u32),
                _ => postings.push(Posting::new(doc_id, vec![position as u32])),
            }
        }

        doc_id
    }

    pub fn doc_count(&self) -> u32 {
        self.docs.len() as u32
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// The docs table, indexed by doc_id.
    pub fn docs(&self) -> &[DocRecord] {
        &self.docs
    }

    /// All accumulated posting lists (hash-iteration order).
    pub fn postings(&self) -> &HashMap<String, Vec<Posting>> {
        &self.terms
    }
}
