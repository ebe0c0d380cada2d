//! Core types and on-disk constants for the inverted index

/// Dense document identifier, assigned by insertion order (0..doc_count).
pub type DocId = u32;

/// Names of the three index files inside an index directory.
pub const DOCS_FILE: &str = "index.docs";
pub const DICT_FILE: &str = "index.dict";
pub const POSTINGS_FILE: &str = "index.postings";

/// Magic numbers heading each index file.
pub const MAGIC_DOCS: &[u8; 4] = b"DOCS";
pub const MAGIC_DICT: &[u8; 4] = b"DICT";
pub const MAGIC_POST: &[u8; 4] = b"POST";

/// On-disk format version; readers reject anything else.
pub const FORMAT_VERSION: u16 = 3;

/// Dictionary terms are truncated to this many bytes on disk (u8 length).
pub const MAX_TERM_LEN: usize = 255;

/// A stored document record: what the docs table holds per doc_id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocRecord {
    pub url: String,
    pub title: String,
}

impl DocRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Dictionary entry: where a term's posting list starts and how many
/// documents contain the term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TermEntry {
    /// Absolute byte offset of the posting list in the postings file.
    pub offset: u64,
    /// Number of distinct documents containing the term.
    pub doc_freq: u32,
}

/// Decoded posting: a document and the token positions at which the term
/// occurs, strictly ascending. `positions` is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub positions: Vec<u32>,
}

impl Posting {
    pub fn new(doc_id: DocId, positions: Vec<u32>) -> Self {
        Self { doc_id, positions }
    }

    /// Term frequency in this document.
    pub fn freq(&self) -> u32 {
        self.positions.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_freq() {
        let posting = Posting::new(7, vec![0, 4, 9]);
        assert_eq!(posting.doc_id, 7);
        assert_eq!(posting.freq(), 3);
    }
}
