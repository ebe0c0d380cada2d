//! Index reader
//!
//! Loads the three index files written by [`write_index`](super::write_index):
//! the docs table and the term dictionary are parsed eagerly into memory, the
//! postings blob is held as raw bytes and decoded lazily per query. The
//! loaded index is immutable; queries never mutate it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Result, ScourError};

use super::codec::ByteReader;
use super::types::{
    DocId, DocRecord, Posting, TermEntry, DICT_FILE, DOCS_FILE, FORMAT_VERSION, MAGIC_DICT,
    MAGIC_DOCS, MAGIC_POST, POSTINGS_FILE,
};

/// Read-only view of an index directory.
pub struct IndexReader {
    docs: Vec<DocRecord>,
    dict: HashMap<String, TermEntry>,
    postings: Vec<u8>,
}

impl IndexReader {
    /// Load an index from `dir`. Fails with `BadFormat` on a magic or
    /// version mismatch and `BufferUnderrun` on truncated files.
    pub fn open(dir: &Path) -> Result<Self> {
        let docs = load_docs(&fs::read(dir.join(DOCS_FILE))?)?;
        let dict = load_dict(&fs::read(dir.join(DICT_FILE))?)?;
        let postings = fs::read(dir.join(POSTINGS_FILE))?;
        check_header(&postings, MAGIC_POST, POSTINGS_FILE)?;

        info!(
            docs = docs.len(),
            terms = dict.len(),
            postings_bytes = postings.len(),
            "index loaded"
        );
        Ok(Self {
            docs,
            dict,
            postings,
        })
    }

    pub fn doc_count(&self) -> u32 {
        self.docs.len() as u32
    }

    pub fn term_count(&self) -> usize {
        self.dict.len()
    }

    pub fn doc(&self, doc_id: DocId) -> Option<&DocRecord> {
        self.docs.get(doc_id as usize)
    }

    pub fn term_entry(&self, term: &str) -> Option<&TermEntry> {
        self.dict.get(term)
    }

    /// Document frequency of a term; 0 when unknown.
    pub fn doc_freq(&self, term: &str) -> u32 {
        self.dict.get(term).map(|e| e.doc_freq).unwrap_or(0)
    }

    /// Terms in the dictionary, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.dict.keys().map(String::as_str)
    }

    /// Decode the ascending doc-id list for a term, skipping position data.
    /// An unknown term yields the empty list.
    pub fn doc_ids(&self, term: &str) -> Result<Vec<DocId>> {
        let Some(entry) = self.dict.get(term) else {
            return Ok(Vec::new());
        };

        let mut reader = ByteReader::at_offset(&self.postings, entry.offset as usize);
        let doc_freq = reader.read_varbyte()?;
        let mut doc_ids = Vec::with_capacity(doc_freq as usize);
        let mut doc_id = 0;
        for _ in 0..doc_freq {
            doc_id += reader.read_varbyte()?;
            doc_ids.push(doc_id);
            let freq = reader.read_varbyte()?;
            for _ in 0..freq {
                reader.read_varbyte()?;
            }
        }
        Ok(doc_ids)
    }

    /// Fully decode a term's posting list, positions included.
    /// An unknown term yields the empty list.
    pub fn doc_positions(&self, term: &str) -> Result<Vec<Posting>> {
        let Some(entry) = self.dict.get(term) else {
            return Ok(Vec::new());
        };

        let mut reader = ByteReader::at_offset(&self.postings, entry.offset as usize);
        let doc_freq = reader.read_varbyte()?;
        let mut postings = Vec::with_capacity(doc_freq as usize);
        let mut doc_id = 0;
        for _ in 0..doc_freq {
            doc_id += reader.read_varbyte()?;
            let freq = reader.read_varbyte()?;
            let positions = reader.read_delta_varbyte(freq as usize)?;
            postings.push(Posting::new(doc_id, positions));
        }
        Ok(postings)
    }
}

/// Verify a file's magic and version header, leaving the cursor past it.
fn check_magic(reader: &mut ByteReader, magic: &[u8; 4], file: &str) -> Result<()> {
    if reader.read_bytes(4)? != magic {
        return Err(ScourError::BadFormat(format!("wrong magic in {file}")));
    }
    let version = reader.read_u16_le()?;
    if version != FORMAT_VERSION {
        return Err(ScourError::BadFormat(format!(
            "unsupported {file} version {version}, expected {FORMAT_VERSION}"
        )));
    }
    Ok(())
}

fn check_header(data: &[u8], magic: &[u8; 4], file: &str) -> Result<()> {
    check_magic(&mut ByteReader::new(data), magic, file)
}

fn load_docs(data: &[u8]) -> Result<Vec<DocRecord>> {
    let mut reader = ByteReader::new(data);
    check_magic(&mut reader, MAGIC_DOCS, DOCS_FILE)?;

    let count = reader.read_u32_le()? as usize;
    // Records are stored in doc_id order, so the offsets table is redundant
    // for a full sequential load.
    reader.read_bytes(count.checked_mul(8).ok_or_else(bad_doc_count)?)?;

    let mut docs = Vec::with_capacity(count);
    for _ in 0..count {
        let url = read_field(&mut reader)?;
        let title = read_field(&mut reader)?;
        docs.push(DocRecord { url, title });
    }
    Ok(docs)
}

fn bad_doc_count() -> ScourError {
    ScourError::BadFormat(format!("doc count overflows offsets table in {DOCS_FILE}"))
}

fn read_field(reader: &mut ByteReader) -> Result<String> {
    let len = reader.read_u16_le()? as usize;
    let bytes = reader.read_bytes(len)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ScourError::BadFormat(format!("invalid UTF-8 in {DOCS_FILE}")))
}

fn load_dict(data: &[u8]) -> Result<HashMap<String, TermEntry>> {
    let mut reader = ByteReader::new(data);
    check_magic(&mut reader, MAGIC_DICT, DICT_FILE)?;

    let count = reader.read_u32_le()? as usize;
    let mut dict = HashMap::with_capacity(count);
    for _ in 0..count {
        let term_len = reader.read_u8()? as usize;
        let term = reader.read_bytes(term_len)?;
        let term = String::from_utf8(term.to_vec())
            .map_err(|_| ScourError::BadFormat(format!("invalid UTF-8 in {DICT_FILE}")))?;
        let offset = reader.read_u64_le()?;
        let doc_freq = reader.read_u32_le()?;
        dict.insert(term, TermEntry { offset, doc_freq });
    }
    Ok(dict)
}
