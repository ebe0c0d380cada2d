//! Index writer
//!
//! Serializes a built index into three little-endian binary files:
//!
//! ```text
//! index.docs      "DOCS" | version u16 | doc_count u32
//!                 offsets[doc_count]: u64 (absolute record offsets)
//!                 records: u16 url_len | url | u16 title_len | title
//! index.dict      "DICT" | version u16 | term_count u32
//!                 entries: u8 term_len | term | u64 posting_offset | u32 doc_freq
//! index.postings  "POST" | version u16
//!                 per term: varbyte(doc_freq), then per document
//!                 varbyte(doc_id delta) | varbyte(freq) | varbyte position deltas
//! ```
//!
//! `posting_offset` is an absolute offset into index.postings (the 6-byte
//! header counts), pointing at the term's `varbyte(doc_freq)`. Dictionary
//! entries are emitted in hash-iteration order; readers must not assume any
//! term ordering.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;

use super::builder::IndexBuilder;
use super::codec::{encode_delta_varbyte, encode_varbyte};
use super::types::{
    DocRecord, DICT_FILE, DOCS_FILE, FORMAT_VERSION, MAGIC_DICT, MAGIC_DOCS, MAGIC_POST,
    MAX_TERM_LEN, POSTINGS_FILE,
};

/// Write all three index files into `dir`, creating it if needed.
///
/// All files are completely written before this returns Ok; a failure leaves
/// no claim of a usable index behind.
pub fn write_index(builder: &IndexBuilder, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    write_docs(builder.docs(), &dir.join(DOCS_FILE))?;
    let term_count = write_dict_and_postings(builder, dir)?;

    info!(
        docs = builder.doc_count(),
        terms = term_count,
        dir = %dir.display(),
        "index written"
    );
    Ok(())
}

fn write_docs(docs: &[DocRecord], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(MAGIC_DOCS)?;
    out.write_all(&FORMAT_VERSION.to_le_bytes())?;
    out.write_all(&(docs.len() as u32).to_le_bytes())?;

    // Header (10 bytes) plus the offsets table precede the first record.
    let mut offset = (4 + 2 + 4 + docs.len() * 8) as u64;
    for doc in docs {
        out.write_all(&offset.to_le_bytes())?;
        offset += (2 + clamp_len(doc.url.len()) + 2 + clamp_len(doc.title.len())) as u64;
    }

    for doc in docs {
        write_field(&mut out, &doc.url)?;
        write_field(&mut out, &doc.title)?;
    }
    out.flush()?;
    Ok(())
}

/// Field lengths are stored as u16; longer values are truncated.
fn clamp_len(len: usize) -> usize {
    len.min(u16::MAX as usize)
}

fn write_field(out: &mut impl Write, value: &str) -> Result<()> {
    let len = clamp_len(value.len());
    out.write_all(&(len as u16).to_le_bytes())?;
    out.write_all(&value.as_bytes()[..len])?;
    Ok(())
}

fn write_dict_and_postings(builder: &IndexBuilder, dir: &Path) -> Result<usize> {
    let mut dict = BufWriter::new(File::create(dir.join(DICT_FILE))?);
    dict.write_all(MAGIC_DICT)?;
    dict.write_all(&FORMAT_VERSION.to_le_bytes())?;
    dict.write_all(&(builder.postings().len() as u32).to_le_bytes())?;

    let mut blob = Vec::new();
    blob.extend_from_slice(MAGIC_POST);
    blob.extend_from_slice(&FORMAT_VERSION.to_le_bytes());

    for (term, postings) in builder.postings() {
        let offset = blob.len() as u64;

        encode_varbyte(postings.len() as u32, &mut blob);
        let mut prev_doc_id = 0;
        for posting in postings {
            encode_varbyte(posting.doc_id - prev_doc_id, &mut blob);
            prev_doc_id = posting.doc_id;
            encode_varbyte(posting.freq(), &mut blob);
            encode_delta_varbyte(&posting.positions, &mut blob);
        }

        let term_len = term.len().min(MAX_TERM_LEN);
        dict.write_all(&[term_len as u8])?;
        dict.write_all(&term.as_bytes()[..term_len])?;
        dict.write_all(&offset.to_le_bytes())?;
        dict.write_all(&(postings.len() as u32).to_le_bytes())?;
    }
    dict.flush()?;

    let mut post = File::create(dir.join(POSTINGS_FILE))?;
    post.write_all(&blob)?;

    Ok(builder.postings().len())
}
