//! Text tokenizer
//!
//! Splits raw text into stemmed index terms. A token is a maximal run of
//! ASCII alphanumeric bytes; every other byte (including non-ASCII) is a
//! separator. Tokens are lowercased and Porter-stemmed, so the position of a
//! term in the returned vector is its token index in the document.
//!
//! The same pipeline runs at index time and at query time: a query term
//! matches a corpus token iff their stems are equal.

use super::porter::stem;

/// Tokenize text into an ordered sequence of stemmed terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for &byte in text.as_bytes() {
        if byte.is_ascii_alphanumeric() {
            current.push(byte.to_ascii_lowercase() as char);
        } else if !current.is_empty() {
            tokens.push(stem(&current));
            current.clear();
        }
    }
    if !current.is_empty() {
        tokens.push(stem(&current));
    }

    tokens
}
