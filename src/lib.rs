//! scour: a full-text search engine over a static corpus
//!
//! Documents are tokenized and Porter-stemmed into a positional inverted
//! index, persisted as three compact binary files, and queried with a
//! boolean language (`&&`, `||`, `!`, grouping, implicit AND) plus
//! positional phrase and proximity operators.
//!
//! Index time: [`tokenizer`] -> [`IndexBuilder`] -> [`write_index`].
//! Query time: [`IndexReader`] + [`QueryParser`] -> sorted doc-id lists.

pub mod error;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use error::{Result, ScourError};
pub use index::{write_index, IndexBuilder, IndexReader};
pub use query::{QueryNode, QueryParser};
pub use tokenizer::{stem, tokenize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
