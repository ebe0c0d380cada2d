//! Evaluation tree for parsed queries
//!
//! Nodes evaluate to sorted doc-id lists against a loaded [`IndexReader`].
//! Evaluation is stateless: the same tree against the same index always
//! yields the same list, and nothing in the index is mutated.

use crate::error::Result;
use crate::index::{ops, DocId, IndexReader};

use super::phrase::sequence_search;

/// A node in the boolean/sequence query tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryNode {
    /// No usable operand (empty query or parse recovery); matches nothing.
    Empty,
    /// A single stemmed term.
    Term(String),
    /// Stemmed terms that must occur in order within a position window.
    /// `window == terms.len()` means exact adjacency.
    Sequence { terms: Vec<String>, window: u32 },
    /// Complement over the whole corpus.
    Not(Box<QueryNode>),
    And(Box<QueryNode>, Box<QueryNode>),
    Or(Box<QueryNode>, Box<QueryNode>),
}

impl QueryNode {
    /// Evaluate this node to an ascending doc-id list.
    pub fn execute(&self, index: &IndexReader) -> Result<Vec<DocId>> {
        match self {
            QueryNode::Empty => Ok(Vec::new()),
            QueryNode::Term(term) => index.doc_ids(term),
            QueryNode::Sequence { terms, window } => sequence_search(index, terms, *window),
            QueryNode::Not(inner) => {
                let universe: Vec<DocId> = (0..index.doc_count()).collect();
                Ok(ops::diff(&universe, &inner.execute(index)?))
            }
            QueryNode::And(left, right) => Ok(ops::intersect(
                &left.execute(index)?,
                &right.execute(index)?,
            )),
            QueryNode::Or(left, right) => {
                Ok(ops::union(&left.execute(index)?, &right.execute(index)?))
            }
        }
    }

    pub fn and(left: QueryNode, right: QueryNode) -> QueryNode {
        QueryNode::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: QueryNode, right: QueryNode) -> QueryNode {
        QueryNode::Or(Box::new(left), Box::new(right))
    }

    pub fn not(inner: QueryNode) -> QueryNode {
        QueryNode::Not(Box::new(inner))
    }
}
