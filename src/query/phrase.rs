//! Sequence (positional) matching
//!
//! A document matches `sequence(t_0..t_{k-1}, W)` iff positions
//! `p_0 < p_1 < ... < p_{k-1}` can be chosen, one from each term's position
//! list in that document, with `p_{k-1} - p_0 <= W`. When `W == k` the
//! query is an exact phrase and consecutive positions must be adjacent.
//!
//! Candidate documents come from intersecting the terms' posting lists; the
//! per-document position lists are then walked by a backtracking search.
//! The intersection and the position-list lookups share one sorted merge
//! over the decoded posting lists, so the whole scan is linear in their
//! combined size.

use crate::error::Result;
use crate::index::{DocId, IndexReader, Posting};

/// Evaluate a sequence query over stemmed terms.
///
/// Degenerate inputs yield the empty list: no terms, a window too small to
/// fit them (`W < k`), or any term absent from the corpus.
pub fn sequence_search(index: &IndexReader, terms: &[String], window: u32) -> Result<Vec<DocId>> {
    if terms.is_empty() || (window as usize) < terms.len() {
        return Ok(Vec::new());
    }

    let mut term_postings: Vec<Vec<Posting>> = Vec::with_capacity(terms.len());
    for term in terms {
        let postings = index.doc_positions(term)?;
        if postings.is_empty() {
            return Ok(Vec::new());
        }
        term_postings.push(postings);
    }

    let exact = window as usize == terms.len();
    let mut cursors = vec![0usize; term_postings.len()];
    let mut result = Vec::new();

    // k-way sorted merge: advance every cursor to the next doc_id present in
    // all posting lists, check positions there, then move on.
    'scan: loop {
        let mut target = match term_postings[0].get(cursors[0]) {
            Some(posting) => posting.doc_id,
            None => break,
        };

        let mut aligned = false;
        while !aligned {
            aligned = true;
            for (postings, cursor) in term_postings.iter().zip(cursors.iter_mut()) {
                while postings.get(*cursor).is_some_and(|p| p.doc_id < target) {
                    *cursor += 1;
                }
                match postings.get(*cursor) {
                    None => break 'scan,
                    Some(posting) if posting.doc_id > target => {
                        target = posting.doc_id;
                        aligned = false;
                    }
                    Some(_) => {}
                }
            }
        }

        let position_lists: Vec<&[u32]> = term_postings
            .iter()
            .zip(&cursors)
            .map(|(postings, &cursor)| postings[cursor].positions.as_slice())
            .collect();
        if find_path(&position_lists, 0, 0, 0, window, exact) {
            result.push(target);
        }
        cursors[0] += 1;
    }

    Ok(result)
}

/// Backtracking search for an in-order position assignment.
///
/// `prev_pos`/`first_pos` are only meaningful for `idx > 0`.
fn find_path(
    position_lists: &[&[u32]],
    idx: usize,
    prev_pos: u32,
    first_pos: u32,
    window: u32,
    exact: bool,
) -> bool {
    if idx == position_lists.len() {
        return true;
    }

    for &pos in position_lists[idx] {
        if idx == 0 {
            if find_path(position_lists, 1, pos, pos, window, exact) {
                return true;
            }
        } else if pos > prev_pos {
            if exact && pos != prev_pos + 1 {
                continue;
            }
            if pos - first_pos > window {
                // Positions ascend, so every later candidate overshoots too
                break;
            }
            if find_path(position_lists, idx + 1, pos, first_pos, window, exact) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{write_index, IndexBuilder};
    use tempfile::TempDir;

    fn fixture() -> (TempDir, IndexReader) {
        let mut builder = IndexBuilder::new();
        builder.add_document("u0", "t0", "the quick brown fox jumps over the lazy dog");
        builder.add_document("u1", "t1", "alpha beta gamma delta");
        builder.add_document("u2", "t2", "fox brown quick");
        let tmp = TempDir::new().unwrap();
        write_index(&builder, tmp.path()).unwrap();
        let index = IndexReader::open(tmp.path()).unwrap();
        (tmp, index)
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_exact_adjacency() {
        let (_tmp, index) = fixture();
        let t = terms(&["quick", "brown", "fox"]);
        assert_eq!(sequence_search(&index, &t, 3).unwrap(), vec![0]);
        // an exact-adjacency match also fits any wider window
        assert_eq!(sequence_search(&index, &t, 4).unwrap(), vec![0]);
    }

    #[test]
    fn test_order_is_respected() {
        let (_tmp, index) = fixture();
        // All three terms occur in doc 2, but never in this order adjacently
        let t = terms(&["quick", "fox", "brown"]);
        assert_eq!(sequence_search(&index, &t, 3).unwrap(), Vec::<DocId>::new());
    }

    #[test]
    fn test_window_boundary() {
        let (_tmp, index) = fixture();
        let t = terms(&["alpha", "delta"]);
        // positions 0 and 3: distance exactly 3
        assert_eq!(sequence_search(&index, &t, 3).unwrap(), vec![1]);
        assert_eq!(sequence_search(&index, &t, 2).unwrap(), Vec::<DocId>::new());
    }

    #[test]
    fn test_window_monotonicity() {
        let (_tmp, index) = fixture();
        let t = terms(&["quick", "fox"]);
        // W == k would demand adjacency; W = 3 admits the gap at positions 1 and 3
        let base = sequence_search(&index, &t, 3).unwrap();
        assert_eq!(base, vec![0]);
        for window in 4..8 {
            let wider = sequence_search(&index, &t, window).unwrap();
            assert!(base.iter().all(|d| wider.contains(d)));
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let (_tmp, index) = fixture();
        assert_eq!(sequence_search(&index, &[], 5).unwrap(), Vec::<DocId>::new());

        let t = terms(&["quick", "brown", "fox"]);
        // window smaller than the term count cannot be satisfied
        assert_eq!(sequence_search(&index, &t, 2).unwrap(), Vec::<DocId>::new());

        let t = terms(&["quick", "unknown"]);
        assert_eq!(sequence_search(&index, &t, 9).unwrap(), Vec::<DocId>::new());
    }

    #[test]
    fn test_single_term_sequence() {
        let (_tmp, index) = fixture();
        let t = terms(&["brown"]);
        assert_eq!(sequence_search(&index, &t, 1).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_repeated_term_needs_distinct_positions() {
        let mut builder = IndexBuilder::new();
        builder.add_document("u0", "t0", "echo echo");
        builder.add_document("u1", "t1", "lone echo here");
        let tmp = TempDir::new().unwrap();
        write_index(&builder, tmp.path()).unwrap();
        let index = IndexReader::open(tmp.path()).unwrap();

        let t = terms(&["echo", "echo"]);
        // Only doc 0 has two occurrences with ascending positions
        assert_eq!(sequence_search(&index, &t, 2).unwrap(), vec![0]);
    }
}
