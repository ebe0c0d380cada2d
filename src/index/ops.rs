//! Merge operators over sorted doc-id lists
//!
//! All three operators take strictly ascending doc-id slices and produce a
//! strictly ascending result in a single linear pass.

use super::types::DocId;

/// Doc_ids present in `a` or `b`, duplicates collapsed.
pub fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                result.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    result.extend_from_slice(&a[i..]);
    result.extend_from_slice(&b[j..]);
    result
}

/// Doc_ids present in both `a` and `b`.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    result
}

/// Doc_ids present in `a` but absent from `b`.
pub fn diff(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    result.extend_from_slice(&a[i..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &[DocId] = &[1, 3, 5, 9];
    const B: &[DocId] = &[2, 3, 9, 11];

    #[test]
    fn test_union() {
        assert_eq!(union(A, B), vec![1, 2, 3, 5, 9, 11]);
        assert_eq!(union(B, A), vec![1, 2, 3, 5, 9, 11]);
    }

    #[test]
    fn test_intersect() {
        assert_eq!(intersect(A, B), vec![3, 9]);
        assert_eq!(intersect(B, A), vec![3, 9]);
    }

    #[test]
    fn test_diff() {
        assert_eq!(diff(A, B), vec![1, 5]);
        assert_eq!(diff(B, A), vec![2, 11]);
    }

    #[test]
    fn test_identity_laws() {
        assert_eq!(union(A, A), A);
        assert_eq!(intersect(A, A), A);
        assert_eq!(diff(A, A), Vec::<DocId>::new());
    }

    #[test]
    fn test_empty_laws() {
        assert_eq!(union(A, &[]), A);
        assert_eq!(union(&[], A), A);
        assert_eq!(intersect(A, &[]), Vec::<DocId>::new());
        assert_eq!(diff(A, &[]), A);
        assert_eq!(diff(&[], A), Vec::<DocId>::new());
    }

    #[test]
    fn test_results_stay_sorted() {
        for result in [union(A, B), intersect(A, B), diff(A, B)] {
            assert!(result.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
