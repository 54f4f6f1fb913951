//! Levenshtein edit distance.

/// Calculate Levenshtein edit distance between two strings.
///
/// Counts single-character insertions, deletions and substitutions, all at
/// cost 1. Characters are Unicode scalar values.
///
/// Only two rows of `min(|a|, |b|) + 1` cells are allocated: the shorter
/// string always forms the inner dimension.
///
/// # Example
/// ```
/// use poimap_search::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
/// ```
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let (inner, outer) = if a_chars.len() > b_chars.len() {
        (&b_chars, &a_chars)
    } else {
        (&a_chars, &b_chars)
    };
    let n = inner.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for (j, &outer_char) in outer.iter().enumerate() {
        curr[0] = j + 1;
        for i in 1..=n {
            let cost = usize::from(inner[i - 1] != outer_char);
            curr[i] = (prev[i] + 1)
                .min(curr[i - 1] + 1)
                .min(prev[i - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_kitten_sitting() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("sitting", "kitten"), 3);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
        assert_eq!(levenshtein_distance("helo", "hello"), 1);
        assert_eq!(levenshtein_distance("hello", "helo"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abcd", ""), 4);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("brașov", "brasov"), 1);
        assert_eq!(levenshtein_distance("timișoara", "timisoara"), 1);
    }

    #[test]
    fn test_levenshtein_case_sensitive() {
        assert_eq!(levenshtein_distance("Cluj", "cluj"), 1);
    }

    proptest! {
        #[test]
        fn prop_identity(s in "\\PC{0,24}") {
            prop_assert_eq!(levenshtein_distance(&s, &s), 0);
        }

        #[test]
        fn prop_symmetric(a in "\\PC{0,16}", b in "\\PC{0,16}") {
            prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
        }

        #[test]
        fn prop_length_bounds(a in "[a-z ]{0,16}", b in "[a-z ]{0,16}") {
            let d = levenshtein_distance(&a, &b);
            let (la, lb) = (a.chars().count(), b.chars().count());
            prop_assert!(d <= la.max(lb));
            prop_assert!(d >= la.abs_diff(lb));
        }
    }
}
