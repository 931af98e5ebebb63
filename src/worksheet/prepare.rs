//! Turning raw form arrays into the final row order

use super::{PairShuffler, WordPair};

/// Trim, zip and filter the submitted term arrays.
///
/// Item *i* of `front` pairs with item *i* of `back`. When the arrays have
/// different lengths the surplus entries of the longer one are dropped.
/// Pairs whose trimmed sides are both empty are discarded.
pub fn pair_terms<S: AsRef<str>>(front: &[S], back: &[S]) -> Vec<WordPair> {
    if front.len() != back.len() {
        tracing::warn!(
            front = front.len(),
            back = back.len(),
            "term lists differ in length; extra entries ignored"
        );
    }

    front
        .iter()
        .zip(back)
        .map(|(f, b)| WordPair::new(f.as_ref().trim(), b.as_ref().trim()))
        .filter(|pair| !pair.is_blank())
        .collect()
}

/// [`pair_terms`] followed by one shuffle of the surviving pairs
pub fn prepare_pairs<S: AsRef<str>>(
    front: &[S],
    back: &[S],
    shuffler: &dyn PairShuffler,
) -> Vec<WordPair> {
    let mut pairs = pair_terms(front, back);
    shuffler.shuffle(&mut pairs);
    tracing::debug!(pairs = pairs.len(), "prepared worksheet rows");
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::{KeepOrder, SeededShuffler};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pair_terms_trims_values() {
        let pairs = pair_terms(&["  apple ", "banana\t"], &[" 사과", "바나나 "]);
        assert_eq!(
            pairs,
            vec![WordPair::new("apple", "사과"), WordPair::new("banana", "바나나")]
        );
    }

    #[test]
    fn test_pair_terms_keeps_one_sided_pairs() {
        let pairs = pair_terms(&["cat", ""], &["", "고양이"]);
        assert_eq!(
            pairs,
            vec![WordPair::new("cat", ""), WordPair::new("", "고양이")]
        );
    }

    #[test]
    fn test_pair_terms_drops_blank_pairs() {
        let pairs = pair_terms(&["", "  ", "dog"], &["", " ", "개"]);
        assert_eq!(pairs, vec![WordPair::new("dog", "개")]);
    }

    #[test]
    fn test_pair_terms_all_blank() {
        let pairs = pair_terms(&["", ""], &["", ""]);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_pair_terms_truncates_to_shorter_list() {
        let pairs = pair_terms(&["one", "two", "three"], &["하나"]);
        assert_eq!(pairs, vec![WordPair::new("one", "하나")]);

        let pairs = pair_terms(&["one"], &["하나", "둘", "셋"]);
        assert_eq!(pairs, vec![WordPair::new("one", "하나")]);
    }

    #[test]
    fn test_pair_terms_accepts_owned_strings() {
        let front = vec!["sun".to_string()];
        let back = vec!["해".to_string()];
        assert_eq!(pair_terms(&front, &back), vec![WordPair::new("sun", "해")]);
    }

    #[test]
    fn test_prepare_pairs_filters_before_shuffle() {
        let pairs = prepare_pairs(&["a", "", "c"], &["ㄱ", "", "ㄷ"], &KeepOrder);
        assert_eq!(pairs, vec![WordPair::new("a", "ㄱ"), WordPair::new("c", "ㄷ")]);
    }

    #[test]
    fn test_prepare_pairs_seeded_is_stable() {
        let front = ["a", "b", "c", "d", "e"];
        let back = ["ㄱ", "ㄴ", "ㄷ", "ㄹ", "ㅁ"];
        let shuffler = SeededShuffler::new(2024);
        assert_eq!(
            prepare_pairs(&front, &back, &shuffler),
            prepare_pairs(&front, &back, &shuffler)
        );
    }
}
