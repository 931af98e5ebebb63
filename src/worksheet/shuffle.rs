//! Row-order randomization
//!
//! The server owns one [`PairShuffler`] for its whole lifetime. Production
//! uses [`ThreadRngShuffler`]; tests swap in [`SeededShuffler`] or
//! [`KeepOrder`] to assert exact row order.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::WordPair;

/// Source of the permutation applied to a worksheet's rows
pub trait PairShuffler: Send + Sync {
    fn shuffle(&self, pairs: &mut [WordPair]);
}

/// Uniform shuffle from the thread-local generator; independent per call
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngShuffler;

impl PairShuffler for ThreadRngShuffler {
    fn shuffle(&self, pairs: &mut [WordPair]) {
        pairs.shuffle(&mut rand::thread_rng());
    }
}

/// Uniform shuffle that repeats the same permutation for the same seed
#[derive(Debug, Clone, Copy)]
pub struct SeededShuffler {
    seed: u64,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl PairShuffler for SeededShuffler {
    fn shuffle(&self, pairs: &mut [WordPair]) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        pairs.shuffle(&mut rng);
    }
}

/// Leaves rows in submission order
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl PairShuffler for KeepOrder {
    fn shuffle(&self, _pairs: &mut [WordPair]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn sample() -> Vec<WordPair> {
        vec![
            WordPair::new("apple", "사과"),
            WordPair::new("banana", "바나나"),
            WordPair::new("cat", "고양이"),
        ]
    }

    fn sorted(mut pairs: Vec<WordPair>) -> Vec<WordPair> {
        pairs.sort_by(|a, b| (a.front(), a.back()).cmp(&(b.front(), b.back())));
        pairs
    }

    #[test]
    fn test_thread_rng_shuffle_is_permutation() {
        for _ in 0..50 {
            let mut pairs = sample();
            ThreadRngShuffler.shuffle(&mut pairs);
            assert_eq!(sorted(pairs), sorted(sample()));
        }
    }

    #[test]
    fn test_thread_rng_reaches_every_ordering() {
        let mut seen = HashSet::new();
        // 3! orderings; 500 draws miss one with probability ~6 * (5/6)^500
        for _ in 0..500 {
            let mut pairs = sample();
            ThreadRngShuffler.shuffle(&mut pairs);
            seen.insert(pairs);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_seeded_shuffle_repeats() {
        let shuffler = SeededShuffler::new(42);
        let mut first = sample();
        let mut second = sample();
        shuffler.shuffle(&mut first);
        shuffler.shuffle(&mut second);
        assert_eq!(first, second);
        assert_eq!(sorted(first), sorted(sample()));
    }

    #[test]
    fn test_keep_order() {
        let mut pairs = sample();
        KeepOrder.shuffle(&mut pairs);
        assert_eq!(pairs, sample());
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut empty: Vec<WordPair> = vec![];
        ThreadRngShuffler.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![WordPair::new("one", "하나")];
        SeededShuffler::new(7).shuffle(&mut single);
        assert_eq!(single, vec![WordPair::new("one", "하나")]);
    }
}
