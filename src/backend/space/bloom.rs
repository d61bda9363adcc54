//! Bloom filter for (head symbol, arity) pairs of stored expressions.
//!
//! Lets `GroundingSpace::query` skip the linear scan when no stored
//! expression can have the pattern's head and arity.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::backend::models::Atom;

/// Bloom filter for (head, arity) pairs.
///
/// Kirsch-Mitzenmacher double hashing with k=3 hash functions, 10 bits per
/// expected entry. False positives only cost a scan; there are no false
/// negatives. Deletions are not supported, so removals are counted and the
/// owner rebuilds the filter once they pile up.
#[derive(Clone)]
pub(crate) struct HeadArityBloomFilter {
    bits: Vec<u64>,
    num_bits: usize,
    num_insertions: usize,
    num_deletions: usize,
}

impl HeadArityBloomFilter {
    /// Filter sized for `expected_entries`, at least 1024 bits
    pub fn new(expected_entries: usize) -> Self {
        let num_bits = expected_entries.saturating_mul(10).max(1024);
        let num_words = (num_bits + 63) / 64;
        Self {
            bits: vec![0; num_words],
            num_bits,
            num_insertions: 0,
            num_deletions: 0,
        }
    }

    #[inline]
    pub fn insert(&mut self, head: &str, arity: usize) {
        let (h1, h2) = Self::hash_pair(head, arity);
        for i in 0usize..3 {
            let idx = h1.wrapping_add(i.wrapping_mul(h2)) % self.num_bits;
            self.bits[idx / 64] |= 1 << (idx % 64);
        }
        self.num_insertions += 1;
    }

    /// False only if the pair was definitely never inserted
    #[inline]
    pub fn may_contain(&self, head: &str, arity: usize) -> bool {
        let (h1, h2) = Self::hash_pair(head, arity);
        (0usize..3).all(|i| {
            let idx = h1.wrapping_add(i.wrapping_mul(h2)) % self.num_bits;
            self.bits[idx / 64] & (1 << (idx % 64)) != 0
        })
    }

    pub fn needs_rebuild(&self) -> bool {
        self.num_deletions > self.num_insertions / 4
    }

    pub fn note_deletion(&mut self) {
        self.num_deletions += 1;
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
        self.num_insertions = 0;
        self.num_deletions = 0;
    }

    #[inline]
    fn hash_pair(head: &str, arity: usize) -> (usize, usize) {
        let mut hasher = DefaultHasher::new();
        head.hash(&mut hasher);
        arity.hash(&mut hasher);
        let h = hasher.finish();
        (h as usize, (h >> 32) as usize)
    }
}

/// (head symbol, arity) of an expression headed by a symbol
pub(crate) fn head_key(atom: &Atom) -> Option<(&str, usize)> {
    match atom {
        Atom::Expression(e) => match e.head() {
            Some(Atom::Symbol(head)) => Some((head.name(), e.arity())),
            _ => None,
        },
        _ => None,
    }
}
