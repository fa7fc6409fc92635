use std::fmt::{self, Debug};

use serde::{Serialize, Serializer};

/// Inline set of small indices (0..8) stored as a bit mask.
///
/// Used for token indices so move queries never allocate.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TokenSet {
    bits: u8,
}

impl TokenSet {
    pub const CAPACITY: usize = u8::BITS as usize;

    pub const fn new() -> Self {
        TokenSet { bits: 0 }
    }

    /// Adds `index`. Returns false if it does not fit.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= Self::CAPACITY {
            return false;
        }
        self.bits |= 1 << index;
        true
    }

    pub fn remove(&mut self, index: usize) {
        if index < Self::CAPACITY {
            self.bits &= !(1 << index);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < Self::CAPACITY && self.bits & (1 << index) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn first(&self) -> Option<usize> {
        self.iter().next()
    }

    pub fn iter(&self) -> Iter {
        Iter { bits: self.bits }
    }
}

/// Ascending iterator over a [`TokenSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u8,
}

impl Iterator for Iter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for TokenSet {
    type Item = usize;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl IntoIterator for &TokenSet {
    type Item = usize;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<usize> for TokenSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for TokenSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
