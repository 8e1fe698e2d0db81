//! Growable bit sequence with positional insert/remove and rank.
//!
//! Behaves like a conceptually infinite `Vec<bool>` (default `false`) that
//! additionally supports `insert`-at and `remove`-at with standard shifting
//! semantics, but stores one bit per position and shifts a whole word at a
//! time. All operations cost O(words touched), not O(positions).
//!
//! # Layout
//!
//! Backed by a flat `Vec<u64>`: word `k` holds bits `[64k, 64k + 64)`.
//! The vector grows lazily, only when a `set` or `insert` actually addresses
//! a word that does not yet exist (or shifts a bit past the last word).
//! Reads treat the missing tail as all-zero, and clearing never shrinks.
//!
//! # Why not a static rank structure
//!
//! Rank-indexed bit vectors answer `rank` in O(1) but are build-once: a
//! single positional insert would invalidate every precomputed block count.
//! This sequence sits at the other end of the trade-off, paying a short word
//! scan per query in exchange for O(words) structural mutation, which is the
//! right balance when the sequence is mutated on every layout pass and spans
//! a few hundred positions at most.

use std::fmt;

const WORD_BITS: usize = u64::BITS as usize;
const TOP_BIT: u64 = 1 << (WORD_BITS - 1);

/// Mask covering the bits strictly below `bit` within one word.
#[inline]
fn low_mask(bit: usize) -> u64 {
    debug_assert!(bit < WORD_BITS);
    (1u64 << bit).wrapping_sub(1)
}

/// A growable bit sequence supporting point updates, positional
/// insert/remove, and prefix population count.
#[derive(Clone, Default)]
pub struct ElasticBits {
    words: Vec<u64>,
}

impl ElasticBits {
    /// Create an empty bit sequence; every position reads as `false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the word holding `word_index` exists, zero-filling on the way.
    fn grow_to(&mut self, word_index: usize) {
        if self.words.len() <= word_index {
            self.words.resize(word_index + 1, 0);
        }
    }

    /// Set the bit at `index`, extending the backing storage if needed.
    pub fn set(&mut self, index: usize) {
        let word = index / WORD_BITS;
        self.grow_to(word);
        self.words[word] |= 1 << (index % WORD_BITS);
    }

    /// Clear the bit at `index`. Positions beyond the backing storage are
    /// already zero, so no extension happens.
    pub fn clear(&mut self, index: usize) {
        let word = index / WORD_BITS;
        if word < self.words.len() {
            self.words[word] &= !(1 << (index % WORD_BITS));
        }
    }

    /// Return the bit at `index`; the missing tail reads as `false`.
    pub fn get(&self, index: usize) -> bool {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            return false;
        }
        self.words[word] & (1 << (index % WORD_BITS)) != 0
    }

    /// Clear every bit without shrinking the backing storage.
    pub fn reset(&mut self) {
        self.words.fill(0);
    }

    /// Insert `value` at `index`, shifting every bit at and above `index` up
    /// by one. The bit shifted off the top of each word carries into the next
    /// word's bit 0; a carry past the last word extends the storage.
    pub fn insert(&mut self, index: usize, value: bool) {
        let word = index / WORD_BITS;
        let bit = index % WORD_BITS;
        self.grow_to(word);

        let mask = low_mask(bit);
        let mut carry = self.words[word] & TOP_BIT != 0;
        self.words[word] = (self.words[word] & mask) | ((self.words[word] & !mask) << 1);
        if value {
            self.words[word] |= 1 << bit;
        } else {
            self.words[word] &= !(1 << bit);
        }

        for w in word + 1..self.words.len() {
            let next_carry = self.words[w] & TOP_BIT != 0;
            self.words[w] = (self.words[w] << 1) | u64::from(carry);
            carry = next_carry;
        }
        if carry {
            self.words.push(1);
        }
    }

    /// Remove and return the bit at `index`, shifting every bit above `index`
    /// down by one; bit 0 of each following word borrows into the top bit of
    /// the word before it. An index beyond the backing storage reads as zero
    /// and returns `false` without extending.
    pub fn remove(&mut self, index: usize) -> bool {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            return false;
        }
        let bit = index % WORD_BITS;

        let mask = 1u64 << bit;
        let value = self.words[word] & mask != 0;
        self.words[word] &= !mask;
        // Bit `bit` is now zero, so the plain shift cannot leak it into the
        // kept lower half.
        let low = low_mask(bit);
        self.words[word] = (self.words[word] & low) | ((self.words[word] & !low) >> 1);

        for w in word + 1..self.words.len() {
            if self.words[w] & 1 != 0 {
                self.words[w - 1] |= TOP_BIT;
            }
            self.words[w] >>= 1;
        }
        value
    }

    /// Return the number of set bits in `[0, index)`, the rank of `index`.
    pub fn count_ones_before(&self, index: usize) -> usize {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            return self.words.iter().map(|w| w.count_ones() as usize).sum();
        }
        let full: usize = self.words[..word].iter().map(|w| w.count_ones() as usize).sum();
        full + (self.words[word] & low_mask(index % WORD_BITS)).count_ones() as usize
    }
}

impl fmt::Debug for ElasticBits {
    /// Render the words in binary, most-significant word first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.words.is_empty() {
            return write!(f, "0");
        }
        let mut rest = self.words.iter().rev();
        // Highest word unpadded, lower words zero-padded to full width.
        if let Some(top) = rest.next() {
            write!(f, "{top:b}")?;
        }
        for w in rest {
            write!(f, "xx{w:064b}")?;
        }
        Ok(())
    }
}
