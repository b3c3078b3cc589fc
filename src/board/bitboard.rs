//! Variable-length bitboard used as the occupancy index

use std::collections::TryReserveError;

use super::try_filled;

/// One bit per cell, row-major.
///
/// Sized at construction for `len` cells; the tail of the last word is never set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: Vec<u64>,
    len: usize,
}

impl Bitboard {
    /// Create an empty bitboard covering `len` cells
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Like [`Bitboard::new`] but reports allocation failure
    pub fn try_new(len: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            bits: try_filled(len.div_ceil(64), 0)?,
            len,
        })
    }

    /// Number of cells covered
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < self.len);
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    #[inline]
    pub fn clear(&mut self, idx: usize) {
        debug_assert!(idx < self.len);
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        idx < self.len && (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Clear every bit
    pub fn clear_all(&mut self) {
        self.bits.iter_mut().for_each(|b| *b = 0);
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Heap bytes held by the index
    pub fn memory_usage(&self) -> usize {
        self.bits.capacity() * std::mem::size_of::<u64>()
    }

    /// Iterate over set bit indices in ascending order
    pub fn iter_ones(&self) -> BitboardIter<'_> {
        BitboardIter {
            bits: &self.bits,
            word_idx: 0,
            current_word: self.bits.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter<'a> {
    bits: &'a [u64],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= self.bits.len() {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        // Clear the bit we just found
        self.current_word &= self.current_word - 1;
        Some(self.word_idx * 64 + bit_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut bb = Bitboard::new(225);
        assert!(bb.is_empty());
        bb.set(0);
        bb.set(64);
        bb.set(224);
        assert!(bb.get(0) && bb.get(64) && bb.get(224));
        assert!(!bb.get(1));
        assert_eq!(bb.count(), 3);

        bb.clear(64);
        assert!(!bb.get(64));
        assert_eq!(bb.count(), 2);
    }

    #[test]
    fn test_get_past_end_is_false() {
        let bb = Bitboard::new(10);
        assert!(!bb.get(10));
        assert!(!bb.get(1000));
    }

    #[test]
    fn test_iter_ones_ascending() {
        let mut bb = Bitboard::new(10_000);
        for idx in [9_999, 3, 130, 64, 63] {
            bb.set(idx);
        }
        let ones: Vec<usize> = bb.iter_ones().collect();
        assert_eq!(ones, vec![3, 63, 64, 130, 9_999]);
    }

    #[test]
    fn test_iter_ones_empty() {
        let bb = Bitboard::new(225);
        assert_eq!(bb.iter_ones().count(), 0);
    }
}
