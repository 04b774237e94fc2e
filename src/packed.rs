//! PackedBits - a logical bit vector packed into 64-bit words.
//!
//! Backed by `BitVec<u64, Lsb0>`, so bit `i` lives in word `i / 64` at
//! position `i % 64`. The kernels in [`linear`](crate::linear),
//! [`backward`](crate::backward) and [`update`](crate::update) work on the raw
//! word slice; everything that counts or compares goes through the bit-level
//! view so that padding bits in the last word are never observed.
//!
//! # Examples
//!
//! ```
//! use binnet::PackedBits;
//!
//! let mut x = PackedBits::new(5);
//! x.set_bit(0);
//! x.set_bit(3);
//! assert_eq!(x.words(), &[9]);
//! assert_eq!(x.num_set(), 2);
//! assert_eq!(x.sign(3), 1);
//! assert_eq!(x.sign(4), -1);
//! ```

use crate::word::{tail_mask, words_needed, Word};
use crate::{BinnetError, Result};
use bitvec::prelude::*;
use rand::Rng;
use std::fmt;

/// A packed bit vector of fixed logical length.
///
/// When used as a weight column, bit value `1` encodes weight `+1` and bit
/// value `0` encodes weight `-1`.
#[derive(Clone, Debug)]
pub struct PackedBits {
    bv: BitVec<Word, Lsb0>,
}

impl PackedBits {
    /// Create a vector of `n` bits, all cleared.
    ///
    /// ```
    /// use binnet::PackedBits;
    ///
    /// let p = PackedBits::new(65);
    /// assert_eq!(p.num_bits(), 65);
    /// assert_eq!(p.num_words(), 2);
    /// assert_eq!(p.num_set(), 0);
    /// ```
    #[inline]
    pub fn new(n: usize) -> Self {
        Self {
            bv: BitVec::repeat(false, n),
        }
    }

    /// Build an `n`-bit vector from raw storage words.
    ///
    /// `words` must hold exactly `ceil(n / 64)` words. Bits past `n` in the
    /// last word are kept as given but never read.
    ///
    /// ```
    /// use binnet::PackedBits;
    ///
    /// let w = PackedBits::from_words(&[19], 5).unwrap();
    /// assert_eq!(w.get_acts(), vec![0, 1, 4]);
    /// assert!(PackedBits::from_words(&[1, 2], 5).is_err());
    /// ```
    pub fn from_words(words: &[Word], n: usize) -> Result<Self> {
        let expected = words_needed::<Word>(n);
        if words.len() != expected {
            return Err(BinnetError::InvalidInputSize {
                expected,
                actual: words.len(),
            });
        }
        let mut bv = BitVec::<Word, Lsb0>::from_slice(words);
        bv.truncate(n);
        Ok(Self { bv })
    }

    /// Build a vector from one boolean per bit.
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut bv = BitVec::<Word, Lsb0>::with_capacity(bits.len());
        bv.extend(bits.iter().copied());
        Self { bv }
    }

    /// Logical length in bits.
    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        self.bv.len()
    }

    /// Number of storage words.
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.bv.as_raw_slice().len()
    }

    /// True when the vector holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bv.is_empty()
    }

    // =========================================================================
    // Single Bit Operations
    // =========================================================================

    /// Get bit `b` as 0 or 1.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `b >= num_bits`.
    #[inline]
    pub fn get_bit(&self, b: usize) -> u8 {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        self.bv[b] as u8
    }

    /// Interpret bit `b` as a weight sign: `+1` when set, `-1` when clear.
    #[inline]
    pub fn sign(&self, b: usize) -> i32 {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        if self.bv[b] {
            1
        } else {
            -1
        }
    }

    /// Set bit `b` to 1.
    #[inline]
    pub fn set_bit(&mut self, b: usize) {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        self.bv.set(b, true);
    }

    /// Clear bit `b`.
    #[inline]
    pub fn clear_bit(&mut self, b: usize) {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        self.bv.set(b, false);
    }

    /// Flip bit `b`.
    #[inline]
    pub fn toggle_bit(&mut self, b: usize) {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        let current = self.bv[b];
        self.bv.set(b, !current);
    }

    /// Assign bit `b`.
    #[inline]
    pub fn assign_bit(&mut self, b: usize, val: bool) {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        self.bv.set(b, val);
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Set all bits to 1.
    pub fn set_all(&mut self) {
        self.bv.fill(true);
    }

    /// Clear all bits.
    pub fn clear_all(&mut self) {
        self.bv.fill(false);
    }

    /// Randomly set exactly `num` bits, clearing the rest.
    pub fn random_set_num<R: Rng + ?Sized>(&mut self, rng: &mut R, num: usize) {
        debug_assert!(num <= self.bv.len());
        self.clear_all();
        let num_actual = num.min(self.bv.len());

        let mut count = 0;
        while count < num_actual {
            let idx = rng.gen_range(0..self.bv.len());
            if !self.bv[idx] {
                self.bv.set(idx, true);
                count += 1;
            }
        }
    }

    /// Randomly set approximately `pct * num_bits` bits.
    ///
    /// `pct` should be in range [0.0, 1.0].
    pub fn random_set_pct<R: Rng + ?Sized>(&mut self, rng: &mut R, pct: f64) {
        debug_assert!((0.0..=1.0).contains(&pct));
        let num = ((self.bv.len() as f64) * pct).round() as usize;
        self.random_set_num(rng, num);
    }

    // =========================================================================
    // Counting and Views
    // =========================================================================

    /// Number of set bits among the first `num_bits`.
    #[inline]
    pub fn num_set(&self) -> usize {
        self.bv.count_ones()
    }

    /// Number of cleared bits among the first `num_bits`.
    #[inline]
    pub fn num_cleared(&self) -> usize {
        self.bv.count_zeros()
    }

    /// Indices of set bits, ascending.
    pub fn get_acts(&self) -> Vec<usize> {
        self.bv.iter_ones().collect()
    }

    /// Bit values as booleans.
    pub fn get_bits(&self) -> Vec<bool> {
        self.bv.iter().by_vals().collect()
    }

    /// Bits decoded as weight signs (`+1` / `-1`).
    pub fn signs(&self) -> Vec<i32> {
        self.bv.iter().by_vals().map(|b| if b { 1 } else { -1 }).collect()
    }

    /// Mask of the valid bits in the last storage word.
    #[inline(always)]
    pub fn tail_mask(&self) -> Word {
        tail_mask::<Word>(self.bv.len())
    }

    // =========================================================================
    // Word-Level Access
    // =========================================================================

    /// Read-only access to storage words.
    ///
    /// Bits past `num_bits` in the last word are unspecified.
    #[inline(always)]
    pub fn words(&self) -> &[Word] {
        self.bv.as_raw_slice()
    }

    /// Mutable access to storage words.
    #[inline(always)]
    pub fn words_mut(&mut self) -> &mut [Word] {
        self.bv.as_raw_mut_slice()
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.bv.capacity().div_ceil(8)
    }
}

impl PartialEq for PackedBits {
    /// Compares logical bits only; padding in the last word is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.bv == other.bv
    }
}

impl Eq for PackedBits {}

impl fmt::Display for PackedBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for b in self.bv.iter().by_vals() {
            write!(f, "{}", b as u8)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new() {
        let p = PackedBits::new(1024);
        assert_eq!(p.num_bits(), 1024);
        assert_eq!(p.num_words(), 16);
        assert_eq!(p.num_set(), 0);
        assert!(PackedBits::new(0).is_empty());
    }

    #[test]
    fn test_set_get_bit() {
        let mut p = PackedBits::new(70);
        assert_eq!(p.get_bit(65), 0);
        p.set_bit(65);
        assert_eq!(p.get_bit(65), 1);
        assert_eq!(p.words()[1], 2);
        p.clear_bit(65);
        assert_eq!(p.get_bit(65), 0);
        p.toggle_bit(1);
        assert_eq!(p.words()[0], 2);
        p.assign_bit(1, false);
        assert_eq!(p.num_set(), 0);
    }

    #[test]
    fn test_from_words_ignores_padding() {
        let p = PackedBits::from_words(&[u64::MAX], 5).unwrap();
        assert_eq!(p.num_set(), 5);
        assert_eq!(p.num_cleared(), 0);
        assert_eq!(p.get_acts(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_from_words_wrong_length() {
        let err = PackedBits::from_words(&[0, 0], 64).unwrap_err();
        assert!(matches!(err, BinnetError::InvalidInputSize { expected: 1, actual: 2 }));
    }

    #[test]
    fn test_equality_ignores_padding() {
        let a = PackedBits::from_words(&[0b1_1001], 5).unwrap();
        let b = PackedBits::from_words(&[0xFF00_0000_0000_0019], 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signs() {
        let p = PackedBits::from_bools(&[true, false, false, true]);
        assert_eq!(p.signs(), vec![1, -1, -1, 1]);
        assert_eq!(p.get_bits(), vec![true, false, false, true]);
        assert_eq!(p.words(), &[9]);
    }

    #[test]
    fn test_set_all_clear_all() {
        let mut p = PackedBits::new(100);
        p.set_all();
        assert_eq!(p.num_set(), 100);
        assert_eq!(p.tail_mask(), (1u64 << 36) - 1);
        p.clear_all();
        assert_eq!(p.num_set(), 0);
    }

    #[test]
    fn test_random_set() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let mut p = PackedBits::new(1000);
        p.random_set_num(&mut rng, 100);
        assert_eq!(p.num_set(), 100);
        p.random_set_pct(&mut rng, 0.5);
        assert_eq!(p.num_set(), 500);
    }

    #[test]
    fn test_display() {
        let p = PackedBits::from_bools(&[true, false, true]);
        assert_eq!(p.to_string(), "{101}");
    }
}
