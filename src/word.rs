//! Bit-word primitives.
//!
//! A packed bit vector of logical length `n` is stored in `ceil(n / W::BITS)`
//! words. Bit `i` lives in word `i / W::BITS` at position `i % W::BITS`
//! (LSB-first). The helpers here do that index arithmetic for any unsigned
//! word type through the [`BitWord`] trait.
//!
//! # Examples
//!
//! ```
//! use binnet::word::{bit_offset, word_bit_width, word_index, words_needed};
//!
//! assert_eq!(word_bit_width::<u64>(), 64);
//! assert_eq!(word_index::<u64>(70), 1);
//! assert_eq!(bit_offset::<u64>(70), 6);
//! assert_eq!(words_needed::<u32>(33), 2);
//! ```

use std::fmt::Debug;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not, Shl, Sub};

/// Storage word used by [`PackedBits`](crate::PackedBits).
pub type Word = u64;

/// Number of bits per storage word.
pub const BITS_PER_WORD: usize = Word::BITS as usize;

/// An unsigned machine word usable as packed bit storage.
pub trait BitWord:
    Copy
    + Eq
    + Debug
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Sub<Output = Self>
{
    /// Number of bits in the word.
    const BITS: u32;
    /// All bits cleared.
    const ZERO: Self;
    /// Only the lowest bit set.
    const ONE: Self;
    /// All bits set.
    const MAX: Self;

    /// Hardware population count.
    fn count_ones(self) -> u32;

    /// Test bit `pos`.
    #[inline(always)]
    fn bit(self, pos: u32) -> bool {
        debug_assert!(pos < Self::BITS, "bit position {} out of range", pos);
        self & (Self::ONE << pos) != Self::ZERO
    }

    /// Copy of `self` with bit `pos` set.
    #[inline(always)]
    fn with_bit(self, pos: u32) -> Self {
        debug_assert!(pos < Self::BITS, "bit position {} out of range", pos);
        self | (Self::ONE << pos)
    }

    /// Copy of `self` with bit `pos` cleared.
    #[inline(always)]
    fn without_bit(self, pos: u32) -> Self {
        debug_assert!(pos < Self::BITS, "bit position {} out of range", pos);
        self & !(Self::ONE << pos)
    }
}

macro_rules! impl_bit_word {
    ($($t:ty),*) => {
        $(
            impl BitWord for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$t>::MAX;

                #[inline(always)]
                fn count_ones(self) -> u32 {
                    <$t>::count_ones(self)
                }
            }
        )*
    };
}

impl_bit_word!(u8, u16, u32, u64, u128, usize);

/// Number of bits in the word type `W`.
#[inline(always)]
pub fn word_bit_width<W: BitWord>() -> usize {
    W::BITS as usize
}

/// Index of the word holding logical bit `i`.
#[inline(always)]
pub fn word_index<W: BitWord>(i: usize) -> usize {
    i / word_bit_width::<W>()
}

/// Position of logical bit `i` within its word.
#[inline(always)]
pub fn bit_offset<W: BitWord>(i: usize) -> u32 {
    (i % word_bit_width::<W>()) as u32
}

/// Words required to hold `n` bits.
#[inline(always)]
pub fn words_needed<W: BitWord>(n: usize) -> usize {
    n.div_ceil(word_bit_width::<W>())
}

/// Mask of the valid bits in the last word of an `n`-bit vector.
///
/// Returns `W::MAX` when `n` is a whole number of words.
#[inline(always)]
pub fn tail_mask<W: BitWord>(n: usize) -> W {
    let rem = bit_offset::<W>(n);
    if rem == 0 {
        W::MAX
    } else {
        (W::ONE << rem) - W::ONE
    }
}
