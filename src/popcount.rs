//! Population count strategies.
//!
//! Two interchangeable implementations sit behind the [`Popcount`] trait:
//!
//! - [`SoftwarePopcount`]: Kernighan's loop, clearing the lowest set bit
//!   until the word is empty and counting iterations. Portable everywhere.
//! - [`HardwarePopcount`]: `count_ones()`, which lowers to `POPCNT`/`CNT`
//!   when the target supports it.
//!
//! [`DefaultPopcount`] is the strategy used by the transform kernels. It is
//! the hardware path unless the crate is built with the `soft-popcount`
//! feature.
//!
//! # Examples
//!
//! ```
//! use binnet::popcount::{HardwarePopcount, Popcount, SoftwarePopcount};
//!
//! let w: u64 = 0b1011_0001;
//! assert_eq!(SoftwarePopcount::count(w), 4);
//! assert_eq!(HardwarePopcount::count(w), 4);
//! ```

use crate::word::BitWord;

/// A population count strategy.
pub trait Popcount {
    /// Number of set bits in `word`.
    fn count<W: BitWord>(word: W) -> u32;
}

/// Portable bit-clearing population count.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwarePopcount;

impl Popcount for SoftwarePopcount {
    #[inline]
    fn count<W: BitWord>(word: W) -> u32 {
        let mut x = word;
        let mut c = 0;
        while x != W::ZERO {
            x &= x - W::ONE;
            c += 1;
        }
        c
    }
}

/// Population count through the hardware instruction.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwarePopcount;

impl Popcount for HardwarePopcount {
    #[inline(always)]
    fn count<W: BitWord>(word: W) -> u32 {
        word.count_ones()
    }
}

/// Strategy selected at build time.
#[cfg(feature = "soft-popcount")]
pub type DefaultPopcount = SoftwarePopcount;

/// Strategy selected at build time.
#[cfg(not(feature = "soft-popcount"))]
pub type DefaultPopcount = HardwarePopcount;

/// Count set bits with the build-time default strategy.
#[inline(always)]
pub fn popcount<W: BitWord>(word: W) -> u32 {
    DefaultPopcount::count(word)
}
