//! WeightMatrix - binary weights stored column by column.
//!
//! A layer with `m` inputs and `n` outputs has `n` weight columns, each an
//! independent [`PackedBits`] of length `m` with its own `ceil(m / 64)` words.

use crate::packed::PackedBits;
use crate::word::Word;
use crate::{BinnetError, Result};
use rand::Rng;

/// `m` x `n` matrix of +/-1 weights, one packed column per output unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightMatrix {
    num_rows: usize,
    columns: Vec<PackedBits>,
}

impl WeightMatrix {
    /// Create an `m` x `n` matrix with every weight at `-1`.
    ///
    /// ```
    /// use binnet::WeightMatrix;
    ///
    /// let w = WeightMatrix::new(100, 4);
    /// assert_eq!(w.num_rows(), 100);
    /// assert_eq!(w.num_cols(), 4);
    /// assert_eq!(w.column(0).num_words(), 2);
    /// ```
    pub fn new(m: usize, n: usize) -> Self {
        Self {
            num_rows: m,
            columns: (0..n).map(|_| PackedBits::new(m)).collect(),
        }
    }

    /// Build a matrix from existing columns. All columns must have length `m`.
    pub fn from_columns(m: usize, columns: Vec<PackedBits>) -> Result<Self> {
        if let Some(bad) = columns.iter().find(|c| c.num_bits() != m) {
            return Err(BinnetError::InvalidInputSize {
                expected: m,
                actual: bad.num_bits(),
            });
        }
        Ok(Self {
            num_rows: m,
            columns,
        })
    }

    /// Build a matrix from raw words, one word slice per column.
    ///
    /// ```
    /// use binnet::WeightMatrix;
    ///
    /// let w = WeightMatrix::from_column_words(5, &[&[19], &[28], &[31], &[29]]).unwrap();
    /// assert_eq!(w.num_cols(), 4);
    /// assert_eq!(w.column(2).num_set(), 5);
    /// ```
    pub fn from_column_words(m: usize, columns: &[&[Word]]) -> Result<Self> {
        let columns = columns
            .iter()
            .map(|words| PackedBits::from_words(words, m))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            num_rows: m,
            columns,
        })
    }

    /// Logical rows (inputs) per column.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns (output units).
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column `j`.
    #[inline]
    pub fn column(&self, j: usize) -> &PackedBits {
        &self.columns[j]
    }

    /// Mutable column `j`.
    #[inline]
    pub fn column_mut(&mut self, j: usize) -> &mut PackedBits {
        &mut self.columns[j]
    }

    /// Checked access to column `j`.
    pub fn try_column(&self, j: usize) -> Result<&PackedBits> {
        self.columns.get(j).ok_or(BinnetError::IndexOutOfBounds {
            index: j,
            length: self.columns.len(),
        })
    }

    /// All columns.
    #[inline]
    pub fn columns(&self) -> &[PackedBits] {
        &self.columns
    }

    /// All columns, mutable.
    #[inline]
    pub fn columns_mut(&mut self) -> &mut [PackedBits] {
        &mut self.columns
    }

    /// Weight at row `i`, column `j` as `+1` / `-1`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> i32 {
        self.columns[j].sign(i)
    }

    /// Randomize every column so that about `pct` of its weights are `+1`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, pct: f64) {
        for column in &mut self.columns {
            column.random_set_pct(rng, pct);
        }
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.columns.iter().map(PackedBits::memory_usage).sum::<usize>()
    }
}
