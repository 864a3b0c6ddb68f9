//! Convolution kernels: small rectangular weight matrices.

use crate::errors::Error;

/// Rectangular matrix of real-valued convolution weights, row-major.
///
/// Construction validates the geometry (non-empty, rectangular); the odd-size
/// requirement is checked by the consumers that center-align the kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a kernel from nested rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, Error> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Error::EmptyKernel);
        }
        let cols = rows[0].len();
        let mut weights = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedKernel {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            weights.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            weights,
        })
    }

    /// Build a kernel from a flat row-major weight buffer.
    pub fn from_flat(rows: usize, cols: usize, weights: Vec<f32>) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyKernel);
        }
        if weights.len() != rows * cols {
            return Err(Error::SampleCountMismatch {
                expected: rows * cols,
                actual: weights.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            weights,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.cols + col]
    }

    /// True when both dimensions are odd (center-alignable).
    #[inline]
    pub fn is_odd(&self) -> bool {
        self.rows % 2 == 1 && self.cols % 2 == 1
    }

    /// Sum of all weights, the default normalization divisor.
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Return the transposed kernel.
    pub fn transposed(&self) -> Kernel {
        let mut weights = Vec::with_capacity(self.weights.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                weights.push(self.get(r, c));
            }
        }
        Kernel {
            rows: self.cols,
            cols: self.rows,
            weights,
        }
    }

    /// Transpose in place.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }
}

impl<const R: usize, const C: usize> From<[[f32; C]; R]> for Kernel {
    /// Infallible conversion for fixed-size arrays; geometry is rectangular
    /// by construction.
    fn from(rows: [[f32; C]; R]) -> Self {
        let mut weights = Vec::with_capacity(R * C);
        for row in &rows {
            weights.extend_from_slice(row);
        }
        Self {
            rows: R,
            cols: C,
            weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_ragged_kernels_fail_fast() {
        assert_eq!(Kernel::from_rows(vec![]).unwrap_err(), Error::EmptyKernel);
        assert_eq!(
            Kernel::from_rows(vec![vec![]]).unwrap_err(),
            Error::EmptyKernel
        );
        let err = Kernel::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            Error::RaggedKernel {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn transpose_is_an_involution() {
        let k = Kernel::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = k.transposed();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.get(0, 1), 4.0);
        assert_eq!(t.transposed(), k);
    }

    #[test]
    fn weight_sum_adds_every_entry() {
        let k = Kernel::from([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(k.weight_sum(), 10.0);
    }
}
