use crate::error::{Error, Result};
use crate::vector::BitVector;
use crate::word::Word;
use rand::Rng;
use std::{
    fmt,
    ops::{Index, Mul},
};

/// A dense matrix over GF(2), stored as a vector of equal-length [`BitVector`] rows
///
/// Every row has length `cols` and uses the same word type `W`. A matrix with no rows still
/// records its number of columns, so e.g. `BitMatrix::zeros(0, 5)` is a valid 0x5 matrix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitMatrix<W: Word = u64> {
    /// the number of logical columns, i.e. the length of every row
    cols: usize,

    /// the rows of the matrix, in order
    data: Vec<BitVector<W>>,
}

/// Row operations that Gaussian elimination can mirror onto a second object.
///
/// Eliminating a matrix while applying the same operations to an identity matrix computes an
/// inverse; applying them to a vector keeps the right-hand side of a linear system in step with
/// its coefficients.
pub trait RowOps {
    /// Adds (XORs) row `from` into row `to`
    fn add_row(&mut self, from: usize, to: usize);
    fn swap_rows(&mut self, from: usize, to: usize);
}

impl<W: Word> BitMatrix<W> {
    /// Creates a `rows` x `cols` matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        BitMatrix {
            cols,
            data: (0..rows).map(|_| BitVector::zeros(cols)).collect(),
        }
    }

    pub fn identity(size: usize) -> Self {
        Self::build(size, size, |i, j| i == j)
    }

    /// Builds a matrix from a function `f` that gives the value of each entry
    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        BitMatrix {
            cols,
            data: (0..rows)
                .map(|i| BitVector::build(cols, |j| f(i, j)))
                .collect(),
        }
    }

    /// Creates a matrix from rows given as bool vectors
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    pub fn from_bool_vec(data: &[Vec<bool>]) -> Self {
        let cols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == cols),
            "All rows must have the same length"
        );
        Self::build(data.len(), cols, |i, j| data[i][j])
    }

    /// Creates a matrix from its rows, each of which must have length `cols`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] for the first row of the wrong length.
    pub fn from_rows(cols: usize, rows: Vec<BitVector<W>>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|row| row.len() != cols) {
            return Err(Error::DimensionMismatch {
                context: "BitMatrix::from_rows",
                expected: cols,
                got: row.len(),
            });
        }
        Ok(BitMatrix { cols, data: rows })
    }

    /// Creates a matrix with independent, uniformly random entries
    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        BitMatrix {
            cols,
            data: (0..rows).map(|_| BitVector::random(rng, cols)).collect(),
        }
    }

    /// As [`BitMatrix::random`], drawing from the thread-local generator
    #[inline]
    pub fn random_default(rows: usize, cols: usize) -> Self {
        Self::random(&mut rand::rng(), rows, cols)
    }

    /// Creates a random invertible `size` x `size` matrix by applying random row additions to
    /// the identity.
    pub fn random_invertible(rng: &mut impl Rng, size: usize) -> Self {
        let mut m = BitMatrix::identity(size);
        if size < 2 {
            return m;
        }

        for _ in 0..10 * size * size {
            let r1 = rng.random_range(0..size);
            let mut r2 = rng.random_range(0..size - 1);
            if r2 >= r1 {
                r2 += 1;
            }
            m.add_row(r1, r2);
        }

        m
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &BitVector<W> {
        &self.data[i]
    }

    #[inline]
    pub fn row_iter(&self) -> impl Iterator<Item = &BitVector<W>> {
        self.data.iter()
    }

    #[inline]
    pub fn into_rows(self) -> Vec<BitVector<W>> {
        self.data
    }

    /// Returns the entry at row `i`, column `j`
    ///
    /// # Panics
    ///
    /// Panics if the entry is out of range.
    #[inline]
    pub fn bit(&self, i: usize, j: usize) -> bool {
        self.data[i].bit(j)
    }

    /// Sets the entry at row `i`, column `j`
    ///
    /// # Panics
    ///
    /// Panics if the entry is out of range.
    #[inline]
    pub fn set_bit(&mut self, i: usize, j: usize, b: bool) {
        self.data[i].set_bit(j, b);
    }

    fn check_entry(&self, i: usize, j: usize) -> Result<()> {
        if i < self.rows() && j < self.cols {
            Ok(())
        } else {
            Err(Error::MatrixIndexOutOfRange {
                row: i,
                col: j,
                rows: self.rows(),
                cols: self.cols,
            })
        }
    }

    /// Returns the entry at row `i`, column `j`, or an error if it is out of range
    pub fn get(&self, i: usize, j: usize) -> Result<bool> {
        self.check_entry(i, j)?;
        Ok(self.bit(i, j))
    }

    /// Sets the entry at row `i`, column `j`, or returns an error if it is out of range
    pub fn set(&mut self, i: usize, j: usize, b: bool) -> Result<()> {
        self.check_entry(i, j)?;
        self.set_bit(i, j, b);
        Ok(())
    }

    /// Total number of 1 entries
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|row| row.count_ones()).sum()
    }

    /// Checks if the matrix consists of all zero entries
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|row| row.is_zero())
    }

    /// Matrix-vector product over GF(2)
    ///
    /// Bit `r` of the result is the parity of `row(r) AND x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] unless `x.len() == self.cols()`.
    pub fn dot(&self, x: &BitVector<W>) -> Result<BitVector<W>> {
        if x.len() != self.cols {
            return Err(Error::DimensionMismatch {
                context: "matrix-vector product",
                expected: self.cols,
                got: x.len(),
            });
        }
        Ok(self
            .data
            .iter()
            .map(|row| row.as_slice().dot(x.as_slice()))
            .collect())
    }

    /// Matrix product over GF(2)
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] unless `self.cols() == rhs.rows()`.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        if self.cols != rhs.rows() {
            return Err(Error::DimensionMismatch {
                context: "matrix product",
                expected: self.cols,
                got: rhs.rows(),
            });
        }
        let mut res = Self::zeros(self.rows(), rhs.cols);
        for (row, out) in self.data.iter().zip(res.data.iter_mut()) {
            for j in row.iter_ones() {
                *out.as_mut_slice() ^= rhs.data[j].as_slice();
            }
        }
        Ok(res)
    }

    /// Returns a transposed copy of the matrix
    pub fn transposed(&self) -> Self {
        let mut dest = Self::zeros(self.cols, self.rows());
        for (i, row) in self.data.iter().enumerate() {
            for j in row.iter_ones() {
                dest.data[j].set_bit(i, true);
            }
        }
        dest
    }

    /// Returns a copy of the matrix whose rows use words of type `V`
    pub fn convert<V: Word>(&self) -> BitMatrix<V> {
        BitMatrix {
            cols: self.cols,
            data: self.data.iter().map(|row| row.convert()).collect(),
        }
    }

    /// Perform gaussian elimination while also performing matching row operations on `proxy`
    /// and returning a vector of pivot columns
    ///
    /// Pivots are chosen column by column, taking the lowest-index row at or below the current
    /// pivot row with a 1 in that column. Rows below each pivot are cleared; if `full` is true
    /// the rows above are cleared as well, giving reduced echelon form.
    pub(crate) fn eliminate_with(&mut self, full: bool, proxy: &mut impl RowOps) -> Vec<usize> {
        let mut row = 0;
        let mut pcol = 0;
        let mut pcols = vec![];
        while row < self.rows() {
            let mut next_row = None;
            'outer: while pcol < self.cols {
                for i in row..self.rows() {
                    if self.data[i].bit(pcol) {
                        next_row = Some(i);
                        break 'outer;
                    }
                }
                pcol += 1;
            }

            if let Some(row1) = next_row {
                if row != row1 {
                    self.swap_rows(row, row1);
                    proxy.swap_rows(row, row1);
                }
                tracing::trace!(row, pcol, "pivot");

                // rows strictly between `row` and `row1` were already found to be 0 in `pcol`
                for i in (row1 + 1)..self.rows() {
                    if self.data[i].bit(pcol) {
                        self.add_row(row, i);
                        proxy.add_row(row, i);
                    }
                }

                row += 1;
                pcols.push(pcol);
                pcol += 1;
            } else {
                break;
            }
        }

        if full {
            for row in (0..pcols.len()).rev() {
                let pcol = pcols[row];
                for i in 0..row {
                    if self.data[i].bit(pcol) {
                        self.add_row(row, i);
                        proxy.add_row(row, i);
                    }
                }
            }
        }

        pcols
    }

    /// Perform gaussian elimination and return the pivot columns
    ///
    /// If `full` is true, then perform full Gauss-Jordan to produce reduced echelon form, otherwise
    /// just return echelon form
    #[inline]
    pub fn gauss(&mut self, full: bool) -> Vec<usize> {
        self.eliminate_with(full, &mut ())
    }

    /// Compute the rank of the matrix using gaussian elimination
    #[inline]
    pub fn rank(&self) -> usize {
        self.clone().eliminate_with(false, &mut ()).len()
    }

    /// Compute the inverse of a square matrix
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSquare`] or [`Error::Singular`] if there is no inverse.
    pub fn try_inverse(&self) -> Result<Self> {
        if self.rows() != self.cols {
            return Err(Error::NotSquare {
                rows: self.rows(),
                cols: self.cols,
            });
        }
        let mut inv = BitMatrix::identity(self.cols);
        let pcols = self.clone().eliminate_with(true, &mut inv);

        if pcols.len() != self.cols {
            return Err(Error::Singular);
        }

        Ok(inv)
    }

    /// Compute the inverse of an invertible matrix
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square or not invertible.
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(inv) => inv,
            Err(e) => panic!("Cannot invert matrix: {}", e),
        }
    }

    /// Solve `self * x == b` for `x`
    ///
    /// Returns `Ok(None)` if the system is inconsistent. When the system has many solutions, the
    /// one with every free variable set to 0 is returned. See [`crate::solver`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] unless `b.len() == self.rows()`.
    #[inline]
    pub fn x_for(&self, b: &BitVector<W>) -> Result<Option<BitVector<W>>> {
        crate::solver::solve(self, b)
    }

    /// A short human-readable summary of the matrix
    pub fn describe(&self) -> String {
        let ones = self.count_ones();
        format!(
            "BitMatrix\n  shape: {}x{}\n  word width: {} bits\n  words per row: {}\n  ones: {}\n  zeros: {}\n",
            self.rows(),
            self.cols,
            W::BITS,
            crate::word::min_words::<W>(self.cols),
            ones,
            self.rows() * self.cols - ones
        )
    }
}

impl RowOps for () {
    #[inline]
    fn add_row(&mut self, _: usize, _: usize) {}

    #[inline]
    fn swap_rows(&mut self, _: usize, _: usize) {}
}

impl<W: Word> RowOps for BitMatrix<W> {
    fn add_row(&mut self, from: usize, to: usize) {
        if from == to {
            self.data[to].clear();
            return;
        }
        let (source, target) = if from < to {
            let (head, tail) = self.data.split_at_mut(to);
            (&head[from], &mut tail[0])
        } else {
            let (head, tail) = self.data.split_at_mut(from);
            (&tail[0], &mut head[to])
        };
        *target.as_mut_slice() ^= source.as_slice();
    }

    #[inline]
    fn swap_rows(&mut self, from: usize, to: usize) {
        self.data.swap(from, to);
    }
}

/// `matrix[(i, j)]` is equivalent to `matrix.bit(i, j)`
impl<W: Word> Index<(usize, usize)> for BitMatrix<W> {
    type Output = bool;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.bit(index.0, index.1) {
            &true
        } else {
            &false
        }
    }
}

impl<W: Word> fmt::Display for BitMatrix<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.data.iter() {
            for b in row.iter() {
                write!(f, " {} ", if b { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl<W: Word> Mul for &BitMatrix<W> {
    type Output = BitMatrix<W>;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.try_mul(rhs) {
            Ok(res) => res,
            Err(_) => panic!(
                "Attempting to multiply matrices of incompatible dimensions: {} != {}",
                self.cols,
                rhs.rows()
            ),
        }
    }
}

impl<W: Word> Mul<&BitVector<W>> for &BitMatrix<W> {
    type Output = BitVector<W>;

    fn mul(self, rhs: &BitVector<W>) -> Self::Output {
        match self.dot(rhs) {
            Ok(res) => res,
            Err(_) => panic!(
                "Cannot multiply matrix with {} columns by vector of length {}",
                self.cols,
                rhs.len()
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn random_gauss() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m: BitMatrix<u32> = BitMatrix::random(&mut rng, 8, 20);
        let mut n = m.clone();
        let pcols = n.gauss(true);

        assert_eq!(pcols.len(), m.rank());
        for (row, &pcol) in pcols.iter().enumerate() {
            for i in 0..n.rows() {
                assert_eq!(n[(i, pcol)], i == row);
            }
            // leading 1 of each pivot row
            assert_eq!(n.row(row).iter_ones().next(), Some(pcol));
        }
        for i in pcols.len()..n.rows() {
            assert!(n.row(i).is_zero());
        }
    }

    #[test]
    fn identity() {
        let m: BitMatrix = BitMatrix::identity(100);
        for i in 0..100 {
            for j in 0..100 {
                assert_eq!(m[(i, j)], i == j);
            }
        }
        assert_eq!(m.rank(), 100);
    }

    #[test]
    fn checked_access() {
        let mut m: BitMatrix<u8> = BitMatrix::zeros(3, 10);
        assert_eq!(m.set(2, 9, true), Ok(()));
        assert_eq!(m.get(2, 9), Ok(true));
        assert_eq!(
            m.get(3, 0),
            Err(Error::MatrixIndexOutOfRange {
                row: 3,
                col: 0,
                rows: 3,
                cols: 10
            })
        );
        assert!(m.set(0, 10, true).is_err());
        assert_eq!(m.count_ones(), 1);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let rows = vec![BitVector::<u16>::zeros(4), BitVector::zeros(5)];
        assert_eq!(
            BitMatrix::from_rows(4, rows),
            Err(Error::DimensionMismatch {
                context: "BitMatrix::from_rows",
                expected: 4,
                got: 5
            })
        );
        let m = BitMatrix::<u16>::from_rows(7, vec![]).unwrap();
        assert_eq!((m.rows(), m.cols()), (0, 7));
    }

    #[test]
    fn transpose() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m: BitMatrix<u16> = BitMatrix::random(&mut rng, 10, 4);
        let n = m.transposed();
        assert_eq!((n.rows(), n.cols()), (4, 10));
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert_eq!(m[(i, j)], n[(j, i)]);
            }
        }

        let m: BitMatrix = BitMatrix::random(&mut rng, 300, 200);
        assert_eq!(m.transposed().transposed(), m);
    }

    #[test]
    fn matrix_vector_product() {
        // [1 0 1]   [1]   [1]
        // [0 1 1] * [1] = [1]
        // [1 1 0]   [0]   [0]
        let matrix: BitMatrix<u8> = BitMatrix::from_bool_vec(&[
            vec![true, false, true],
            vec![false, true, true],
            vec![true, true, false],
        ]);
        let vector = BitVector::from_bool_vec(&[true, true, false]);

        let result = &matrix * &vector;
        assert_eq!(result.to_string(), "110");
        assert_eq!(matrix.dot(&vector).unwrap(), result);
    }

    #[test]
    fn matrix_vector_product_mismatch() {
        let matrix: BitMatrix = BitMatrix::zeros(2, 3);
        let vector = BitVector::zeros(2);
        assert_eq!(
            matrix.dot(&vector),
            Err(Error::DimensionMismatch {
                context: "matrix-vector product",
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    #[should_panic(expected = "Cannot multiply matrix")]
    fn matrix_vector_product_panics() {
        let matrix: BitMatrix = BitMatrix::zeros(2, 3);
        let vector: BitVector = BitVector::zeros(2);
        let _result = &matrix * &vector;
    }

    #[test]
    fn matrix_mult() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m1: BitMatrix<u64> = BitMatrix::random(&mut rng, 80, 100);
        let m2 = BitMatrix::random(&mut rng, 100, 70);
        let m3 = &m1 * &m2;

        for i in 0..m3.rows() {
            for j in 0..m3.cols() {
                let mut b = false;
                for k in 0..m1.cols() {
                    b ^= m1.bit(i, k) & m2.bit(k, j);
                }
                assert_eq!(m3.bit(i, j), b);
            }
        }
    }

    #[test]
    fn matrix_inv() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sz = 100;
        let m: BitMatrix<u32> = BitMatrix::random_invertible(&mut rng, sz);
        let n = m.inverse();
        let id = BitMatrix::identity(sz);

        assert_eq!(&m * &n, id);
        assert_eq!(&n * &m, id);
    }

    #[test]
    fn inverse_errors() {
        let m: BitMatrix = BitMatrix::zeros(3, 4);
        assert_eq!(m.try_inverse(), Err(Error::NotSquare { rows: 3, cols: 4 }));
        let mut s: BitMatrix = BitMatrix::identity(4);
        s.add_row(0, 1);
        s.set_bit(3, 3, false);
        assert_eq!(s.try_inverse(), Err(Error::Singular));
    }

    #[test]
    fn row_ops() {
        let mut m: BitMatrix<u8> =
            BitMatrix::from_bool_vec(&[vec![true, true, false], vec![false, true, true]]);
        m.add_row(0, 1);
        assert_eq!(m.row(1).to_string(), "101");
        m.add_row(1, 0);
        assert_eq!(m.row(0).to_string(), "011");
        m.swap_rows(0, 1);
        assert_eq!(m.row(0).to_string(), "101");
        m.add_row(1, 1);
        assert!(m.row(1).is_zero());
    }

    #[test]
    fn convert_width() {
        let mut rng = SmallRng::seed_from_u64(9);
        let m: BitMatrix<u64> = BitMatrix::random(&mut rng, 12, 130);
        let n: BitMatrix<u8> = m.convert();
        for i in 0..12 {
            assert_eq!(n.row(i), m.row(i));
        }
        assert_eq!(n.convert::<u64>(), m);
    }

    #[test]
    fn describe_and_display() {
        let m: BitMatrix<u16> = BitMatrix::identity(3);
        assert_eq!(m.to_string(), " 1  0  0 \n 0  1  0 \n 0  0  1 \n");
        let d = m.describe();
        assert!(d.contains("shape: 3x3"));
        assert!(d.contains("ones: 3"));
        assert!(d.contains("zeros: 6"));
        assert_eq!(d, m.describe());
    }
}
