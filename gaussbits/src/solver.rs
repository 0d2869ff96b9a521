//! Solving linear systems `A x = b` over GF(2) by Gaussian elimination.
//!
//! The solver never touches the caller's `A` or `b`. It reduces private copies of both in
//! lock-step (equivalently, the augmented matrix `[A|b]`) to row echelon form, clearing only
//! below each pivot. A system is inconsistent exactly when one of the rows left without a pivot
//! has a 1 on the right-hand side. Otherwise back substitution walks the pivots from last to
//! first with every free variable fixed at 0, yielding one particular solution.
//!
//! ```
//! use gaussbits::{BitMatrix, BitVector};
//!
//! let a: BitMatrix = BitMatrix::from_bool_vec(&[
//!     vec![true, true, false],
//!     vec![false, true, true],
//! ]);
//! let b = BitVector::from_int_vec(&[1, 0]);
//! let x = a.x_for(&b).unwrap().expect("system is consistent");
//! assert_eq!(a.dot(&x).unwrap(), b);
//! ```

use crate::error::{Error, Result};
use crate::matrix::BitMatrix;
use crate::vector::BitVector;
use crate::word::Word;

/// The result of forward elimination on a linear system
///
/// Holds the echelon form of `A`, the right-hand side after the same row operations, and the
/// pivot column of each nonzero row.
#[derive(Clone, Debug)]
pub struct Elimination<W: Word = u64> {
    reduced: BitMatrix<W>,
    rhs: BitVector<W>,
    pivots: Vec<usize>,
}

impl<W: Word> Elimination<W> {
    /// Runs forward elimination on copies of `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] unless `b.len() == a.rows()`.
    pub fn new(a: &BitMatrix<W>, b: &BitVector<W>) -> Result<Self> {
        if b.len() != a.rows() {
            return Err(Error::DimensionMismatch {
                context: "linear system right-hand side",
                expected: a.rows(),
                got: b.len(),
            });
        }

        let mut reduced = a.clone();
        let mut rhs = b.clone();
        let pivots = reduced.eliminate_with(false, &mut rhs);
        let elimination = Elimination {
            reduced,
            rhs,
            pivots,
        };

        tracing::debug!(
            rows = a.rows(),
            cols = a.cols(),
            rank = elimination.rank(),
            free = a.cols() - elimination.rank(),
            consistent = elimination.is_consistent(),
            "forward elimination finished"
        );
        Ok(elimination)
    }

    /// Number of pivots, i.e. the rank of `A`
    #[inline]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// The pivot column of each of the first `rank()` rows of the echelon form
    #[inline]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Columns without a pivot, whose variables are free
    pub fn free_columns(&self) -> Vec<usize> {
        let mut pivots = self.pivots.iter().peekable();
        (0..self.reduced.cols())
            .filter(|&j| {
                if pivots.peek() == Some(&&j) {
                    pivots.next();
                    false
                } else {
                    true
                }
            })
            .collect()
    }

    /// The echelon form of `A`
    #[inline]
    pub fn reduced(&self) -> &BitMatrix<W> {
        &self.reduced
    }

    /// The right-hand side after elimination
    #[inline]
    pub fn rhs(&self) -> &BitVector<W> {
        &self.rhs
    }

    /// Whether the system has at least one solution
    ///
    /// Rows from `rank()` on have all-zero coefficients, so the system is consistent exactly when
    /// the right-hand side is 0 on all of them.
    pub fn is_consistent(&self) -> bool {
        (self.rank()..self.reduced.rows()).all(|i| !self.rhs.bit(i))
    }

    /// Back substitution. Returns `None` if the system is inconsistent.
    pub fn into_solution(self) -> Option<BitVector<W>> {
        if !self.is_consistent() {
            tracing::debug!("linear system is inconsistent");
            return None;
        }

        let mut x = BitVector::zeros(self.reduced.cols());
        for (row, &pcol) in self.pivots.iter().enumerate().rev() {
            // entries left of `pcol` are 0 and `x` is still 0 at `pcol`, so only the variables
            // solved so far contribute
            let value = self.rhs.bit(row) ^ self.reduced.row(row).as_slice().dot(x.as_slice());
            x.set_bit(pcol, value);
        }
        Some(x)
    }
}

/// Solve `a * x == b`, returning `Ok(None)` if there is no solution.
///
/// Free variables are set to 0. Whenever a solution is returned, `a.dot(&x) == b`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] unless `b.len() == a.rows()`.
pub fn solve<W: Word>(a: &BitMatrix<W>, b: &BitVector<W>) -> Result<Option<BitVector<W>>> {
    Ok(Elimination::new(a, b)?.into_solution())
}
