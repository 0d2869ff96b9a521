//! `gaussbits` is a Rust library for bit-packed linear algebra over the 2-element finite field,
//! where addition is XOR and multiplication is AND. Some features include:
//! - word-packed bit storage with a choice of `u8`, `u16`, `u32` or `u64` words
//! - exact copies between stores of different word widths
//! - fast population counts and dot products using word-level operations
//! - matrix-vector and matrix-matrix products, transpose, rank and inverse
//! - Gaussian elimination and solving linear systems `A x = b`
//!
//! The main data structures provided by this crate are:
//! - [`BitStore`]: a fixed-length sequence of bits packed into words of a chosen width
//! - [`BitVector`]: a [`BitStore`] used as a vector
//! - [`BitMatrix`]: a dense matrix made of equal-length [`BitVector`] rows
//!
//! ```
//! use gaussbits::{BitMatrix, BitVector};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let a: BitMatrix<u32> = BitMatrix::random(&mut rng, 50, 80);
//! let b = a.dot(&BitVector::random(&mut rng, 80)).unwrap();
//!
//! let x = a.x_for(&b).unwrap().expect("b is in the column space of a");
//! assert_eq!(a.dot(&x).unwrap(), b);
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::bool_assert_comparison,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::bool_to_int_with_if
)]
pub mod error;
pub mod matrix;
pub mod slice;
pub mod solver;
pub mod store;
pub mod vector;
pub mod word;

pub use error::{Error, Result};
pub use matrix::{BitMatrix, RowOps};
pub use slice::WordSlice;
pub use solver::{solve, Elimination};
pub use store::{BitIter, BitStore, Chunks};
pub use vector::BitVector;
pub use word::{min_words, Word};
