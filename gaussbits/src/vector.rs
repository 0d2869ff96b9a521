use crate::matrix::RowOps;
use crate::store::BitStore;
use crate::word::Word;
use rand::Rng;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitXor, BitXorAssign, Deref, DerefMut, Index};

/// A vector over GF(2), backed by a [`BitStore`]
///
/// `BitVector` dereferences to its store, so bit access, population counts, cross-width copies
/// and the presentation methods are all available directly. For the purposes of
/// [`crate::BitMatrix::dot`] and the solver it behaves like a column vector.
#[derive(Clone, Debug, Default)]
pub struct BitVector<W: Word = u64>(BitStore<W>);

impl<W: Word> BitVector<W> {
    /// Creates a new `BitVector` of size `length` initialized to zero
    #[inline]
    pub fn zeros(length: usize) -> Self {
        Self(BitStore::zeros(length))
    }

    #[inline]
    pub fn ones(length: usize) -> Self {
        Self(BitStore::ones(length))
    }

    /// Creates a new random `BitVector` of specified length
    #[inline]
    pub fn random(rng: &mut impl Rng, length: usize) -> Self {
        Self(BitStore::random(rng, length))
    }

    /// Creates a new random `BitVector` using the thread-local generator
    #[inline]
    pub fn random_default(length: usize) -> Self {
        Self(BitStore::random_default(length))
    }

    /// Creates a `BitVector` with the odd-indexed bits set
    #[inline]
    pub fn alternating(length: usize) -> Self {
        Self(BitStore::alternating(length))
    }

    /// Builds a `BitVector` from a function `f` that determines the value of each bit
    pub fn build(length: usize, f: impl FnMut(usize) -> bool) -> Self {
        Self(BitStore::build(length, f))
    }

    /// Creates a new `BitVector` from a slice of bools
    pub fn from_bool_vec(data: &[bool]) -> Self {
        Self::build(data.len(), |i| data[i])
    }

    /// Creates a new `BitVector` from a slice of integers, where any nonzero entry is a 1
    pub fn from_int_vec(data: &[usize]) -> Self {
        Self::build(data.len(), |i| data[i] != 0)
    }

    /// Returns the number of 1s in the vector (Hamming weight)
    #[inline]
    pub fn weight(&self) -> usize {
        self.0.count_ones()
    }

    /// Returns a reference to the underlying store
    #[inline]
    pub fn as_store(&self) -> &BitStore<W> {
        &self.0
    }

    #[inline]
    pub fn into_store(self) -> BitStore<W> {
        self.0
    }

    /// Returns a copy of this vector using words of type `V`.
    pub fn convert<V: Word>(&self) -> BitVector<V> {
        BitVector(self.0.convert())
    }
}

impl<W: Word> Deref for BitVector<W> {
    type Target = BitStore<W>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<W: Word> DerefMut for BitVector<W> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<W: Word> From<BitStore<W>> for BitVector<W> {
    fn from(store: BitStore<W>) -> Self {
        Self(store)
    }
}

impl<W: Word> From<BitVector<W>> for BitStore<W> {
    fn from(vector: BitVector<W>) -> Self {
        vector.0
    }
}

impl<W: Word> FromIterator<bool> for BitVector<W> {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self(BitStore::from_iter(iter))
    }
}

/// Formats the vector as its bits, e.g. `0110`
impl<W: Word> fmt::Display for BitVector<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<W: Word, V: Word> PartialEq<BitVector<V>> for BitVector<W> {
    fn eq(&self, other: &BitVector<V>) -> bool {
        self.0 == other.0
    }
}

impl<W: Word> Eq for BitVector<W> {}

impl<W: Word> Hash for BitVector<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// `vector[i]` is equivalent to `vector.bit(i)`.
impl<W: Word> Index<usize> for BitVector<W> {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

/// XOR-assign operation for BitVector
///
/// # Panics
///
/// Panics if the vectors have different lengths.
impl<W: Word> BitXorAssign<&BitVector<W>> for BitVector<W> {
    fn bitxor_assign(&mut self, rhs: &BitVector<W>) {
        if let Err(e) = self.0.xor_with(&rhs.0) {
            panic!("BitVectors must have the same length for XOR: {}", e);
        }
    }
}

impl<W: Word> BitXorAssign<BitVector<W>> for BitVector<W> {
    fn bitxor_assign(&mut self, rhs: BitVector<W>) {
        *self ^= &rhs;
    }
}

impl<W: Word> BitXor for &BitVector<W> {
    type Output = BitVector<W>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut result = self.clone();
        result ^= rhs;
        result
    }
}

impl<W: Word> BitXor for BitVector<W> {
    type Output = BitVector<W>;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self ^= &rhs;
        self
    }
}

/// Row operations on a vector treat it as a column: each "row" is a single bit.
///
/// This lets the right-hand side of a linear system follow the row operations of elimination.
impl<W: Word> RowOps for BitVector<W> {
    #[inline]
    fn add_row(&mut self, from: usize, to: usize) {
        if from == to {
            self.set_bit(to, false);
        } else if self.bit(from) {
            self.flip_bit(to);
        }
    }

    #[inline]
    fn swap_rows(&mut self, from: usize, to: usize) {
        let a = self.bit(from);
        let b = self.bit(to);
        self.set_bit(from, b);
        self.set_bit(to, a);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn constructors() {
        let v: BitVector = BitVector::from_int_vec(&[1, 0, 0, 5, 0]);
        assert_eq!(v.to_string(), "10010");
        assert_eq!(v.weight(), 2);
        assert_eq!(v, BitVector::<u8>::from_bool_vec(&[true, false, false, true, false]));

        let a: BitVector<u16> = BitVector::alternating(9);
        assert_eq!(a.to_string(), "010101010");
        assert_eq!(BitVector::<u32>::ones(40).weight(), 40);
        assert!(BitVector::<u32>::zeros(40).is_zero());
    }

    #[test]
    fn xor_ops() {
        let mut rng = SmallRng::seed_from_u64(11);
        let a: BitVector<u8> = BitVector::random(&mut rng, 50);
        let b: BitVector<u8> = BitVector::random(&mut rng, 50);

        let c = &a ^ &b;
        for i in 0..50 {
            assert_eq!(c[i], a[i] ^ b[i]);
        }

        let mut d = c.clone();
        d ^= &b;
        assert_eq!(d, a);
        assert!((a.clone() ^ a).is_zero());
    }

    #[test]
    #[should_panic(expected = "BitVectors must have the same length for XOR")]
    fn xor_length_mismatch() {
        let a: BitVector = BitVector::zeros(3);
        let b: BitVector = BitVector::zeros(4);
        let _c = &a ^ &b;
    }

    #[test]
    fn column_row_ops() {
        let mut v: BitVector<u8> = BitVector::from_int_vec(&[1, 0, 1, 0]);
        v.add_row(0, 1);
        assert_eq!(v.to_string(), "1110");
        v.add_row(3, 2);
        assert_eq!(v.to_string(), "1110");
        v.swap_rows(0, 3);
        assert_eq!(v.to_string(), "0111");
        v.add_row(2, 2);
        assert_eq!(v.to_string(), "0101");
    }

    #[test]
    fn deref_to_store() {
        let mut v: BitVector<u16> = BitVector::zeros(20);
        v.set_bit(17, true);
        assert_eq!(v.count_ones(), 1);
        assert_eq!(v.num_words(), 2);
        let w: BitVector<u64> = v.convert();
        assert_eq!(w, v);
        assert_eq!(w.num_words(), 1);
    }
}
