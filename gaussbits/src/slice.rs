use crate::word::Word;
use ref_cast::RefCast;
use std::ops::{BitAndAssign, BitXorAssign, Index, Range};

/// A run of words, viewed as the bits they contain.
///
/// This is the layer where the word-at-a-time kernels live (population counts, XOR and AND in
/// place, parity of a dot product). It knows nothing about the logical length of a
/// [`crate::BitStore`], so counts here range over every storage bit; stores keep their padding
/// bits at zero so that these counts agree with the logical ones.
#[derive(RefCast, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[repr(transparent)]
pub struct WordSlice<W: Word>([W]);

impl<W: Word> WordSlice<W> {
    #[inline]
    pub fn new(words: &[W]) -> &Self {
        Self::ref_cast(words)
    }

    #[inline]
    pub(crate) fn new_mut(words: &mut [W]) -> &mut Self {
        Self::ref_cast_mut(words)
    }

    #[inline]
    pub fn words(&self) -> &[W] {
        &self.0
    }

    /// Number of words in the slice
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of storage bits, including any padding
    #[inline]
    pub fn num_bits(&self) -> usize {
        self.0.len() * W::BITS
    }

    /// Returns an iterator over the words in this slice.
    #[inline]
    pub fn block_iter(&self) -> impl Iterator<Item = W> + '_ {
        self.0.iter().copied()
    }

    /// Counts the number of bits set to 1 in the entire slice.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.block_iter()
            .fold(0, |c, bits| c + bits.count_ones() as usize)
    }

    /// Counts the number of bits set to 0 in the entire slice.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.num_bits() - self.count_ones()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.block_iter().all(|bits| bits == W::ZERO)
    }

    /// Computes the dot product (mod 2) of two slices.
    ///
    /// Returns `true` if the number of positions where both slices hold a 1 is odd. Words beyond
    /// the end of the shorter slice are ignored.
    #[inline]
    pub fn dot(&self, rhs: &WordSlice<W>) -> bool {
        let mut c = 0;
        for (bits0, bits1) in self.0.iter().zip(rhs.0.iter()) {
            c ^= (*bits0 & *bits1).count_ones() & 1;
        }

        c == 1
    }

    /// Returns the position of the first 1-bit at or after bit `from`.
    pub fn first_one_from(&self, from: usize) -> Option<usize> {
        let mut block_index = from / W::BITS;
        if block_index >= self.0.len() {
            return None;
        }

        let mut block = self.0[block_index] & !W::low_mask(from % W::BITS);
        loop {
            if block != W::ZERO {
                return Some(block_index * W::BITS + block.trailing_zeros() as usize);
            }
            block_index += 1;
            block = *self.0.get(block_index)?;
        }
    }

    /// Flips the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is beyond the storage bits.
    #[inline]
    pub(crate) fn flip_bit(&mut self, index: usize) {
        self.0[index / W::BITS] ^= W::ONE << (index % W::BITS) as u32;
    }
}

impl<W: Word> Index<Range<usize>> for WordSlice<W> {
    type Output = WordSlice<W>;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        WordSlice::ref_cast(&self.0[index])
    }
}

impl<W: Word> Index<usize> for WordSlice<W> {
    type Output = W;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

impl<W: Word> BitAndAssign<&Self> for WordSlice<W> {
    #[inline]
    fn bitand_assign(&mut self, rhs: &Self) {
        for (bits0, bits1) in self.0.iter_mut().zip(rhs.0.iter()) {
            *bits0 &= *bits1;
        }
    }
}

impl<W: Word> BitXorAssign<&Self> for WordSlice<W> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &Self) {
        for (bits0, bits1) in self.0.iter_mut().zip(rhs.0.iter()) {
            *bits0 ^= *bits1;
        }
    }
}
