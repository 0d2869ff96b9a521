use rand::Rng;
use std::fmt;
use std::hash::Hash;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr,
};

/// An unsigned integer used as the storage unit of a [`crate::BitStore`].
///
/// Bit `k` of a word is the bit with value `1 << k`, so bits are counted from the least
/// significant end. The width of the word only affects memory layout and speed, never the
/// logical contents of a store.
pub trait Word:
    Copy
    + Eq
    + Ord
    + Hash
    + Default
    + fmt::Debug
    + fmt::Binary
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + BitXor<Output = Self>
    + BitXorAssign
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Number of bits in the word
    const BITS: usize;

    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    fn count_ones(self) -> u32;

    fn trailing_zeros(self) -> u32;

    /// Zero-extends the word to 64 bits.
    fn to_u64(self) -> u64;

    /// Keeps the low `Self::BITS` bits of `value`.
    fn from_u64(value: u64) -> Self;

    /// Draws a uniformly random word, i.e. every bit is an independent fair coin.
    fn random<R: Rng>(rng: &mut R) -> Self;

    /// A word whose low `bits` bits are 1 and the rest 0.
    #[inline]
    fn low_mask(bits: usize) -> Self {
        if bits >= Self::BITS {
            Self::MAX
        } else {
            !(Self::MAX << bits as u32)
        }
    }

    #[inline]
    fn is_set(self, k: usize) -> bool {
        (self >> k as u32) & Self::ONE == Self::ONE
    }
}

macro_rules! implement_word {
    ($word_type:ty) => {
        impl Word for $word_type {
            const BITS: usize = <$word_type>::BITS as usize;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$word_type>::MAX;

            #[inline]
            fn count_ones(self) -> u32 {
                <$word_type>::count_ones(self)
            }

            #[inline]
            fn trailing_zeros(self) -> u32 {
                <$word_type>::trailing_zeros(self)
            }

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_u64(value: u64) -> Self {
                value as $word_type
            }

            #[inline]
            fn random<R: Rng>(rng: &mut R) -> Self {
                rng.random::<$word_type>()
            }
        }
    };
}

implement_word!(u8);
implement_word!(u16);
implement_word!(u32);
implement_word!(u64);

/// Returns the minimum number of words of type `W` required to store the given number of bits.
#[inline]
pub fn min_words<W: Word>(bits: usize) -> usize {
    bits.div_ceil(W::BITS)
}
