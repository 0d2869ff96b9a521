use crate::error::{Error, Result};
use crate::slice::WordSlice;
use crate::word::{min_words, Word};
use rand::Rng;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};
use std::ops::Index;

/// A fixed-length sequence of bits, packed into words of type `W`.
///
/// Bit `i` lives in word `i / W::BITS`, at position `i % W::BITS` counted from the least
/// significant bit. The store always holds exactly enough words for its length, and the unused
/// high bits of the last word are always 0. Every method that mutates the store restores this,
/// which is what lets population counts and equality work a whole word at a time.
///
/// The word type is purely a storage choice: stores of different widths holding the same bits
/// compare equal, and [`BitStore::copy_from`] moves bits between any two widths exactly.
///
/// # Examples
///
/// ```
/// use gaussbits::BitStore;
///
/// let mut wide: BitStore<u64> = BitStore::alternating(100);
/// wide.set_bit(0, true);
///
/// let mut narrow: BitStore<u8> = BitStore::zeros(0);
/// narrow.copy_from(&wide);
/// assert_eq!(narrow.len(), 100);
/// assert_eq!(narrow.count_ones(), 51);
/// assert_eq!(narrow.to_string(), wide.to_string());
/// ```
#[derive(Clone, Debug)]
pub struct BitStore<W: Word = u64> {
    words: Vec<W>,
    len: usize,
}

/// Iterator over the bits of a [`BitStore`], in index order.
pub struct BitIter<'a, W: Word> {
    inner: std::slice::Iter<'a, W>,
    c: usize,
    block: W,
    remaining: usize,
}

impl<W: Word> Iterator for BitIter<'_, W> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.c == W::BITS {
            self.block = self.inner.next().copied()?;
            self.c = 0;
        }
        let bit = self.block & W::ONE == W::ONE;
        self.block = self.block >> 1;
        self.c += 1;
        self.remaining -= 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<W: Word> ExactSizeIterator for BitIter<'_, W> {}

/// Cursor that walks a [`BitStore`] in chunks of at most 64 bits, independent of its word width.
///
/// Each item holds the next `width` bits (fewer for the final chunk) in its low bits, with bit 0
/// of the chunk being the lowest-indexed bit. All higher bits of the item are 0.
pub struct Chunks<'a, W: Word> {
    store: &'a BitStore<W>,
    pos: usize,
    width: usize,
}

impl<W: Word> Iterator for Chunks<'_, W> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.store.len {
            return None;
        }
        let count = usize::min(self.width, self.store.len - self.pos);
        let chunk = self.store.read_bits(self.pos, count);
        self.pos += count;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.store.len - self.pos).div_ceil(self.width);
        (n, Some(n))
    }
}

impl<W: Word> ExactSizeIterator for Chunks<'_, W> {}

impl<W: Word> BitStore<W> {
    /// Creates a store of `len` bits, all 0.
    #[inline]
    pub fn zeros(len: usize) -> Self {
        BitStore {
            words: vec![W::ZERO; min_words::<W>(len)],
            len,
        }
    }

    /// Creates a store of `len` bits, all 1.
    #[inline]
    pub fn ones(len: usize) -> Self {
        let mut store = BitStore {
            words: vec![W::MAX; min_words::<W>(len)],
            len,
        };
        store.mask_tail();
        store
    }

    /// Creates a store of `len` bits where bit `i` is 1 exactly when `i` is odd.
    pub fn alternating(len: usize) -> Self {
        // every word starts at an even index, so the pattern is the same in each word
        let pattern = W::from_u64(0xaaaa_aaaa_aaaa_aaaa);
        let mut store = BitStore {
            words: vec![pattern; min_words::<W>(len)],
            len,
        };
        store.mask_tail();
        store
    }

    /// Creates a store of `len` independent, uniformly random bits.
    #[inline]
    pub fn random(rng: &mut impl Rng, len: usize) -> Self {
        let mut store = BitStore {
            words: (0..min_words::<W>(len)).map(|_| W::random(rng)).collect(),
            len,
        };
        store.mask_tail();
        store
    }

    /// As [`BitStore::random`], drawing from the thread-local generator [`rand::rng`].
    #[inline]
    pub fn random_default(len: usize) -> Self {
        Self::random(&mut rand::rng(), len)
    }

    /// Builds a store of `len` bits from a function giving the value of each bit.
    pub fn build(len: usize, f: impl FnMut(usize) -> bool) -> Self {
        (0..len).map(f).collect()
    }

    /// Wraps a vector of words as a store of `len` bits.
    ///
    /// Extra words are dropped and bits beyond `len` are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `words` holds fewer than `len` bits.
    pub fn from_words(mut words: Vec<W>, len: usize) -> Result<Self> {
        let needed = min_words::<W>(len);
        if words.len() < needed {
            return Err(Error::DimensionMismatch {
                context: "BitStore::from_words",
                expected: needed,
                got: words.len(),
            });
        }
        words.truncate(needed);
        let mut store = BitStore { words, len };
        store.mask_tail();
        Ok(store)
    }

    /// Number of logical bits
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bits per storage word
    #[inline]
    pub fn word_bits(&self) -> usize {
        W::BITS
    }

    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn words(&self) -> &[W] {
        &self.words
    }

    #[inline]
    pub fn as_slice(&self) -> &WordSlice<W> {
        WordSlice::new(&self.words)
    }

    /// Mutable access to the words. Callers must leave the padding bits at 0.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut WordSlice<W> {
        WordSlice::new_mut(&mut self.words)
    }

    /// Clears the unused high bits of the last word.
    #[inline]
    fn mask_tail(&mut self) {
        let used = self.len % W::BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= W::low_mask(used);
            }
        }
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Returns the value of the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "bit index {} out of range for length {}",
            index,
            self.len
        );
        self.words[index / W::BITS].is_set(index % W::BITS)
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(
            index < self.len,
            "bit index {} out of range for length {}",
            index,
            self.len
        );
        let mask = W::ONE << (index % W::BITS) as u32;
        let block = &mut self.words[index / W::BITS];
        if value {
            *block |= mask;
        } else {
            *block &= !mask;
        }
    }

    /// Flips the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn flip_bit(&mut self, index: usize) {
        assert!(
            index < self.len,
            "bit index {} out of range for length {}",
            index,
            self.len
        );
        self.as_mut_slice().flip_bit(index);
    }

    /// Returns the value of the bit at `index`, or an error if it is out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.bit(index))
    }

    /// Sets the bit at `index` to `value`, or returns an error if it is out of range.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        self.check_index(index)?;
        self.set_bit(index, value);
        Ok(())
    }

    /// Number of bits set to 1
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.as_slice().count_ones()
    }

    /// Number of bits set to 0
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.as_slice().is_zero()
    }

    /// Sets every bit to 0, keeping the length.
    #[inline]
    pub fn clear(&mut self) {
        self.words.fill(W::ZERO);
    }

    /// Changes the length to `len`, truncating or padding with 0s at the end.
    pub fn resize(&mut self, len: usize) {
        self.words.resize(min_words::<W>(len), W::ZERO);
        self.len = len;
        self.mask_tail();
    }

    /// Reads `count <= 64` bits starting at `start`, returned in the low bits of a `u64`.
    ///
    /// # Panics
    ///
    /// Panics if `count > 64` or the range runs past the end of the store.
    pub fn read_bits(&self, start: usize, count: usize) -> u64 {
        assert!(count <= 64, "cannot read {} bits into a u64", count);
        assert!(
            start + count <= self.len,
            "bit range {}..{} out of range for length {}",
            start,
            start + count,
            self.len
        );

        let mut out = 0u64;
        let mut filled = 0;
        while filled < count {
            let pos = start + filled;
            let offset = pos % W::BITS;
            let take = usize::min(W::BITS - offset, count - filled);
            let chunk = (self.words[pos / W::BITS].to_u64() >> offset) & <u64 as Word>::low_mask(take);
            out |= chunk << filled;
            filled += take;
        }
        out
    }

    /// Walks the store `width` bits at a time; see [`Chunks`].
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= width <= 64`.
    #[inline]
    pub fn chunks(&self, width: usize) -> Chunks<'_, W> {
        assert!(
            (1..=64).contains(&width),
            "chunk width must be between 1 and 64, got {}",
            width
        );
        Chunks {
            store: self,
            pos: 0,
            width,
        }
    }

    /// Makes this store a copy of `source`, which may use a different word width.
    ///
    /// Afterwards `self.len() == source.len()` and bit `i` of `self` equals bit `i` of `source`
    /// for every `i`. Each destination word is filled from one re-aligned chunk of the source, so
    /// neither width has to divide the other or the length.
    pub fn copy_from<V: Word>(&mut self, source: &BitStore<V>) {
        self.words.clear();
        self.words.extend(source.chunks(W::BITS).map(W::from_u64));
        self.len = source.len();
        tracing::trace!(
            len = self.len,
            from_width = V::BITS,
            to_width = W::BITS,
            "copied bit store"
        );
    }

    /// Returns a copy of this store using words of type `V`.
    pub fn convert<V: Word>(&self) -> BitStore<V> {
        let mut out = BitStore::<V>::zeros(0);
        out.copy_from(self);
        out
    }

    /// Returns an iterator over all bits as `bool`s.
    #[inline]
    pub fn iter(&self) -> BitIter<'_, W> {
        BitIter {
            inner: self.words.iter(),
            c: W::BITS,
            block: W::ZERO,
            remaining: self.len,
        }
    }

    /// Returns an iterator over the indices of the bits set to 1, in increasing order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        let slice = self.as_slice();
        let mut next = slice.first_one_from(0);
        std::iter::from_fn(move || {
            let current = next?;
            next = slice.first_one_from(current + 1);
            Some(current)
        })
    }

    fn check_same_len(&self, other: &Self, context: &'static str) -> Result<()> {
        if self.len == other.len {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                context,
                expected: self.len,
                got: other.len,
            })
        }
    }

    /// XORs `other` into this store.
    pub fn xor_with(&mut self, other: &Self) -> Result<()> {
        self.check_same_len(other, "xor")?;
        *self.as_mut_slice() ^= other.as_slice();
        Ok(())
    }

    /// ANDs `other` into this store.
    pub fn and_with(&mut self, other: &Self) -> Result<()> {
        self.check_same_len(other, "and")?;
        *self.as_mut_slice() &= other.as_slice();
        Ok(())
    }

    /// The GF(2) inner product: parity of the number of positions where both stores hold a 1.
    pub fn dot(&self, other: &Self) -> Result<bool> {
        self.check_same_len(other, "dot")?;
        Ok(self.as_slice().dot(other.as_slice()))
    }

    /// A short human-readable summary of the store.
    pub fn describe(&self) -> String {
        let ones = self.count_ones();
        format!(
            "BitStore\n  size: {}\n  word width: {} bits\n  words: {}\n  ones: {}\n  zeros: {}\n",
            self.len,
            W::BITS,
            self.words.len(),
            ones,
            self.len - ones
        )
    }
}

/// Stores are equal when they hold the same bits, whatever their word widths.
impl<W: Word, V: Word> PartialEq<BitStore<V>> for BitStore<W> {
    fn eq(&self, other: &BitStore<V>) -> bool {
        self.len == other.len && self.chunks(64).eq(other.chunks(64))
    }
}

impl<W: Word> Eq for BitStore<W> {}

impl<W: Word> Hash for BitStore<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.words.hash(state);
    }
}

impl<W: Word> Default for BitStore<W> {
    fn default() -> Self {
        Self::zeros(0)
    }
}

/// Writes the bits as `0`s and `1`s in index order.
impl<W: Word> fmt::Display for BitStore<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// `store[i]` is equivalent to `store.bit(i)`.
impl<W: Word> Index<usize> for BitStore<W> {
    type Output = bool;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        if self.bit(index) {
            &true
        } else {
            &false
        }
    }
}

impl<W: Word> FromIterator<bool> for BitStore<W> {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut words = vec![];
        let mut len = 0;
        let mut block = W::ZERO;
        for bit in iter {
            if bit {
                block |= W::ONE << (len % W::BITS) as u32;
            }
            len += 1;
            if len % W::BITS == 0 {
                words.push(block);
                block = W::ZERO;
            }
        }

        if len % W::BITS != 0 {
            words.push(block);
        }

        BitStore { words, len }
    }
}

impl<W: Word> From<Vec<bool>> for BitStore<W> {
    fn from(value: Vec<bool>) -> Self {
        value.into_iter().collect()
    }
}

impl<W: Word> From<&BitStore<W>> for Vec<bool> {
    fn from(value: &BitStore<W>) -> Self {
        value.iter().collect()
    }
}
