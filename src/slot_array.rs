//! Bit-packed, fixed-length array of equal-width slots.
//!
//! Each slot occupies `bit_count` bits of a flat `Vec<u64>` word stream. A
//! slot may straddle a word boundary; `get`/`set` handle the spill into the
//! next word explicitly rather than reading byte-at-a-time.

use crate::alloc::SlotAllocator;
use crate::error::QuotientFilterError;

const BLOCK_BITS: usize = 64;

fn mask(bits: usize) -> u64 {
    if bits >= 64 {
        !0
    } else {
        (1u64 << bits) - 1
    }
}

pub struct SlotArray {
    words: Vec<u64>,
    bit_count: usize,
    len: usize,
}

impl SlotArray {
    /// Allocates `len` slots of `bit_count` bits each, zeroed, using `allocator`
    /// to obtain the backing word buffer.
    pub fn new(
        bit_count: usize,
        len: usize,
        allocator: &impl SlotAllocator,
    ) -> Result<Self, QuotientFilterError> {
        let word_count = (bit_count * len + BLOCK_BITS - 1) / BLOCK_BITS;
        let words = allocator.allocate(word_count)?;
        Ok(SlotArray {
            words,
            bit_count,
            len,
        })
    }

    #[inline]
    pub fn get(&self, index: usize) -> u64 {
        debug_assert!(index < self.len);
        let bit_offset = index * self.bit_count;
        let word = bit_offset / BLOCK_BITS;
        let offset = bit_offset % BLOCK_BITS;
        let spill = self.bit_count as isize - (BLOCK_BITS as isize - offset as isize);

        let mut slot = (self.words[word] >> offset) & mask(self.bit_count);
        if spill > 0 {
            let low_bits = self.bit_count - spill as usize;
            slot |= (self.words[word + 1] & mask(spill as usize)) << low_bits;
        }
        slot
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: u64) {
        debug_assert!(index < self.len);
        let value = value & mask(self.bit_count);
        let bit_offset = index * self.bit_count;
        let word = bit_offset / BLOCK_BITS;
        let offset = bit_offset % BLOCK_BITS;
        let spill = self.bit_count as isize - (BLOCK_BITS as isize - offset as isize);

        self.words[word] &= !(mask(self.bit_count) << offset);
        self.words[word] |= value << offset;
        if spill > 0 {
            let low_bits = self.bit_count - spill as usize;
            self.words[word + 1] &= !mask(spill as usize);
            self.words[word + 1] |= value >> low_bits;
        }
    }

    pub fn clear(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn bytes(&self) -> usize {
        self.words.len() * (BLOCK_BITS / 8)
    }
}

impl std::fmt::Debug for SlotArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            write!(f, "{:b} ", self.get(i))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SlotArray;
    use crate::alloc::GlobalAllocator;
    use rand::{Rng, SeedableRng};

    fn test_with_bit_count(bit_count: usize) {
        let len = 32;
        let mut rng = rand_xorshift::XorShiftRng::from_seed([7; 16]);
        let mut arr = SlotArray::new(bit_count, len, &GlobalAllocator).unwrap();
        let mut shadow = vec![0u64; len];

        for i in 0..len {
            let value = rng.gen::<u64>() & super::mask(bit_count);
            arr.set(i, value);
            shadow[i] = value;
        }

        for i in 0..len {
            assert_eq!(arr.get(i), shadow[i]);
        }

        arr.clear();
        for i in 0..len {
            assert_eq!(arr.get(i), 0);
        }
    }

    #[test]
    fn test_bit_count_7() {
        test_with_bit_count(7);
    }

    #[test]
    fn test_bit_count_19() {
        test_with_bit_count(19);
    }

    #[test]
    fn test_bit_count_35() {
        test_with_bit_count(35);
    }

    #[test]
    fn test_bit_count_64() {
        test_with_bit_count(64);
    }

    #[test]
    fn test_bytes() {
        // 16 slots of 7 bits = 112 bits = 2 words = 16 bytes.
        let arr = SlotArray::new(7, 16, &GlobalAllocator).unwrap();
        assert_eq!(arr.bytes(), 16);
    }
}
