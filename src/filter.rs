//! The quotient filter engine: slot navigation and the public operations
//! built on top of it.

use std::cmp::Ordering;
use std::fmt;

use log::{debug, warn};

use crate::alloc::{GlobalAllocator, SlotAllocator};
use crate::codec;
use crate::error::QuotientFilterError;
use crate::slot_array::SlotArray;

fn bit_mask(bits: u8) -> u64 {
    if bits >= 64 {
        !0
    } else {
        (1u64 << bits) - 1
    }
}

/// A space-efficient, deletion-capable probabilistic set of 64-bit
/// fingerprints.
///
/// Each fingerprint is hashed externally to a 64-bit integer by the caller;
/// the filter itself never hashes anything. The top `quotient_bits` bits of
/// that integer select the fingerprint's canonical slot, and the bottom
/// `remainder_bits` bits are the value actually stored there. Items that
/// collide on their canonical slot are kept in sorted, contiguous runs, which
/// is what makes deletion and enumeration possible without touching every
/// entry.
///
/// # Examples
///
/// ```
/// use quotient_filter::QuotientFilter;
///
/// let mut filter = QuotientFilter::init(8, 4).unwrap();
///
/// assert!(!filter.may_contain(0x1234));
/// filter.insert(0x1234);
/// assert!(filter.may_contain(0x1234));
///
/// filter.clear();
/// assert!(!filter.may_contain(0x1234));
/// ```
pub struct QuotientFilter {
    quotient_bits: u8,
    remainder_bits: u8,
    quotient_mask: u64,
    remainder_mask: u64,
    slots: SlotArray,
    len: usize,
}

impl QuotientFilter {
    /// Constructs a filter with `quotient_bits` quotient bits and
    /// `remainder_bits` remainder bits (capacity `2^quotient_bits`), using the
    /// global allocator.
    ///
    /// # Errors
    ///
    /// Returns [`QuotientFilterError::ZeroWidth`] if either width is 0,
    /// [`QuotientFilterError::WidthOverflow`] if their sum exceeds 64, or
    /// [`QuotientFilterError::AllocationFailed`] if the backing buffer could
    /// not be obtained.
    pub fn init(quotient_bits: u8, remainder_bits: u8) -> Result<Self, QuotientFilterError> {
        Self::init_with_allocator(quotient_bits, remainder_bits, &GlobalAllocator)
    }

    /// Like [`Self::init`], but obtains the slot table from `allocator`
    /// instead of the global allocator.
    pub fn init_with_allocator(
        quotient_bits: u8,
        remainder_bits: u8,
        allocator: &impl SlotAllocator,
    ) -> Result<Self, QuotientFilterError> {
        if quotient_bits == 0 || remainder_bits == 0 {
            return Err(QuotientFilterError::ZeroWidth);
        }
        if u32::from(quotient_bits) + u32::from(remainder_bits) > 64 {
            return Err(QuotientFilterError::WidthOverflow {
                quotient_bits,
                remainder_bits,
            });
        }

        let slot_bits = remainder_bits as usize + codec::METADATA_BITS as usize;
        let capacity = 1usize << quotient_bits;
        let slots = SlotArray::new(slot_bits, capacity, allocator)?;

        Ok(QuotientFilter {
            quotient_bits,
            remainder_bits,
            quotient_mask: bit_mask(quotient_bits),
            remainder_mask: bit_mask(remainder_bits),
            slots,
            len: 0,
        })
    }

    /// Constructs a filter sized to hold `capacity` items with an estimated
    /// false-positive probability below `fpp`, using the global allocator.
    /// The ideal fullness of a quotient filter is about 75%, so the
    /// constructed filter has a maximum capacity of roughly `1.33 *
    /// capacity`.
    pub fn with_capacity(capacity: usize, fpp: f64) -> Result<Self, QuotientFilterError> {
        let quotient_bits = ((capacity as f64 * 1.33).log2().ceil() as u8).max(1);
        let remainder_bits = ((1.0 / -2.0 / (1.0 - fpp).ln()).log2().ceil() as u8).max(1);
        Self::init(quotient_bits, remainder_bits)
    }

    #[inline]
    fn split(&self, hash: u64) -> (usize, u64) {
        codec::split(
            hash,
            self.remainder_bits,
            self.quotient_mask,
            self.remainder_mask,
        )
    }

    #[inline]
    fn increment(&self, index: usize) -> usize {
        if index == self.capacity() - 1 {
            0
        } else {
            index + 1
        }
    }

    #[inline]
    fn decrement(&self, index: usize) -> usize {
        if index == 0 {
            self.capacity() - 1
        } else {
            index - 1
        }
    }

    /// Locates the run whose quotient is `fq`, returning the run's start
    /// index along with the number of runs and the number of occupied
    /// quotients seen while walking from the cluster start up to and
    /// including `fq`'s own run. The two counts are only needed by `remove`'s
    /// shift-left loop; lookups and inserts only need the index.
    ///
    /// Precondition: `is_occupied(slots[fq])`.
    fn find_run_index_with_counts(&self, fq: usize) -> (usize, usize, usize) {
        let mut b = fq;
        let mut occupied_count = 0;
        loop {
            let slot = self.slots.get(b);
            if codec::is_occupied(slot) {
                occupied_count += 1;
            }
            if !codec::is_shifted(slot) {
                break;
            }
            b = self.decrement(b);
        }

        let mut index = b;
        let mut runs_count = 0;
        let mut total_occupied_count = 0;
        loop {
            let slot = self.slots.get(index);
            if codec::is_occupied(slot) {
                total_occupied_count += 1;
            }
            if !codec::is_continuation(slot) {
                runs_count += 1;
            }
            if occupied_count == runs_count {
                break;
            }
            index = self.increment(index);
        }

        (index, runs_count, total_occupied_count)
    }

    fn find_run_index(&self, fq: usize) -> usize {
        self.find_run_index_with_counts(fq).0
    }

    /// Shift-inserts `entry` at `index`, sliding the displaced tail of the
    /// cluster one slot to the right. `is_occupied` belongs to the slot
    /// index, not to whatever fingerprint is passing through it, so it is
    /// swapped back onto the slot being overwritten at each step rather than
    /// carried along with the shifted payload.
    fn insert_into(&mut self, mut index: usize, mut entry: u64) {
        loop {
            let mut existing = self.slots.get(index);
            let is_empty_slot = codec::is_empty(existing);

            if codec::is_occupied(existing) {
                existing &= !codec::OCCUPIED_BIT;
                entry |= codec::OCCUPIED_BIT;
            }

            self.slots.set(index, entry);
            entry = existing;
            index = self.increment(index);

            if is_empty_slot {
                break;
            }
            entry |= codec::SHIFTED_BIT;
        }
    }

    /// Inserts `hash`. Returns `false` without modifying the filter if it is
    /// already at capacity; returns `true` otherwise, including when `hash`
    /// was already present (a no-op that does not grow `len`).
    pub fn insert(&mut self, hash: u64) -> bool {
        if self.len == self.capacity() {
            warn!(
                "insert rejected: filter at capacity ({} entries)",
                self.capacity()
            );
            return false;
        }

        let (fq, fr) = self.split(hash);
        let canonical = self.slots.get(fq);

        if codec::is_empty(canonical) {
            self.slots.set(fq, codec::make_slot(fr, true, false, false));
            self.len += 1;
            return true;
        }

        let pre_existing_run = codec::is_occupied(canonical);
        if !pre_existing_run {
            self.slots.set(fq, canonical | codec::OCCUPIED_BIT);
        }

        let start = self.find_run_index(fq);
        let mut s = start;

        if pre_existing_run {
            loop {
                let cur = self.slots.get(s);
                match codec::remainder(cur).cmp(&fr) {
                    Ordering::Equal => return true,
                    Ordering::Greater => break,
                    Ordering::Less => {
                        let next = self.increment(s);
                        if !codec::is_continuation(self.slots.get(next)) {
                            s = next;
                            break;
                        }
                        s = next;
                    }
                }
            }
        }

        let mut continuation = false;
        if pre_existing_run {
            if s == start {
                let start_slot = self.slots.get(start);
                self.slots.set(start, start_slot | codec::CONTINUATION_BIT);
            } else {
                continuation = true;
            }
        }
        let shifted = s != fq;
        let new_entry = codec::make_slot(fr, false, continuation, shifted);
        self.insert_into(s, new_entry);
        self.len += 1;
        true
    }

    fn contains_raw(&self, fq: usize, fr: u64) -> bool {
        let canonical = self.slots.get(fq);
        if !codec::is_occupied(canonical) {
            return false;
        }

        let mut s = self.find_run_index(fq);
        loop {
            let cur = self.slots.get(s);
            match codec::remainder(cur).cmp(&fr) {
                Ordering::Equal => return true,
                Ordering::Greater => return false,
                Ordering::Less => {
                    s = self.increment(s);
                    if !codec::is_continuation(self.slots.get(s)) {
                        return false;
                    }
                }
            }
        }
    }

    /// Checks whether `hash` is possibly present. Never false negative;
    /// possibly false positive.
    pub fn may_contain(&self, hash: u64) -> bool {
        let (fq, fr) = self.split(hash);
        self.contains_raw(fq, fr)
    }

    /// Shift-deletes the entry at `index` (whose canonical slot is `fq`),
    /// sliding the rest of the cluster one slot to the left. `runs_count` and
    /// `occupied_count` are the counts `find_run_index_with_counts` computed
    /// while locating the run (plus whatever `remove` accumulated while
    /// scanning into the run); they track a virtual cursor over occupied
    /// quotients so that a shifted-left entry landing on its own canonical
    /// slot can have its `is_shifted` bit cleared.
    fn delete_entry(
        &mut self,
        index: usize,
        fq: usize,
        mut runs_count: usize,
        mut occupied_count: usize,
    ) {
        let mut index = index;
        let mut carry = self.slots.get(index);
        let mut is_run_start = !codec::is_continuation(carry);

        carry &= codec::OCCUPIED_BIT;
        self.slots.set(index, 0);

        let mut next_index = self.increment(index);
        let mut next_slot = self.slots.get(next_index);

        while codec::is_continuation(next_slot) || codec::is_shifted(next_slot) {
            self.slots.set(next_index, 0);

            if !codec::is_continuation(next_slot) {
                runs_count += 1;
                if is_run_start {
                    let canonical = self.slots.get(fq) & !codec::OCCUPIED_BIT;
                    self.slots.set(fq, canonical);
                }
            } else if !is_run_start {
                carry |= codec::CONTINUATION_BIT;
            }
            is_run_start = false;

            if carry & codec::OCCUPIED_BIT == 0 || occupied_count != runs_count {
                carry |= codec::SHIFTED_BIT;
            }

            carry |= next_slot & !codec::METADATA_MASK;
            self.slots.set(index, carry);

            if codec::is_occupied(next_slot) {
                occupied_count += 1;
            }

            carry = next_slot & codec::OCCUPIED_BIT;

            index = next_index;
            next_index = self.increment(next_index);
            next_slot = self.slots.get(next_index);
        }
    }

    /// Removes `hash` if present; a no-op (returning `true`) if it is absent.
    /// Returns `false` without modifying the filter if `hash` carries any
    /// bits above position `quotient_bits + remainder_bits`. Such a hash
    /// could not have been produced by `insert`'s own low-bit projection, and
    /// deleting its projection would silently evict an unrelated fingerprint.
    pub fn remove(&mut self, hash: u64) -> bool {
        let p = u32::from(self.quotient_bits) + u32::from(self.remainder_bits);
        if p < 64 && hash >> p != 0 {
            warn!("remove rejected: hash {:#x} has bits set above position {}", hash, p);
            return false;
        }

        let (fq, fr) = self.split(hash);
        if !codec::is_occupied(self.slots.get(fq)) || self.len == 0 {
            return true;
        }

        let (mut s, runs_count, mut occupied_count) = self.find_run_index_with_counts(fq);
        loop {
            let cur = self.slots.get(s);
            match codec::remainder(cur).cmp(&fr) {
                Ordering::Equal => break,
                Ordering::Greater => return true,
                Ordering::Less => {
                    s = self.increment(s);
                    let next = self.slots.get(s);
                    if codec::is_occupied(next) {
                        occupied_count += 1;
                    }
                    if !codec::is_continuation(next) {
                        return true;
                    }
                }
            }
        }

        self.delete_entry(s, fq, runs_count, occupied_count);
        self.len -= 1;
        true
    }

    /// Removes every entry, without releasing the backing buffer.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }

    /// Consumes the filter, releasing its backing buffer. Equivalent to
    /// letting the filter drop, spelled out for parity with the engine's
    /// `init`/`destroy` lifecycle contract.
    pub fn destroy(self) {}

    /// Constructs a new filter containing every fingerprint enumerable from
    /// `a` and from `b`. The output is sized with `quotient_bits = 1 +
    /// max(a.quotient_bits, b.quotient_bits)` and `remainder_bits =
    /// max(a.remainder_bits, b.remainder_bits)`, which is always large enough
    /// to hold both inputs without hitting capacity.
    pub fn merge(a: &QuotientFilter, b: &QuotientFilter) -> Result<Self, QuotientFilterError> {
        let quotient_bits = 1 + a.quotient_bits.max(b.quotient_bits);
        let remainder_bits = a.remainder_bits.max(b.remainder_bits);
        debug!(
            "merging filters ({}, {}) and ({}, {}) into ({}, {})",
            a.quotient_bits, a.remainder_bits, b.quotient_bits, b.remainder_bits,
            quotient_bits, remainder_bits,
        );

        let mut out = Self::init(quotient_bits, remainder_bits)?;
        for hash in a.iter() {
            out.insert(hash);
        }
        for hash in b.iter() {
            out.insert(hash);
        }
        Ok(out)
    }

    /// Returns an iterator over every stored fingerprint, in table order
    /// (cyclically from the first cluster start), not insertion order. Each
    /// fingerprint is exactly `quotient_bits + remainder_bits` bits wide.
    pub fn iter(&self) -> Iter<'_> {
        if self.len == 0 {
            return Iter {
                filter: self,
                index: 0,
                quotient: 0,
                visited: 0,
            };
        }

        let mut index = 0;
        while !codec::is_cluster_start(self.slots.get(index)) {
            index += 1;
        }
        Iter {
            filter: self,
            index,
            quotient: index,
            visited: 0,
        }
    }

    /// Returns the number of stored fingerprints.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the filter holds no fingerprints.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots (`2^quotient_bits`).
    pub fn capacity(&self) -> usize {
        1 << self.quotient_bits
    }

    /// Returns the number of quotient bits.
    pub fn quotient_bits(&self) -> u8 {
        self.quotient_bits
    }

    /// Returns the number of remainder bits.
    pub fn remainder_bits(&self) -> u8 {
        self.remainder_bits
    }

    /// Returns the number of bytes the slot table occupies.
    pub fn table_size(quotient_bits: u8, remainder_bits: u8) -> usize {
        let slot_bits = u64::from(remainder_bits) + u64::from(codec::METADATA_BITS);
        let total_bits = slot_bits * (1u64 << quotient_bits);
        ((total_bits + 7) / 8) as usize
    }

    /// Returns the byte size of this filter's slot table.
    pub fn table_size_bytes(&self) -> usize {
        self.slots.bytes()
    }

    /// Estimates the current false-positive probability under a uniform-hash
    /// assumption. This grows as more items are inserted. Computed entirely
    /// in `f64`, so it stays accurate even when `quotient_bits +
    /// remainder_bits >= 32` (widening the exponent through a 32-bit integer
    /// first, as some implementations do, overflows at that width).
    pub fn false_positive_rate(&self) -> f64 {
        let p = u32::from(self.quotient_bits) + u32::from(self.remainder_bits);
        let denom = 2f64.powi(p as i32);
        1.0 - (-(self.len as f64) / denom).exp()
    }

    /// Walks every cluster and checks the structural invariants from spec.md
    /// §3: continuations imply shifted and a non-empty predecessor, runs are
    /// strictly increasing, the non-empty slot count matches `len`, and empty
    /// slots carry zero remainder bits. Intended for test assertions, not
    /// production call sites.
    #[cfg(any(test, feature = "invariant-checks"))]
    pub fn debug_assert_invariants(&self) {
        let mut non_empty = 0;
        for i in 0..self.capacity() {
            let slot = self.slots.get(i);
            if codec::is_empty(slot) {
                assert_eq!(
                    codec::remainder(slot),
                    0,
                    "empty slot {} has nonzero remainder bits",
                    i
                );
                continue;
            }
            non_empty += 1;

            if codec::is_continuation(slot) {
                assert!(codec::is_shifted(slot), "continuation at {} is not shifted", i);
                let prev = self.decrement(i);
                assert!(
                    !codec::is_empty(self.slots.get(prev)),
                    "continuation at {} has an empty predecessor",
                    i
                );
                let prev_remainder = codec::remainder(self.slots.get(prev));
                assert!(
                    prev_remainder < codec::remainder(slot),
                    "run remainders not strictly increasing at {}",
                    i
                );
            }
        }
        assert_eq!(non_empty, self.len, "len does not match non-empty slot count");
    }
}

impl fmt::Debug for QuotientFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.capacity() {
            let slot = self.slots.get(i);
            write!(f, "{}|{}:{:03b} ", i, codec::remainder(slot), slot & codec::METADATA_MASK)?;
        }
        Ok(())
    }
}

/// A lazy, finite, non-restartable iterator over a [`QuotientFilter`]'s
/// stored fingerprints. Behavior is undefined if the filter is mutated while
/// an `Iter` over it is live.
pub struct Iter<'a> {
    filter: &'a QuotientFilter,
    index: usize,
    quotient: usize,
    visited: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.visited >= self.filter.len() {
            return None;
        }

        loop {
            let e = self.filter.slots.get(self.index);

            if codec::is_cluster_start(e) {
                self.quotient = self.index;
            } else if codec::is_run_start(e) {
                loop {
                    self.quotient = self.filter.increment(self.quotient);
                    if codec::is_occupied(self.filter.slots.get(self.quotient)) {
                        break;
                    }
                }
            }

            self.index = self.filter.increment(self.index);

            if !codec::is_empty(e) {
                self.visited += 1;
                let value = (self.quotient as u64) << self.filter.remainder_bits | codec::remainder(e);
                return Some(value);
            }
        }
    }
}

impl<'a> IntoIterator for &'a QuotientFilter {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::QuotientFilter;
    use rand::{seq::SliceRandom, Rng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_init() {
        let filter = QuotientFilter::init(8, 4).unwrap();
        assert_eq!(filter.capacity(), 256);
        assert_eq!(filter.quotient_bits(), 8);
        assert_eq!(filter.remainder_bits(), 4);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_init_rejects_zero_width() {
        assert!(QuotientFilter::init(0, 4).is_err());
        assert!(QuotientFilter::init(4, 0).is_err());
    }

    #[test]
    fn test_init_rejects_width_overflow() {
        assert!(QuotientFilter::init(40, 30).is_err());
    }

    #[test]
    fn test_with_capacity() {
        let filter = QuotientFilter::with_capacity(100, 0.05).unwrap();
        assert!(filter.capacity() >= 100);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_scenario_three_disjoint_quotients() {
        // init(q=4, r=4); insert 0x00, 0x10, 0x20 (remainder 0, quotients 0,1,2)
        let mut filter = QuotientFilter::init(4, 4).unwrap();
        assert!(filter.insert(0x00));
        assert!(filter.insert(0x10));
        assert!(filter.insert(0x20));

        assert_eq!(filter.len(), 3);
        assert!(filter.may_contain(0x00));
        assert!(filter.may_contain(0x10));
        assert!(filter.may_contain(0x20));
        assert!(!filter.may_contain(0x30));
        filter.debug_assert_invariants();
    }

    #[test]
    fn test_scenario_single_run_of_four() {
        // init(q=3, r=3); insert {0x00, 0x01, 0x02, 0x03}: all land in slot 0.
        let mut filter = QuotientFilter::init(3, 3).unwrap();
        for h in [0x00u64, 0x01, 0x02, 0x03] {
            assert!(filter.insert(h));
        }
        assert_eq!(filter.len(), 4);
        for h in [0x00u64, 0x01, 0x02, 0x03] {
            assert!(filter.may_contain(h));
        }
        filter.debug_assert_invariants();

        assert!(crate::codec::is_cluster_start(filter.slots.get(0)));
        for i in 1..4 {
            let slot = filter.slots.get(i);
            assert!(crate::codec::is_continuation(slot));
            assert!(crate::codec::is_shifted(slot));
            assert!(!crate::codec::is_occupied(slot));
        }
    }

    #[test]
    fn test_scenario_shift_and_remove() {
        // init(q=3, r=3); insert {0x00, 0x01, 0x08}.
        let mut filter = QuotientFilter::init(3, 3).unwrap();
        assert!(filter.insert(0x00));
        assert!(filter.insert(0x01));
        assert!(filter.insert(0x08));
        assert_eq!(filter.len(), 3);
        filter.debug_assert_invariants();

        assert!(filter.remove(0x01));
        assert_eq!(filter.len(), 2);
        assert!(!filter.may_contain(0x01));
        assert!(filter.may_contain(0x00));
        assert!(filter.may_contain(0x08));
        filter.debug_assert_invariants();
    }

    #[test]
    fn test_capacity_exhaustion() {
        // init(q=4, r=4); fill to capacity, 17th insert fails.
        let mut filter = QuotientFilter::init(4, 4).unwrap();
        for i in 0..16u64 {
            assert!(filter.insert(i));
        }
        assert_eq!(filter.len(), 16);
        let before = format!("{:?}", filter);
        assert!(!filter.insert(0xDEAD));
        assert_eq!(filter.len(), 16);
        assert_eq!(before, format!("{:?}", filter));
    }

    #[test]
    fn test_merge_union() {
        let mut a = QuotientFilter::init(4, 4).unwrap();
        let mut b = QuotientFilter::init(4, 4).unwrap();
        let a_items: Vec<u64> = (0..5).collect();
        let b_items: Vec<u64> = (5..10).collect();
        for &h in &a_items {
            a.insert(h);
        }
        for &h in &b_items {
            b.insert(h);
        }

        let out = QuotientFilter::merge(&a, &b).unwrap();
        assert_eq!(out.quotient_bits(), 5);

        let collected: HashSet<u64> = out.iter().collect();
        let expected: HashSet<u64> = a_items.iter().chain(b_items.iter()).copied().collect();
        assert_eq!(collected, expected);
        out.debug_assert_invariants();
    }

    #[test]
    fn test_remove_rejects_out_of_domain_hash() {
        let mut filter = QuotientFilter::init(4, 4).unwrap();
        // p = 8 bits; a hash with a bit set above position 8 is out of domain.
        assert!(!filter.remove(1 << 9));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut filter = QuotientFilter::init(4, 4).unwrap();
        filter.insert(0x01);
        assert!(filter.remove(0xFF));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let mut filter = QuotientFilter::init(8, 4).unwrap();
        let before_empty = filter.insert(0xAB);
        assert!(before_empty);
        let table_after_first = format!("{:?}", filter);

        assert!(filter.insert(0xAB));
        assert!(filter.insert(0xAB));
        assert_eq!(filter.len(), 1);
        assert_eq!(table_after_first, format!("{:?}", filter));
    }

    #[test]
    fn test_iter_multiset_matches_inserted() {
        let mut filter = QuotientFilter::init(6, 6).unwrap();
        let mut rng = rand_xorshift::XorShiftRng::from_seed([3; 16]);
        let mask = (1u64 << 12) - 1;
        let mut inserted = Vec::new();
        for _ in 0..30 {
            let h = rng.gen::<u64>() & mask;
            if filter.insert(h) {
                inserted.push(h);
            }
        }

        let mut expected: Vec<u64> = inserted.clone();
        expected.sort_unstable();
        expected.dedup();
        let mut got: Vec<u64> = filter.iter().collect();
        got.sort_unstable();
        got.dedup();
        assert_eq!(expected, got);
    }

    #[test]
    fn test_false_positive_rate_monotone_and_bounded() {
        let mut filter = QuotientFilter::init(8, 20).unwrap();
        assert_eq!(filter.false_positive_rate(), 0.0);
        filter.insert(0x1234);
        let first = filter.false_positive_rate();
        assert!(first > 0.0 && first < 1.0);
        filter.insert(0x5678);
        assert!(filter.false_positive_rate() >= first);
    }

    #[test]
    fn test_false_positive_rate_does_not_overflow_for_wide_p() {
        // quotient_bits + remainder_bits >= 32: widening through a 32-bit
        // integer shift first (as some implementations do) overflows here.
        let mut filter = QuotientFilter::init(16, 20).unwrap();
        filter.insert(0x1234_5678);
        let fpp = filter.false_positive_rate();
        assert!(fpp.is_finite());
        assert!(fpp > 0.0 && fpp < 1.0);
    }

    #[test]
    fn test_table_size() {
        // 16 slots of (4 + 3) bits = 112 bits = 14 bytes.
        assert_eq!(QuotientFilter::table_size(4, 4), 14);
    }

    #[test]
    fn test_stress_insert_remove_round_trip() {
        crate::test_support::init_test_logger();
        let mut rng = rand_xorshift::XorShiftRng::from_seed([9; 16]);
        let quotient_bits = 10u8;
        let remainder_bits = 40u8;
        let mut filter = QuotientFilter::init(quotient_bits, remainder_bits).unwrap();

        let mut items = Vec::new();
        for _ in 0..(1usize << quotient_bits) {
            let mut item = rng.gen_range(0, 1u64 << (quotient_bits + remainder_bits));
            while filter.may_contain(item) {
                item = rng.gen_range(0, 1u64 << (quotient_bits + remainder_bits));
            }
            assert!(filter.insert(item));
            items.push(item);
            assert_eq!(filter.len(), items.len());
        }
        filter.debug_assert_invariants();

        items.shuffle(&mut rng);
        for item in items {
            assert!(filter.may_contain(item));
            assert!(filter.remove(item));
            assert!(!filter.may_contain(item));
            filter.debug_assert_invariants();
        }
        assert!(filter.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut filter = QuotientFilter::init(8, 4).unwrap();
        filter.insert(1);
        filter.insert(2);
        filter.insert(3);
        filter.clear();
        assert!(filter.is_empty());
        assert!(!filter.may_contain(1));
        assert!(!filter.may_contain(2));
        assert!(!filter.may_contain(3));
    }
}
