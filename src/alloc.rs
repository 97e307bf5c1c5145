//! Injectable allocator for the slot table, mirroring the way
//! [`crate::QuotientFilter`] is otherwise parameterized over a collaborator
//! (the teacher's `QuotientFilter<T, B: BuildHasher>` takes its hash builder
//! the same way: a convenience constructor that supplies a default, and an
//! explicit constructor that takes the collaborator directly).

use crate::error::QuotientFilterError;

/// Supplies the backing word buffer for a slot table.
///
/// Implementations get one chance to fail, at `init`/`merge` time; once a
/// [`crate::QuotientFilter`] is constructed it never asks its allocator for
/// memory again ("Non-goals: resizing in place").
pub trait SlotAllocator {
    /// Returns a zeroed buffer of exactly `words` `u64`s, or an error if the
    /// buffer could not be obtained.
    fn allocate(&self, words: usize) -> Result<Vec<u64>, QuotientFilterError>;
}

/// The default allocator: the process heap, via `Vec::try_reserve_exact` so
/// that an allocation failure is reported as an `Err` instead of aborting.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalAllocator;

impl SlotAllocator for GlobalAllocator {
    fn allocate(&self, words: usize) -> Result<Vec<u64>, QuotientFilterError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(words)
            .map_err(|_| QuotientFilterError::AllocationFailed { words })?;
        buf.resize(words, 0);
        Ok(buf)
    }
}
