//! Error types for the fallible constructors, following the `thiserror`
//! convention this pack already uses for other approximate-membership
//! structures (`CountMinError`, `DHeapError`).

use thiserror::Error;

/// Failure modes for [`crate::QuotientFilter::init`] and
/// [`crate::QuotientFilter::merge`].
///
/// `insert`, `may_contain`, and `remove` do not return this type: capacity
/// exhaustion and out-of-domain hashes are expected, recoverable outcomes
/// reported by `bool`, per the filter's interface contract.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotientFilterError {
    /// `quotient_bits` or `remainder_bits` was zero.
    #[error("quotient_bits and remainder_bits must both be nonzero")]
    ZeroWidth,
    /// `quotient_bits + remainder_bits` exceeded 64.
    #[error(
        "quotient_bits ({quotient_bits}) + remainder_bits ({remainder_bits}) exceeds 64 bits"
    )]
    WidthOverflow {
        quotient_bits: u8,
        remainder_bits: u8,
    },
    /// The injected allocator could not supply a buffer of the requested size.
    #[error("failed to allocate a slot table of {words} words")]
    AllocationFailed { words: usize },
}
