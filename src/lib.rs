//! # quotient-filter
//!
//! A space-efficient, deletion-capable approximate-membership filter.
//!
//! Fingerprints are stored contiguously in a single bit-packed table,
//! ordered by their canonical slot, with collisions on a slot resolved by
//! keeping same-quotient entries together in a sorted run. That structure
//! (as opposed to a bloom filter's independent bit array) is what makes
//! deletion and enumeration of stored items possible.
//!
//! The filter hashes nothing itself: callers supply their own 64-bit hash
//! of each item and the filter only ever operates on the resulting integer.
//! This keeps the filter generic over key type without any `Hash`/`BuildHasher`
//! machinery of its own.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! quotient-filter = "*"
//! ```
//!
//! ## References
//!
//!  - [A General-Purpose Counting Filter: Making Every Bit Count](https://www3.cs.stonybrook.edu/~ppandey/files/p775-pandey.pdf)
//!  > Pandey, Prashant, Michael A. Bender, Rob Johnson, and Rob Patro. 2017. “A General-Purpose Counting Filter: Making Every Bit Count.” In *Proceedings of the 2017 ACM International Conference on Management of Data*, 775–87. SIGMOD ’17. New York, NY, USA: ACM. doi:[10.1145/3035918.3035963](https://doi.org/10.1145/3035918.3035963).
//!  - [Don't Thrash: How to Cache Your Hash in Flight](http://www.vldb.org/pvldb/vol5/p1627_michaelabender_vldb2012.pdf)
//!  > Bender, Michael A., Martin Farach-Colton, Rob Johnson, Russell Kraner, Bradley C. Kuszmaul, Dzejla Medjedovic, Pablo Montes, Pradeep Shetty, Richard P. Spillane, and Erez Zadok. 2012. “Don’t Thrash: How to Cache Your Hash in Flight.” *Proc. VLDB Endow.* 5 (11). VLDB Endowment: 1627–37. doi:[10.14778/2350229.2350275](https://doi.org/10.14778/2350229.2350275).

#![warn(missing_docs)]

mod alloc;
mod codec;
mod error;
mod filter;
mod slot_array;
#[cfg(test)]
mod test_support;

pub use alloc::{GlobalAllocator, SlotAllocator};
pub use error::QuotientFilterError;
pub use filter::{Iter, QuotientFilter};
