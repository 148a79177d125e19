//! A UUID version 7 generator with a process-wide strictly monotonic order
//!
//! ```rust
//! use monouuid::uuid7;
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! assert!(uuid7() < uuid7()); // from any thread, in any interleaving
//! ```
//!
//! Identifiers produced by [`uuid7()`] compare strictly greater than every identifier produced
//! before them anywhere in the process, not just within one thread or one millisecond. The order
//! comes from a lock-free timestamp allocator: a single process-wide atomic holds the last issued
//! time in 100-nanosecond ticks, and each call claims `max(now, last + minimum step)` through a
//! compare-and-swap, so the embedded timestamps themselves are strictly increasing and no counter
//! or lock is involved.
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |       rand_a          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `rand_a` field carries the sub-millisecond remainder of the allocated instant,
//!   scaled to the field width, so that identifiers sharing a millisecond still sort by
//!   allocation order.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 62 `rand_b` bits are filled with a uniformly distributed random number drawn
//!   from a per-thread generator seeded from the operating system.
//!
//! While the wall clock stands still or moves backwards (an NTP correction, say), the allocator
//! keeps advancing by a guaranteed minimum step per call, drifting ahead of true time until the
//! clock catches up. The monotonic order never breaks within a running process; it is not
//! preserved across process restarts.
//!
//! # Crate features
//!
//! - `std` (implied by default) enables reading the system clock; without it, callers feed tick
//!   readings in through the lower-level interfaces.
//! - `global_gen` (default) enables [`uuid7()`] and [`uuid4()`].
//! - `serde` and `uuid` enable the respective integrations.
//!
//! # Other features
//!
//! This library also supports the generation of UUID version 4:
//!
//! ```rust
//! use monouuid::uuid4;
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod uuid;
pub use crate::uuid::{ParseError, Uuid};

pub mod clock;

pub mod generator;
pub use generator::V7Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid4, uuid7};
