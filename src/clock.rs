//! Monotonic timestamp source backed by a single process-wide atomic.

#[cfg(not(feature = "std"))]
use core as std;

use std::sync::atomic::{AtomicU64, Ordering};

/// Number of 100-nanosecond ticks per millisecond.
pub const TICKS_PER_MS: u64 = 10_000;

/// Number of nanoseconds per 100-nanosecond tick.
const NS_PER_TICK: u64 = 100;

/// Number of sub-millisecond precision bits the platform's high-resolution clock can meaningfully
/// fill: 10 where the timer granularity is coarse (Windows), 12 where it is fine.
#[cfg(windows)]
pub const STEP_BITS: u32 = 10;

/// Number of sub-millisecond precision bits the platform's high-resolution clock can meaningfully
/// fill: 10 where the timer granularity is coarse (Windows), 12 where it is fine.
#[cfg(not(windows))]
pub const STEP_BITS: u32 = 12;

/// The smallest advance, in ticks, that each issued instant is guaranteed to make over the
/// previous one, even while the wall clock stands still or runs backwards.
pub const MIN_STEP_TICKS: u64 = TICKS_PER_MS / (1 << STEP_BITS) + 1;

/// A wall-clock reader that hands out strictly ascending instants to concurrent callers without
/// locks.
///
/// The clock keeps the last issued value in a single [`AtomicU64`] of 100-nanosecond ticks since
/// the Unix epoch, updated only through compare-and-swap. Each call returns
/// `max(now, last + MIN_STEP_TICKS)`, so the sequence of instants is strictly increasing across
/// all threads sharing the instance for the lifetime of the process, at the cost of drifting
/// ahead of the wall clock while it stalls or regresses.
///
/// A failed compare-and-swap means another caller succeeded, so the retry loop makes global
/// progress without backoff; a given call retries at most once per concurrently racing thread.
///
/// # Examples
///
/// ```rust
/// use monouuid::clock::MonotonicClock;
///
/// static CLOCK: MonotonicClock = MonotonicClock::new();
///
/// let a = CLOCK.next_instant();
/// let b = CLOCK.next_instant();
/// assert!(a < b);
/// ```
#[derive(Debug, Default)]
pub struct MonotonicClock {
    /// Ticks of the last issued instant; zero until the first call.
    last_emitted: AtomicU64,
}

impl MonotonicClock {
    /// Creates a clock instance.
    pub const fn new() -> Self {
        Self {
            last_emitted: AtomicU64::new(0),
        }
    }

    /// Returns the next instant as nanoseconds since the Unix epoch, strictly greater than every
    /// instant previously returned by this instance from any thread.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads earlier than the Unix epoch.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn next_instant(&self) -> u64 {
        loop {
            if let Some(ticks) = self.try_advance(Self::now_ticks()) {
                return ticks * NS_PER_TICK;
            }
        }
    }

    /// Returns the next instant in nanoseconds computed from a caller-supplied wall-clock reading
    /// in ticks.
    ///
    /// This is the low-level primitive behind [`next_instant`](Self::next_instant); it reuses the
    /// same reading across retries instead of consulting the system clock.
    pub fn next_instant_from(&self, now_ticks: u64) -> u64 {
        loop {
            if let Some(ticks) = self.try_advance(now_ticks) {
                return ticks * NS_PER_TICK;
            }
        }
    }

    /// Makes one compare-and-swap attempt to claim the next instant, returning `None` if another
    /// thread claimed an instant concurrently.
    fn try_advance(&self, now_ticks: u64) -> Option<u64> {
        // A stale read here is harmless: the CAS below fails and the caller retries. Release on
        // success pairs with the Acquire side of later successful exchanges so that every claimed
        // value is observed by the competitor that claims the next one.
        let prev = self.last_emitted.load(Ordering::Relaxed);
        let mut candidate = now_ticks;
        if candidate < prev + MIN_STEP_TICKS {
            candidate = prev + MIN_STEP_TICKS;
        }
        self.last_emitted
            .compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
            .ok()
            .map(|_| candidate)
    }

    /// Reads the system clock as ticks since the Unix epoch.
    #[cfg(feature = "std")]
    fn now_ticks() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("monouuid: system clock reads earlier than Unix epoch");
        (since_epoch.as_nanos() / NS_PER_TICK as u128) as u64
    }
}
