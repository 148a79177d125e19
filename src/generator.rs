//! UUIDv7 generator and related types.

use crate::clock::{MonotonicClock, STEP_BITS};
use crate::Uuid;
use rand::RngCore;

const MAX_RAND_B: u64 = (1 << 62) - 1;

/// Packs one instant and eight random bytes into the UUIDv7 bit layout.
///
/// The millisecond part of the instant fills `unix_ts_ms`, the sub-millisecond remainder is
/// scaled into the 12-bit `rand_a` field, and one random word fills `rand_b`.
pub(crate) fn encode_v7(instant_ns: u64, rng: &mut impl RngCore) -> Uuid {
    let unix_ts_ms = instant_ns / 1_000_000;
    let sub_ms_ns = instant_ns % 1_000_000;
    let mut rand_a = (sub_ms_ns * 4096 / 1_000_000) as u16;
    let rand_b = rng.next_u64();
    if STEP_BITS == 10 {
        // fold the two random bits displaced by the variant field into the precision bits
        rand_a ^= (rand_b >> 62) as u16;
    }
    Uuid::from_fields_v7(unix_ts_ms, rand_a, rand_b & MAX_RAND_B)
}

/// Stamps version 4 and variant `10` onto sixteen random bytes.
#[cfg(feature = "global_gen")]
pub(crate) fn encode_v4(rng: &mut impl RngCore) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = 0x40 | (bytes[6] >> 4);
    bytes[8] = 0x80 | (bytes[8] >> 2);
    Uuid::from(bytes)
}

/// Represents a UUIDv7 generator that owns a [`MonotonicClock`] and a random number generator and
/// produces strictly increasing UUIDs for the lifetime of the instance.
///
/// Unlike generators that keep a counter per millisecond, the monotonic order comes entirely from
/// the clock: every identifier embeds a timestamp strictly greater than the previous one, with
/// the sub-millisecond remainder carried in the `rand_a` field. The order therefore holds however
/// the random bits come out.
///
/// This type provides the interface to customize the random number generator and to feed the
/// clock a tick reading of one's own. It also helps control the scope of guaranteed order of the
/// generated UUIDs: UUIDs from one instance are mutually ordered, while the process-wide
/// [`uuid7`](crate::uuid7) function orders UUIDs across all threads. The following example
/// guarantees the cross-thread order for a shared instance using Rust's standard synchronization
/// mechanism.
///
/// # Examples
///
/// ```rust
/// use monouuid::V7Generator;
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
///
/// let g = sync::Arc::new(sync::Mutex::new(V7Generator::new(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug, Default)]
pub struct V7Generator<R> {
    clock: MonotonicClock,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RngCore> V7Generator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self {
            clock: MonotonicClock::new(),
            rng,
        }
    }

    /// Generates a new UUIDv7 object from the current system time.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads earlier than the Unix epoch.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate(&mut self) -> Uuid {
        let instant_ns = self.clock.next_instant();
        encode_v7(instant_ns, &mut self.rng)
    }

    /// Generates a new UUIDv7 object from a caller-supplied wall-clock reading in 100-nanosecond
    /// ticks since the Unix epoch.
    ///
    /// The reading only bounds the result from below together with the previously issued
    /// instants; a stale or rewound reading still yields a UUID greater than the last one.
    pub fn generate_from_ticks(&mut self, now_ticks: u64) -> Uuid {
        let instant_ns = self.clock.next_instant_from(now_ticks);
        encode_v7(instant_ns, &mut self.rng)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use monouuid::V7Generator;
///
/// V7Generator::new(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: RngCore> Iterator for V7Generator<R> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: RngCore> std::iter::FusedIterator for V7Generator<R> {}

#[cfg(test)]
mod tests {
    use super::V7Generator;
    use crate::clock::TICKS_PER_MS;

    type ThreadGen = V7Generator<rand::rngs::ThreadRng>;

    /// An arbitrary but realistic tick reading (mid-2022)
    const T0: u64 = 16_477_000_000_000_000;

    /// Generates increasing UUIDs even with constant tick reading
    #[test]
    fn generates_increasing_uuids_even_with_constant_tick_reading() {
        let mut g: ThreadGen = Default::default();
        let mut prev = g.generate_from_ticks(T0);
        assert_eq!(prev.unix_ts_ms(), T0 / TICKS_PER_MS);
        for _ in 0..100_000 {
            let curr = g.generate_from_ticks(T0);
            assert!(prev < curr);
            prev = curr;
        }
        assert!(prev.unix_ts_ms() >= T0 / TICKS_PER_MS);
    }

    /// Generates increasing UUIDs even with decreasing tick reading
    #[test]
    fn generates_increasing_uuids_even_with_decreasing_tick_reading() {
        let mut g: ThreadGen = Default::default();
        let mut prev = g.generate_from_ticks(T0);
        for i in 0..100_000u64 {
            let curr = g.generate_from_ticks(T0 - i.min(4_000) * TICKS_PER_MS);
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Carries the sub-millisecond remainder in the rand_a field
    #[test]
    fn carries_the_sub_millisecond_remainder_in_the_rand_a_field() {
        // 600_000 ns into the millisecond scales to 4096 * 6 / 10 in the 12-bit field
        let now_ticks = T0 + 6_000;
        let mut g: ThreadGen = Default::default();
        let e = g.generate_from_ticks(now_ticks);
        assert_eq!(e.unix_ts_ms(), now_ticks / TICKS_PER_MS);

        let rand_a = ((e.as_bytes()[6] as u16 & 0x0f) << 8) | e.as_bytes()[7] as u16;
        let expected = (600_000u64 * 4096 / 1_000_000) as u16;
        // the coarse-timer configuration perturbs the low two bits
        assert_eq!(rand_a >> 2, expected >> 2);
    }

    /// Encodes up-to-date timestamp
    #[cfg(feature = "std")]
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time::{SystemTime, UNIX_EPOCH};
        let mut g: ThreadGen = Default::default();
        for _ in 0..10_000 {
            let ts_now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis() as i64;
            let timestamp = g.generate().unix_ts_ms() as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }

    /// Generates 1M identifiers without collision
    #[cfg(feature = "std")]
    #[test]
    fn generates_1m_identifiers_without_collision() {
        use std::collections::HashSet;
        const N: usize = 1_000_000;
        let mut g: ThreadGen = Default::default();
        let mut s: HashSet<[u8; 16]> = HashSet::with_capacity(N);
        for _ in 0..N {
            s.insert(*g.generate().as_bytes());
        }
        assert_eq!(s.len(), N);
    }
}
