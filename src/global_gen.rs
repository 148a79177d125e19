//! Process-global generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::cell::RefCell;

use crate::clock::MonotonicClock;
use crate::generator::{encode_v4, encode_v7};
use crate::Uuid;
use inner::ThreadState;

/// The process-wide clock shared by every thread. The atomic inside is the only shared mutable
/// state behind [`uuid7`]; it lives for the whole process and is never reset.
static CLOCK: MonotonicClock = MonotonicClock::new();

thread_local! {
    static THREAD_STATE: RefCell<ThreadState> = RefCell::new(ThreadState::new());
}

/// Generates a UUIDv7 object.
///
/// This function combines the process-wide monotonic clock with a per-thread random number
/// generator and guarantees that every UUID returned, from any thread and without external
/// synchronization, compares strictly greater than all UUIDs returned before it. On Unix, this
/// function reseeds the per-thread generator when the process ID changes (i.e., upon process
/// forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = monouuid::uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// assert!(monouuid::uuid7() < monouuid::uuid7());
/// ```
pub fn uuid7() -> Uuid {
    THREAD_STATE.with(|state| encode_v7(CLOCK.next_instant(), state.borrow_mut().rng()))
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = monouuid::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    THREAD_STATE.with(|state| encode_v4(state.borrow_mut().rng()))
}

mod inner {
    use rand::rngs::adapter::ReseedingRng;
    use rand::rngs::OsRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    /// The type alias for the per-thread random number generator.
    ///
    /// [`ChaCha12Core`] with the [`ReseedingRng`] wrapper emulates the strategy used by
    /// `rand::rngs::ThreadRng`, with each thread seeded independently from [`OsRng`].
    pub type ThreadStateRng = ReseedingRng<ChaCha12Core, OsRng>;

    /// Per-thread generator state that detects process forks on Unix.
    pub struct ThreadState {
        #[cfg(unix)]
        pid: u32,
        rng: ThreadStateRng,
    }

    impl ThreadState {
        pub fn new() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                rng: fresh_rng(),
            }
        }

        /// Returns the thread's random number generator, replacing it on Unix if the process ID
        /// has changed since the last call.
        pub fn rng(&mut self) -> &mut ThreadStateRng {
            #[cfg(unix)]
            {
                let pid = std::process::id();
                if self.pid != pid {
                    self.pid = pid;
                    self.rng = fresh_rng();
                }
            }
            &mut self.rng
        }
    }

    fn fresh_rng() -> ThreadStateRng {
        let core = ChaCha12Core::from_rng(OsRng)
            .expect("monouuid: could not seed thread-local generator");
        ReseedingRng::new(core, 1024 * 64, OsRng)
    }
}
