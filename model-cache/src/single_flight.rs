//! Memoized, single-flight async loading.
//!
//! ```text
//! Empty ──get_or_load──▶ Loading(attempt) ──Some──▶ Ready(value)   (kept forever)
//!   ▲                          │
//!   └──────────None────────────┘                                   (next call retries)
//! ```
//!
//! Callers arriving while an attempt is in flight join it instead of starting
//! their own, and all of them see that attempt's outcome. A loader that
//! panics counts as a failed attempt.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};

enum Slot<T> {
    Empty,
    Loading {
        attempt: u64,
        future: Shared<BoxFuture<'static, Option<T>>>,
    },
    Ready(T),
}

pub struct SingleFlight<T> {
    slot: Mutex<Slot<T>>,
    attempts: AtomicU64,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Slot::Empty),
            attempts: AtomicU64::new(0),
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, if a load has succeeded.
    pub fn get(&self) -> Option<T> {
        match &*self.slot.lock() {
            Slot::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// True while an attempt is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(&*self.slot.lock(), Slot::Loading { .. })
    }

    /// Number of load attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Return the cached value, join the in-flight load, or start one.
    ///
    /// `load` is only invoked when no value is cached and nothing is in flight.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<T>> + Send + 'static,
    {
        let (attempt, future) = {
            let mut slot = self.slot.lock();
            match &*slot {
                Slot::Ready(value) => return Some(value.clone()),
                Slot::Loading { attempt, future } => (*attempt, future.clone()),
                Slot::Empty => {
                    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    let future = AssertUnwindSafe(load())
                        .catch_unwind()
                        .map(move |outcome| {
                            outcome.unwrap_or_else(|_| {
                                log::error!("Load attempt {} panicked", attempt);
                                None
                            })
                        })
                        .boxed()
                        .shared();
                    *slot = Slot::Loading {
                        attempt,
                        future: future.clone(),
                    };
                    (attempt, future)
                }
            }
        };

        let outcome = future.await;

        let mut slot = self.slot.lock();
        let settles_this_attempt = matches!(
            &*slot,
            Slot::Loading { attempt: current, .. } if *current == attempt
        );
        if settles_this_attempt {
            *slot = match &outcome {
                Some(value) => Slot::Ready(value.clone()),
                None => Slot::Empty,
            };
        }

        outcome
    }
}
