//! Latest-sample slot for handing attitude data to the render thread
//!
//! Telemetry can arrive faster than frames are drawn. Instead of queueing,
//! the producer overwrites a single slot and the render loop takes whatever
//! is newest once per frame, so intermediate samples are coalesced away.
//!
//! ## Example
//!
//! ```
//! use attitude_rs::telemetry::{AttitudeSample, LatestSample};
//!
//! let feed = LatestSample::new();
//! let producer = feed.clone_ref();
//!
//! // In the telemetry thread:
//! producer.publish(AttitudeSample::new(10.0, 2.0));
//!
//! // In the UI thread:
//! if let Some(sample) = feed.take() {
//!     assert_eq!(sample.roll, 10.0);
//! }
//! ```

use std::sync::{Arc, Mutex};

use super::sample::AttitudeSample;

/// Thread-safe single-slot mailbox for attitude samples
pub struct LatestSample {
    /// Arc = shared ownership across threads
    /// Mutex = exclusive access (only one thread at a time)
    inner: Arc<Mutex<SlotInner>>,
}

/// Internal slot data
#[derive(Default)]
struct SlotInner {
    /// Newest sample not yet taken
    pending: Option<AttitudeSample>,
    /// Number of samples published (for tracking)
    published: u64,
    /// Number of samples overwritten before being taken
    coalesced: u64,
}

impl LatestSample {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotInner::default())),
        }
    }

    /// Publish a sample, replacing any sample not yet taken
    ///
    /// Uses `try_lock()` so a producer never blocks on the render thread.
    ///
    /// # Returns
    /// `true` if the sample was stored, `false` if the slot was busy
    pub fn publish(&self, sample: AttitudeSample) -> bool {
        if let Ok(mut inner) = self.inner.try_lock() {
            if inner.pending.replace(sample).is_some() {
                inner.coalesced += 1;
            }
            inner.published += 1;
            true
        } else {
            // Slot held by the consumer - the next sample will do
            false
        }
    }

    /// Take the newest sample, leaving the slot empty
    pub fn take(&self) -> Option<AttitudeSample> {
        match self.inner.lock() {
            Ok(mut inner) => inner.pending.take(),
            Err(poisoned) => poisoned.into_inner().pending.take(),
        }
    }

    /// Look at the newest sample without taking it
    pub fn peek(&self) -> Option<AttitudeSample> {
        match self.inner.lock() {
            Ok(inner) => inner.pending,
            Err(poisoned) => poisoned.into_inner().pending,
        }
    }

    /// Total samples published
    pub fn published(&self) -> u64 {
        self.inner.lock().map(|inner| inner.published).unwrap_or(0)
    }

    /// Samples that were replaced before the consumer saw them
    pub fn coalesced(&self) -> u64 {
        self.inner.lock().map(|inner| inner.coalesced).unwrap_or(0)
    }

    /// Create a new reference to the same slot
    ///
    /// Both references see the same data.
    pub fn clone_ref(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for LatestSample {
    fn default() -> Self {
        Self::new()
    }
}
