//! In-flight stream accounting and graceful shutdown.
//!
//! A [`StreamTracker`] is shared by every handler. Each accepted stream holds
//! an [`InflightGuard`] for its whole lifetime; shutdown refuses new streams,
//! waits for the guards to drop, then cancels whatever is left through the
//! shared [`CancellationToken`].

use crate::server::telemetry::{
    decrement_streams_inflight, increment_streams_inflight, record_stream_duration,
};
use core::time::Duration;
use reportstream_api::Error;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Instant,
};
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct StreamTracker {
    inflight: AtomicUsize,
    refusing: AtomicBool,
    shutdown_token: CancellationToken,
}

impl StreamTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceShutdown`] once shutdown has begun.
    pub fn begin(tracker: &Arc<Self>) -> Result<InflightGuard, Error> {
        // Count first so a concurrent drain never misses this stream.
        tracker.inflight.fetch_add(1, Ordering::AcqRel);
        if tracker.refusing.load(Ordering::Acquire) {
            tracker.inflight.fetch_sub(1, Ordering::AcqRel);
            return Err(Error::ServiceShutdown);
        }

        increment_streams_inflight();
        Ok(InflightGuard {
            tracker: Arc::clone(tracker),
            started: Instant::now(),
        })
    }

    pub fn inflight(&self) -> usize {
        self.inflight.load(Ordering::Acquire)
    }

    pub fn is_refusing(&self) -> bool {
        self.refusing.load(Ordering::Acquire)
    }

    /// Token cancelled once the drain phase is over. Coordinators select on a
    /// child of it.
    pub const fn token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Refuses new streams, waits up to `drain_timeout` for in-flight streams
    /// to finish, then cancels the rest.
    pub async fn shutdown(&self, drain_timeout: Duration) {
        // === Phase 0: Stop accepting new streams ===
        tracing::info!("Refusing new streams");
        self.refusing.store(true, Ordering::Release);

        // === Phase 1: Wait for in-flight streams to drain ===
        tracing::info!("Draining in-flight streams ({} active)", self.inflight());
        let drained = timeout(drain_timeout, async {
            while self.inflight() > 0 {
                sleep(Duration::from_millis(100)).await;
            }
        })
        .await;

        match drained {
            Ok(()) => tracing::debug!("All in-flight streams drained successfully"),
            Err(_) => tracing::warn!(
                "Graceful drain timed out ({} streams still active)",
                self.inflight()
            ),
        }

        // === Phase 2: Cancel any remaining work ===
        tracing::debug!("Cancelling remaining streams via shutdown token");
        self.shutdown_token.cancel();
    }
}

/// Marks one stream as in flight until dropped.
#[derive(Debug)]
pub struct InflightGuard {
    tracker: Arc<StreamTracker>,
    started: Instant,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.tracker.inflight.fetch_sub(1, Ordering::AcqRel);
        decrement_streams_inflight();
        record_stream_duration(self.started.elapsed().as_secs_f64() * 1000.0);
    }
}
