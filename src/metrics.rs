// Session metrics module
//
// Lock-free counters for how the session went: discovers, outcomes,
// fetch latency, stale races.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Session-wide counters, shared via `Arc` and updated with atomics so
/// no lock is held anywhere near the state manager's.
/// Logged periodically during long sessions and summarized on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Discover requests issued
    pub discoveries_started: AtomicUsize,

    /// Discovers that ended with a selected photo
    pub photos_selected: AtomicUsize,

    /// Discovers where the ban list filtered out every candidate
    pub empty_results: AtomicUsize,

    /// Discovers that failed at the fetch (HTTP, transport, bad payload)
    pub fetch_failures: AtomicUsize,

    /// Stale discover outcomes discarded by the request-token check
    pub stale_outcomes: AtomicUsize,

    /// Total time spent in fetches, in milliseconds
    pub total_fetch_time_ms: AtomicU64,

    /// Number of state updates performed
    pub state_updates: AtomicU64,

    /// Session start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            discoveries_started: AtomicUsize::new(0),
            photos_selected: AtomicUsize::new(0),
            empty_results: AtomicUsize::new(0),
            fetch_failures: AtomicUsize::new(0),
            stale_outcomes: AtomicUsize::new(0),
            total_fetch_time_ms: AtomicU64::new(0),
            state_updates: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a discover request being issued
    pub fn record_discover_started(&self) {
        self.discoveries_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a discover that selected a photo
    pub fn record_photo_selected(&self) {
        self.photos_selected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a discover that filtered down to nothing
    pub fn record_empty_result(&self) {
        self.empty_results.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed fetch
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stale outcome discarded by the token check
    pub fn record_stale_outcome(&self) {
        self.stale_outcomes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record time spent in one fetch
    pub fn record_fetch_time(&self, duration: Duration) {
        self.total_fetch_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a state update
    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get average fetch time per discover in milliseconds
    pub fn avg_fetch_time_ms(&self) -> f64 {
        let total = self.total_fetch_time_ms.load(Ordering::Relaxed);
        let count = self.discoveries_started.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let uptime = self.uptime();
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", uptime.as_secs_f64());
        tracing::info!(
            "Discovers: {} started, {} selected, {} empty, {} failed, {} stale",
            self.discoveries_started.load(Ordering::Relaxed),
            self.photos_selected.load(Ordering::Relaxed),
            self.empty_results.load(Ordering::Relaxed),
            self.fetch_failures.load(Ordering::Relaxed),
            self.stale_outcomes.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Total fetch time: {:.2}s (avg: {:.2}ms per discover)",
            self.total_fetch_time_ms.load(Ordering::Relaxed) as f64 / 1000.0,
            self.avg_fetch_time_ms()
        );
        tracing::info!(
            "State updates: {}",
            self.state_updates.load(Ordering::Relaxed)
        );
    }

    /// Log periodic metrics (for long sessions)
    pub fn log_periodic(&self) {
        tracing::info!(
            "Metrics: {} discovers, {} selected, uptime {:.0}s",
            self.discoveries_started.load(Ordering::Relaxed),
            self.photos_selected.load(Ordering::Relaxed),
            self.uptime().as_secs_f64()
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
