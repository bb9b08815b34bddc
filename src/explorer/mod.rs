// Explorer - drives the discover workflow over the session state
//
// This module contains the Explorer which coordinates between:
// - StateManager (session state + change events)
// - PhotoSourceService (the single network call)
// - selection (the pure filter-and-pick pipeline)
//
// It owns the Idle → Fetching → {Selected, Empty, Failed} → Idle machine
// and is the layer any front end talks to.

use crate::metrics::Metrics;
use crate::models::{AppState, BanAttribute};
use crate::services::photo_source::{PhotoSourceService, Transport};
use crate::services::selection::{self, SelectionResult};
use crate::state::{DiscoverOutcome, StateChange, StateManager};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

/// Session driver: translates user intents into state transitions.
///
/// One `discover()` call performs exactly one fetch attempt and resolves
/// to exactly one outcome. There is no guard against calling `discover()`
/// again while a fetch is in flight — instead, outcomes carry the request
/// token issued at start, and [`StateManager::apply_discover_outcome`]
/// discards any outcome that is no longer the latest
/// (latest-triggered-wins).
///
/// # Example
/// ```ignore
/// let state = StateManager::new();
/// let source = PhotoSourceService::from_settings(&settings, api_key);
/// let explorer = Explorer::new(state, source, Arc::new(Metrics::new()));
///
/// explorer.discover().await;
/// explorer.ban(BanAttribute::Camera, "MAST");
/// let snapshot = explorer.snapshot();
/// ```
pub struct Explorer<T: Transport> {
    /// Shared session state with change events
    state: StateManager,

    /// The photo source adapter (one request per discover)
    source: PhotoSourceService<T>,

    /// Session metrics
    metrics: Arc<Metrics>,
}

impl<T: Transport> Explorer<T> {
    /// Create a new Explorer over an already-built source.
    pub fn new(state: StateManager, source: PhotoSourceService<T>, metrics: Arc<Metrics>) -> Self {
        Self {
            state,
            source,
            metrics,
        }
    }

    /// Run one discover: fetch a random sol, filter against the current
    /// ban list, pick a survivor, and apply the outcome.
    ///
    /// The ban list is read at resolution time, so bans added while the
    /// fetch was in flight are honored.
    ///
    /// # Returns
    /// All state change events emitted by this discover. The result of a
    /// fetch that lost the race to a newer trigger emits nothing.
    pub async fn discover(&self) -> Vec<StateChange> {
        let (token, mut changes) = self.state.begin_discover();
        self.metrics.record_discover_started();
        self.metrics.record_state_update();

        let start = Instant::now();
        let fetched = self.source.fetch_candidates().await;
        self.metrics.record_fetch_time(start.elapsed());

        let outcome = match fetched {
            Ok(page) => {
                let bans = self.state.read(|s| s.ban_list.clone());
                let candidates = page.photos.len();
                match selection::select(&page.photos, &bans) {
                    SelectionResult::Selected(photo) => {
                        tracing::info!(
                            "Selected photo {} from sol {} ({} candidates)",
                            photo.id,
                            page.sol,
                            candidates
                        );
                        self.metrics.record_photo_selected();
                        DiscoverOutcome::Selected(photo)
                    }
                    SelectionResult::Empty => {
                        tracing::info!(
                            "Sol {}: all {} candidates banned",
                            page.sol,
                            candidates
                        );
                        self.metrics.record_empty_result();
                        DiscoverOutcome::Empty { sol: page.sol }
                    }
                }
            }
            Err(err) => {
                tracing::warn!("Discover failed: {}", err);
                self.metrics.record_fetch_failure();
                DiscoverOutcome::Failed {
                    message: err.to_string(),
                }
            }
        };

        let applied = self.state.apply_discover_outcome(token, outcome);
        if applied.is_empty() {
            // A newer discover was triggered while this one was in flight
            self.metrics.record_stale_outcome();
        } else {
            self.metrics.record_state_update();
        }
        changes.extend(applied);
        changes
    }

    /// Ban a value on an attribute. Idempotent.
    pub fn ban(&self, attribute: BanAttribute, value: impl Into<String>) -> Vec<StateChange> {
        self.metrics.record_state_update();
        self.state.ban(attribute, value)
    }

    /// Lift a ban. Idempotent.
    pub fn unban(&self, attribute: BanAttribute, value: &str) -> Vec<StateChange> {
        self.metrics.record_state_update();
        self.state.unban(attribute, value)
    }

    /// Re-open a gallery entry (0 = most recent) as the current selection.
    pub fn view_gallery_entry(&self, index: usize) -> Vec<StateChange> {
        self.metrics.record_state_update();
        self.state.view_gallery_entry(index)
    }

    /// Wipe the session back to its pristine state.
    pub fn reset_session(&self) -> Vec<StateChange> {
        self.metrics.record_state_update();
        self.state.reset_session()
    }

    /// Read-only snapshot of the session state.
    pub fn snapshot(&self) -> AppState {
        self.state.snapshot()
    }

    /// Subscribe to state change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state.subscribe()
    }

    /// The underlying state manager (shared, cheap to clone).
    pub fn state_manager(&self) -> &StateManager {
        &self.state
    }

    /// Session metrics handle.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
