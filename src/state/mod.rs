// State management module
//
// Wraps AppState in Arc<RwLock<T>>, diffs every mutation against the
// previous snapshot, and broadcasts the resulting change events. All
// discover/ban/gallery transitions live here so the state machine is
// testable without any front end.

use crate::models::{AppState, BanAttribute, Photo, UserConfig, EMPTY_RESULT_MESSAGE};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Token identifying one discover request.
///
/// Issued by [`StateManager::begin_discover`]; an outcome is applied only
/// while its token still matches the latest issued one, so a slow fetch
/// that resolves after a newer trigger is discarded deterministically
/// (latest-triggered-wins).
pub type FetchToken = u64;

/// Result of one discover workflow, fed back into the state.
#[derive(Clone, Debug, PartialEq)]
pub enum DiscoverOutcome {
    /// The pipeline picked a survivor.
    Selected(Photo),
    /// The fetch succeeded but every candidate was banned.
    Empty { sol: u32 },
    /// The fetch itself failed; `message` is the displayable reason.
    Failed { message: String },
}

/// Change events broadcast on every state mutation
///
/// Front ends subscribe to these instead of polling snapshots.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Configuration has been updated
    ConfigurationChanged {
        is_api_key_configured: bool,
    },

    /// A discover request has been issued
    DiscoverStarted {
        generation: FetchToken,
    },

    /// A discover request has resolved (selected, empty, or failed)
    DiscoverFinished {
        selected: usize,
        empty: usize,
        failed: usize,
    },

    /// The current selection changed (None when cleared)
    SelectionChanged {
        photo_id: Option<u64>,
    },

    /// The status line changed (None means back to ok)
    StatusChanged {
        message: Option<String>,
    },

    /// One attribute's ban set changed
    BanListChanged {
        attribute: BanAttribute,
        banned: usize,
    },

    /// The session gallery grew
    GalleryUpdated {
        photos: usize,
    },

    /// State has been reset
    StateReset,
}

/// Thread-safe state manager with event emission
///
/// This is the central state management component that:
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Owns every state transition of the discover machine
///   (`Idle → Fetching → {Selected, Empty, Failed} → Idle`)
///
/// # Usage
///
/// Always use `StateManager` instead of accessing [`AppState`] directly:
/// - [`read()`](Self::read) for reading state without long-held locks
/// - [`update()`](Self::update) for mutations with automatic event emission
/// - [`subscribe()`](Self::subscribe) for listening to state changes
///
/// # Related Types
///
/// - [`crate::models::AppState`]: The underlying state structure
/// - [`StateChange`]: Event types emitted on state mutations
/// - [`DiscoverOutcome`]: Input to the discover transition
/// - [`crate::explorer::Explorer`]: Primary driver of these transitions
pub struct StateManager {
    /// The session state protected by RwLock for thread-safe access
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    /// Multiple subscribers can listen for state changes
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    ///
    /// This clones the entire state, so it's safe to use without holding locks.
    pub fn snapshot(&self) -> AppState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let is_fetching = state_manager.read(|state| state.is_fetching);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the single mutation entry point. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Diffs old against new
    /// 4. Broadcasts the resulting events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().unwrap();
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = self.detect_changes(&old_state, &state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future state changes.
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Detect what changed between two states and generate events
    fn detect_changes(&self, old: &AppState, new: &AppState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.is_api_key_configured != new.is_api_key_configured {
            changes.push(StateChange::ConfigurationChanged {
                is_api_key_configured: new.is_api_key_configured,
            });
        }

        if old.is_fetching != new.is_fetching {
            if new.is_fetching {
                changes.push(StateChange::DiscoverStarted {
                    generation: new.fetch_generation,
                });
            } else {
                changes.push(StateChange::DiscoverFinished {
                    selected: new.photos_selected,
                    empty: new.empty_results,
                    failed: new.failed_fetches,
                });
            }
        }

        let old_id = old.current_photo.as_ref().map(|p| p.id);
        let new_id = new.current_photo.as_ref().map(|p| p.id);
        if old_id != new_id {
            changes.push(StateChange::SelectionChanged { photo_id: new_id });
        }

        if old.status_message != new.status_message {
            changes.push(StateChange::StatusChanged {
                message: new.status_message.clone(),
            });
        }

        for attribute in BanAttribute::ALL {
            if !old
                .ban_list
                .values(attribute)
                .eq(new.ban_list.values(attribute))
            {
                changes.push(StateChange::BanListChanged {
                    attribute,
                    banned: new.ban_list.len(attribute),
                });
            }
        }

        if old.gallery.len() != new.gallery.len() {
            changes.push(StateChange::GalleryUpdated {
                photos: new.gallery.len(),
            });
        }

        changes
    }

    // Convenience methods for the discover state machine

    /// Issue a new discover request: `Idle → Fetching`.
    ///
    /// Bumps the request generation and counts the attempt. The returned
    /// token must be passed back to [`apply_discover_outcome`](Self::apply_discover_outcome).
    pub fn begin_discover(&self) -> (FetchToken, Vec<StateChange>) {
        let mut token = 0;
        let changes = self.update(|state| {
            state.fetch_generation += 1;
            state.is_fetching = true;
            state.discover_attempts += 1;
            token = state.fetch_generation;
        });
        (token, changes)
    }

    /// Resolve a discover request: `Fetching → {Selected, Empty, Failed} → Idle`.
    ///
    /// The outcome is applied only if `token` is still the latest issued
    /// one; a stale resolution (an older fetch finishing after a newer
    /// trigger) is discarded without touching the state.
    ///
    /// # Returns
    /// The emitted events; empty when the outcome was stale.
    pub fn apply_discover_outcome(
        &self,
        token: FetchToken,
        outcome: DiscoverOutcome,
    ) -> Vec<StateChange> {
        let mut stale = false;
        let changes = self.update(|state| {
            // A token older than the latest request lost the race; a
            // token arriving while idle was already resolved once.
            if state.fetch_generation != token || !state.is_fetching {
                stale = true;
                return;
            }
            state.is_fetching = false;

            match outcome {
                DiscoverOutcome::Selected(photo) => {
                    state.last_sol = Some(photo.sol);
                    state.current_photo = Some(photo.clone());
                    state.gallery.append(photo);
                    state.status_message = None;
                    state.photos_selected += 1;
                }
                DiscoverOutcome::Empty { sol } => {
                    state.last_sol = Some(sol);
                    state.current_photo = None;
                    state.status_message = Some(EMPTY_RESULT_MESSAGE.to_string());
                    state.empty_results += 1;
                }
                DiscoverOutcome::Failed { message } => {
                    state.current_photo = None;
                    state.status_message = Some(message);
                    state.failed_fetches += 1;
                }
            }
        });

        if stale {
            tracing::debug!(
                "Discarding stale discover outcome for request {} (a newer request was issued)",
                token
            );
        }
        changes
    }

    /// Ban a value on an attribute. Idempotent.
    pub fn ban(&self, attribute: BanAttribute, value: impl Into<String>) -> Vec<StateChange> {
        let value = value.into();
        self.update(|state| {
            if state.ban_list.add(attribute, value.clone()) {
                tracing::info!("Banned {} \"{}\"", attribute, value);
            }
        })
    }

    /// Lift a ban. Idempotent — removing an absent value is a no-op.
    pub fn unban(&self, attribute: BanAttribute, value: &str) -> Vec<StateChange> {
        self.update(|state| {
            if state.ban_list.remove(attribute, value) {
                tracing::info!("Unbanned {} \"{}\"", attribute, value);
            }
        })
    }

    /// Re-open a gallery entry as the current selection.
    ///
    /// Index 0 is the most recent selection. The gallery, ban list, and
    /// status line are untouched; an out-of-range index is a no-op.
    pub fn view_gallery_entry(&self, index: usize) -> Vec<StateChange> {
        let mut missing = false;
        let changes = self.update(|state| match state.gallery.get(index).cloned() {
            Some(photo) => state.current_photo = Some(photo),
            None => missing = true,
        });

        if missing {
            tracing::warn!("Gallery entry {} does not exist", index);
        }
        changes
    }

    /// Wipe the session and emit a reset event.
    pub fn reset_session(&self) -> Vec<StateChange> {
        let mut changes = self.update(|state| {
            state.reset_session_state();
        });

        let reset_event = StateChange::StateReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }

    /// Seed state from the loaded user configuration.
    ///
    /// # Arguments
    /// * `user_config` - The loaded user configuration
    /// * `api_key_present` - Whether a non-empty key was resolved (env or file)
    pub fn load_from_user_config(
        &self,
        user_config: &UserConfig,
        api_key_present: bool,
    ) -> Vec<StateChange> {
        self.update(|state| {
            let range = user_config.explorer_settings.sol_range();
            state.sol_min = *range.start();
            state.sol_max = *range.end();
            state.is_api_key_configured = api_key_present;

            tracing::info!(
                "Loaded user config: rover={}, sols {}..={}, api_key_configured={}",
                user_config.explorer_settings.rover,
                state.sol_min,
                state.sol_max,
                api_key_present
            );
        })
    }

    /// Get an Arc reference to the state for use in worker tasks
    ///
    /// Use this when you need to share state across tasks but want
    /// to minimize cloning. Remember to use read/write locks appropriately.
    pub fn state_arc(&self) -> Arc<RwLock<AppState>> {
        Arc::clone(&self.state)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across tasks
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
