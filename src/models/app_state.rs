use crate::models::{BanList, Photo, SessionGallery};
use crate::models::config::{DEFAULT_SOL_MAX, DEFAULT_SOL_MIN};

/// Status line presented at the boundary: either a photo is on display,
/// or a human-readable message explains why not.
pub const EMPTY_RESULT_MESSAGE: &str = "No unbanned photos found for this sol.";

/// Single source of truth for all session state.
///
/// Holds the current selection, the status message, the exclusion store,
/// the session gallery, and the discover-request bookkeeping. Everything
/// is in-memory and dies with the session; nothing here persists.
///
/// # Thread Safety
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by
/// [`crate::state::StateManager`]. Never mutate it directly — go through
/// [`StateManager`](crate::state::StateManager) so every change is
/// snapshot-diffed and broadcast:
/// - [`read()`](crate::state::StateManager::read) for read-only access
/// - [`update()`](crate::state::StateManager::update) for mutations with
///   automatic change events
///
/// # Related Types
///
/// - [`crate::state::StateManager`]: thread-safe wrapper with event emission
/// - [`crate::state::StateChange`]: event types for state mutations
/// - [`crate::state::DiscoverOutcome`]: the input to the discover transition
#[derive(Clone, Debug)]
pub struct AppState {
    // What the front end shows
    pub current_photo: Option<Photo>,
    /// `None` means ok; `Some` carries a failure or empty-result message.
    pub status_message: Option<String>,

    // Session collections
    pub ban_list: BanList,
    pub gallery: SessionGallery,

    // Discover-request bookkeeping
    pub is_fetching: bool,
    /// Token of the most recently issued discover request. An outcome is
    /// applied only while its token still matches (latest-triggered-wins).
    pub fetch_generation: u64,

    // Configuration
    pub is_api_key_configured: bool,
    pub sol_min: u32,
    pub sol_max: u32,

    // Session statistics
    pub discover_attempts: usize,
    pub photos_selected: usize,
    pub empty_results: usize,
    pub failed_fetches: usize,
    pub last_sol: Option<u32>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_photo: None,
            status_message: None,

            ban_list: BanList::new(),
            gallery: SessionGallery::new(),

            is_fetching: false,
            fetch_generation: 0,

            is_api_key_configured: false,
            sol_min: DEFAULT_SOL_MIN,
            sol_max: DEFAULT_SOL_MAX,

            discover_attempts: 0,
            photos_selected: 0,
            empty_results: 0,
            failed_fetches: 0,
            last_sol: None,
        }
    }
}

impl AppState {
    /// True when a photo is on display and no failure message is set.
    pub fn is_ok(&self) -> bool {
        self.status_message.is_none()
    }

    /// Session counters as (attempts, selected, empty, failed).
    pub fn session_stats(&self) -> (usize, usize, usize, usize) {
        (
            self.discover_attempts,
            self.photos_selected,
            self.empty_results,
            self.failed_fetches,
        )
    }

    /// Wipe the session back to its pristine state.
    ///
    /// Configuration flags and the sol range survive; everything the user
    /// accumulated this session is dropped.
    pub fn reset_session_state(&mut self) {
        self.current_photo = None;
        self.status_message = None;
        self.ban_list.clear();
        self.gallery.clear();
        self.is_fetching = false;
        self.fetch_generation = 0;
        self.discover_attempts = 0;
        self.photos_selected = 0;
        self.empty_results = 0;
        self.failed_fetches = 0;
        self.last_sol = None;
    }

    /// One-line summary of the session for logs.
    pub fn session_summary(&self) -> String {
        format!(
            "{} discovers: {} selected, {} empty, {} failed; {} banned values, {} in gallery",
            self.discover_attempts,
            self.photos_selected,
            self.empty_results,
            self.failed_fetches,
            self.ban_list.total(),
            self.gallery.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BanAttribute, PhotoCamera, PhotoRover};

    fn photo(id: u64) -> Photo {
        Photo {
            id,
            sol: 1200,
            img_src: format!("https://example.com/{}.jpg", id),
            earth_date: "2016-01-01".to_string(),
            camera: PhotoCamera {
                name: "MAST".to_string(),
                full_name: "Mast Camera".to_string(),
            },
            rover: PhotoRover {
                name: "Curiosity".to_string(),
                launch_date: "2011-11-26".to_string(),
            },
        }
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert!(state.is_ok());
        assert!(state.current_photo.is_none());
        assert!(!state.is_fetching);
        assert_eq!(state.fetch_generation, 0);
        assert_eq!(state.sol_min, 1000);
        assert_eq!(state.sol_max, 1499);
    }

    #[test]
    fn test_session_stats() {
        let mut state = AppState::default();
        state.discover_attempts = 5;
        state.photos_selected = 3;
        state.empty_results = 1;
        state.failed_fetches = 1;

        assert_eq!(state.session_stats(), (5, 3, 1, 1));
    }

    #[test]
    fn test_reset_session_state() {
        let mut state = AppState::default();
        state.current_photo = Some(photo(1));
        state.status_message = Some("HTTP error 429".to_string());
        state.ban_list.add(BanAttribute::Camera, "MAST");
        state.gallery.append(photo(1));
        state.is_fetching = true;
        state.fetch_generation = 9;
        state.discover_attempts = 4;
        state.last_sol = Some(1234);
        state.is_api_key_configured = true;

        state.reset_session_state();

        assert!(state.current_photo.is_none());
        assert!(state.is_ok());
        assert!(state.ban_list.is_empty());
        assert!(state.gallery.is_empty());
        assert!(!state.is_fetching);
        assert_eq!(state.fetch_generation, 0);
        assert_eq!(state.discover_attempts, 0);
        assert!(state.last_sol.is_none());
        // Configuration survives a session reset
        assert!(state.is_api_key_configured);
    }

    #[test]
    fn test_session_summary() {
        let mut state = AppState::default();
        state.discover_attempts = 2;
        state.photos_selected = 1;
        state.gallery.append(photo(1));

        let summary = state.session_summary();
        assert!(summary.contains("2 discovers"));
        assert!(summary.contains("1 in gallery"));
    }
}
