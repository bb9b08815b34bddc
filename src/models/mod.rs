//! Data models for the rover explorer.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`AppState`]: the central session state (selection, status, bans, gallery)
//! - [`Photo`]: a rover photo record deserialized from the Mars Photos API
//! - [`BanList`] / [`BanAttribute`]: the user-curated exclusion store
//! - [`SessionGallery`]: the append-only, newest-first log of selections
//! - [`UserConfig`] / [`ExplorerSettings`]: YAML-backed user settings
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: wire and config structs derive `Serialize`/`Deserialize`
//! - **Cloneable**: AppState is wrapped in `Arc<RwLock<>>` by
//!   [`StateManager`](crate::state::StateManager) and handed out as snapshots
//! - **Immutable at the boundary**: state updates go through StateManager's
//!   `update()` so every mutation is diffed and broadcast

pub mod app_state;
pub mod ban_list;
pub mod config;
pub mod gallery;
pub mod photo;

pub use app_state::{AppState, EMPTY_RESULT_MESSAGE};
pub use ban_list::{BanAttribute, BanList};
pub use config::{ExplorerSettings, UserConfig};
pub use gallery::SessionGallery;
pub use photo::{Photo, PhotoCamera, PhotoRover};
