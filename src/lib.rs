// Rover Explorer - Random Mars rover photo discovery with ban lists
//
// This is the library crate containing the session core: state management,
// the photo source adapter, and the selection pipeline. The binary crate
// (main.rs) provides a console front end over it.

pub mod config;
pub mod explorer;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use explorer::Explorer;
pub use metrics::Metrics;
pub use models::{AppState, BanAttribute, BanList, Photo, SessionGallery, UserConfig};
pub use state::{DiscoverOutcome, StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
