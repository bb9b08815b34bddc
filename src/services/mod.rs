//! Services module - Pure business logic for photo discovery.
//!
//! This module contains the two framework-agnostic halves of the discover
//! pipeline. Neither knows anything about state management or any front
//! end, which keeps both directly testable.
//!
//! # Components
//!
//! - [`PhotoSourceService`]: the photo source adapter. Handles:
//!   - drawing a random sol from the configured range
//!   - building the request URL (API key injected, never logged)
//!   - one-attempt fetching over a pluggable [`Transport`]
//!   - strict response parsing: non-2xx → [`FetchError::Http`], anything
//!     not list-shaped or violating the photo invariant →
//!     [`FetchError::InvalidResponse`]
//!
//! - [`selection`]: the pure selection pipeline — filter candidates
//!   against the [`BanList`](crate::models::BanList), then pick one
//!   survivor uniformly at random.
//!
//! # Design Philosophy
//!
//! - **Stateless**: all inputs are explicit parameters or injected at
//!   construction; no hidden globals
//! - **Async only at the wire**: the selection pipeline is synchronous
//!   and pure, suspension happens solely inside [`Transport::get`]
//! - **Testable**: the transport is a trait, the RNG is injectable

pub mod photo_source;
pub mod selection;

pub use photo_source::{
    FetchError, FetchedPage, HttpTransport, PhotoSourceService, Transport, TransportResponse,
};
pub use selection::{SelectionResult, select, select_with, survivors};
