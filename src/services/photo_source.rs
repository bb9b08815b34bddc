use crate::models::{ExplorerSettings, Photo};
use regex::Regex;
use serde_json::Value;
use std::future::Future;
use std::ops::RangeInclusive;
use rand::Rng;
use thiserror::Error;

/// Errors surfaced by the photo source.
///
/// All three are terminal and locally handled: each is converted to a
/// user-visible status message and nothing retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request completed but the API reported a non-success status.
    /// A missing or wrong API key shows up here as a 403.
    #[error("HTTP error {0}")]
    Http(u16),

    /// The payload was not the expected shape: not JSON, no `photos`
    /// list, or records violating the photo invariant. Rate-limit error
    /// objects land here too.
    #[error("invalid API response (maybe rate-limited)")]
    InvalidResponse,

    /// The request never produced a status (connection, DNS, TLS).
    #[error("request failed: {0}")]
    Transport(String),
}

/// A completed HTTP exchange: status plus raw body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The raw HTTP call, abstracted so tests can script responses.
///
/// Implementations perform exactly one attempt per `get` and enforce no
/// timeout — an in-flight request always runs to completion.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<TransportResponse, FetchError>> + Send;
}

/// Production transport over a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        // reqwest applies no total-request timeout unless asked to;
        // the contract here is exactly that.
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// One sol's worth of candidates, straight off the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub sol: u32,
    pub photos: Vec<Photo>,
}

/// Photo source adapter for the Mars Photos API.
///
/// Each [`fetch_candidates`](Self::fetch_candidates) call draws a sol
/// uniformly from the configured range, performs a single request, and
/// returns the raw candidate list unfiltered — exclusion filtering is the
/// selection pipeline's job, not this component's.
///
/// The API key is injected at construction, never read from ambient
/// state, and never logged. An empty key is sent as-is; the API answers
/// 403 like any other auth failure.
///
/// # Fields
///
/// The `date_pattern` regex is pre-compiled at construction and used to
/// validate the `earth_date` and `launch_date` fields of every record; a
/// record that fails the photo invariant poisons the whole page as
/// [`FetchError::InvalidResponse`] instead of being dropped silently.
pub struct PhotoSourceService<T: Transport> {
    transport: T,
    api_key: String,
    base_url: String,
    rover: String,
    sol_range: RangeInclusive<u32>,

    /// Matches calendar dates shaped `YYYY-MM-DD`.
    date_pattern: Regex,
}

impl PhotoSourceService<HttpTransport> {
    /// Production service over [`HttpTransport`].
    pub fn from_settings(settings: &ExplorerSettings, api_key: String) -> Self {
        Self::with_transport(HttpTransport::new(), settings, api_key)
    }
}

impl<T: Transport> PhotoSourceService<T> {
    /// Build the service over an explicit transport.
    pub fn with_transport(transport: T, settings: &ExplorerSettings, api_key: String) -> Self {
        Self {
            transport,
            api_key,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            rover: settings.rover.clone(),
            sol_range: settings.sol_range(),
            date_pattern: Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"),
        }
    }

    /// Draw a sol uniformly from the configured inclusive range.
    pub fn pick_sol(&self) -> u32 {
        rand::thread_rng().gen_range(self.sol_range.clone())
    }

    /// Request URL for one sol's photo list.
    pub fn photos_url(&self, sol: u32) -> String {
        format!(
            "{}/rovers/{}/photos?sol={}&api_key={}",
            self.base_url, self.rover, sol, self.api_key
        )
    }

    /// Parse and validate a completed exchange into the candidate list.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on any non-2xx status
    /// - [`FetchError::InvalidResponse`] when the body is not JSON, has no
    ///   list-shaped `photos` field, or contains a record with an empty
    ///   `img_src`, empty `camera.name`, or malformed date field
    pub fn parse_response(&self, response: &TransportResponse) -> Result<Vec<Photo>, FetchError> {
        if !(200..300).contains(&response.status) {
            return Err(FetchError::Http(response.status));
        }

        let value: Value =
            serde_json::from_str(&response.body).map_err(|_| FetchError::InvalidResponse)?;

        // Rate-limited responses return an error object instead of data;
        // both that and a malformed body fail the list-shape check.
        let photos_field = value.get("photos").ok_or(FetchError::InvalidResponse)?;
        if !photos_field.is_array() {
            return Err(FetchError::InvalidResponse);
        }

        let photos: Vec<Photo> = serde_json::from_value(photos_field.clone())
            .map_err(|_| FetchError::InvalidResponse)?;

        for photo in &photos {
            if !self.is_well_formed(photo) {
                tracing::warn!("Rejecting response: malformed photo record #{}", photo.id);
                return Err(FetchError::InvalidResponse);
            }
        }

        Ok(photos)
    }

    fn is_well_formed(&self, photo: &Photo) -> bool {
        !photo.img_src.is_empty()
            && !photo.camera.name.is_empty()
            && self.date_pattern.is_match(&photo.earth_date)
            && self.date_pattern.is_match(&photo.rover.launch_date)
    }

    /// Fetch one random sol's candidate list. Single attempt, no retry,
    /// no timeout.
    pub async fn fetch_candidates(&self) -> Result<FetchedPage, FetchError> {
        let sol = self.pick_sol();
        self.fetch_sol(sol).await
    }

    /// Fetch the candidate list for a specific sol.
    pub async fn fetch_sol(&self, sol: u32) -> Result<FetchedPage, FetchError> {
        tracing::debug!("Fetching {} photos for sol {}", self.rover, sol);

        let url = self.photos_url(sol);
        let response = self.transport.get(&url).await?;
        let photos = self.parse_response(&response)?;

        tracing::info!("Sol {} returned {} candidate photos", sol, photos.len());
        Ok(FetchedPage { sol, photos })
    }

    /// The inclusive sol range this service draws from.
    pub fn sol_range(&self) -> &RangeInclusive<u32> {
        &self.sol_range
    }
}
