//! GitHub release listing for setup-shiroa.
//!
//! The resolver only needs one capability: the catalog of published
//! releases. Two implementations provide it, selected at construction
//! time by token presence so nothing downstream branches on
//! authentication:
//!
//! - [`AuthenticatedLister`] - paginated API client with a bearer token
//! - [`AnonymousLister`] - single unauthenticated GET against the
//!   public releases endpoint

use async_trait::async_trait;
use reqwest::Client;
use setup_shiroa_core::{Error, Release, Result, releases_api_url};
use tracing::debug;

/// Page size for authenticated listing. The API caps this at 100.
const PER_PAGE: usize = 100;

/// The catalog-of-releases capability consumed by the resolver.
#[async_trait]
pub trait ReleaseLister: Send + Sync {
    /// Fetch all published releases of the shiroa repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReleaseListing`] when the endpoint cannot be
    /// reached or its response cannot be parsed.
    async fn list_releases(&self) -> Result<Vec<Release>>;
}

/// Select a lister based on token presence.
#[must_use]
pub fn release_lister(token: Option<&str>) -> Box<dyn ReleaseLister> {
    match token {
        Some(token) => {
            debug!("using authenticated release listing");
            Box::new(AuthenticatedLister::new(token))
        }
        None => {
            debug!("using anonymous release listing");
            Box::new(AnonymousLister::new())
        }
    }
}

/// Build the shared HTTP client.
///
/// # Panics
///
/// Panics if the TLS backend fails to initialize; with default settings
/// and only a user agent configured this indicates a broken environment.
#[allow(clippy::expect_used)]
fn http_client() -> Client {
    Client::builder()
        .user_agent("setup-shiroa")
        .build()
        .expect("Failed to create HTTP client - TLS backend initialization failed")
}

/// Paginated listing via the authenticated API.
pub struct AuthenticatedLister {
    client: Client,
    token: String,
}

impl AuthenticatedLister {
    /// Create a lister using the given API token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl ReleaseLister for AuthenticatedLister {
    async fn list_releases(&self) -> Result<Vec<Release>> {
        let base_url = releases_api_url();
        let mut releases = Vec::new();
        let mut page = 1usize;

        loop {
            let url = format!("{base_url}?per_page={PER_PAGE}&page={page}");
            debug!(%url, "fetching release page");

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .header("Accept", "application/vnd.github+json")
                .send()
                .await
                .map_err(|e| Error::release_listing(&url, e.to_string()))?;

            if !response.status().is_success() {
                return Err(Error::release_listing(
                    &url,
                    format!("HTTP {}", response.status()),
                ));
            }

            let batch: Vec<Release> = response
                .json()
                .await
                .map_err(|e| Error::release_listing(&url, e.to_string()))?;

            let batch_len = batch.len();
            releases.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        debug!(count = releases.len(), "listed releases");
        Ok(releases)
    }
}

/// Single-page anonymous listing against the public endpoint.
///
/// Unauthenticated requests are rate limited aggressively, so a parse
/// failure here most likely means the API returned a rate-limit body
/// instead of the release array.
pub struct AnonymousLister {
    client: Client,
}

impl AnonymousLister {
    /// Create an anonymous lister.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: http_client(),
        }
    }
}

impl Default for AnonymousLister {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReleaseLister for AnonymousLister {
    async fn list_releases(&self) -> Result<Vec<Release>> {
        let url = releases_api_url();
        debug!(%url, "fetching releases anonymously");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| Error::release_listing(&url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::release_listing(
                &url,
                format!("HTTP {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::release_listing(&url, e.to_string()))?;

        let releases: Vec<Release> = serde_json::from_str(&body)
            .map_err(|e| Error::release_listing(&url, e.to_string()))?;

        debug!(count = releases.len(), "listed releases");
        Ok(releases)
    }
}
