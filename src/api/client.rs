//! Discogs database API client.
//!
//! One GET per lookup against `api.discogs.com`. No caching and no retries:
//! a failed request fails the lookup.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{Result, SnarfError};
use crate::models::{EntityRef, RawMetadata};

/// Base URL for the Discogs database API.
pub const API_BASE_URL: &str = "https://api.discogs.com";

/// Identifying `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("discogs-snarfer/", env!("CARGO_PKG_VERSION"));

/// Discogs API client.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use discogs_snarfer::{DiscogsApi, EntityRef};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = DiscogsApi::new()?;
///     let release = api.fetch(&EntityRef::release(249504)).await?;
///     println!("Title: {}", release.title_text());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DiscogsApi {
    client: Client,
    base_url: String,
}

impl DiscogsApi {
    /// Create a client for the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against another API base (a proxy or a mock server).
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing HTTP client. Its headers are used as configured.
    pub fn with_client<S: Into<String>>(client: Client, base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// API base this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request URL for an entity: `<base>/<kind>s/<id>`.
    pub fn endpoint(&self, entity: &EntityRef) -> String {
        format!("{}/{}/{}", self.base_url, entity.kind.plural(), entity.id)
    }

    /// Make a GET request and return the body of a successful response.
    async fn get_api(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            warn!(status = status.as_u16(), url = %url, "Discogs API error: {}", message);
            return Err(SnarfError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    /// Fetch the record for a release or master.
    ///
    /// # Errors
    ///
    /// `RequestError` or `HttpStatus` when the API cannot be reached or
    /// refuses the request, `DecodeError` when the body is not valid JSON.
    pub async fn fetch(&self, entity: &EntityRef) -> Result<RawMetadata> {
        let url = self.endpoint(entity);
        let body = self.get_api(&url).await?;

        match serde_json::from_str(&body) {
            Ok(data) => Ok(data),
            Err(source) => {
                error!(url = %url, "JSON decode error: {}", source);
                Err(SnarfError::DecodeError { url, source })
            }
        }
    }

}
