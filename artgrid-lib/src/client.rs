//! HTTP client for the Art Institute of Chicago listing API

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::RetryConfig;
use crate::error::ApiError;
use crate::error::Error;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu";

/// Attributes requested for every artwork unless configured otherwise.
pub const DEFAULT_FIELDS: [&str; 6] = [
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// Client for the public artworks listing.
///
/// Implements [`PageSource`](crate::api::PageSource). This client is cheap to
/// clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use artgrid_lib::ArticClient;
///
/// let client = ArticClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let page = client.fetch_page(PageRequest::new(1, 10)).await?;
/// ```
#[derive(Clone)]
pub struct ArticClient {
    pub(crate) inner: Arc<ArticClientInner>,
}

pub(crate) struct ArticClientInner {
    pub(crate) base_url: Url,
    pub(crate) fields: Vec<String>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retry_config: RetryConfig,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the attributes requested for each record, excluding `id`.
    pub fn fields(&self) -> &[String] {
        &self.inner.fields
    }

    /// Returns the retry policy in use.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }
}

impl std::fmt::Debug for ArticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticClient")
            .field("base_url", &self.base_url())
            .field("fields", &self.inner.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing an [`ArticClient`].
///
/// Every setting has a default, so `ArticClient::builder().build()` yields a
/// client for the public API with the standard artwork columns.
///
/// # Example
///
/// ```ignore
/// let client = ArticClient::builder()
///     .url("http://localhost:8080")
///     .fields(["title", "artist_display"])
///     .retry(RetryConfig::no_retry())
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct ArticClientBuilder {
    url: String,
    fields: Vec<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    retry_config: RetryConfig,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
            retry_config: RetryConfig::default(),
        }
    }

    /// Sets the API base URL.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the attributes requested for each record.
    ///
    /// `id` is always requested and does not need to be listed.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields
            .into_iter()
            .map(Into::into)
            .filter(|f| f != "id")
            .collect();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Builds the [`ArticClient`].
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<ArticClient, Error> {
        let base_url = Url::parse(&self.url).map_err(ApiError::from)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                base_url,
                fields: self.fields,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
