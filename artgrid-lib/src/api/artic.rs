//! [`PageSource`] implementation for the artworks listing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use url::Url;

use super::Page;
use super::PageRequest;
use super::PageSource;
use crate::ArticClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Record;

#[async_trait]
impl PageSource for ArticClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page, Error> {
        let url = self.page_url(request)?;
        log::debug!("Fetching page {} ({} per page): {}", request.page, request.page_size, url);

        let response = self.request(&url).await?;
        let body = response.text().await.map_err(ApiError::from)?;

        let listing: ListingResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.clone()))?;

        let records = listing
            .data
            .into_iter()
            .filter_map(|row| match Record::deserialize(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping unaddressable record on page {}: {}", request.page, e);
                    None
                }
            })
            .collect();

        Ok(Page::new(records).with_total_count(listing.pagination.total))
    }
}

impl ArticClient {
    /// Builds the listing URL for a page request.
    ///
    /// The result looks like
    /// `https://api.artic.edu/api/v1/artworks?page=2&limit=10&fields=id,title`.
    pub fn page_url(&self, request: PageRequest) -> Result<Url, ApiError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/api/v1/artworks"))?;

        let fields = std::iter::once("id")
            .chain(self.inner.fields.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(",");

        url.query_pairs_mut()
            .append_pair("page", &request.page.to_string())
            .append_pair("limit", &request.page_size.to_string())
            .append_pair("fields", &fields);

        Ok(url)
    }

    /// Makes a GET request, retrying transient failures per the client's
    /// [`RetryConfig`](crate::RetryConfig).
    async fn request(&self, url: &Url) -> Result<reqwest::Response, Error> {
        let mut backoff = self.inner.retry_config.backoff();

        loop {
            let response = match self.send_request_inner(url).await {
                Ok(response) => response,
                Err(e) if e.is_retryable() => match backoff.next_wait() {
                    Some(wait) => {
                        log::debug!("Request failed ({}), retrying in {:?}", e, wait);
                        tokio::time::sleep(wait).await;
                        continue;
                    }
                    None => return Err(Error::Api(e)),
                },
                Err(e) => return Err(Error::Api(e)),
            };

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = parse_retry_after(&response);
                let Some(wait) = backoff.rate_limit_wait(retry_after) else {
                    return Err(Error::RateLimit { retry_after });
                };
                log::debug!("Rate limited, retrying in {:?}", wait);
                tokio::time::sleep(wait).await;
                continue;
            }

            if status.is_server_error()
                && let Some(wait) = backoff.next_wait()
            {
                log::debug!("Server error {}, retrying in {:?}", status, wait);
                tokio::time::sleep(wait).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::http(status.as_u16(), body)));
        }
    }

    /// Inner request method without retry logic.
    async fn send_request_inner(&self, url: &Url) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .inner
            .http_client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request.send().await.map_err(|e| match self.inner.timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(e),
        })
    }
}

/// Parses the Retry-After header value (seconds).
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Listing response envelope.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    pagination: Pagination,
    /// Raw rows; each is turned into a [`Record`] individually.
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    /// Total number of records in the listing.
    total: u64,
}
