//! HTTP fetcher
//!
//! One GET per page or asset with a hard timeout. There is no retry: any
//! failure is returned to the caller, which logs it and moves on.

use crate::config::FetchConfig;
use crate::ScrapeError;
use reqwest::Client;
use std::time::Duration;

/// Builds the shared HTTP client
///
/// Timeouts are applied per request, since pages and assets use different ones.
///
/// # Example
///
/// ```no_run
/// use sbf_questions::config::FetchConfig;
/// use sbf_questions::scrape::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an HTML page as text
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> Result<String, ScrapeError> {
    let response = send(client, url, timeout).await?;
    response
        .text()
        .await
        .map_err(|e| classify_error(url, e))
}

/// Fetches a binary resource such as an image
pub async fn fetch_bytes(client: &Client, url: &str, timeout: Duration) -> Result<Vec<u8>, ScrapeError> {
    let response = send(client, url, timeout).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;
    Ok(bytes.to_vec())
}

async fn send(client: &Client, url: &str, timeout: Duration) -> Result<reqwest::Response, ScrapeError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

fn classify_error(url: &str, error: reqwest::Error) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScrapeError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
