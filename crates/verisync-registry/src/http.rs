//! Shared HTTP helpers for the registry services.
//!
//! Both services are reached with a plain `GET` and answer with JSON. Status
//! handling (429 with `Retry-After`, any other non-success → [`RegistryError::Api`])
//! and body decoding live here so the service modules only build URLs and map
//! documents.

use serde::de::DeserializeOwned;

use crate::error::RegistryError;

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Longest error body kept in [`RegistryError::Api`]; Solr error pages are large.
const MAX_ERROR_BODY: usize = 512;

/// `GET` `url` and decode the JSON body as `T`.
///
/// The client's own timeout bounds the whole exchange.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, RegistryError> {
    let resp = check_response(client.get(url).send().await?).await?;
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| RegistryError::Parse(e.to_string()))
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
    if resp.status() == 429 {
        return Err(RegistryError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let mut message = resp.text().await.unwrap_or_default();
        if message.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|i| message.is_char_boundary(*i))
                .unwrap_or(0);
            message.truncate(cut);
        }
        return Err(RegistryError::Api { status, message });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body(String::new())
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_falls_back() {
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
        let resp = mock_response_with_retry_after(429, "Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_api_error_truncates_body() {
        let body = "x".repeat(2048);
        let err = check_response(mock_response(503, &body)).await.unwrap_err();
        match err {
            RegistryError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message.len(), MAX_ERROR_BODY);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }
}
