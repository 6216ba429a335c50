// src/api/request.rs
//! Request policy layered over the raw gateway.
//!
//! `ApiClient` owns the rate-limit retry loop: a 429 suspends for the
//! server-provided window and retries the same URL, unboundedly. Any other
//! failure surfaces as a typed error for the caller to absorb (pagination
//! truncates, attachment downloads drop a record, the theme stage skips).

use crate::constants::RATE_LIMIT_FALLBACK_SECS;
use crate::error::AppError;
use serde_json::Value;
use std::time::Duration;

use super::HttpGateway;

/// Executes authenticated API requests with rate-limit handling.
pub struct ApiClient<G> {
    gateway: G,
}

impl<G: HttpGateway> ApiClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    #[cfg(test)]
    pub(crate) fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Issues a GET and decodes the body as JSON.
    ///
    /// On 429 the request is retried against the same URL after the
    /// `Retry-After` window (fallback 60 s). The loop is deliberately
    /// unbounded: sustained rate-limiting stalls the run, it never kills it.
    pub async fn get_json(&self, url: &str) -> Result<Value, AppError> {
        loop {
            let response = self.gateway.get(url).await?;

            if response.is_rate_limited() {
                let wait = response.retry_after.unwrap_or(RATE_LIMIT_FALLBACK_SECS);
                log::warn!("Rate limited on {}. Waiting {} seconds...", url, wait);
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            if !response.is_success() {
                return Err(AppError::ZendeskService {
                    status: response.status,
                    url: response.url,
                });
            }

            let url = response.url;
            return serde_json::from_slice(&response.body)
                .map_err(|source| AppError::MalformedResponse { url, source });
        }
    }

    /// Issues a GET for a binary asset and returns the raw body.
    ///
    /// Downloads bypass the 429 retry path — a rate-limited download fails
    /// like any other HTTP error and costs one record, not the run.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let response = self.gateway.get(url).await?;

        if !response.is_success() {
            return Err(AppError::ZendeskService {
                status: response.status,
                url: response.url,
            });
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const URL: &str = "https://acme.zendesk.com/api/v2/help_center/articles";

    #[tokio::test]
    async fn rate_limited_request_retries_same_url_exactly_once_more() {
        let gateway = ScriptedGateway::new(vec![
            rate_limited(URL),
            ok_json(URL, &json!({"articles": [1, 2]})),
        ]);
        let client = ApiClient::new(gateway);

        let body = client.get_json(URL).await.expect("retry succeeds");

        assert_eq!(body, json!({"articles": [1, 2]}));
        assert_eq!(client.gateway().requested(), vec![URL, URL]);
    }

    #[tokio::test]
    async fn repeated_rate_limits_keep_retrying() {
        let gateway = ScriptedGateway::new(vec![
            rate_limited(URL),
            rate_limited(URL),
            rate_limited(URL),
            ok_json(URL, &json!({})),
        ]);
        let client = ApiClient::new(gateway);

        client.get_json(URL).await.expect("eventually succeeds");

        assert_eq!(client.gateway().requested().len(), 4);
    }

    #[tokio::test]
    async fn non_2xx_surfaces_as_service_error() {
        let gateway = ScriptedGateway::new(vec![http_error(URL, 403)]);
        let client = ApiClient::new(gateway);

        let err = client.get_json(URL).await.expect_err("403 is an error");
        assert!(
            matches!(err, AppError::ZendeskService { status: 403, .. }),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn unparseable_body_is_a_malformed_response() {
        let gateway = ScriptedGateway::new(vec![Ok(crate::api::RawResponse {
            status: 200,
            retry_after: None,
            body: b"<html>not json</html>".to_vec(),
            url: URL.to_string(),
        })]);
        let client = ApiClient::new(gateway);

        let err = client.get_json(URL).await.expect_err("html is not json");
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn download_returns_raw_bytes_without_retry() {
        let bytes = vec![0x89, b'P', b'N', b'G'];
        let gateway = ScriptedGateway::new(vec![Ok(crate::api::RawResponse {
            status: 200,
            retry_after: None,
            body: bytes.clone(),
            url: URL.to_string(),
        })]);
        let client = ApiClient::new(gateway);

        assert_eq!(client.download(URL).await.expect("download"), bytes);
    }

    #[tokio::test]
    async fn rate_limited_download_fails_instead_of_retrying() {
        let gateway = ScriptedGateway::new(vec![rate_limited(URL)]);
        let client = ApiClient::new(gateway);

        let err = client.download(URL).await.expect_err("no retry path");
        assert!(matches!(err, AppError::ZendeskService { status: 429, .. }));
        assert_eq!(client.gateway().requested().len(), 1);
    }
}
