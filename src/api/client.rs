// src/api/client.rs
//! Pure HTTP client wrapper for the Zendesk Help Center API.
//!
//! This module provides a thin wrapper around reqwest. It handles
//! authentication headers and raw request/response transport without any
//! retry policy or business logic — that lives in [`super::ApiClient`].

use crate::error::AppError;
use crate::types::{ApiToken, EmailAddress};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{header, Client};

use super::{HttpGateway, RawResponse};

/// A thin wrapper around a reqwest Client carrying Zendesk authentication.
///
/// The credential headers are built once at construction and shared across
/// every request of the run; the client is read-only afterwards.
#[derive(Clone)]
pub struct ZendeskHttpClient {
    client: Client,
}

impl ZendeskHttpClient {
    /// Creates a new HTTP client authenticated as `{email}/token:{api_token}`.
    pub fn new(email: &EmailAddress, token: &ApiToken) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(email, token)?)
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Help Center API requests.
    ///
    /// Zendesk API-token authentication is HTTP Basic with the username
    /// `{email}/token` and the token as the password.
    fn create_headers(
        email: &EmailAddress,
        token: &ApiToken,
    ) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let credentials = format!("{}/token:{}", email.as_str(), token.as_str());
        let auth_header = format!("Basic {}", BASE64.encode(credentials));
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid credential format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

#[async_trait]
impl HttpGateway for ZendeskHttpClient {
    async fn get(&self, url: &str) -> Result<RawResponse, AppError> {
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok());
        let final_url = response.url().to_string();
        let body = response.bytes().await?.to_vec();

        log::debug!("{} -> {} ({} bytes)", final_url, status, body.len());

        Ok(RawResponse {
            status,
            retry_after,
            body,
            url: final_url,
        })
    }
}
