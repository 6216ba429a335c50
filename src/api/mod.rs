// src/api/mod.rs
//! Zendesk Help Center API interaction.
//!
//! This module separates raw HTTP transport (`HttpGateway`) from request
//! policy (`ApiClient`: rate-limit retry, JSON decoding) and from pagination
//! (`fetch_all_pages`). Business logic depends on the trait, never on
//! reqwest details, so every policy above the socket is testable with a
//! scripted gateway.

pub mod client;
pub mod pagination;
mod request;

use crate::error::AppError;
use async_trait::async_trait;

/// Raw result of a single HTTP GET, before any policy is applied.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed `Retry-After` header in seconds, when present.
    pub retry_after: Option<u64>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Final URL the response came from.
    pub url: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// The ability to issue an authenticated GET against the help center.
///
/// Exactly one request is in flight at a time; the exporter never runs
/// gateway calls concurrently.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, AppError>;
}

// Re-export the public interface
pub use client::ZendeskHttpClient;
pub use pagination::fetch_all_pages;
pub use request::ApiClient;

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted gateway for exercising request policy without a server.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed queue of responses and records every URL requested.
    pub struct ScriptedGateway {
        responses: Mutex<VecDeque<Result<RawResponse, AppError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        pub fn new(responses: Vec<Result<RawResponse, AppError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requested: Mutex::new(Vec::new()),
            }
        }

        /// URLs requested so far, in order.
        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().expect("gateway lock").clone()
        }
    }

    #[async_trait]
    impl HttpGateway for ScriptedGateway {
        async fn get(&self, url: &str) -> Result<RawResponse, AppError> {
            self.requested
                .lock()
                .expect("gateway lock")
                .push(url.to_string());
            self.responses
                .lock()
                .expect("gateway lock")
                .pop_front()
                .unwrap_or_else(|| panic!("unscripted request to {url}"))
        }
    }

    /// A 2xx JSON response for `url`.
    pub fn ok_json(url: &str, body: &serde_json::Value) -> Result<RawResponse, AppError> {
        Ok(RawResponse {
            status: 200,
            retry_after: None,
            body: body.to_string().into_bytes(),
            url: url.to_string(),
        })
    }

    /// A 429 with an immediate retry window, so tests never sleep for real.
    pub fn rate_limited(url: &str) -> Result<RawResponse, AppError> {
        Ok(RawResponse {
            status: 429,
            retry_after: Some(0),
            body: Vec::new(),
            url: url.to_string(),
        })
    }

    /// A plain HTTP failure status.
    pub fn http_error(url: &str, status: u16) -> Result<RawResponse, AppError> {
        Ok(RawResponse {
            status,
            retry_after: None,
            body: Vec::new(),
            url: url.to_string(),
        })
    }
}
