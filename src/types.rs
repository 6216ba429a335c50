// src/types.rs
//! Domain-specific newtypes for type safety and validation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Validation errors for domain newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid subdomain '{subdomain}': {reason}")]
    InvalidSubdomain { subdomain: String, reason: String },

    #[error("Invalid API token: {reason}")]
    InvalidApiToken { reason: String },

    #[error("Invalid email address '{email}': {reason}")]
    InvalidEmail { email: String, reason: String },

    #[error("Invalid attachment host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },
}

static SUBDOMAIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("subdomain pattern is valid"));

/// The Zendesk account subdomain — the `{subdomain}` in
/// `https://{subdomain}.zendesk.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdomain(String);

impl Subdomain {
    /// Create a new subdomain with validation.
    pub fn new(subdomain: impl Into<String>) -> Result<Self, ValidationError> {
        let subdomain = subdomain.into().trim().to_lowercase();

        if subdomain.is_empty() {
            return Err(ValidationError::InvalidSubdomain {
                subdomain,
                reason: "subdomain cannot be empty".to_string(),
            });
        }

        if !SUBDOMAIN_PATTERN.is_match(&subdomain) {
            return Err(ValidationError::InvalidSubdomain {
                subdomain,
                reason: "subdomain may only contain lowercase letters, digits and hyphens"
                    .to_string(),
            });
        }

        Ok(Self(subdomain))
    }

    /// Get the subdomain as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The default host serving this help center's content.
    pub fn default_host(&self) -> String {
        format!("{}.zendesk.com", self.0)
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Zendesk API token for Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a new API token with validation.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();

        if token.is_empty() {
            return Err(ValidationError::InvalidApiToken {
                reason: "API token cannot be empty".to_string(),
            });
        }

        if token.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiToken {
                reason: "API token must not contain whitespace".to_string(),
            });
        }

        Ok(Self(token))
    }

    /// Get the API token as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the token in display
        let visible = self.0.len().min(4);
        write!(f, "{}...", &self.0[..visible])
    }
}

/// Operator email address, combined with the token into the Basic credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address with validation.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();

        let Some((local, domain)) = email.split_once('@') else {
            return Err(ValidationError::InvalidEmail {
                email,
                reason: "missing '@'".to_string(),
            });
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(ValidationError::InvalidEmail {
                email,
                reason: "expected the form user@domain.tld".to_string(),
            });
        }

        Ok(Self(email))
    }

    /// Get the email address as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
