// src/config.rs
use crate::constants::EXPORT_DIR_PREFIX;
use crate::error::AppError;
use crate::types::{ApiToken, EmailAddress, Subdomain, ValidationError};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use url::Url;

/// Environment variable holding the Zendesk API token.
///
/// Tokens are secrets and are never accepted on the command line, where
/// they would leak into shell history and process listings.
pub const API_TOKEN_ENV_VAR: &str = "ZENDESK_API_TOKEN";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Zendesk subdomain (the {subdomain} in https://{subdomain}.zendesk.com)
    pub subdomain: String,

    /// Admin email address (prompted for interactively when omitted)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Directory to write the export into (defaults to ./zendesk_export_{subdomain})
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Host whose /hc/article_attachments/ links are discovered in article
    /// bodies (defaults to {subdomain}.zendesk.com; set this for help
    /// centers served from a host-mapped domain)
    #[arg(long)]
    pub attachment_domain: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved export configuration — validated and ready to drive every stage.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub subdomain: Subdomain,
    pub email: EmailAddress,
    pub api_token: ApiToken,
    /// Host scanned for inline attachment links.
    pub attachment_host: String,
    pub export_dir: PathBuf,
    pub verbose: bool,
}

impl ExportConfig {
    /// Resolves a complete configuration from CLI input, the environment,
    /// and (when the email was omitted) an interactive prompt.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let token_str = std::env::var(API_TOKEN_ENV_VAR).map_err(|_| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                API_TOKEN_ENV_VAR
            ))
        })?;
        let api_token = ApiToken::new(token_str)?;

        let subdomain = Subdomain::new(cli.subdomain)?;

        let email_str = match cli.email {
            Some(email) => email,
            None => prompt_for_email()?,
        };
        let email = EmailAddress::new(email_str)?;

        let attachment_host = match cli.attachment_domain {
            Some(host) => validate_host(host)?,
            None => subdomain.default_host(),
        };

        let export_dir = cli
            .output_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{}{}", EXPORT_DIR_PREFIX, subdomain)));

        Ok(Self {
            subdomain,
            email,
            api_token,
            attachment_host,
            export_dir,
            verbose: cli.verbose,
        })
    }

    /// Root of the Zendesk REST API for this account.
    pub fn base_url(&self) -> String {
        format!("https://{}.zendesk.com/api/v2", self.subdomain)
    }

    /// Root of the Help Center listing endpoints.
    pub fn help_center_url(&self) -> String {
        format!("{}/help_center", self.base_url())
    }

    /// A ready-made configuration for unit tests.
    #[cfg(test)]
    pub(crate) fn for_tests(subdomain: &str, export_dir: &std::path::Path) -> Self {
        let subdomain = Subdomain::new(subdomain).expect("test subdomain is valid");
        Self {
            attachment_host: subdomain.default_host(),
            subdomain,
            email: EmailAddress::new("admin@example.com").expect("test email is valid"),
            api_token: ApiToken::new("0123456789abcdefghij").expect("test token is valid"),
            export_dir: export_dir.to_path_buf(),
            verbose: false,
        }
    }
}

/// Reads the operator's email address from stdin.
fn prompt_for_email() -> Result<String, AppError> {
    print!("Enter your Zendesk admin email: ");
    io::stdout().flush()?;

    let mut email = String::new();
    io::stdin().lock().read_line(&mut email)?;
    Ok(email.trim().to_string())
}

/// Checks that a user-supplied attachment domain is a bare, parseable host.
fn validate_host(host: String) -> Result<String, AppError> {
    let host = host.trim().trim_end_matches('/').to_string();

    let parsed = Url::parse(&format!("https://{}/", host)).map_err(|e| {
        ValidationError::InvalidHost {
            host: host.clone(),
            reason: e.to_string(),
        }
    })?;

    // Reject anything beyond a hostname (schemes, paths, ports smuggled in).
    if parsed.host_str() != Some(host.as_str()) {
        return Err(ValidationError::InvalidHost {
            host,
            reason: "expected a bare hostname such as support.example.com".to_string(),
        }
        .into());
    }

    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn urls_follow_the_zendesk_api_layout() {
        let config = ExportConfig::for_tests("acme", std::path::Path::new("/tmp/unused"));

        assert_eq!(config.base_url(), "https://acme.zendesk.com/api/v2");
        assert_eq!(
            config.help_center_url(),
            "https://acme.zendesk.com/api/v2/help_center"
        );
    }

    #[test]
    fn attachment_host_accepts_bare_hostnames_only() {
        assert_eq!(
            validate_host("support.example.com".to_string()).expect("bare host"),
            "support.example.com"
        );
        assert!(validate_host("https://support.example.com".to_string()).is_err());
        assert!(validate_host("support.example.com/hc".to_string()).is_err());
        assert!(validate_host("support.example.com:8443".to_string()).is_err());
    }
}
