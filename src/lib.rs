// src/lib.rs
//! zd-hc-export library — exports a Zendesk Help Center knowledge base
//! (categories, sections, articles, attachments, theme metadata) into a
//! local directory of JSON files and binary assets.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `ExportConfig`
//! - **Domain types** — `Subdomain`, `ApiToken`, `EmailAddress`
//! - **API client** — `HttpGateway`, `ZendeskHttpClient`, `ApiClient`,
//!   `fetch_all_pages`
//! - **Export** — `HelpCenterExporter`, `AttachmentResolver`, `Manifest`

mod api;
mod config;
mod constants;
mod error;
mod export;
mod types;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExportConfig, API_TOKEN_ENV_VAR};

// --- Domain Types ---
pub use crate::types::{ApiToken, EmailAddress, Subdomain};

// --- API Client ---
pub use crate::api::{fetch_all_pages, ApiClient, HttpGateway, RawResponse, ZendeskHttpClient};

// --- Export ---
pub use crate::export::{
    attachments::{AttachmentResolver, DownloadedAttachment},
    manifest::Manifest,
    ExportPaths, ExportSummary, HelpCenterExporter,
};
