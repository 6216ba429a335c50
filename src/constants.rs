// src/constants.rs
//! Domain constants that define the operational boundaries of the exporter.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how the exporter paces itself against the Zendesk
//! API and where its output lands.

// ---------------------------------------------------------------------------
// Zendesk API pacing
// ---------------------------------------------------------------------------

/// Pause inserted after every page fetch, successful or not.
///
/// The Help Center API rate-limits aggressively; a small fixed delay between
/// page requests keeps a full export well under the limit so the 429 path
/// stays the exception rather than the steady state.
pub const PAGE_PACING_DELAY_MS: u64 = 100;

/// How long to wait after a 429 when the server sends no `Retry-After`.
///
/// Zendesk documents `Retry-After` on rate-limited responses; this fallback
/// only applies when the header is missing or unparseable.
pub const RATE_LIMIT_FALLBACK_SECS: u64 = 60;

// ---------------------------------------------------------------------------
// Help Center content layout
// ---------------------------------------------------------------------------

/// Path segment under which a help center serves article attachment binaries.
pub const ARTICLE_ATTACHMENTS_SEGMENT: &str = "hc/article_attachments";

/// Key added to each exported article holding its materialized attachments.
pub const DOWNLOADED_ATTACHMENTS_KEY: &str = "downloaded_attachments";

// ---------------------------------------------------------------------------
// Local output layout
// ---------------------------------------------------------------------------

/// Prefix for the default export directory name (suffixed with the subdomain).
pub const EXPORT_DIR_PREFIX: &str = "zendesk_export_";

/// Subdirectory of the export directory holding downloaded binaries.
pub const ATTACHMENTS_DIR_NAME: &str = "attachments";
