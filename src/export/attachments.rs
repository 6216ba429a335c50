// src/export/attachments.rs
//! Attachment discovery, download, and dedup-free merging.
//!
//! Articles reference binary assets through two independent mechanisms:
//! a structured `attachments` array in the article record, and inline
//! `/hc/article_attachments/{id}` links embedded in the rendered body
//! markup. The resolver materializes both. The two sources are merged, not
//! reconciled against each other — they address different mechanisms, and
//! repeated inline references download repeatedly under distinct sequence
//! numbers.

use crate::api::{ApiClient, HttpGateway};
use crate::constants::ARTICLE_ATTACHMENTS_SEGMENT;
use crate::error::AppError;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::writer::{self, ExportPaths};

/// One materialized attachment, as recorded on the owning article.
///
/// Structured attachments carry only the URL/path/filename triple; inline
/// attachments additionally record the id recovered from the link and the
/// display name recovered from markup (or its fallback).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DownloadedAttachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
    pub original_url: String,
    pub local_path: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

/// An inline link recovered from article body markup.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InlineReference {
    id: String,
    url: String,
    /// Alt text of a sibling `<img>` tag referencing the same URL, if any.
    display_name: Option<String>,
}

/// Locates and downloads every asset one article references.
pub struct AttachmentResolver {
    attachment_base: String,
    link_pattern: Regex,
}

impl AttachmentResolver {
    /// Builds a resolver scoped to one attachment-serving host.
    ///
    /// Only links under `https://{host}/hc/article_attachments/` are ever
    /// discovered; assets hosted elsewhere are invisible to the inline scan.
    pub fn new(attachment_host: &str) -> Result<Self, AppError> {
        let attachment_base = format!("https://{}/{}", attachment_host, ARTICLE_ATTACHMENTS_SEGMENT);
        let link_pattern = Regex::new(&format!(r"{}/(\d+)", regex::escape(&attachment_base)))?;

        Ok(Self {
            attachment_base,
            link_pattern,
        })
    }

    /// Produces the full set of downloaded-attachment records for one
    /// article, writing each asset into the attachments directory.
    ///
    /// Individual download failures are logged and dropped; they never
    /// abort the article. An article with no body and no attachment list
    /// yields an empty set.
    pub async fn resolve<G: HttpGateway>(
        &self,
        client: &ApiClient<G>,
        paths: &ExportPaths,
        article: &Value,
    ) -> Vec<DownloadedAttachment> {
        let Some(article_id) = article_id(article) else {
            log::warn!("Skipping attachment resolution for an article without an id");
            return Vec::new();
        };

        let mut records = Vec::new();

        // Structured attachments declared in the article record.
        if let Some(Value::Array(entries)) = article.get("attachments") {
            for entry in entries {
                let (Some(file_name), Some(content_url)) = (
                    entry.get("file_name").and_then(Value::as_str),
                    entry.get("content_url").and_then(Value::as_str),
                ) else {
                    log::warn!(
                        "Article {}: attachment entry missing file_name or content_url",
                        article_id
                    );
                    continue;
                };

                let filename = format!("{}_{}", article_id, file_name);
                match download_to(client, paths, content_url, &filename).await {
                    Ok(local_path) => records.push(DownloadedAttachment {
                        attachment_id: None,
                        original_url: content_url.to_string(),
                        local_path,
                        filename,
                        original_filename: None,
                    }),
                    Err(e) => log::error!("Error downloading attachment {}: {}", filename, e),
                }
            }
        }

        // Inline attachments recovered from body markup.
        if let Some(body) = article.get("body").and_then(Value::as_str) {
            for (i, reference) in self.inline_references(body).into_iter().enumerate() {
                let display_name = reference
                    .display_name
                    .unwrap_or_else(|| format!("attachment_{}", reference.id));
                let filename = format!("{}_{}_{}", article_id, i + 1, display_name);

                match download_to(client, paths, &reference.url, &filename).await {
                    Ok(local_path) => {
                        log::info!("Downloaded attachment: {}", filename);
                        records.push(DownloadedAttachment {
                            attachment_id: Some(reference.id),
                            original_url: reference.url,
                            local_path,
                            filename,
                            original_filename: Some(display_name),
                        });
                    }
                    Err(e) => log::error!("Error downloading attachment {}: {}", filename, e),
                }
            }
        }

        records
    }

    /// Scans body markup for attachment links, in order of appearance.
    ///
    /// Duplicates are kept: each occurrence gets its own sequence number
    /// and its own download.
    fn inline_references(&self, body: &str) -> Vec<InlineReference> {
        self.link_pattern
            .captures_iter(body)
            .map(|caps| {
                let id = caps[1].to_string();
                let url = format!("{}/{}", self.attachment_base, id);
                let display_name = self.alt_text_for(body, &url);
                InlineReference {
                    id,
                    url,
                    display_name,
                }
            })
            .collect()
    }

    /// Recovers a display name from an `<img>` tag whose `src` is this URL.
    fn alt_text_for(&self, body: &str, url: &str) -> Option<String> {
        let img_pattern = format!(r#"<img[^>]*src="{}"[^>]*alt="([^"]*)""#, regex::escape(url));
        Regex::new(&img_pattern)
            .ok()?
            .captures(body)
            .map(|caps| caps[1].to_string())
    }
}

/// Downloads one asset and writes it under the attachments directory.
///
/// Returns the local path recorded on the article.
async fn download_to<G: HttpGateway>(
    client: &ApiClient<G>,
    paths: &ExportPaths,
    url: &str,
    filename: &str,
) -> Result<String, AppError> {
    let bytes = client.download(url).await?;
    let path = paths.attachment_file(filename);
    writer::write_binary(&path, &bytes)?;
    Ok(path.display().to_string())
}

/// The owning article's id, rendered the way it appears in filenames.
fn article_id(article: &Value) -> Option<String> {
    match article.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
