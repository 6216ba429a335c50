// src/export/mod.rs
//! Export orchestration — the sequence of stages that turns a help center
//! into a directory of JSON files and binary assets.

pub mod attachments;
pub mod manifest;
mod writer;

use crate::api::{fetch_all_pages, ApiClient, HttpGateway};
use crate::config::ExportConfig;
use crate::constants::DOWNLOADED_ATTACHMENTS_KEY;
use crate::error::AppError;
use serde_json::Value;

use attachments::AttachmentResolver;
use manifest::Manifest;

pub use writer::ExportPaths;

/// What one completed run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub total_categories: usize,
    pub total_sections: usize,
    pub total_articles: usize,
    pub total_attachments: usize,
}

/// Sequentially exports categories, sections, articles (with attachments),
/// theme metadata, and finally the manifest.
///
/// There is no rollback or cross-stage recovery: each stage degrades on its
/// own (truncated listings, dropped attachment records, skipped themes) and
/// the run always reaches the manifest.
pub struct HelpCenterExporter<'a, G: HttpGateway> {
    config: &'a ExportConfig,
    client: ApiClient<G>,
    paths: ExportPaths,
    resolver: AttachmentResolver,
}

impl<'a, G: HttpGateway> HelpCenterExporter<'a, G> {
    pub fn new(config: &'a ExportConfig, gateway: G) -> Result<Self, AppError> {
        let paths = ExportPaths::prepare(&config.export_dir)?;
        let resolver = AttachmentResolver::new(&config.attachment_host)?;

        Ok(Self {
            config,
            client: ApiClient::new(gateway),
            paths,
            resolver,
        })
    }

    /// Runs every export stage and writes the manifest.
    pub async fn export_all(&self) -> Result<ExportSummary, AppError> {
        println!("Starting export for {}...", self.config.subdomain);

        let categories = self.export_listing("categories", "categories").await?;
        let sections = self.export_listing("sections", "sections").await?;
        let (articles, total_attachments) = self.export_articles().await?;
        self.export_themes().await;

        let manifest = Manifest::new(
            self.config,
            categories.len(),
            sections.len(),
            articles.len(),
        );
        writer::write_json(&self.paths.export_file("manifest.json"), &manifest)?;

        Ok(ExportSummary {
            total_categories: categories.len(),
            total_sections: sections.len(),
            total_articles: articles.len(),
            total_attachments,
        })
    }

    /// Fetches one paginated listing to completion and serializes it.
    async fn export_listing(&self, endpoint: &str, items_key: &str) -> Result<Vec<Value>, AppError> {
        println!("Exporting {}...", endpoint);

        let url = format!("{}/{}", self.config.help_center_url(), endpoint);
        let items = fetch_all_pages(&self.client, &url, items_key).await;

        writer::write_json(&self.paths.export_file(&format!("{}.json", endpoint)), &items)?;
        println!("Exported {} {}", items.len(), endpoint);

        Ok(items)
    }

    /// Fetches all articles and enriches each with its downloaded
    /// attachments before serializing.
    ///
    /// Every fetched article field passes through unmodified; only the
    /// `downloaded_attachments` key is added.
    async fn export_articles(&self) -> Result<(Vec<Value>, usize), AppError> {
        println!("Exporting articles...");

        let url = format!("{}/articles", self.config.help_center_url());
        let mut articles = fetch_all_pages(&self.client, &url, "articles").await;

        let mut total_attachments = 0;
        for article in &mut articles {
            let records = self.resolver.resolve(&self.client, &self.paths, article).await;
            total_attachments += records.len();

            if let Some(fields) = article.as_object_mut() {
                fields.insert(
                    DOWNLOADED_ATTACHMENTS_KEY.to_string(),
                    serde_json::to_value(&records)?,
                );
            }
        }

        writer::write_json(&self.paths.export_file("articles.json"), &articles)?;
        println!("Exported {} articles", articles.len());
        println!("Downloaded {} attachments", total_attachments);

        Ok((articles, total_attachments))
    }

    /// Best-effort theme metadata export.
    ///
    /// The themes endpoint is not paginated and not essential; any failure
    /// is logged and the stage is skipped without touching the run.
    async fn export_themes(&self) {
        println!("Exporting theme data...");

        let url = format!("{}/themes", self.config.help_center_url());
        match self.client.get_json(&url).await {
            Ok(themes) => {
                match writer::write_json(&self.paths.export_file("themes.json"), &themes) {
                    Ok(()) => println!("Theme data exported"),
                    Err(e) => log::warn!("Could not write theme data: {}", e),
                }
            }
            Err(e) => log::warn!("Could not export theme data: {}", e),
        }
    }
}
