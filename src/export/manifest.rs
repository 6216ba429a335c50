// src/export/manifest.rs
//! The run summary written once, after every export stage has finished.

use crate::config::ExportConfig;
use serde::Serialize;

/// Aggregate counts and run metadata for one export.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Manifest {
    pub export_date: String,
    pub subdomain: String,
    pub base_url: String,
    pub total_categories: usize,
    pub total_sections: usize,
    pub total_articles: usize,
}

impl Manifest {
    pub fn new(
        config: &ExportConfig,
        total_categories: usize,
        total_sections: usize,
        total_articles: usize,
    ) -> Self {
        Self {
            export_date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            subdomain: config.subdomain.as_str().to_string(),
            base_url: format!("https://{}.zendesk.com", config.subdomain.as_str()),
            total_categories,
            total_sections,
            total_articles,
        }
    }
}
