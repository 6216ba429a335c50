// src/api/pagination.rs
//! Cursor pagination over Help Center listing endpoints.
//!
//! Each page response carries the items under an endpoint-specific key and
//! a `next_page` URL, or null at the end. Items come back in API order;
//! this layer never sorts, deduplicates, or revisits a page.

use crate::constants::PAGE_PACING_DELAY_MS;
use serde_json::Value;
use std::time::Duration;

use super::{ApiClient, HttpGateway};

/// Fetches every page of a listing, following `next_page` cursors.
///
/// Request failures do not surface as errors: the failed page is logged and
/// whatever was collected up to that point is returned. A partial export is
/// worth more to a migration than an aborted one.
pub async fn fetch_all_pages<G: HttpGateway>(
    client: &ApiClient<G>,
    first_page_url: &str,
    items_key: &str,
) -> Vec<Value> {
    let mut all_items = Vec::new();
    let mut next_url = Some(first_page_url.to_string());

    while let Some(url) = next_url {
        log::info!("Fetching: {}", url);

        let mut page = match client.get_json(&url).await {
            Ok(page) => page,
            Err(e) => {
                log::error!(
                    "Error fetching {}: {} (keeping {} items collected so far)",
                    url,
                    e,
                    all_items.len()
                );
                break;
            }
        };

        // A page without the expected key contributes nothing.
        if let Some(Value::Array(items)) = page.get_mut(items_key).map(Value::take) {
            all_items.extend(items);
        }

        next_url = page
            .get("next_page")
            .and_then(Value::as_str)
            .map(str::to_string);

        // Pacing between page requests, regardless of whether more follow.
        tokio::time::sleep(Duration::from_millis(PAGE_PACING_DELAY_MS)).await;
    }

    all_items
}
