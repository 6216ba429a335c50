// tests/export_pipeline.rs
//! End-to-end export run against a scripted help center.
//!
//! Drives the full orchestration — listings, attachment resolution, the
//! optional theme stage, and the manifest — with a fake gateway standing in
//! for the Zendesk API, and asserts on the files left on disk.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use zd_hc_export::{
    ApiToken, AppError, EmailAddress, ExportConfig, HelpCenterExporter, HttpGateway, RawResponse,
    Subdomain,
};

/// Serves canned responses keyed by URL; unknown URLs get a 404.
struct FakeHelpCenter {
    responses: Mutex<HashMap<String, RawResponse>>,
}

impl FakeHelpCenter {
    fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
        }
    }

    fn serve_json(&self, url: &str, body: &Value) {
        self.serve_raw(url, 200, body.to_string().into_bytes());
    }

    fn serve_raw(&self, url: &str, status: u16, body: Vec<u8>) {
        self.responses.lock().expect("responses lock").insert(
            url.to_string(),
            RawResponse {
                status,
                retry_after: None,
                body,
                url: url.to_string(),
            },
        );
    }
}

#[async_trait]
impl HttpGateway for FakeHelpCenter {
    async fn get(&self, url: &str) -> Result<RawResponse, AppError> {
        Ok(self
            .responses
            .lock()
            .expect("responses lock")
            .get(url)
            .cloned()
            .unwrap_or(RawResponse {
                status: 404,
                retry_after: None,
                body: Vec::new(),
                url: url.to_string(),
            }))
    }
}

fn test_config(export_dir: &std::path::Path) -> ExportConfig {
    let subdomain = Subdomain::new("acme").expect("valid subdomain");
    ExportConfig {
        attachment_host: subdomain.default_host(),
        subdomain,
        email: EmailAddress::new("admin@example.com").expect("valid email"),
        api_token: ApiToken::new("0123456789abcdefghij").expect("valid token"),
        export_dir: export_dir.to_path_buf(),
        verbose: false,
    }
}

fn read_json(path: &std::path::Path) -> Value {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
    serde_json::from_str(&content).expect("export files hold valid JSON")
}

const HC: &str = "https://acme.zendesk.com/api/v2/help_center";

#[tokio::test]
async fn full_export_writes_listings_attachments_and_manifest() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let export_dir = tmp.path().join("zendesk_export_acme");
    let config = test_config(&export_dir);

    let structured_url = "https://acme.zendesk.com/attachments/token/abc/?name=guide.pdf";
    let inline_url = "https://acme.zendesk.com/hc/article_attachments/555";

    let article_with_structured = json!({
        "id": 101,
        "title": "Install guide",
        "body": null,
        "attachments": [{"file_name": "guide.pdf", "content_url": structured_url}],
    });
    let article_with_inline = json!({
        "id": 102,
        "title": "Network setup",
        "body": format!(r#"<p>See below.</p><img src="{inline_url}" alt="diagram.png">"#),
    });

    let fake = FakeHelpCenter::new();
    fake.serve_json(
        &format!("{HC}/categories"),
        &json!({"categories": [{"id": 1, "name": "General"}], "next_page": null}),
    );
    fake.serve_json(
        &format!("{HC}/sections"),
        &json!({"sections": [{"id": 10, "name": "FAQ", "category_id": 1}], "next_page": null}),
    );
    fake.serve_json(
        &format!("{HC}/articles"),
        &json!({
            "articles": [article_with_structured, article_with_inline],
            "next_page": null,
        }),
    );
    // The structured download fails; the inline one succeeds; themes 404.
    fake.serve_raw(structured_url, 404, Vec::new());
    fake.serve_raw(inline_url, 200, b"\x89PNG fake bytes".to_vec());

    let exporter = HelpCenterExporter::new(&config, fake).expect("exporter builds");
    let summary = exporter.export_all().await.expect("run completes");

    assert_eq!(summary.total_categories, 1);
    assert_eq!(summary.total_sections, 1);
    assert_eq!(summary.total_articles, 2);
    assert_eq!(summary.total_attachments, 1);

    // Listings land as pretty-printed JSON arrays.
    let categories = read_json(&export_dir.join("categories.json"));
    assert_eq!(categories, json!([{"id": 1, "name": "General"}]));

    let articles = read_json(&export_dir.join("articles.json"));
    let articles = articles.as_array().expect("articles.json is an array");
    assert_eq!(articles.len(), 2);

    // The failed structured download leaves article 101 with no records.
    assert_eq!(articles[0]["id"], json!(101));
    assert_eq!(articles[0]["downloaded_attachments"], json!([]));

    // Article 102 carries exactly one record, and every original field
    // passes through unchanged.
    assert_eq!(articles[1]["id"], json!(102));
    assert_eq!(articles[1]["title"], json!("Network setup"));
    let records = articles[1]["downloaded_attachments"]
        .as_array()
        .expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["attachment_id"], json!("555"));
    assert_eq!(records[0]["original_url"], json!(inline_url));
    assert_eq!(records[0]["filename"], json!("102_1_diagram.png"));
    assert_eq!(records[0]["original_filename"], json!("diagram.png"));

    // The asset itself is on disk under its sequence-numbered name.
    let asset = export_dir.join("attachments").join("102_1_diagram.png");
    assert_eq!(
        std::fs::read(&asset).expect("downloaded asset exists"),
        b"\x89PNG fake bytes"
    );

    // Themes failed, so no themes.json — and that did not abort the run.
    assert!(!export_dir.join("themes.json").exists());

    // The manifest is written last with the full totals.
    let manifest = read_json(&export_dir.join("manifest.json"));
    assert_eq!(manifest["subdomain"], json!("acme"));
    assert_eq!(manifest["base_url"], json!("https://acme.zendesk.com"));
    assert_eq!(manifest["total_categories"], json!(1));
    assert_eq!(manifest["total_sections"], json!(1));
    assert_eq!(manifest["total_articles"], json!(2));
}

#[tokio::test]
async fn successful_theme_fetch_is_written_through() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let export_dir = tmp.path().join("export");
    let config = test_config(&export_dir);

    let fake = FakeHelpCenter::new();
    fake.serve_json(
        &format!("{HC}/categories"),
        &json!({"categories": [], "next_page": null}),
    );
    fake.serve_json(
        &format!("{HC}/sections"),
        &json!({"sections": [], "next_page": null}),
    );
    fake.serve_json(
        &format!("{HC}/articles"),
        &json!({"articles": [], "next_page": null}),
    );
    fake.serve_json(
        &format!("{HC}/themes"),
        &json!({"themes": [{"id": "t1", "name": "Copenhagen"}]}),
    );

    let exporter = HelpCenterExporter::new(&config, fake).expect("exporter builds");
    let summary = exporter.export_all().await.expect("run completes");

    assert_eq!(summary.total_articles, 0);
    let themes = read_json(&export_dir.join("themes.json"));
    assert_eq!(themes["themes"][0]["name"], json!("Copenhagen"));
}

#[tokio::test]
async fn unreachable_help_center_still_produces_a_manifest() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let export_dir = tmp.path().join("export");
    let config = test_config(&export_dir);

    // Every request 404s: all listings truncate to empty, themes skip.
    let fake = FakeHelpCenter::new();

    let exporter = HelpCenterExporter::new(&config, fake).expect("exporter builds");
    let summary = exporter.export_all().await.expect("run still completes");

    assert_eq!(summary.total_categories, 0);
    assert_eq!(summary.total_attachments, 0);

    let manifest = read_json(&export_dir.join("manifest.json"));
    assert_eq!(manifest["total_articles"], json!(0));
    assert_eq!(read_json(&export_dir.join("articles.json")), json!([]));
}
