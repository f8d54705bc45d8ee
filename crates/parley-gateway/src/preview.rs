//! Link-preview lookup
//!
//! Best-effort external metadata resolution for URLs found in message
//! content. A failed or slow lookup never fails the edit that requested it.

use std::time::Duration;

use async_trait::async_trait;
use parley_core::Embed;

/// External link-preview lookup
#[async_trait]
pub trait LinkPreview: Send + Sync {
    /// Resolve preview metadata for a URL; `None` on any failure
    async fn fetch_preview(&self, url: &str) -> Option<Embed>;
}

/// Extract the first http(s) URL from message content
#[must_use]
pub fn extract_first_url(content: &str) -> Option<&str> {
    let start = content.find("https://").or_else(|| content.find("http://"))?;
    let rest = &content[start..];
    let end = rest
        .find(|c: char| c.is_whitespace())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// reqwest-backed lookup scraping `<title>` and OpenGraph tags
pub struct HttpLinkPreview {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLinkPreview {
    /// Create a lookup with the given per-request timeout
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    async fn fetch_html(&self, url: &str) -> Option<String> {
        let response = self.client.get(url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }
}

#[async_trait]
impl LinkPreview for HttpLinkPreview {
    async fn fetch_preview(&self, url: &str) -> Option<Embed> {
        let html = tokio::time::timeout(self.timeout, self.fetch_html(url))
            .await
            .ok()??;

        let embed = Embed {
            title: meta_content(&html, "og:title").or_else(|| title_tag(&html)),
            description: meta_content(&html, "og:description"),
            image_url: meta_content(&html, "og:image"),
        };

        if embed.is_empty() {
            None
        } else {
            Some(embed)
        }
    }
}

/// Pull the content attribute of a `<meta property="...">` tag
fn meta_content(html: &str, property: &str) -> Option<String> {
    let needle = format!("property=\"{property}\"");
    let tag_start = html.find(&needle)?;
    // The content attribute may precede or follow the property attribute;
    // search the surrounding tag text.
    let tag_open = html[..tag_start].rfind('<')?;
    let tag_end = tag_open + html[tag_open..].find('>')?;
    let tag = &html[tag_open..tag_end];

    let content_pos = tag.find("content=\"")?;
    let value_start = content_pos + "content=\"".len();
    let value_end = value_start + tag[value_start..].find('"')?;
    let value = tag[value_start..value_end].trim();

    (!value.is_empty()).then(|| value.to_string())
}

/// Pull the text of the `<title>` tag
fn title_tag(html: &str) -> Option<String> {
    let start = html.find("<title")?;
    let text_start = start + html[start..].find('>')? + 1;
    let text_end = text_start + html[text_start..].find("</title>")?;
    let title = html[text_start..text_end].trim();

    (!title.is_empty()).then(|| title.to_string())
}
