use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::error::ApiError;
use super::types::{PAGE_SIZE, Page, Post};

pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the paginated `/posts` endpoint.
///
/// Cheap to clone: clones share the connection pool.
#[derive(Clone)]
pub struct PostClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl PostClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of posts.
    ///
    /// `page_index` is zero-based; the wire parameter `_page` is one-based.
    /// The next page index is always `page_index + 1`, the endpoint carries
    /// no pagination metadata.
    pub async fn fetch_page(&self, page_index: usize) -> Result<Page, ApiError> {
        let url = format!("{}/posts", self.base_url);
        let wire_page = page_index + 1;
        debug!(page_index, wire_page, "requesting page");

        let items = self
            .request_posts(&url, wire_page)
            .await
            .inspect_err(|err| warn!(page_index, error = %err, "page fetch failed"))?;

        debug!(page_index, count = items.len(), "page received");
        Ok(Page {
            items,
            next_page_index: page_index + 1,
        })
    }

    async fn request_posts(&self, url: &str, wire_page: usize) -> Result<Vec<Post>, ApiError> {
        let posts = self
            .http
            .get(url)
            .query(&[("_page", wire_page), ("_limit", PAGE_SIZE)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(posts)
    }

    /// Re-fetches the first `count` pages in order, one request at a time.
    ///
    /// Stops early at the first empty page since nothing can follow it.
    pub async fn fetch_pages(&self, count: usize) -> Result<Vec<Page>, ApiError> {
        let mut pages = Vec::with_capacity(count);
        let mut next = 0;
        while pages.len() < count {
            let page = self.fetch_page(next).await?;
            next = page.next_page_index;
            let exhausted = page.is_empty();
            pages.push(page);
            if exhausted {
                break;
            }
        }
        Ok(pages)
    }
}
