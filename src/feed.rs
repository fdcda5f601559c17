//! Paginated accumulator for the post feed.
//!
//! `PostFeed` owns every post fetched this session, flattened in fetch order,
//! and the flags describing what is in flight. It never performs I/O itself: operations that need a
//! fetch hand back a request for the caller to dispatch, and the caller feeds
//! the outcome back through one of the `complete_*` methods.

use tracing::{info, warn};

use crate::api::{ApiError, Page, Post};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// Initial page not yet received.
    Pending,
    Success,
    /// Initial page failed. Nothing is fetched until the feed is restarted.
    Error(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    NextPage,
    Refetch,
}

/// A single page fetch to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page_index: usize,
}

/// A background re-fetch of every cached page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefetchRequest {
    pub generation: u64,
    pub page_count: usize,
}

#[derive(Debug)]
pub struct PostFeed {
    posts: Vec<Post>,
    /// Post count of each fetched page, in fetch order.
    page_lens: Vec<usize>,
    next_page_index: usize,
    status: FeedStatus,
    in_flight: Option<FetchKind>,
    next_page_error: Option<ApiError>,
    generation: u64,
}

impl Default for PostFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl PostFeed {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            page_lens: Vec::new(),
            next_page_index: 0,
            status: FeedStatus::Pending,
            in_flight: None,
            next_page_error: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page_count(&self) -> usize {
        self.page_lens.len()
    }

    /// All fetched posts, in fetch order.
    pub fn items(&self) -> &[Post] {
        &self.posts
    }

    pub fn item_count(&self) -> usize {
        self.posts.len()
    }

    pub fn get(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    /// True until a fetched page comes back empty.
    pub fn has_next_page(&self) -> bool {
        self.page_lens.last().is_none_or(|&len| len > 0)
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.in_flight == Some(FetchKind::NextPage)
    }

    /// A refetch of already loaded pages is running in the background.
    pub fn is_refetching(&self) -> bool {
        self.in_flight == Some(FetchKind::Refetch)
    }

    /// Error from the last next-page fetch. While set, pagination is halted.
    pub fn next_page_error(&self) -> Option<&ApiError> {
        self.next_page_error.as_ref()
    }

    pub fn clear_next_page_error(&mut self) {
        self.next_page_error = None;
    }

    /// Number of slots the list should show: every post plus the sentinel
    /// row. The sentinel loads the next page while one may exist and marks
    /// the end of the feed once an empty page came back.
    pub fn slot_count(&self) -> usize {
        self.item_count() + 1
    }

    fn push_page(&mut self, page: Page) {
        self.page_lens.push(page.items.len());
        self.next_page_index = page.next_page_index;
        self.posts.extend(page.items);
    }

    fn replace_pages(&mut self, pages: Vec<Page>) {
        self.posts.clear();
        self.page_lens.clear();
        self.next_page_index = 0;
        for page in pages {
            self.push_page(page);
        }
    }

    /// Drops everything and requests the first page. Results of requests
    /// issued before this call are discarded when they arrive.
    pub fn start_initial(&mut self) -> PageRequest {
        self.generation += 1;
        self.replace_pages(Vec::new());
        self.status = FeedStatus::Pending;
        self.next_page_error = None;
        self.in_flight = Some(FetchKind::Initial);
        PageRequest {
            generation: self.generation,
            page_index: 0,
        }
    }

    /// Requests the page after the last cached one.
    ///
    /// Returns `None` while any fetch is in flight, before the initial page
    /// has loaded, after the last page, or while pagination is halted.
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some()
            || self.status != FeedStatus::Success
            || !self.has_next_page()
            || self.next_page_error.is_some()
        {
            return None;
        }
        self.in_flight = Some(FetchKind::NextPage);
        Some(PageRequest {
            generation: self.generation,
            page_index: self.next_page_index,
        })
    }

    /// Requests a background re-fetch of every cached page.
    pub fn start_refetch(&mut self) -> Option<RefetchRequest> {
        if self.in_flight.is_some()
            || self.status != FeedStatus::Success
            || self.page_lens.is_empty()
        {
            return None;
        }
        self.in_flight = Some(FetchKind::Refetch);
        Some(RefetchRequest {
            generation: self.generation,
            page_count: self.page_count(),
        })
    }

    fn accepts(&self, generation: u64, kind: FetchKind) -> bool {
        generation == self.generation && self.in_flight == Some(kind)
    }

    /// Applies the outcome of the first page. Returns false if it was stale.
    pub fn complete_initial(&mut self, generation: u64, result: Result<Page, ApiError>) -> bool {
        if !self.accepts(generation, FetchKind::Initial) {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(page) => {
                info!(count = page.items.len(), "initial page loaded");
                self.replace_pages(vec![page]);
                self.status = FeedStatus::Success;
            }
            Err(err) => {
                warn!(error = %err, "initial page failed");
                self.status = FeedStatus::Error(err);
            }
        }
        true
    }

    /// Appends a next page. Returns false if it was stale.
    pub fn complete_next_page(
        &mut self,
        generation: u64,
        page_index: usize,
        result: Result<Page, ApiError>,
    ) -> bool {
        if !self.accepts(generation, FetchKind::NextPage) || page_index != self.next_page_index {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(page) => {
                info!(page_index, count = page.items.len(), "page appended");
                self.push_page(page);
            }
            Err(err) => {
                warn!(page_index, error = %err, "next page failed, pagination halted");
                self.next_page_error = Some(err);
            }
        }
        true
    }

    /// Replaces cached pages with refreshed ones.
    ///
    /// The refreshed pages are kept only if they hold at least as many posts
    /// as the cache, so rows never disappear under the reader. A failed
    /// refetch leaves the cache untouched. Returns false if it was stale.
    pub fn complete_refetch(
        &mut self,
        generation: u64,
        result: Result<Vec<Page>, ApiError>,
    ) -> bool {
        if !self.accepts(generation, FetchKind::Refetch) {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(pages) => {
                let refreshed: usize = pages.iter().map(|page| page.items.len()).sum();
                if refreshed >= self.item_count() {
                    info!(pages = pages.len(), count = refreshed, "refetch applied");
                    self.replace_pages(pages);
                } else {
                    warn!(
                        refreshed,
                        cached = self.item_count(),
                        "refetch returned fewer posts, keeping cache"
                    );
                }
            }
            Err(err) => warn!(error = %err, "refetch failed, keeping cache"),
        }
        true
    }
}
