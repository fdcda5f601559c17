//! Test data builders for feed and view tests.

use ratatui::layout::Rect;

use crate::api::{ApiError, Page, Post, PostClient};
use crate::app::App;
use crate::theme::{ThemeVariant, default_for_variant};

pub struct PostBuilder {
    id: u64,
    user_id: Option<u64>,
    title: String,
    body: String,
}

impl Default for PostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PostBuilder {
    pub fn new() -> Self {
        Self {
            id: 1,
            user_id: Some(1),
            title: "Test post".to_string(),
            body: "Test body".to_string(),
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn user(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn build(self) -> Post {
        Post {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            body: self.body,
        }
    }
}

/// Page `index` holding `count` posts with ids `index * 10 + 1` onward.
pub fn page_of(index: usize, count: usize) -> Page {
    let first = (index * 10) as u64 + 1;
    let items = (first..first + count as u64)
        .map(|id| {
            PostBuilder::new()
                .id(id)
                .user(id.div_ceil(10))
                .title(&format!("Post {id} title"))
                .body(&format!(
                    "Body of post {id} with enough words to wrap on a narrow screen."
                ))
                .build()
        })
        .collect();
    Page {
        items,
        next_page_index: index + 1,
    }
}

/// Client pointed at a closed port. Fine for tests that never fetch.
pub fn test_client() -> PostClient {
    PostClient::new("http://127.0.0.1:1").unwrap()
}

enum Outcome {
    Pending,
    Loaded(Vec<Page>),
    Failed(ApiError),
}

enum InFlight {
    None,
    NextPage,
    Refetch,
    NextPageFailed(ApiError),
    Exhausted,
}

/// Builds an `App` in a given feed state without touching the network.
///
/// State is driven through `PostFeed`'s own request/complete methods, so the
/// app ends up exactly where a real session would.
pub struct TestAppBuilder {
    outcome: Outcome,
    in_flight: InFlight,
    client: Option<PostClient>,
    size: Option<(u16, u16)>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            outcome: Outcome::Pending,
            in_flight: InFlight::None,
            client: None,
            size: None,
        }
    }

    /// Loaded with `count` full pages from [`page_of`].
    pub fn pages(mut self, count: usize) -> Self {
        self.outcome = Outcome::Loaded((0..count).map(|i| page_of(i, 10)).collect());
        self
    }

    /// Loaded with a single page holding `posts`.
    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.outcome = Outcome::Loaded(vec![Page {
            items: posts,
            next_page_index: 1,
        }]);
        self
    }

    pub fn failed(mut self, err: ApiError) -> Self {
        self.outcome = Outcome::Failed(err);
        self
    }

    pub fn fetching_next_page(mut self) -> Self {
        self.in_flight = InFlight::NextPage;
        self
    }

    pub fn refetching(mut self) -> Self {
        self.in_flight = InFlight::Refetch;
        self
    }

    pub fn next_page_failed(mut self, err: ApiError) -> Self {
        self.in_flight = InFlight::NextPageFailed(err);
        self
    }

    /// The page after the loaded ones came back empty.
    pub fn exhausted(mut self) -> Self {
        self.in_flight = InFlight::Exhausted;
        self
    }

    pub fn client(mut self, client: PostClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Terminal size. The window is laid out for it, without prefetching.
    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn build(self) -> App {
        let client = self.client.unwrap_or_else(test_client);
        let mut app = App::new(default_for_variant(ThemeVariant::Dark), client);

        let initial = app.feed.start_initial();
        match self.outcome {
            Outcome::Pending => {}
            Outcome::Failed(err) => {
                app.feed.complete_initial(initial.generation, Err(err));
            }
            Outcome::Loaded(pages) => {
                let mut pages = pages.into_iter();
                let first = pages.next().unwrap_or_else(|| page_of(0, 0));
                app.feed.complete_initial(initial.generation, Ok(first));
                for page in pages {
                    let req = app.feed.request_next_page().unwrap();
                    app.feed
                        .complete_next_page(req.generation, req.page_index, Ok(page));
                }
            }
        }

        match self.in_flight {
            InFlight::None => {}
            InFlight::NextPage => {
                app.feed.request_next_page().unwrap();
            }
            InFlight::Refetch => {
                app.feed.start_refetch().unwrap();
            }
            InFlight::NextPageFailed(err) => {
                let req = app.feed.request_next_page().unwrap();
                app.feed
                    .complete_next_page(req.generation, req.page_index, Err(err));
            }
            InFlight::Exhausted => {
                let req = app.feed.request_next_page().unwrap();
                app.feed.complete_next_page(
                    req.generation,
                    req.page_index,
                    Ok(page_of(req.page_index, 0)),
                );
            }
        }

        if let Some((width, height)) = self.size {
            app.screen = Some(Rect::new(0, 0, width, height));
        }
        app.sync_layout();
        app
    }
}
