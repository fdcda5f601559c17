use std::collections::VecDeque;
use std::time::Instant;

use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiError, Page, PostClient};
use crate::feed::{FeedStatus, PageRequest, PostFeed, RefetchRequest};
use crate::prefetch::{FeedSnapshot, PrefetchObserver};
use crate::theme::ResolvedTheme;
use crate::views;
use crate::virtual_list::{Align, ListVirtualizer, VirtualItem};
use crate::widgets::post_list::{LOADER_HEIGHT, WrappedCard};

/// Rows assumed for a post card before it has been laid out.
pub const TERMINAL_ESTIMATE: u32 = 6;

/// Layout/measure rounds per commit. Measuring can shift offsets, which can
/// bring new rows into the window.
const MEASURE_PASSES: usize = 3;

pub enum AsyncResult {
    Initial {
        generation: u64,
        task_id: u64,
        result: Result<Page, ApiError>,
    },
    NextPage {
        generation: u64,
        task_id: u64,
        page_index: usize,
        result: Result<Page, ApiError>,
    },
    Refetch {
        generation: u64,
        task_id: u64,
        result: Result<Vec<Page>, ApiError>,
    },
}

#[derive(Debug)]
pub struct TaskInfo {
    pub id: u64,
    pub description: String,
    pub started_at: Instant,
}

#[derive(Debug)]
pub struct LogEntry {
    pub message: String,
}

/// Debug panel state: task tracking and log messages.
#[derive(Debug, Default)]
pub struct DebugState {
    pub visible: bool,
    pub running_tasks: Vec<TaskInfo>,
    pub log: VecDeque<LogEntry>,
    next_task_id: u64,
}

impl DebugState {
    const MAX_LOG_ENTRIES: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        self.log.push_back(LogEntry {
            message: msg.into(),
        });
        if self.log.len() > Self::MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    pub fn start_task(&mut self, description: impl Into<String>) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        let desc = description.into();
        self.log(format!("Started: {}", desc));
        self.running_tasks.push(TaskInfo {
            id,
            description: desc,
            started_at: Instant::now(),
        });
        id
    }

    pub fn end_task(&mut self, id: u64, outcome: &str) {
        if let Some(pos) = self.running_tasks.iter().position(|t| t.id == id) {
            let task = self.running_tasks.remove(pos);
            let elapsed = task.started_at.elapsed();
            self.log(format!("{} {}: {:.2?}", task.description, outcome, elapsed));
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// Pending scroll request, resolved after rows near the target are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollTarget {
    Index(usize),
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ScrollLines(i32),
    NextPost,
    PrevPost,
    PageDown,
    PageUp,
    Top,
    Bottom,
    Refresh,
    ToggleHelp,
    ToggleDebug,
    Resize { width: u16, height: u16 },
    Quit,
}

pub struct App {
    pub feed: PostFeed,
    pub virtualizer: ListVirtualizer,
    pub prefetch: PrefetchObserver,
    pub scroll_offset: u64,
    pub should_quit: bool,
    pub show_help: bool,
    pub client: PostClient,
    pub theme: ResolvedTheme,
    // Async task management
    pub result_tx: mpsc::Sender<AsyncResult>,
    pub result_rx: mpsc::Receiver<AsyncResult>,
    // Debug pane
    pub debug: DebugState,
    /// Full terminal area, known after the first resize.
    pub screen: Option<Rect>,
    /// When the current fetch started, for the spinner.
    pub fetch_started: Option<Instant>,
    scroll_target: Option<ScrollTarget>,
    measured_width: Option<u16>,
    laid_out_items: usize,
}

impl App {
    pub fn new(theme: ResolvedTheme, client: PostClient) -> Self {
        let (result_tx, result_rx) = mpsc::channel(10);
        Self {
            feed: PostFeed::new(),
            virtualizer: ListVirtualizer::new(0, TERMINAL_ESTIMATE),
            prefetch: PrefetchObserver::new(),
            scroll_offset: 0,
            should_quit: false,
            show_help: false,
            client,
            theme,
            result_tx,
            result_rx,
            debug: DebugState::new(),
            screen: None,
            fetch_started: None,
            scroll_target: None,
            measured_width: None,
            laid_out_items: 0,
        }
    }

    pub fn update(&mut self, msg: Message) {
        match msg {
            Message::ScrollLines(delta) => self.scroll_by(i64::from(delta)),
            Message::NextPost => self.step_post(1),
            Message::PrevPost => self.step_post(-1),
            Message::PageDown => {
                let page = i64::from(self.list_rows().saturating_sub(1).max(1));
                self.scroll_by(page);
            }
            Message::PageUp => {
                let page = i64::from(self.list_rows().saturating_sub(1).max(1));
                self.scroll_by(-page);
            }
            Message::Top => {
                self.scroll_target = None;
                self.scroll_offset = 0;
            }
            Message::Bottom => self.scroll_target = Some(ScrollTarget::End),
            Message::Refresh => self.refresh(),
            Message::ToggleHelp => self.show_help = !self.show_help,
            Message::ToggleDebug => self.debug.toggle(),
            Message::Resize { width, height } => {
                self.screen = Some(Rect::new(0, 0, width, height));
            }
            Message::Quit => self.should_quit = true,
        }
        self.commit();
    }

    pub fn handle_async_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Initial {
                generation,
                task_id,
                result,
            } => {
                let outcome = task_outcome(&result);
                if self.feed.complete_initial(generation, result) {
                    self.debug.end_task(task_id, outcome);
                } else {
                    self.debug.end_task(task_id, "discarded (stale)");
                }
            }
            AsyncResult::NextPage {
                generation,
                task_id,
                page_index,
                result,
            } => {
                let outcome = task_outcome(&result);
                if self.feed.complete_next_page(generation, page_index, result) {
                    self.debug.end_task(task_id, outcome);
                } else {
                    self.debug.end_task(task_id, "discarded (stale)");
                }
            }
            AsyncResult::Refetch {
                generation,
                task_id,
                result,
            } => {
                let outcome = task_outcome(&result);
                if let Err(e) = &result {
                    self.debug.log(format!("Refetch failed: {}", e.user_message()));
                }
                if self.feed.complete_refetch(generation, result) {
                    self.debug.end_task(task_id, outcome);
                    self.virtualizer.reset_measurements();
                } else {
                    self.debug.end_task(task_id, "discarded (stale)");
                }
            }
        }
        if !self.feed.is_fetching() {
            self.fetch_started = None;
        }
        self.commit();
    }

    /// Applies the consequences of a state change: lays out the window and
    /// runs the prefetch check once.
    pub fn commit(&mut self) {
        self.sync_layout();
        if self.prefetch.observe(self.snapshot()) {
            self.load_next_page();
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let items = self.virtual_items();
        FeedSnapshot {
            item_count: self.feed.item_count(),
            has_next_page: self.feed.has_next_page(),
            is_fetching: self.feed.is_fetching(),
            is_fetching_next_page: self.feed.is_fetching_next_page(),
            window: items
                .first()
                .zip(items.last())
                .map(|(first, last)| (first.index, last.index)),
        }
    }

    /// Rows available to the post list.
    pub fn list_rows(&self) -> u16 {
        self.screen
            .map_or(0, |area| views::layout(area, self.debug.visible).list.height)
    }

    fn list_width(&self) -> Option<u16> {
        self.screen
            .map(|area| views::layout(area, self.debug.visible).list.width)
    }

    /// Rows laid out for the current scroll position, overscan included.
    pub fn virtual_items(&self) -> Vec<VirtualItem> {
        self.virtualizer.virtual_items(self.scroll_offset)
    }

    /// Index of the first post at least partly on screen.
    pub fn first_visible_index(&self) -> Option<usize> {
        self.virtualizer.index_at_offset(self.scroll_offset)
    }

    fn row_height(&self, index: usize, width: u16) -> u32 {
        match self.feed.get(index) {
            Some(post) => WrappedCard::new(post, width).height(),
            None => LOADER_HEIGHT,
        }
    }

    /// Syncs the virtualizer with the feed and measures the rows in the window.
    pub(crate) fn sync_layout(&mut self) {
        let slots = match self.feed.status() {
            FeedStatus::Success => self.feed.slot_count(),
            _ => 0,
        };
        self.virtualizer.set_count(slots);
        self.virtualizer.set_viewport(u32::from(self.list_rows()));

        let item_count = self.feed.item_count();
        if item_count != self.laid_out_items {
            // the sentinel slot may now hold a post, or vice versa
            self.virtualizer
                .invalidate_from(item_count.min(self.laid_out_items));
            self.laid_out_items = item_count;
        }

        let Some(width) = self.list_width() else {
            return;
        };
        if self.measured_width != Some(width) {
            self.virtualizer.reset_measurements();
            self.measured_width = Some(width);
        }

        for _ in 0..MEASURE_PASSES {
            self.apply_scroll_target();
            let pending: Vec<(usize, u32)> = self
                .virtual_items()
                .iter()
                .filter(|item| !self.virtualizer.is_measured(item.index))
                .map(|item| (item.index, self.row_height(item.index, width)))
                .collect();
            if pending.is_empty() {
                break;
            }
            self.virtualizer.measure_many(pending);
        }
        self.apply_scroll_target();
        self.scroll_target = None;
    }

    fn apply_scroll_target(&mut self) {
        self.scroll_offset = match self.scroll_target {
            Some(ScrollTarget::Index(index)) => {
                self.virtualizer.offset_for_index(index, Align::Start)
            }
            Some(ScrollTarget::End) => self.virtualizer.max_scroll_offset(),
            None => self.virtualizer.clamp_scroll_offset(self.scroll_offset),
        };
    }

    fn scroll_by(&mut self, delta: i64) {
        self.scroll_target = None;
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    fn step_post(&mut self, direction: i64) {
        let Some(current) = self.first_visible_index() else {
            return;
        };
        let starts_above = self
            .virtualizer
            .item(current)
            .is_some_and(|item| item.start < self.scroll_offset);
        let target = match direction {
            d if d > 0 => current + 1,
            _ if starts_above => current,
            _ => current.saturating_sub(1),
        };
        self.scroll_target = Some(ScrollTarget::Index(target));
    }

    fn refresh(&mut self) {
        match self.feed.status() {
            FeedStatus::Pending => {}
            FeedStatus::Error(_) => self.load_initial(),
            FeedStatus::Success if self.feed.next_page_error().is_some() => {
                self.feed.clear_next_page_error();
                self.load_next_page();
            }
            FeedStatus::Success => self.refetch(),
        }
    }

    /// Discards the feed and loads the first page.
    pub fn load_initial(&mut self) {
        let request = self.feed.start_initial();
        self.scroll_offset = 0;
        self.scroll_target = None;
        self.prefetch.reset();
        self.spawn_page_fetch(request, true);
    }

    /// Requests the next page unless one is already on its way.
    pub fn load_next_page(&mut self) {
        if let Some(request) = self.feed.request_next_page() {
            self.spawn_page_fetch(request, false);
        }
    }

    fn refetch(&mut self) {
        if let Some(request) = self.feed.start_refetch() {
            self.spawn_refetch(request);
        }
    }

    /// Spawn an async task to fetch one page.
    ///
    /// - `initial`: sends `AsyncResult::Initial`; otherwise `AsyncResult::NextPage`
    fn spawn_page_fetch(&mut self, request: PageRequest, initial: bool) {
        let client = self.client.clone();
        let tx = self.result_tx.clone();
        let PageRequest {
            generation,
            page_index,
        } = request;

        let task_desc = if initial {
            "Load first page".to_string()
        } else {
            format!("Load page {}", page_index)
        };
        let task_id = self.debug.start_task(task_desc);
        self.fetch_started = Some(Instant::now());
        debug!(page_index, generation, task_id, "dispatching page fetch");

        tokio::spawn(async move {
            let result = client.fetch_page(page_index).await;
            let msg = if initial {
                AsyncResult::Initial {
                    generation,
                    task_id,
                    result,
                }
            } else {
                AsyncResult::NextPage {
                    generation,
                    task_id,
                    page_index,
                    result,
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Spawn an async task that re-fetches every cached page in order.
    fn spawn_refetch(&mut self, request: RefetchRequest) {
        let client = self.client.clone();
        let tx = self.result_tx.clone();
        let RefetchRequest {
            generation,
            page_count,
        } = request;

        let task_id = self
            .debug
            .start_task(format!("Refetch {} pages", page_count));
        self.fetch_started = Some(Instant::now());
        debug!(page_count, generation, task_id, "dispatching refetch");

        tokio::spawn(async move {
            let result = client.fetch_pages(page_count).await;
            let _ = tx
                .send(AsyncResult::Refetch {
                    generation,
                    task_id,
                    result,
                })
                .await;
        });
    }
}

fn task_outcome<T>(result: &Result<T, ApiError>) -> &'static str {
    if result.is_ok() { "completed" } else { "failed" }
}
