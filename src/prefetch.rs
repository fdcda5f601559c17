//! Scroll-driven prefetch of the next feed page.
//!
//! The observer is handed a snapshot of the feed and the laid-out window
//! after every committed state change. It evaluates the trigger only when the
//! snapshot differs from the last one it saw, so repeated commits with
//! nothing new never re-fire.

/// What the prefetch decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub item_count: usize,
    pub has_next_page: bool,
    /// Any fetch in flight. A next-page request is refused while one runs,
    /// so the trigger has to be evaluated again once it settles.
    pub is_fetching: bool,
    pub is_fetching_next_page: bool,
    /// First and last laid-out row index, overscan included.
    pub window: Option<(usize, usize)>,
}

/// True when the last laid-out row reaches the end of the loaded posts and
/// another page may be requested.
pub fn should_fetch_next(snapshot: &FeedSnapshot) -> bool {
    let Some((_, last_index)) = snapshot.window else {
        return false;
    };
    last_index + 1 >= snapshot.item_count
        && snapshot.has_next_page
        && !snapshot.is_fetching_next_page
}

#[derive(Debug, Default)]
pub struct PrefetchObserver {
    last_seen: Option<FeedSnapshot>,
}

impl PrefetchObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot` and reports whether the next page should be
    /// requested. Unchanged snapshots always report false.
    pub fn observe(&mut self, snapshot: FeedSnapshot) -> bool {
        if self.last_seen == Some(snapshot) {
            return false;
        }
        self.last_seen = Some(snapshot);
        should_fetch_next(&snapshot)
    }

    /// Forgets the last snapshot so the next observation is evaluated.
    pub fn reset(&mut self) {
        self.last_seen = None;
    }
}
