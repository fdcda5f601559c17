//! Status-bar hints generated from the keymap, so they never drift from the
//! bindings. Which hints show depends on where the feed is.

use crate::app::Message::{self, *};
use crate::feed::{FeedStatus, PostFeed};
use crate::keys::{Keymap, format_key};

/// Actions sharing one label. Their keys are joined with "/".
type Hint = (&'static [Message], &'static str);

const BROWSE: &[Hint] = &[
    (&[NextPost, PrevPost], "post"),
    (&[Refresh], "refresh"),
    (&[ToggleHelp], "help"),
    (&[Quit], "quit"),
];

const BROWSE_ALL: &[Hint] = &[
    (&[NextPost, PrevPost], "post"),
    (&[PageDown, PageUp], "page"),
    (&[Top, Bottom], "top/bottom"),
    (&[Refresh], "refresh"),
    (&[ToggleDebug], "debug"),
    (&[Quit], "quit"),
    (&[ToggleHelp], "hide"),
];

// r retries the failed page instead of refreshing
const HALTED: &[Hint] = &[
    (&[NextPost, PrevPost], "post"),
    (&[Refresh], "retry page"),
    (&[ToggleHelp], "help"),
    (&[Quit], "quit"),
];

const HALTED_ALL: &[Hint] = &[
    (&[NextPost, PrevPost], "post"),
    (&[PageDown, PageUp], "page"),
    (&[Top, Bottom], "top/bottom"),
    (&[Refresh], "retry page"),
    (&[ToggleDebug], "debug"),
    (&[Quit], "quit"),
    (&[ToggleHelp], "hide"),
];

const FAILED: &[Hint] = &[(&[Refresh], "retry"), (&[Quit], "quit")];

/// What the status bar offers, derived from the feed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpContext {
    /// Loaded and paginating (or at the end).
    Browse,
    /// Loaded, but the last next-page fetch failed.
    Halted,
    /// The first page failed. Only retrying makes sense.
    Failed,
}

impl HelpContext {
    pub fn for_feed(feed: &PostFeed) -> Self {
        match feed.status() {
            FeedStatus::Error(_) => Self::Failed,
            _ if feed.next_page_error().is_some() => Self::Halted,
            _ => Self::Browse,
        }
    }

    fn hints(self, expanded: bool) -> &'static [Hint] {
        match (self, expanded) {
            (Self::Browse, false) => BROWSE,
            (Self::Browse, true) => BROWSE_ALL,
            (Self::Halted, false) => HALTED,
            (Self::Halted, true) => HALTED_ALL,
            (Self::Failed, _) => FAILED,
        }
    }
}

fn format_hint(keymap: &Keymap, (messages, label): &Hint) -> Option<String> {
    let keys: Vec<String> = messages
        .iter()
        .filter_map(|msg| keymap.find_key(msg))
        .map(|(code, mods)| format_key(code, mods))
        .collect();
    (!keys.is_empty()).then(|| format!("{}:{}", keys.join("/"), label))
}

/// Hint line for `context`. Hints with no bound key are left out.
pub fn help_text(keymap: &Keymap, context: HelpContext, expanded: bool) -> String {
    context
        .hints(expanded)
        .iter()
        .filter_map(|hint| format_hint(keymap, hint))
        .collect::<Vec<_>>()
        .join("  ")
}
