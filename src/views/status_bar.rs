//! The one-line bar under the feed.
//!
//! Layout: `[Posts] fetch state | position | hints`. Every segment is read
//! off the app, so the feed and the error screen share one renderer.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::spinner::spinner_frame;
use crate::app::App;
use crate::feed::FeedStatus;
use crate::help::{HelpContext, help_text};
use crate::keys::keymap;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(Paragraph::new(status_line(app)), area);
}

pub fn status_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled(" Posts ", theme.status_bar_style()),
        Span::raw(" "),
    ];
    for segment in [fetch_segment(app), position_segment(app)]
        .into_iter()
        .flatten()
    {
        spans.push(segment);
        spans.push(Span::raw(" | "));
    }
    let hints = help_text(&keymap(), HelpContext::for_feed(&app.feed), app.show_help);
    spans.push(Span::styled(hints, theme.dim_style()));
    Line::from(spans)
}

/// What the feed is doing, or why it stopped.
fn fetch_segment(app: &App) -> Option<Span<'static>> {
    let feed = &app.feed;
    let theme = &app.theme;
    if *feed.status() != FeedStatus::Success {
        return None;
    }
    let spinner = spinner_frame(app.fetch_started);
    let next_page = feed.page_count() + 1;
    if feed.is_fetching_next_page() {
        let text = format!("{spinner} Loading page {next_page}...");
        return Some(Span::styled(text, theme.spinner_style()));
    }
    if feed.is_refetching() {
        let pages = feed.page_count();
        let text = format!("{spinner} Refreshing {pages} {}...", plural(pages, "page"));
        return Some(Span::styled(text, theme.spinner_style()));
    }
    if feed.next_page_error().is_some() {
        return Some(Span::styled(
            format!("Page {next_page} failed"),
            theme.error_style(),
        ));
    }
    if !feed.has_next_page() {
        return Some(Span::styled("End of feed", theme.dim_style()));
    }
    None
}

/// `current/total` for the first post on screen.
fn position_segment(app: &App) -> Option<Span<'static>> {
    let total = app.feed.item_count();
    let first = app.first_visible_index().filter(|&i| i < total)?;
    Some(Span::styled(
        format!("{}/{}", first + 1, total),
        app.theme.dim_style(),
    ))
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
