//! Debug pane: feed and window state on top, newest log entries below.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    style::Style,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::feed::FeedStatus;
use crate::theme::ResolvedTheme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Debug ")
        .border_style(theme.dim_style());

    let plain = Style::new().fg(theme.foreground);
    // busy fetch line stands out
    let fetch = if app.debug.running_tasks.is_empty() {
        plain
    } else {
        Style::new().fg(theme.primary)
    };
    let mut lines = vec![
        field("feed", feed_summary(app), plain, theme),
        field("fetch", fetch_summary(app), fetch, theme),
        field("window", window_summary(app), plain, theme),
    ];
    let room = usize::from(area.height.saturating_sub(2)).saturating_sub(lines.len());
    lines.extend(
        app.debug
            .log
            .iter()
            .rev()
            .take(room)
            .map(|entry| Line::styled(format!("  {}", entry.message), theme.dim_style())),
    );

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field(name: &str, value: String, style: Style, theme: &ResolvedTheme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:>6}: "), theme.dim_style()),
        Span::styled(value, style),
    ])
}

fn feed_summary(app: &App) -> String {
    let feed = &app.feed;
    match feed.status() {
        FeedStatus::Pending => format!("pending gen={}", feed.generation()),
        FeedStatus::Error(err) => format!("failed gen={}: {err}", feed.generation()),
        FeedStatus::Success => {
            let end = if feed.next_page_error().is_some() {
                " halted"
            } else if !feed.has_next_page() {
                " at-end"
            } else {
                ""
            };
            format!(
                "posts={} pages={} gen={}{end}",
                feed.item_count(),
                feed.page_count(),
                feed.generation()
            )
        }
    }
}

/// Tasks in flight, oldest first, with their age.
fn fetch_summary(app: &App) -> String {
    if app.debug.running_tasks.is_empty() {
        return "idle".to_string();
    }
    app.debug
        .running_tasks
        .iter()
        .map(|task| format!("{} ({:.1?})", task.description, task.started_at.elapsed()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn window_summary(app: &App) -> String {
    let items = app.virtual_items();
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return format!("empty, {} slots", app.virtualizer.count());
    };
    format!(
        "slots {}..={} of {}, offset {}/{}",
        first.index,
        last.index,
        app.virtualizer.count(),
        app.scroll_offset,
        app.virtualizer.total_size()
    )
}
