use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::AppLayout;
use super::common::{render_centered, render_error};
use super::spinner::spinner_frame;
use super::status_bar;
use crate::app::App;
use crate::feed::FeedStatus;
use crate::widgets::post_list::{PostList, PostListRow, WrappedCard, loader_lines};

pub fn render(frame: &mut Frame, app: &App, layout: &AppLayout) {
    match app.feed.status() {
        FeedStatus::Pending => render_loading(frame, app, layout.main()),
        FeedStatus::Error(err) => {
            let message = format!("Error: {}", err.user_message());
            render_error(frame, &message, &app.theme, layout.list);
            status_bar::render(frame, app, layout.status);
        }
        FeedStatus::Success => {
            render_post_list(frame, app, layout.list);
            if app.feed.is_refetching() {
                render_updating_badge(frame, app, layout.list);
            }
            status_bar::render(frame, app, layout.status);
        }
    }
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(spinner_frame(app.fetch_started), app.theme.spinner_style()),
        Span::raw(" Loading..."),
    ]);
    render_centered(frame, line, app.theme.dim_style(), area);
}

fn render_post_list(frame: &mut Frame, app: &App, area: Rect) {
    let posts = app.feed.items();
    let rows = app
        .virtual_items()
        .into_iter()
        .map(|item| {
            let lines = match posts.get(item.index) {
                Some(post) => WrappedCard::new(post, area.width).into_lines(&app.theme),
                None => loader_lines(sentinel_line(app)),
            };
            PostListRow::new(item, lines)
        })
        .collect();
    frame.render_widget(PostList::new(rows, app.scroll_offset), area);
}

/// Message shown in the slot after the last post.
fn sentinel_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    if let Some(err) = app.feed.next_page_error() {
        return Line::from(vec![
            Span::styled(format!("Error: {}", err.user_message()), theme.error_style()),
            Span::styled(" (press r to retry)", theme.dim_style()),
        ]);
    }
    if !app.feed.has_next_page() {
        return Line::styled("No more posts", theme.dim_style());
    }
    if app.feed.is_fetching_next_page() {
        return Line::from(vec![
            Span::styled(spinner_frame(app.fetch_started), theme.spinner_style()),
            Span::styled(" Loading more...", theme.dim_style()),
        ]);
    }
    Line::styled("Loading more...", theme.dim_style())
}

fn render_updating_badge(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(" {} Updating... ", spinner_frame(app.fetch_started));
    let width = (text.width() as u16).min(area.width);
    if width == 0 || area.height < 2 {
        return;
    }
    let badge = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.bottom() - 2,
        width,
        height: 1,
    };
    frame.render_widget(Clear, badge);
    frame.render_widget(
        Paragraph::new(text).style(app.theme.badge_style()),
        badge,
    );
}
