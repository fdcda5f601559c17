//! Virtualized list of post cards.
//!
//! Only the rows the virtualizer hands out are built and drawn. Each row is
//! placed at its own offset relative to the scroll position, so rows cut off
//! by either edge of the viewport are drawn partially instead of skipped.

use std::borrow::Cow;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::api::Post;
use crate::theme::ResolvedTheme;
use crate::virtual_list::VirtualItem;

/// Columns of indentation on each side of a card.
pub const CARD_PADDING: u16 = 2;

/// Height of the sentinel row: a blank line on each side of its message.
pub const LOADER_HEIGHT: u32 = 3;

/// A post card wrapped to a given width.
///
/// The same wrapping is used for measuring and for drawing, so the height a
/// row is measured at is always the number of lines it draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedCard {
    pub title: Vec<String>,
    pub body: Vec<String>,
    pub meta: String,
    rule_width: usize,
}

impl WrappedCard {
    pub fn new(post: &Post, width: u16) -> Self {
        let wrap_width = usize::from(width.saturating_sub(2 * CARD_PADDING)).max(1);
        Self {
            title: wrap(&post.title, wrap_width),
            body: wrap(&post.body, wrap_width),
            meta: post.byline(),
            rule_width: wrap_width,
        }
    }

    /// Title lines, body lines, byline and a separator rule.
    pub fn height(&self) -> u32 {
        (self.title.len() + self.body.len() + 2) as u32
    }

    pub fn into_lines(self, theme: &ResolvedTheme) -> Vec<Line<'static>> {
        let indent = " ".repeat(usize::from(CARD_PADDING));
        let mut lines = Vec::with_capacity(self.height() as usize);
        for title in self.title {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(title, theme.title_style()),
            ]));
        }
        for body in self.body {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(body, theme.body_style()),
            ]));
        }
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(self.meta, theme.meta_style()),
        ]));
        lines.push(Line::from(vec![
            Span::raw(indent),
            Span::styled("─".repeat(self.rule_width), theme.border_style()),
        ]));
        lines
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Lines of the sentinel row for the given message.
pub fn loader_lines(message: Line<'static>) -> Vec<Line<'static>> {
    vec![Line::default(), message.centered(), Line::default()]
}

/// One laid-out row: where it starts and what it draws.
pub struct PostListRow {
    start: u64,
    lines: Vec<Line<'static>>,
}

impl PostListRow {
    pub fn new(item: VirtualItem, lines: Vec<Line<'static>>) -> Self {
        Self {
            start: item.start,
            lines,
        }
    }
}

pub struct PostList {
    rows: Vec<PostListRow>,
    scroll_offset: u64,
}

impl PostList {
    pub fn new(rows: Vec<PostListRow>, scroll_offset: u64) -> Self {
        Self {
            rows,
            scroll_offset,
        }
    }
}

impl Widget for PostList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let top = self.scroll_offset;
        let bottom = top + u64::from(area.height);

        for row in self.rows {
            for (i, line) in row.lines.into_iter().enumerate() {
                let offset = row.start + i as u64;
                if offset < top || offset >= bottom {
                    continue;
                }
                let y = area.top() + (offset - top) as u16;
                line.render(Rect::new(area.left(), y, area.width, 1), buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::PostBuilder;
    use crate::theme::{ThemeVariant, default_for_variant};

    fn buffer_text(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn rows_of(lines: &[&str], starts: &[u64]) -> Vec<PostListRow> {
        starts
            .iter()
            .enumerate()
            .map(|(index, &start)| PostListRow {
                start,
                lines: lines
                    .iter()
                    .map(|text| Line::from(format!("{index}:{text}")))
                    .collect(),
            })
            .collect()
    }

    #[test]
    fn card_height_matches_drawn_lines() {
        let theme = default_for_variant(ThemeVariant::Dark);
        let post = PostBuilder::new()
            .title("a title that is long enough to wrap on a narrow terminal")
            .body("line one\nline two is a little longer than the first")
            .build();
        for width in [12, 30, 80] {
            let card = WrappedCard::new(&post, width);
            let height = card.height();
            assert_eq!(card.into_lines(&theme).len() as u32, height);
        }
    }

    #[test]
    fn narrow_width_wraps_into_more_lines() {
        let post = PostBuilder::new()
            .body("the quick brown fox jumps over the lazy dog")
            .build();
        let wide = WrappedCard::new(&post, 80);
        let narrow = WrappedCard::new(&post, 16);
        assert_eq!(wide.body.len(), 1);
        assert!(narrow.body.len() > 1);
        assert!(narrow.body.iter().all(|line| line.len() <= 12));
    }

    #[test]
    fn card_keeps_body_line_breaks() {
        let post = PostBuilder::new().title("t").body("one\ntwo\nthree").build();
        let card = WrappedCard::new(&post, 80);
        assert_eq!(card.body, vec!["one", "two", "three"]);
        assert_eq!(card.height(), 6);
    }

    #[test]
    fn loader_is_fixed_height() {
        let lines = loader_lines(Line::from("Loading more..."));
        assert_eq!(lines.len() as u32, LOADER_HEIGHT);
    }

    #[test]
    fn rows_are_placed_relative_to_scroll() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        PostList::new(rows_of(&["a", "b", "c"], &[0, 3, 6]), 2).render(area, &mut buf);
        assert_eq!(buffer_text(&buf), vec!["0:c", "1:a", "1:b", "1:c"]);
    }

    #[test]
    fn rows_outside_viewport_are_clipped() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        PostList::new(rows_of(&["a", "b", "c"], &[0, 3]), 4).render(area, &mut buf);
        assert_eq!(buffer_text(&buf), vec!["1:b", "1:c"]);
    }
}
