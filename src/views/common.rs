use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::theme::ResolvedTheme;

/// Render an error message in a bordered block.
pub fn render_error(frame: &mut Frame, error: &str, theme: &ResolvedTheme, area: Rect) {
    let widget = Paragraph::new(error)
        .style(theme.error_style())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title("Error"),
        );
    frame.render_widget(widget, area);
}

/// Render a single line in the middle of `area`.
pub fn render_centered(frame: &mut Frame, line: Line, style: Style, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(line.centered()).style(style), row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeVariant, default_for_variant};
    use crate::views::tests::render_to_string;

    #[test]
    fn centered_line_lands_on_middle_row() {
        let theme = default_for_variant(ThemeVariant::Dark);
        let output = render_to_string(20, 5, |frame| {
            render_centered(frame, Line::from("hello"), theme.dim_style(), frame.area());
        });
        let rows: Vec<&str> = output.lines().collect();
        assert!(rows[2].contains("hello"));
        assert!(!rows[0].contains("hello"));
    }

    #[test]
    fn error_block_shows_message() {
        let theme = default_for_variant(ThemeVariant::Dark);
        let output = render_to_string(40, 5, |frame| {
            render_error(frame, "Error: boom", &theme, frame.area());
        });
        assert!(output.contains("Error: boom"));
    }
}
