pub mod common;
pub mod debug;
pub mod feed;
pub mod spinner;
pub mod status_bar;


use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use crate::app::App;

/// Rows taken by the debug pane when it is visible.
pub const DEBUG_PANE_HEIGHT: u16 = 10;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub list: Rect,
    pub status: Rect,
    pub debug: Option<Rect>,
}

impl AppLayout {
    /// The list and status bar together.
    pub fn main(&self) -> Rect {
        self.list.union(self.status)
    }
}

/// Splits the screen. The app sizes its virtual window from the same split
/// the renderer draws into.
pub fn layout(area: Rect, debug_visible: bool) -> AppLayout {
    let (main_area, debug) = if debug_visible {
        let [main, debug] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(DEBUG_PANE_HEIGHT)])
                .areas(area);
        (main, Some(debug))
    } else {
        (area, None)
    };
    let [list, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(main_area);
    AppLayout {
        list,
        status,
        debug,
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let layout = layout(frame.area(), app.debug.visible);

    feed::render(frame, app, &layout);

    if let Some(debug_area) = layout.debug {
        debug::render(frame, app, debug_area);
    }
}
