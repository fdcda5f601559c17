use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Terminal input the app reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Positive scrolls toward the end of the feed.
    Scroll(i32),
    Resize(u16, u16),
    Tick,
}

/// Lines moved per mouse wheel notch.
pub const WHEEL_LINES: i32 = 3;

impl Event {
    /// Maps a raw crossterm event, dropping the ones the app ignores.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(Event::Key(key))
            }
            crossterm::event::Event::Mouse(MouseEvent { kind, .. }) => match kind {
                MouseEventKind::ScrollDown => Some(Event::Scroll(WHEEL_LINES)),
                MouseEventKind::ScrollUp => Some(Event::Scroll(-WHEEL_LINES)),
                _ => None,
            },
            crossterm::event::Event::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }
}
