use std::io::{self, Stdout, stdout};
use std::panic;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::event::Event;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switches the terminal into raw mode on the alternate screen with mouse
/// capture, and restores it if the process panics.
pub fn init() -> Result<Tui> {
    install_panic_hook();
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout())).context("Failed to create terminal")
}

pub fn restore() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen")?;
    Ok(())
}

fn install_panic_hook() {
    let original = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        original(info);
    }));
}

/// Merges terminal input with a periodic tick into one stream of [`Event`]s.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<io::Result<Event>>,
}

impl EventHandler {
    pub fn new(tick_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(Duration::from_millis(tick_ms));
            loop {
                let event = tokio::select! {
                    _ = tick.tick() => Ok(Event::Tick),
                    maybe = reader.next() => match maybe {
                        Some(Ok(raw)) => match Event::from_crossterm(raw) {
                            Some(event) => Ok(event),
                            None => continue,
                        },
                        Some(Err(e)) => Err(e),
                        None => break,
                    },
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    pub async fn next(&mut self) -> Result<Event> {
        match self.rx.recv().await {
            Some(event) => event.context("Failed to read terminal event"),
            None => Err(anyhow!("Terminal event stream closed")),
        }
    }
}
