use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind, MouseEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use numfacts_core::AppState;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

/// Spinner frame rate.
const TICK_RATE: Duration = Duration::from_millis(120);

type EventSender = mpsc::UnboundedSender<AppEvent>;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    /// The store published a new state
    StateChanged,
}

impl AppEvent {
    /// Map a terminal event to an app event. Key releases and repeats are dropped.
    fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            Event::Mouse(mouse) => Some(Self::Mouse(mouse)),
            Event::Resize(width, height) => Some(Self::Resize(width, height)),
            _ => None,
        }
    }
}

/// Merges terminal input, spinner ticks and store updates into one queue.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(updates: watch::Receiver<AppState>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(forward_terminal_events(tx.clone()));
        tokio::spawn(forward_ticks(tx.clone()));
        tokio::spawn(forward_state_changes(updates, tx));

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

async fn forward_terminal_events(tx: EventSender) {
    let mut stream = EventStream::new();
    while let Some(event) = stream.next().await {
        let event = match event {
            Ok(event) => AppEvent::from_terminal(event),
            Err(err) => {
                warn!(%err, "terminal event stream error");
                None
            }
        };
        if let Some(event) = event {
            if tx.send(event).is_err() {
                break;
            }
        }
    }
    debug!("terminal event stream closed");
}

async fn forward_ticks(tx: EventSender) {
    let mut interval = tokio::time::interval(TICK_RATE);
    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick).is_err() {
            break;
        }
    }
}

async fn forward_state_changes(mut updates: watch::Receiver<AppState>, tx: EventSender) {
    while updates.changed().await.is_ok() {
        if tx.send(AppEvent::StateChanged).is_err() {
            break;
        }
    }
}

/// Raw mode, alternate screen and mouse reporting (the buttons are clickable).
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stderr()))?)
}

pub fn restore() -> Result<()> {
    execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Put the terminal back before the default hook prints the panic message.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        default_hook(info);
    }));
}
