use anyhow::Result;
use numfacts_core::Config;
use tracing::{info, warn};

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = logging::init(&logging::log_dir())?;
    info!(path = %log_path.display(), "logging initialised");

    let config_path = match Config::default_path() {
        Ok(path) => Some(path),
        Err(err) => {
            warn!(%err, "no config directory; settings will not be saved");
            None
        }
    };
    let config = config_path
        .as_deref()
        .map(|path| {
            Config::load_from(path).unwrap_or_else(|err| {
                warn!(%err, path = %path.display(), "could not read config, using defaults");
                Config::new()
            })
        })
        .unwrap_or_else(Config::new);

    let mut app = App::new(config, config_path);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(app.subscribe());

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    info!(saved = app.state.saved_count(), "session ended");
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }
    }
    Ok(())
}
