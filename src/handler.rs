use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;
use crate::app::App;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(width, height) => debug!(width, height, "terminal resized"),
        AppEvent::Tick => app.tick(),
        AppEvent::StateChanged => app.sync(),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        KeyCode::Enter | KeyCode::Char('n') => app.request_new_fact(),

        // Only while the save control is shown
        KeyCode::Char('s') => {
            if app.state.can_save() {
                app.save_current_fact();
            }
        }

        KeyCode::Char('c') => app.cycle_category(),

        // Saved list scrolling
        KeyCode::Char('j') | KeyCode::Down => app.select_next_saved(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_saved(),

        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    let (x, y) = (mouse.column, mouse.row);

    if app.get_button_area.is_some_and(|area| point_in_rect(x, y, area)) {
        app.request_new_fact();
    } else if app.save_button_area.is_some_and(|area| point_in_rect(x, y, area)) {
        app.save_current_fact();
    }
}
