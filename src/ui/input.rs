use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::router::Route;
use crate::ui::app::App;
use crate::ui::home::HomeIntent;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    match app.route() {
        Route::Home => handle_home_key(app, key),
        Route::User { .. } => handle_user_key(app, key),
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    let intent = match key.code {
        KeyCode::Enter => HomeIntent::Submit,
        KeyCode::Esc => HomeIntent::Clear,
        KeyCode::Backspace => HomeIntent::Backspace,
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            HomeIntent::Insert(ch)
        }
        _ => return,
    };
    app.dispatch_home(intent);
}

fn handle_user_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => app.go_home(),
        KeyCode::Char('r') if key.modifiers.is_empty() => app.refetch(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
