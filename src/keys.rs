//! Keyboard event handlers.

use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;

use crate::app::{App, InputMode};

/// Columns added or removed per width step.
const WIDTH_STEP: isize = 2;

/// Handle key events in the main view.
pub fn handle_main_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            // Activate the expand/collapse affix
            app.toggle();
        }
        KeyCode::Char('c') => {
            app.click();
        }
        KeyCode::Char('d') | KeyCode::Tab => {
            app.cycle_direction();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.add_rows(1.0);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.add_rows(-1.0);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.resize(WIDTH_STEP);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.resize(-WIDTH_STEP);
        }
        KeyCode::Char('r') => {
            app.remeasure();
        }
        KeyCode::Char('a') => {
            app.toggle_attached();
        }
        KeyCode::Char('e') => {
            app.start_input_mode(InputMode::Content);
        }
        KeyCode::Char('s') => {
            app.start_input_mode(InputMode::Symbol);
        }
        KeyCode::Char('x') => {
            app.start_input_mode(InputMode::ExpandText);
        }
        _ => {}
    }
}

/// Handle key events in input mode.
pub fn handle_input_keys(app: &mut App, key: KeyEvent, event: &Event) {
    match key.code {
        KeyCode::Enter => {
            app.submit_input();
        }
        KeyCode::Esc => {
            app.cancel_input_mode();
        }
        _ => {
            // Pass other keys to tui-input
            app.input.handle_event(event);
        }
    }
}

/// Dispatch key event to appropriate handler based on app state.
///
/// Returns `true` if the event was fully handled (e.g., help toggle),
/// meaning the caller should `continue` the event loop.
pub fn dispatch_key_event(app: &mut App, key: KeyEvent, event: &Event) -> bool {
    // Input mode swallows every key, including `?`
    if app.is_input_mode() {
        handle_input_keys(app, key, event);
        return false;
    }

    if key.code == KeyCode::Char('?') {
        app.toggle_help();
        return true;
    }

    // If help is showing, close it and execute the command
    if app.show_help {
        if key.code == KeyCode::Esc {
            app.close_help();
            return true;
        }
        app.close_help();
    }

    handle_main_keys(app, key);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyModifiers};
    use ellipsize::{Direction, EllipsisConfig};

    use crate::surface::TerminalSurface;

    fn make_app() -> App {
        let surface = TerminalSurface::new(20, 8.0, 20.0, 14.0);
        App::new("hello".to_string(), EllipsisConfig::default(), surface)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(key.kind, KeyEventKind::Press);
        dispatch_key_event(app, key, &Event::Key(key))
    }

    #[test]
    fn test_help_toggle() {
        let mut app = make_app();
        assert!(press(&mut app, KeyCode::Char('?')));
        assert!(app.show_help);
        assert!(press(&mut app, KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_closes_and_runs_command() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.show_help);
        assert_eq!(app.ellipsis.config().direction, Direction::Middle);
    }

    #[test]
    fn test_quit() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_rows_and_width_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.ellipsis.config().rows, 2.0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.ellipsis.config().rows, 1.0);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.surface.columns, 22);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.surface.columns, 20);
    }

    #[test]
    fn test_input_mode_swallows_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.is_input_mode());

        // `q` and `?` are typed, not interpreted
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(!press(&mut app, KeyCode::Char('?')));
        assert!(!app.should_quit);
        assert!(!app.show_help);
        assert_eq!(app.input.value(), "helloq?");

        press(&mut app, KeyCode::Enter);
        assert!(!app.is_input_mode());
        assert_eq!(app.ellipsis.content(), "helloq?");
    }

    #[test]
    fn test_input_mode_escape_discards() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('!'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.is_input_mode());
        assert_eq!(app.ellipsis.config().symbol, "...");
    }
}
