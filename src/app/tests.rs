//! Tests for App.

use std::time::{Duration, Instant};

use super::*;
use ellipsize::{Direction, PresenterState, Toggle, Width};
use tempfile::TempDir;

fn make_config() -> EllipsisConfig {
    EllipsisConfig::default()
        .with_expand_text("more")
        .with_collapse_text("less")
        .with_settle_delay(Duration::from_millis(100))
}

fn make_app(content: &str) -> App {
    let surface = TerminalSurface::new(20, 8.0, 20.0, 14.0);
    App::new(content.to_string(), make_config(), surface)
}

/// Pump effects and fire every settle timer until the cycle is idle.
fn run_until_idle(app: &mut App) {
    let mut now = Instant::now();
    for _ in 0..1000 {
        app.pump(now);
        let Some(deadline) = app.next_deadline() else {
            break;
        };
        now = deadline;
        assert!(app.fire_due(now));
    }
    assert!(!app.is_busy());
    assert!(app.ellipsis.is_settled());
}

fn long_content() -> String {
    "Terminal cells stand in for pixels in this demo. ".repeat(4)
}

#[test]
fn test_short_content_is_not_truncated() {
    let mut app = make_app("fits easily");
    run_until_idle(&mut app);

    assert_eq!(app.ellipsis.view().state, PresenterState::NotExceeded);
    assert_eq!(app.ellipsis.view().text(), "fits easily");
    assert!(!app.has_affix());
}

#[test]
fn test_long_content_fits_row_budget() {
    let mut app = make_app(&long_content());
    run_until_idle(&mut app);

    let view = app.ellipsis.view();
    assert_eq!(view.state, PresenterState::Collapsed);
    assert_eq!(app.surface.height_px(&view.text()), 20.0);
    assert!(view.text().ends_with("...more"));
}

#[test]
fn test_settle_timer_waits_for_deadline() {
    let mut app = make_app(&long_content());
    let now = Instant::now();
    app.pump(now);

    let deadline = app.next_deadline().expect("settle should be armed");
    assert_eq!(deadline, now + Duration::from_millis(100));
    assert!(!app.fire_due(now));
    assert!(app.is_busy());
    assert!(app.fire_due(deadline));
}

#[test]
fn test_toggle_expands_and_collapses() {
    let mut app = make_app(&long_content());
    run_until_idle(&mut app);

    app.toggle();
    app.pump(Instant::now());
    assert_eq!(app.ellipsis.view().state, PresenterState::Expanded);
    assert_eq!(
        app.notifications.back(),
        Some(&Notification::Change(Toggle::Expand))
    );

    app.toggle();
    app.pump(Instant::now());
    assert_eq!(app.ellipsis.view().state, PresenterState::Collapsed);
    assert_eq!(
        app.notifications.back(),
        Some(&Notification::Change(Toggle::Collapse))
    );
}

#[test]
fn test_toggle_without_affix_does_nothing() {
    let mut app = make_app("fits easily");
    run_until_idle(&mut app);

    app.toggle();
    app.pump(Instant::now());
    assert!(app.notifications.is_empty());
}

#[test]
fn test_click_is_recorded() {
    let mut app = make_app("hello");
    app.click();
    app.pump(Instant::now());
    assert_eq!(app.notifications.back(), Some(&Notification::Click));
}

#[test]
fn test_notification_history_is_capped() {
    let mut app = make_app("hello");
    for _ in 0..(NOTIFICATION_HISTORY + 5) {
        app.click();
    }
    app.pump(Instant::now());
    assert_eq!(app.notifications.len(), NOTIFICATION_HISTORY);
}

#[test]
fn test_cycle_direction_restarts() {
    let mut app = make_app(&long_content());
    run_until_idle(&mut app);
    let generation = app.ellipsis.generation();

    app.cycle_direction();
    assert_eq!(app.ellipsis.config().direction, Direction::Middle);
    assert_ne!(app.ellipsis.generation(), generation);
    run_until_idle(&mut app);

    let plan = app.ellipsis.plan();
    assert!(!plan.leading.is_empty());
    assert!(!plan.tailing.is_empty());
}

#[test]
fn test_rows_never_below_one() {
    let mut app = make_app(&long_content());
    app.add_rows(-5.0);
    assert_eq!(app.ellipsis.config().rows, 1.0);
    app.add_rows(2.0);
    assert_eq!(app.ellipsis.config().rows, 3.0);
    run_until_idle(&mut app);

    let text = app.ellipsis.view().text();
    assert!(app.surface.height_px(&text) <= 60.0);
}

#[test]
fn test_resize_updates_width() {
    let mut app = make_app(&long_content());
    app.resize(10);
    assert_eq!(app.surface.columns, 30);
    assert_eq!(app.ellipsis.config().width, Width::Px(240.0));
    run_until_idle(&mut app);
    assert_eq!(app.ellipsis.view().state, PresenterState::Collapsed);
}

#[test]
fn test_detached_surface_shows_full_content() {
    let content = long_content();
    let mut app = make_app(&content);
    app.toggle_attached();
    run_until_idle(&mut app);

    assert_eq!(app.ellipsis.view().state, PresenterState::NotExceeded);
    assert_eq!(app.ellipsis.view().text(), content);
}

#[test]
fn test_stale_effects_after_content_change() {
    let mut app = make_app(&long_content());
    // Content replaced before the first cycle ran: its queued effects go stale
    app.set_content("short".to_string());
    run_until_idle(&mut app);

    assert_eq!(app.ellipsis.view().state, PresenterState::NotExceeded);
    assert_eq!(app.ellipsis.view().text(), "short");
}

#[test]
fn test_input_mode_content() {
    let mut app = make_app("hello");
    app.start_input_mode(InputMode::Content);
    assert!(app.is_input_mode());
    assert_eq!(app.input.value(), "hello");

    app.input = tui_input::Input::new(long_content());
    app.submit_input();
    assert!(!app.is_input_mode());
    assert_eq!(app.ellipsis.content(), long_content());
    run_until_idle(&mut app);
    assert_eq!(app.ellipsis.view().state, PresenterState::Collapsed);
}

#[test]
fn test_input_mode_symbol_and_cancel() {
    let mut app = make_app("hello");
    app.start_input_mode(InputMode::Symbol);
    assert_eq!(app.input.value(), "...");
    app.input = tui_input::Input::new("…".to_string());
    app.submit_input();
    assert_eq!(app.ellipsis.config().symbol, "…");

    app.start_input_mode(InputMode::ExpandText);
    app.cancel_input_mode();
    assert!(!app.is_input_mode());
    assert_eq!(app.ellipsis.config().expand_text, "more");
}

#[test]
fn test_read_content_trims_one_newline() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("content.txt");
    std::fs::write(&path, "first line\nsecond line\n\n").unwrap();

    let content = read_content(&path).unwrap();
    assert_eq!(content, "first line\nsecond line\n");
}

#[test]
fn test_read_content_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = read_content(&temp.path().join("missing.txt"));
    assert!(matches!(result, Err(EllipsisError::Io(_))));
}
