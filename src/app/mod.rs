//! Application state management.

mod controls;
mod effects;
mod input;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

use ellipsize::{Effect, Ellipsis, EllipsisConfig, EllipsisError, Generation, Notification};
use tui_input::Input;

use crate::surface::TerminalSurface;

/// Input mode for text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Replacing the content.
    Content,
    /// Replacing the truncation symbol.
    Symbol,
    /// Replacing the expand label.
    ExpandText,
}

impl InputMode {
    /// Get the placeholder text for this input mode.
    pub fn placeholder(&self) -> &'static str {
        match self {
            InputMode::Content => "Enter new content...",
            InputMode::Symbol => "Enter truncation symbol...",
            InputMode::ExpandText => "Enter expand label (empty for none)...",
        }
    }

    /// Title of the input box.
    pub fn title(&self) -> &'static str {
        match self {
            InputMode::Content => " Content ",
            InputMode::Symbol => " Symbol ",
            InputMode::ExpandText => " Expand Label ",
        }
    }
}

/// Notifications kept for the event log panel.
const NOTIFICATION_HISTORY: usize = 8;

/// Application state.
pub struct App {
    /// The truncated element being shown.
    pub ellipsis: Ellipsis,
    /// Render surface that answers measurement requests.
    pub surface: TerminalSurface,
    /// Effects waiting to be performed.
    pending: VecDeque<Effect>,
    /// Armed settle timer for the given cycle.
    settle_at: Option<(Generation, Instant)>,
    /// Most recent notifications, newest last.
    pub notifications: VecDeque<Notification>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether the help modal is shown.
    pub show_help: bool,
    /// Current input mode (if any).
    pub input_mode: Option<InputMode>,
    /// Text input buffer.
    pub input: Input,
}

impl App {
    /// Create a new App and start the first truncation cycle.
    pub fn new(content: String, config: EllipsisConfig, surface: TerminalSurface) -> Self {
        let mut ellipsis = Ellipsis::new(content, config);
        let pending = ellipsis.start().into();
        Self {
            ellipsis,
            surface,
            pending,
            settle_at: None,
            notifications: VecDeque::new(),
            should_quit: false,
            show_help: false,
            input_mode: None,
            input: Input::default(),
        }
    }

    /// Request application quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle help modal visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Close help modal.
    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    /// Whether a settle timer or measurement is still outstanding.
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty() || self.settle_at.is_some()
    }

    fn record(&mut self, notification: Notification) {
        if self.notifications.len() == NOTIFICATION_HISTORY {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }
}

/// Read content from a file, dropping one trailing newline.
pub fn read_content(path: &Path) -> Result<String, EllipsisError> {
    let mut content = std::fs::read_to_string(path)?;
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    Ok(content)
}
