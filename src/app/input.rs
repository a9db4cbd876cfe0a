//! Input mode methods for App.

use tui_input::Input;

use super::{App, InputMode};

impl App {
    /// Start input mode, pre-filled with the current value.
    pub fn start_input_mode(&mut self, mode: InputMode) {
        let config = self.ellipsis.config();
        let current = match mode {
            InputMode::Content => self.ellipsis.content(),
            InputMode::Symbol => config.symbol.as_str(),
            InputMode::ExpandText => config.expand_text.as_str(),
        };
        self.input = Input::new(current.to_string());
        self.input_mode = Some(mode);
    }

    /// Cancel input mode without applying.
    pub fn cancel_input_mode(&mut self) {
        self.input_mode = None;
        self.input.reset();
    }

    /// Check if currently in input mode.
    pub fn is_input_mode(&self) -> bool {
        self.input_mode.is_some()
    }

    /// Apply the current input and restart the pipeline.
    pub fn submit_input(&mut self) {
        let Some(mode) = self.input_mode.take() else {
            return;
        };
        let value = self.input.value().to_string();
        self.input.reset();

        match mode {
            InputMode::Content => self.set_content(value),
            InputMode::Symbol => self.reconfigure(|config| config.with_symbol(value)),
            InputMode::ExpandText => self.reconfigure(|config| config.with_expand_text(value)),
        }
    }
}
