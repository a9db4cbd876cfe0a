//! User controls for App.

use ellipsize::{EllipsisConfig, Event, Toggle, Width};

use super::App;

/// Smallest row budget the controls allow.
const MIN_ROWS: f64 = 1.0;

impl App {
    /// Activate the affix: expand when collapsed, collapse when expanded.
    pub fn toggle(&mut self) {
        let Some(action) = self.ellipsis.view().affix() else {
            return;
        };
        let event = match action {
            Toggle::Expand => Event::Expand,
            Toggle::Collapse => Event::Collapse,
        };
        self.send(event);
    }

    /// Click anywhere on the text.
    pub fn click(&mut self) {
        self.send(Event::Click);
    }

    /// Switch to the next truncation direction.
    pub fn cycle_direction(&mut self) {
        let direction = self.ellipsis.config().direction.cycle();
        self.reconfigure(|config| config.with_direction(direction));
    }

    /// Change the row budget by `delta`.
    pub fn add_rows(&mut self, delta: f64) {
        let rows = (self.ellipsis.config().rows + delta).max(MIN_ROWS);
        self.reconfigure(|config| config.with_rows(rows));
    }

    /// Change the box width by `delta` columns.
    pub fn resize(&mut self, delta: isize) {
        let before = self.surface.columns;
        self.surface.resize(delta);
        if self.surface.columns != before {
            let width = Width::Px(self.surface.width_px());
            self.reconfigure(|config| config.with_width(width));
        }
    }

    /// Attach or detach the surface, then measure again.
    pub fn toggle_attached(&mut self) {
        self.surface.attached = !self.surface.attached;
        self.remeasure();
    }

    /// Restart the pipeline with unchanged inputs.
    pub fn remeasure(&mut self) {
        self.settle_at = None;
        let effects = self.ellipsis.start();
        self.pending.extend(effects);
    }

    /// Replace the content and restart the pipeline.
    pub fn set_content(&mut self, content: String) {
        self.settle_at = None;
        self.send(Event::ContentChanged(content));
    }

    /// Whether an expand or collapse affordance is shown.
    pub fn has_affix(&self) -> bool {
        self.ellipsis.view().affix().is_some()
    }

    pub(super) fn reconfigure(&mut self, change: impl FnOnce(EllipsisConfig) -> EllipsisConfig) {
        let config = change(self.ellipsis.config().clone());
        self.settle_at = None;
        self.send(Event::ConfigChanged(config));
    }
}
