//! Display state machine: full, collapsed or expanded.

use std::fmt;

use crate::config::EllipsisConfig;
use crate::plan::EllipsisPlan;

/// What the caller is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The root element was clicked.
    Click,
    /// The user toggled between collapsed and expanded.
    Change(Toggle),
}

/// User-triggered transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Expand,
    Collapse,
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::Expand => f.write_str("expand"),
            Toggle::Collapse => f.write_str("collapse"),
        }
    }
}

/// Which rendering is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    /// Full content, no affordance.
    NotExceeded,
    /// Truncated candidate with an expand affordance.
    Collapsed,
    /// Full content with a collapse affordance.
    Expanded,
}

/// `exceeded` is recomputed every cycle; `expanded` only changes on toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub exceeded: bool,
    pub expanded: bool,
}

impl DisplayState {
    pub fn state(&self) -> PresenterState {
        match (self.exceeded, self.expanded) {
            (false, _) => PresenterState::NotExceeded,
            (true, false) => PresenterState::Collapsed,
            (true, true) => PresenterState::Expanded,
        }
    }

    /// Start of a new cycle: never exceeded, never expanded.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Expand from `Collapsed` or collapse from `Expanded`.
    ///
    /// Any other combination leaves the state alone and notifies nothing.
    pub fn apply(&mut self, toggle: Toggle) -> Option<Notification> {
        match (self.state(), toggle) {
            (PresenterState::Collapsed, Toggle::Expand) => self.expanded = true,
            (PresenterState::Expanded, Toggle::Collapse) => self.expanded = false,
            _ => return None,
        }
        Some(Notification::Change(toggle))
    }
}

/// One piece of the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// Interactive label; activating it applies `action`.
    Affix { label: &'a str, action: Toggle },
}

impl Segment<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Affix { label, .. } => label,
        }
    }
}

/// Snapshot of what should be on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub state: PresenterState,
    pub segments: Vec<Segment<'a>>,
}

impl View<'_> {
    /// Flattened display text.
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::as_str).collect()
    }

    /// The interactive affix, if one is shown.
    pub fn affix(&self) -> Option<Toggle> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Affix { action, .. } => Some(*action),
            Segment::Text(_) => None,
        })
    }
}

/// Lay out the segments for the current state.
pub fn view<'a>(
    display: DisplayState,
    content: &'a str,
    plan: &'a EllipsisPlan,
    config: &'a EllipsisConfig,
) -> View<'a> {
    let state = display.state();
    let mut segments = Vec::new();
    let has_affix = !config.expand_text.is_empty();

    match state {
        PresenterState::NotExceeded => {
            push_text(&mut segments, content);
        }
        PresenterState::Collapsed => {
            push_text(&mut segments, &plan.leading);
            if !plan.leading.is_empty() {
                push_text(&mut segments, &config.symbol);
            }
            if has_affix {
                segments.push(Segment::Affix {
                    label: &config.expand_text,
                    action: Toggle::Expand,
                });
            }
            if !plan.tailing.is_empty() {
                push_text(&mut segments, &config.symbol);
            }
            push_text(&mut segments, &plan.tailing);
        }
        PresenterState::Expanded => {
            push_text(&mut segments, content);
            if has_affix {
                segments.push(Segment::Affix {
                    label: &config.collapse_text,
                    action: Toggle::Collapse,
                });
            }
        }
    }

    View { state, segments }
}

fn push_text<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
}
