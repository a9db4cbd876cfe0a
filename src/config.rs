//! Ellipsis configuration and heuristic tunables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::EllipsisError;
use crate::units::{non_negative, px_to_number};

/// Per-class width ratios relative to font size, in `CharClass` order:
/// wide script, upper Latin, lower Latin, digit, other.
///
/// Calibrated by eye against a 14px reference font, not derived from metrics.
pub const DEFAULT_WIDTH_RATIOS: [f64; 5] = [1.0, 0.72, 0.53, 0.40, 0.75];

/// Fallback symbol width as a fraction of the wide-script width.
pub const DEFAULT_SYMBOL_RATIO: f64 = 0.7921;

/// Extra fraction of a row tolerated before content counts as overflowing.
pub const DEFAULT_ROW_BUFFER: f64 = 0.5;

/// Extra characters kept in front of the start-truncation scan window.
pub const DEFAULT_START_MARGIN: usize = 5;

/// Font size the width ratios were calibrated for.
pub const REFERENCE_FONT_SIZE: f64 = 14.0;

/// Line height used when neither the oracle nor the caller supplies one.
pub const DEFAULT_LINE_HEIGHT: f64 = 20.0;

/// Delay between recomposing a candidate and re-measuring it.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Which end(s) of the content get truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Keep the tail, truncate the beginning.
    Start,
    /// Keep the head, truncate the ending.
    #[default]
    End,
    /// Keep both ends, truncate the middle.
    Middle,
}

impl FromStr for Direction {
    type Err = EllipsisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Direction::Start),
            "end" => Ok(Direction::End),
            "middle" => Ok(Direction::Middle),
            _ => Err(EllipsisError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Start => "start",
            Direction::End => "end",
            Direction::Middle => "middle",
        };
        f.write_str(name)
    }
}

impl Direction {
    /// Next direction in `start -> end -> middle` order.
    pub fn cycle(self) -> Self {
        match self {
            Direction::Start => Direction::End,
            Direction::End => Direction::Middle,
            Direction::Middle => Direction::Start,
        }
    }
}

/// Explicit width hint for the rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Width {
    /// Let the render surface decide.
    #[default]
    Auto,
    /// Fixed width in pixels.
    Px(f64),
}

impl Width {
    /// Pixel value, if one was given.
    pub fn px(self) -> Option<f64> {
        match self {
            Width::Auto => None,
            Width::Px(px) => Some(px),
        }
    }
}

impl FromStr for Width {
    type Err = EllipsisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Width::Auto);
        }
        if !trimmed.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return Err(EllipsisError::InvalidWidth(s.to_string()));
        }
        Ok(Width::Px(px_to_number(trimmed)))
    }
}

/// Heuristic constants used while estimating cut points.
///
/// None of these are load-bearing truth: they were tuned for one reference
/// font and can be replaced when a surface behaves differently.
#[derive(Debug, Clone, PartialEq)]
pub struct Tunables {
    /// Width of each character class as a fraction of the font size.
    pub width_ratios: [f64; 5],
    /// Fallback symbol width as a fraction of the wide-script width.
    pub symbol_ratio: f64,
    /// Fractional row tolerated on top of `rows`.
    pub row_buffer: f64,
    /// Extra characters scanned in front of the start-truncation window.
    pub start_margin: usize,
    /// Font size assumed when nothing could be measured.
    pub reference_font_size: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            width_ratios: DEFAULT_WIDTH_RATIOS,
            symbol_ratio: DEFAULT_SYMBOL_RATIO,
            row_buffer: DEFAULT_ROW_BUFFER,
            start_margin: DEFAULT_START_MARGIN,
            reference_font_size: REFERENCE_FONT_SIZE,
        }
    }
}

/// Options recognised by [`crate::Ellipsis`].
///
/// Content is passed separately because it is the one input that changes
/// often; any change to either restarts the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsisConfig {
    pub direction: Direction,
    /// Row budget. Fractional values are allowed.
    pub rows: f64,
    pub expand_text: String,
    pub collapse_text: String,
    /// Truncation marker placed next to each kept slice.
    pub symbol: String,
    /// Line height used when the oracle reports none.
    pub line_height: f64,
    pub width: Width,
    pub settle_delay: Duration,
    pub tunables: Tunables,
}

impl Default for EllipsisConfig {
    fn default() -> Self {
        Self {
            direction: Direction::End,
            rows: 1.0,
            expand_text: String::new(),
            collapse_text: String::new(),
            symbol: "...".to_string(),
            line_height: DEFAULT_LINE_HEIGHT,
            width: Width::Auto,
            settle_delay: DEFAULT_SETTLE_DELAY,
            tunables: Tunables::default(),
        }
    }
}

impl EllipsisConfig {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_rows(mut self, rows: f64) -> Self {
        self.rows = non_negative(rows);
        self
    }

    /// Set rows from a string such as `"2"`; unparsable input becomes 0.
    pub fn with_rows_str(self, rows: &str) -> Self {
        self.with_rows(px_to_number(rows))
    }

    pub fn with_expand_text(mut self, text: impl Into<String>) -> Self {
        self.expand_text = text.into();
        self
    }

    pub fn with_collapse_text(mut self, text: impl Into<String>) -> Self {
        self.collapse_text = text.into();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = non_negative(line_height);
        self
    }

    /// Set the fallback line height from a pixel string such as `"20px"`.
    pub fn with_line_height_str(self, line_height: &str) -> Self {
        self.with_line_height(px_to_number(line_height))
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_tunables(mut self, tunables: Tunables) -> Self {
        self.tunables = tunables;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("start".parse::<Direction>().unwrap(), Direction::Start);
        assert_eq!("END".parse::<Direction>().unwrap(), Direction::End);
        assert_eq!(" middle ".parse::<Direction>().unwrap(), Direction::Middle);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(EllipsisError::InvalidDirection(_))
        ));
    }

    #[test]
    fn test_direction_cycle_visits_all() {
        let mut direction = Direction::Start;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(direction);
            direction = direction.cycle();
        }
        assert_eq!(direction, Direction::Start);
        assert_eq!(seen, vec![Direction::Start, Direction::End, Direction::Middle]);
    }

    #[test]
    fn test_width_from_str() {
        assert_eq!("auto".parse::<Width>().unwrap(), Width::Auto);
        assert_eq!("120".parse::<Width>().unwrap(), Width::Px(120.0));
        assert_eq!("99.5px".parse::<Width>().unwrap(), Width::Px(99.5));
        assert!("wide".parse::<Width>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = EllipsisConfig::default();
        assert_eq!(config.direction, Direction::End);
        assert_eq!(config.rows, 1.0);
        assert_eq!(config.symbol, "...");
        assert_eq!(config.line_height, 20.0);
        assert_eq!(config.width, Width::Auto);
        assert_eq!(config.tunables.width_ratios, DEFAULT_WIDTH_RATIOS);
    }

    #[test]
    fn test_tolerant_setters() {
        let config = EllipsisConfig::default()
            .with_rows_str("3")
            .with_line_height_str("normal");
        assert_eq!(config.rows, 3.0);
        assert_eq!(config.line_height, 0.0);

        let config = EllipsisConfig::default().with_rows(-2.0);
        assert_eq!(config.rows, 0.0);
    }
}
