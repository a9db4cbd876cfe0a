//! Overflow detection and the initial truncation guess.

use log::debug;

use crate::boundary::{Scan, locate, slice};
use crate::config::{DEFAULT_LINE_HEIGHT, Direction, EllipsisConfig};
use crate::measure::MeasurementResult;
use crate::width::WidthTable;

/// Slices of the content kept around the truncation symbol.
///
/// `End` plans only ever fill `leading`, `Start` plans only `tailing`.
/// `Middle` plans may fill both; the two never share a source character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EllipsisPlan {
    pub leading: String,
    pub tailing: String,
}

impl EllipsisPlan {
    /// Build the display string: leading, symbol, affix, symbol, tailing.
    /// Each symbol only appears next to a non-empty slice.
    pub fn compose(&self, symbol: &str, affix: &str) -> String {
        let mut out = String::with_capacity(
            self.leading.len() + self.tailing.len() + affix.len() + 2 * symbol.len(),
        );
        out.push_str(&self.leading);
        if !self.leading.is_empty() {
            out.push_str(symbol);
        }
        out.push_str(affix);
        if !self.tailing.is_empty() {
            out.push_str(symbol);
        }
        out.push_str(&self.tailing);
        out
    }

    /// Number of content characters kept.
    pub fn kept_chars(&self) -> usize {
        self.leading.chars().count() + self.tailing.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.tailing.is_empty()
    }
}

/// Numbers resolved from the root measurement, fixed for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub container_width: f64,
    pub line_height: f64,
    /// Tallest rendered height that still counts as fitting.
    pub max_height: f64,
    /// Height of the full content as measured on the root.
    pub origin_height: f64,
    pub table: WidthTable,
    pub symbol_width: f64,
}

impl Metrics {
    /// Resolve metrics from a root measurement.
    ///
    /// `symbol_measured` is the rendered width of the symbol text, if the
    /// surface reported one.
    pub fn resolve(
        root: &MeasurementResult,
        config: &EllipsisConfig,
        symbol_measured: Option<f64>,
    ) -> Self {
        let root = root.sanitized();
        let line_height = root
            .line_height
            .or(Some(config.line_height).filter(|lh| *lh > 0.0))
            .unwrap_or(DEFAULT_LINE_HEIGHT);
        let container_width = if root.width > 0.0 {
            root.width
        } else {
            config.width.px().unwrap_or(0.0)
        };
        let font_size = if root.font_size > 0.0 {
            root.font_size
        } else {
            config.tunables.reference_font_size
        };
        let table = WidthTable::for_font_size(font_size, &config.tunables);

        Self {
            container_width,
            line_height,
            max_height: max_height(
                line_height,
                config.rows,
                config.tunables.row_buffer,
                root.padding_top + root.padding_bottom,
            ),
            origin_height: root.height,
            table,
            symbol_width: table.symbol_width(symbol_measured, &config.tunables),
        }
    }

    /// Whether a rendered height overflows the row budget.
    pub fn exceeds(&self, height: f64) -> bool {
        height > self.max_height
    }
}

/// `floor(line_height * (rows + row_buffer) + padding)`.
pub fn max_height(line_height: f64, rows: f64, row_buffer: f64, padding: f64) -> f64 {
    (line_height * (rows + row_buffer) + padding).floor()
}

/// Average characters per rendered line, inferred from an overflowing render.
///
/// Falls back to the whole content length when fewer than two lines were
/// observed.
pub fn chars_per_unit(content_len: usize, origin_height: f64, line_height: f64) -> usize {
    let lines_beyond_first = origin_height / line_height - 1.0;
    if !lines_beyond_first.is_finite() || lines_beyond_first <= 0.0 {
        return content_len;
    }
    (content_len as f64 / lines_beyond_first).floor() as usize
}

/// Compute the initial plan for content that is known to overflow.
pub fn plan(chars: &[char], metrics: &Metrics, config: &EllipsisConfig) -> EllipsisPlan {
    let len = chars.len();
    let rows = config.rows;
    let per_unit = chars_per_unit(len, metrics.origin_height, metrics.line_height);
    let window = ((per_unit as f64) * (rows + config.tunables.row_buffer)).floor();
    let window = if window.is_finite() && window > 0.0 {
        (window as usize).min(len)
    } else {
        0
    };

    let content_width = metrics.container_width * rows - metrics.symbol_width;
    let table = &metrics.table;

    let plan = match config.direction {
        Direction::End => {
            let kept = locate(chars, 0..window, Scan::Forward, content_width, table);
            EllipsisPlan {
                leading: slice(chars, kept),
                tailing: String::new(),
            }
        }
        Direction::Start => {
            let start = len.saturating_sub(window + config.tunables.start_margin);
            let kept = locate(chars, start..len, Scan::Backward, content_width, table);
            EllipsisPlan {
                leading: String::new(),
                tailing: slice(chars, kept),
            }
        }
        Direction::Middle => {
            let half = content_width / 2.0;
            let head = locate(chars, 0..window, Scan::Forward, half, table);
            let tail_start = len.saturating_sub(window).max(head.end);
            let tail = locate(chars, tail_start..len, Scan::Backward, half, table);
            EllipsisPlan {
                leading: slice(chars, head),
                tailing: slice(chars, tail),
            }
        }
    };

    debug!(
        "planned {} truncation: {per_unit} chars/line, window {window}, budget {content_width:.1}px, kept {}",
        config.direction,
        plan.kept_chars()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Width;

    fn root(width: f64, height: f64) -> MeasurementResult {
        MeasurementResult {
            width,
            height,
            line_height: Some(20.0),
            padding_top: 0.0,
            padding_bottom: 0.0,
            font_size: 14.0,
        }
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_compose() {
        let plan = EllipsisPlan {
            leading: "abc".to_string(),
            tailing: String::new(),
        };
        assert_eq!(plan.compose("...", "more"), "abc...more");

        let plan = EllipsisPlan {
            leading: String::new(),
            tailing: "xyz".to_string(),
        };
        assert_eq!(plan.compose("...", ""), "...xyz");

        let plan = EllipsisPlan {
            leading: "ab".to_string(),
            tailing: "yz".to_string(),
        };
        assert_eq!(plan.compose("…", "+"), "ab…+…yz");
        assert_eq!(EllipsisPlan::default().compose("...", "more"), "more");
    }

    #[test]
    fn test_max_height() {
        // 20 * 1.5 + 3 + 2 = 35
        assert_eq!(max_height(20.0, 1.0, 0.5, 5.0), 35.0);
        // 17 * 2.5 = 42.5 -> 42
        assert_eq!(max_height(17.0, 2.0, 0.5, 0.0), 42.0);
    }

    #[test]
    fn test_chars_per_unit() {
        // 6 lines observed -> 5 lines beyond the first
        assert_eq!(chars_per_unit(50, 120.0, 20.0), 10);
        assert_eq!(chars_per_unit(50, 20.0, 20.0), 50);
        assert_eq!(chars_per_unit(50, 0.0, 20.0), 50);
        assert_eq!(chars_per_unit(50, 100.0, 0.0), 50);
    }

    #[test]
    fn test_metrics_fallbacks() {
        let config = EllipsisConfig::default().with_width(Width::Px(200.0));
        let measured = MeasurementResult {
            width: 0.0,
            height: 80.0,
            line_height: None,
            padding_top: 1.0,
            padding_bottom: 1.0,
            font_size: 0.0,
        };
        let metrics = Metrics::resolve(&measured, &config, None);
        assert_eq!(metrics.container_width, 200.0);
        assert_eq!(metrics.line_height, 20.0);
        assert_eq!(metrics.max_height, 32.0);
        assert_eq!(metrics.symbol_width, 12.0);
        assert!(metrics.exceeds(33.0));
        assert!(!metrics.exceeds(32.0));
    }

    #[test]
    fn test_plan_end_only_leading() {
        let config = EllipsisConfig::default();
        let content = chars(&"A".repeat(50));
        let metrics = Metrics::resolve(&root(100.0, 120.0), &config, None);
        let plan = plan(&content, &metrics, &config);
        assert!(plan.tailing.is_empty());
        // budget 100 - 12 = 88; 9 * 10.08 crosses it, so 8 are kept
        assert_eq!(plan.leading, "A".repeat(8));
    }

    #[test]
    fn test_plan_start_only_tailing() {
        let config = EllipsisConfig::default().with_direction(Direction::Start);
        let content = chars(&format!("{}{}", "a".repeat(40), "Z".repeat(10)));
        let metrics = Metrics::resolve(&root(100.0, 120.0), &config, None);
        let plan = plan(&content, &metrics, &config);
        assert!(plan.leading.is_empty());
        assert!(!plan.tailing.is_empty());
        assert!(plan.tailing.ends_with('Z'));
    }

    #[test]
    fn test_plan_start_window_includes_margin() {
        let config = EllipsisConfig::default().with_direction(Direction::Start);
        let text = "ab".repeat(25);
        let content = chars(&text);
        // 50 chars over 5 extra lines: 10 per line, window floor(10 * 1.5) = 15.
        // The budget covers far more than that, so the whole widened range is kept.
        let metrics = Metrics::resolve(&root(1000.0, 120.0), &config, None);
        let plan = plan(&content, &metrics, &config);
        assert!(plan.leading.is_empty());
        assert_eq!(plan.tailing.chars().count(), 15 + 5);
        assert_eq!(plan.tailing, text[30..]);
    }

    #[test]
    fn test_plan_middle_halves_budget() {
        let config = EllipsisConfig::default().with_direction(Direction::Middle);
        let content = chars(&format!("{}{}", "A".repeat(25), "B".repeat(25)));
        // budget 100 - 12 = 88, 44 per side at 10.08 per char:
        // the head stops before the 5th char, the tail includes it
        let metrics = Metrics::resolve(&root(100.0, 120.0), &config, None);
        let plan = plan(&content, &metrics, &config);
        assert_eq!(plan.leading, "A".repeat(4));
        assert_eq!(plan.tailing, "B".repeat(5));
    }

    #[test]
    fn test_plan_middle_slices_do_not_overlap() {
        let config = EllipsisConfig::default()
            .with_direction(Direction::Middle)
            .with_rows(2.0);
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let content = chars(text);
        // A very wide container with a two-line render makes both windows
        // cover the whole content.
        let metrics = Metrics::resolve(&root(10_000.0, 40.0), &config, None);
        let plan = plan(&content, &metrics, &config);
        assert!(plan.kept_chars() <= content.len());
        assert!(text.starts_with(&plan.leading));
        assert!(text.ends_with(&plan.tailing));
    }

    #[test]
    fn test_plan_zero_width_is_empty() {
        let config = EllipsisConfig::default();
        let content = chars("some overflowing text");
        let metrics = Metrics::resolve(&root(0.0, 200.0), &config, None);
        let plan = plan(&content, &metrics, &config);
        assert!(plan.is_empty());
    }
}
