//! Text wrapping for the terminal render surface.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

/// Break `text` into rows of at most `columns` display cells.
///
/// Wraps per character (wide characters take two cells) and honours `\n`.
/// A character wider than `columns` still gets a row of its own.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut rows = vec![String::new()];
    let mut used = 0;

    for ch in text.chars() {
        if ch == '\n' {
            rows.push(String::new());
            used = 0;
            continue;
        }
        let width = ch.width().unwrap_or(0);
        if used > 0 && used + width > columns {
            rows.push(String::new());
            used = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        used += width;
    }

    rows
}

/// Number of rows `text` occupies at `columns` cells wide.
pub fn row_count(text: &str, columns: usize) -> usize {
    wrap(text, columns).len()
}

/// Display width of `text` in cells.
pub fn cell_width(text: &str) -> usize {
    text.chars().filter_map(|ch| ch.width()).sum()
}

/// Wrap styled segments with the same rules as [`wrap`].
pub fn wrap_styled(segments: &[(&str, Style)], columns: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut buffer = String::new();
    let mut used = 0;

    for &(text, style) in segments {
        for ch in text.chars() {
            if ch == '\n' {
                flush_span(&mut spans, &mut buffer, style);
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
                continue;
            }
            let width = ch.width().unwrap_or(0);
            if used > 0 && used + width > columns {
                flush_span(&mut spans, &mut buffer, style);
                lines.push(Line::from(std::mem::take(&mut spans)));
                used = 0;
            }
            buffer.push(ch);
            used += width;
        }
        flush_span(&mut spans, &mut buffer, style);
    }

    lines.push(Line::from(spans));
    lines
}

fn flush_span(spans: &mut Vec<Span<'static>>, buffer: &mut String, style: Style) {
    if !buffer.is_empty() {
        spans.push(Span::styled(std::mem::take(buffer), style));
    }
}
