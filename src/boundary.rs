//! Cut-point search over a character range using estimated widths.

use std::ops::Range;

use crate::width::WidthTable;

/// Which end of the range the width scan starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Accumulate from the range start; keeps a head slice.
    Forward,
    /// Accumulate from the range end; keeps a tail slice.
    Backward,
}

/// Find the slice of `chars[range]` that fits in `budget` pixels.
///
/// Walks one character at a time from the scan origin and stops at the first
/// character whose running total reaches `budget`; that index is the cutoff.
/// A forward scan keeps `start..cutoff`, a backward scan keeps `cutoff..end`.
/// If the whole range fits, the whole range is returned.
///
/// The range is clamped to `chars`, and a non-positive budget returns an empty
/// range without examining anything.
pub fn locate(
    chars: &[char],
    range: Range<usize>,
    scan: Scan,
    budget: f64,
    table: &WidthTable,
) -> Range<usize> {
    let end = range.end.min(chars.len());
    let start = range.start.min(end);

    if budget.is_nan() || budget <= 0.0 {
        return match scan {
            Scan::Forward => start..start,
            Scan::Backward => end..end,
        };
    }

    let mut total = 0.0;
    match scan {
        Scan::Forward => {
            for (idx, &ch) in chars.iter().enumerate().take(end).skip(start) {
                total += table.char_width(ch);
                if total >= budget {
                    return start..idx;
                }
            }
        }
        Scan::Backward => {
            for idx in (start..end).rev() {
                total += table.char_width(chars[idx]);
                if total >= budget {
                    return idx..end;
                }
            }
        }
    }

    start..end
}

/// Collect `chars[range]` into an owned string.
pub fn slice(chars: &[char], range: Range<usize>) -> String {
    chars[range].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tunables;

    fn table() -> WidthTable {
        // Upper 10.08, lower 7.42, digit 5.6, other 10.5, wide 14
        WidthTable::for_font_size(14.0, &Tunables::default())
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_forward_excludes_crossing_char() {
        let text = chars("ABCDEFGHIJ");
        // 10.08 * 3 = 30.24 >= 30 at index 2
        let kept = locate(&text, 0..10, Scan::Forward, 30.0, &table());
        assert_eq!(kept, 0..2);
        assert_eq!(slice(&text, kept), "AB");
    }

    #[test]
    fn test_backward_includes_crossing_char() {
        let text = chars("ABCDEFGHIJ");
        let kept = locate(&text, 0..10, Scan::Backward, 30.0, &table());
        assert_eq!(kept, 7..10);
        assert_eq!(slice(&text, kept), "HIJ");
    }

    #[test]
    fn test_whole_range_fits() {
        let text = chars("abc");
        assert_eq!(locate(&text, 0..3, Scan::Forward, 1000.0, &table()), 0..3);
        assert_eq!(locate(&text, 0..3, Scan::Backward, 1000.0, &table()), 0..3);
    }

    #[test]
    fn test_non_positive_budget_is_empty() {
        let text = chars("abcdef");
        assert!(locate(&text, 0..6, Scan::Forward, 0.0, &table()).is_empty());
        assert!(locate(&text, 0..6, Scan::Forward, -5.0, &table()).is_empty());
        assert!(locate(&text, 2..6, Scan::Backward, -5.0, &table()).is_empty());
        assert!(locate(&text, 0..6, Scan::Forward, f64::NAN, &table()).is_empty());
    }

    #[test]
    fn test_range_clamped_to_content() {
        let text = chars("abcdef");
        let kept = locate(&text, 4..100, Scan::Forward, 1000.0, &table());
        assert_eq!(kept, 4..6);
        let kept = locate(&text, 50..100, Scan::Backward, 1000.0, &table());
        assert_eq!(kept, 6..6);
    }

    #[test]
    fn test_backward_stays_inside_range() {
        let text = chars("0123456789");
        let kept = locate(&text, 6..10, Scan::Backward, 1000.0, &table());
        assert_eq!(kept, 6..10);
    }

    #[test]
    fn test_mixed_script_widths() {
        let text = chars("中文ab");
        // 14 + 14 = 28 >= 20 at index 1
        let kept = locate(&text, 0..4, Scan::Forward, 20.0, &table());
        assert_eq!(slice(&text, kept), "中");
    }

    #[test]
    fn test_empty_content() {
        let text: Vec<char> = Vec::new();
        assert_eq!(locate(&text, 0..0, Scan::Forward, 10.0, &table()), 0..0);
        assert_eq!(locate(&text, 0..5, Scan::Backward, 10.0, &table()), 0..0);
    }
}
