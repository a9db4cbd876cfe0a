//! Measurements reported by the render surface.

use crate::units::{non_negative, px_to_number};

/// Pixel measurements of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasurementResult {
    pub width: f64,
    pub height: f64,
    /// `None` when the surface reports no concrete line height (`normal`).
    pub line_height: Option<f64>,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub font_size: f64,
}

impl MeasurementResult {
    /// A measurement carrying only a width and height.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
            ..Self::default()
        }
    }

    /// Copy with every field clamped to a usable, non-negative number.
    pub fn sanitized(self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
            line_height: self.line_height.map(non_negative).filter(|lh| *lh > 0.0),
            padding_top: non_negative(self.padding_top),
            padding_bottom: non_negative(self.padding_bottom),
            font_size: non_negative(self.font_size),
        }
    }
}

/// Computed style as a host surface reports it: raw CSS-like strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComputedStyle {
    pub width: String,
    pub height: String,
    pub line_height: String,
    pub padding_top: String,
    pub padding_bottom: String,
    pub font_size: String,
}

impl From<&ComputedStyle> for MeasurementResult {
    fn from(style: &ComputedStyle) -> Self {
        let line_height = match style.line_height.trim() {
            "normal" | "" => None,
            value => Some(px_to_number(value)),
        };
        MeasurementResult {
            width: px_to_number(&style.width),
            height: px_to_number(&style.height),
            line_height,
            padding_top: px_to_number(&style.padding_top),
            padding_bottom: px_to_number(&style.padding_bottom),
            font_size: px_to_number(&style.font_size),
        }
        .sanitized()
    }
}

/// Which probe of the render surface a measurement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasureTarget {
    /// The truncation symbol plus affix, rendered inline.
    Symbol,
    /// The visible root element holding the full content.
    Root,
    /// An off-screen copy of the current candidate string.
    Copy,
}

/// Source of real rendered dimensions.
///
/// Returns `None` when the target is not attached or cannot be measured
/// yet; callers degrade to estimation instead of failing.
pub trait MeasurementOracle {
    fn measure(&mut self, target: MeasureTarget, text: &str) -> Option<MeasurementResult>;
}

impl<F> MeasurementOracle for F
where
    F: FnMut(MeasureTarget, &str) -> Option<MeasurementResult>,
{
    fn measure(&mut self, target: MeasureTarget, text: &str) -> Option<MeasurementResult> {
        self(target, text)
    }
}
