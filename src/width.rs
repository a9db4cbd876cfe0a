//! Character classification and approximate pixel widths.

use crate::config::Tunables;

/// Coarse character class used for width lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// CJK unified ideographs.
    WideScript,
    UpperLatin,
    LowerLatin,
    Digit,
    Other,
}

impl CharClass {
    /// Position of this class in a [`WidthTable`].
    pub const fn index(self) -> usize {
        match self {
            CharClass::WideScript => 0,
            CharClass::UpperLatin => 1,
            CharClass::LowerLatin => 2,
            CharClass::Digit => 3,
            CharClass::Other => 4,
        }
    }
}

/// Classify a character by script range.
pub fn classify(ch: char) -> CharClass {
    match ch {
        '\u{4e00}'..='\u{9fa5}' => CharClass::WideScript,
        'A'..='Z' => CharClass::UpperLatin,
        'a'..='z' => CharClass::LowerLatin,
        '0'..='9' => CharClass::Digit,
        _ => CharClass::Other,
    }
}

/// Estimated pixel width per [`CharClass`] at one font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthTable([f64; 5]);

impl WidthTable {
    /// Scale the tuned ratios to `font_size` pixels.
    pub fn for_font_size(font_size: f64, tunables: &Tunables) -> Self {
        Self(tunables.width_ratios.map(|ratio| ratio * font_size))
    }

    pub fn get(&self, class: CharClass) -> f64 {
        self.0[class.index()]
    }

    /// Estimated width of one character.
    pub fn char_width(&self, ch: char) -> f64 {
        self.get(classify(ch))
    }

    /// Estimated width of a whole string.
    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().map(|ch| self.char_width(ch)).sum()
    }

    /// Width of the symbol plus affix.
    ///
    /// Prefers a real measurement; falls back to a fraction of the
    /// wide-script width when none is available. Always rounded up.
    pub fn symbol_width(&self, measured: Option<f64>, tunables: &Tunables) -> f64 {
        match measured {
            Some(width) if width.is_finite() && width > 0.0 => width.ceil(),
            _ => (self.get(CharClass::WideScript) * tunables.symbol_ratio).ceil(),
        }
    }
}
