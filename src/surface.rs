//! Terminal cells as a render surface and measurement oracle.

use ellipsize::{MeasureTarget, MeasurementOracle, MeasurementResult};

use crate::text::{cell_width, row_count};

/// Smallest box the demo will shrink to.
pub const MIN_COLUMNS: usize = 4;

/// Maps terminal cells to pixels so the pipeline sees a pixel surface.
///
/// A cell is `cell_width` pixels wide and one row is `line_height` pixels
/// tall. Text is laid out exactly like [`crate::text::wrap`] draws it, so
/// what gets measured is what ends up on screen.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    /// Box width in cells.
    pub columns: usize,
    pub cell_width: f64,
    pub line_height: f64,
    /// Font size reported to the pipeline.
    pub font_size: f64,
    /// When false every measurement reports `None`.
    pub attached: bool,
    /// Measurements taken so far.
    pub measurements: usize,
}

impl TerminalSurface {
    pub fn new(columns: usize, cell_width: f64, line_height: f64, font_size: f64) -> Self {
        Self {
            columns: columns.max(MIN_COLUMNS),
            cell_width,
            line_height,
            font_size,
            attached: true,
            measurements: 0,
        }
    }

    /// Box width in pixels.
    pub fn width_px(&self) -> f64 {
        self.columns as f64 * self.cell_width
    }

    /// Rendered height of `text` in pixels.
    pub fn height_px(&self, text: &str) -> f64 {
        row_count(text, self.columns) as f64 * self.line_height
    }

    /// Grow or shrink the box, never below [`MIN_COLUMNS`].
    pub fn resize(&mut self, delta: isize) {
        self.columns = self.columns.saturating_add_signed(delta).max(MIN_COLUMNS);
    }
}

impl MeasurementOracle for TerminalSurface {
    fn measure(&mut self, target: MeasureTarget, text: &str) -> Option<MeasurementResult> {
        if !self.attached {
            return None;
        }
        self.measurements += 1;

        let result = match target {
            MeasureTarget::Symbol => MeasurementResult::sized(
                cell_width(text) as f64 * self.cell_width,
                self.line_height,
            ),
            MeasureTarget::Root => MeasurementResult {
                width: self.width_px(),
                height: self.height_px(text),
                line_height: Some(self.line_height),
                padding_top: 0.0,
                padding_bottom: 0.0,
                font_size: self.font_size,
            },
            MeasureTarget::Copy => MeasurementResult::sized(self.width_px(), self.height_px(text)),
        };
        Some(result)
    }
}
