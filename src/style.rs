//! Plot color theme.

use crate::render::Color;

/// Colors used for a plot's frame and decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Fill behind the data box; transparent lets the canvas show through.
    pub background: Color,
    /// Box, ticks and tick labels.
    pub axes: Color,
    /// Plot and axis titles.
    pub titles: Color,
    /// Grid lines.
    pub grid: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Black decorations on a transparent background.
    pub fn light() -> Self {
        Self {
            background: Color::TRANSPARENT,
            axes: Color::BLACK,
            titles: Color::BLACK,
            grid: Color::new(0.0, 0.0, 0.0, 0.15),
        }
    }

    /// Light decorations for dark canvases.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.08, 0.08, 0.09, 1.0),
            axes: Color::new(0.85, 0.85, 0.85, 1.0),
            titles: Color::WHITE,
            grid: Color::new(1.0, 1.0, 1.0, 0.12),
        }
    }
}
