//! Legend settings and layout.

use crate::error::{PlotError, PlotResult};
use crate::geom::{DevicePoint, DeviceRect};
use crate::render::{
    Color, DrawContext, LineSegment, LineStyle, MarkerStyle, RectStyle, RenderCommand, TextStyle,
};

const FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f64 = 18.0;
const PADDING: f64 = 6.0;
const SWATCH_WIDTH: f64 = 24.0;
const SWATCH_GAP: f64 = 6.0;
// Rough glyph advance relative to the font size; the layout does not shape text.
const CHAR_WIDTH: f64 = 0.6;

/// Corner of the data box the legend is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendCorner {
    /// Top right corner.
    #[default]
    TopRight,
    /// Bottom right corner.
    BottomRight,
    /// Top left corner.
    TopLeft,
    /// Bottom left corner.
    BottomLeft,
}

impl LegendCorner {
    /// `(right, bottom)` flags of the anchor corner.
    const fn anchor(self) -> (bool, bool) {
        match self {
            Self::TopRight => (true, false),
            Self::BottomRight => (true, true),
            Self::TopLeft => (false, false),
            Self::BottomLeft => (false, true),
        }
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Row label.
    pub label: String,
    /// Line swatch, if the entry draws a line.
    pub line: Option<LineStyle>,
    /// Marker swatch, if the entry draws markers.
    pub marker: Option<MarkerStyle>,
}

/// Legend settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    shown: bool,
    corner: LegendCorner,
    position: (f64, f64),
    background: Color,
    bounding_box: Color,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            shown: true,
            corner: LegendCorner::TopRight,
            position: (0.05, 0.05),
            background: Color::WHITE,
            bounding_box: Color::BLACK,
        }
    }
}

impl Legend {
    /// Whether the legend is drawn.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Show or hide the legend.
    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    /// Anchor corner.
    pub fn corner(&self) -> LegendCorner {
        self.corner
    }

    /// Change the anchor corner.
    pub fn set_corner(&mut self, corner: LegendCorner) {
        self.corner = corner;
    }

    /// Offset from the anchor corner, as fractions of the data box.
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Change the offset from the anchor corner; both values must lie in `[0, 1]`.
    pub fn set_position(&mut self, x: f64, y: f64) -> PlotResult<()> {
        for (what, value) in [("legend x position", x), ("legend y position", y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PlotError::NotNormalized { what, value });
            }
        }
        self.position = (x, y);
        Ok(())
    }

    /// Background fill.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Change the background fill.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Outline color.
    pub fn bounding_box(&self) -> Color {
        self.bounding_box
    }

    /// Change the outline color.
    pub fn set_bounding_box(&mut self, color: Color) {
        self.bounding_box = color;
    }

    /// Device rectangle of the legend listing `entries`.
    pub(crate) fn layout(&self, plot_rect: DeviceRect, entries: &[LegendEntry]) -> DeviceRect {
        let longest = entries
            .iter()
            .map(|entry| entry.label.chars().count())
            .max()
            .unwrap_or(0);
        let text_width = longest as f64 * f64::from(FONT_SIZE) * CHAR_WIDTH;
        let width = PADDING * 2.0 + SWATCH_WIDTH + SWATCH_GAP + text_width;
        let height = PADDING * 2.0 + entries.len() as f64 * LINE_HEIGHT;
        let (right, bottom) = self.corner.anchor();
        let offset_x = self.position.0 * plot_rect.width();
        let offset_y = self.position.1 * plot_rect.height();
        let x = if right {
            plot_rect.max.x - offset_x - width
        } else {
            plot_rect.min.x + offset_x
        };
        let y = if bottom {
            plot_rect.max.y - offset_y - height
        } else {
            plot_rect.min.y + offset_y
        };
        DeviceRect::from_origin_size(DevicePoint::new(x, y), width, height)
    }

    /// Draw the legend inside the data box of `ctx`.
    pub(crate) fn draw(&self, ctx: &mut DrawContext<'_>, entries: &[LegendEntry]) {
        if entries.is_empty() {
            return;
        }
        let rect = self.layout(ctx.plot_rect(), entries);
        ctx.push(RenderCommand::Rect {
            rect,
            style: RectStyle {
                fill: self.background,
                stroke: self.bounding_box,
                stroke_width: 1.0,
            },
        });
        for (index, entry) in entries.iter().enumerate() {
            let row_y = rect.min.y + PADDING + index as f64 * LINE_HEIGHT;
            let center_y = row_y + LINE_HEIGHT * 0.5;
            let swatch_start = DevicePoint::new(rect.min.x + PADDING, center_y);
            let swatch_end = DevicePoint::new(swatch_start.x + SWATCH_WIDTH, center_y);
            if let Some(style) = entry.line {
                ctx.push(RenderCommand::LineSegments {
                    segments: vec![LineSegment::new(swatch_start, swatch_end)],
                    style,
                });
            }
            if let Some(style) = entry.marker {
                ctx.push(RenderCommand::Points {
                    points: vec![DevicePoint::new(
                        (swatch_start.x + swatch_end.x) * 0.5,
                        center_y,
                    )],
                    style,
                });
            }
            ctx.text(
                DevicePoint::new(
                    swatch_end.x + SWATCH_GAP,
                    center_y - f64::from(FONT_SIZE) * 0.5,
                ),
                entry.label.clone(),
                TextStyle {
                    color: self.bounding_box,
                    size: FONT_SIZE,
                    justify: 0.0,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<LegendEntry> {
        vec![LegendEntry {
            label: "signal".to_string(),
            line: Some(LineStyle::default()),
            marker: None,
        }]
    }

    fn plot_rect() -> DeviceRect {
        DeviceRect::new(DevicePoint::new(100.0, 50.0), DevicePoint::new(500.0, 450.0))
    }

    #[test]
    fn position_must_be_normalized() {
        let mut legend = Legend::default();
        assert!(legend.set_position(1.5, 0.0).is_err());
        assert!(legend.set_position(0.0, -0.1).is_err());
        assert_eq!(legend.position(), (0.05, 0.05));
        legend.set_position(0.0, 1.0).unwrap();
        assert_eq!(legend.position(), (0.0, 1.0));
    }

    #[test]
    fn corners_anchor_the_box() {
        let mut legend = Legend::default();
        legend.set_position(0.0, 0.0).unwrap();
        let rect = plot_rect();

        let top_right = legend.layout(rect, &entries());
        assert_eq!(top_right.max.x, rect.max.x);
        assert_eq!(top_right.min.y, rect.min.y);

        legend.set_corner(LegendCorner::BottomLeft);
        let bottom_left = legend.layout(rect, &entries());
        assert_eq!(bottom_left.min.x, rect.min.x);
        assert_eq!(bottom_left.max.y, rect.max.y);
    }

    #[test]
    fn offset_moves_inwards() {
        let mut legend = Legend::default();
        legend.set_corner(LegendCorner::TopLeft);
        legend.set_position(0.1, 0.1).unwrap();
        let layout = legend.layout(plot_rect(), &entries());
        assert_eq!(layout.min, DevicePoint::new(140.0, 90.0));
    }
}
