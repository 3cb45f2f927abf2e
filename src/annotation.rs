//! Text and line annotations placed in World coordinates.

use crate::error::{PlotError, PlotResult};
use crate::geom::{DevicePoint, Point};
use crate::render::{Color, DrawContext, LineStyle, TextStyle};

const BASE_TEXT_SIZE: f64 = 12.0;

/// A single line of text anchored at a World position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    text: String,
    position: Point,
    justification: f64,
    scale: f64,
    color: Color,
    shown: bool,
}

impl TextAnnotation {
    /// Left-justified black text at `position`.
    pub fn new(text: impl Into<String>, position: Point) -> Self {
        Self {
            text: text.into(),
            position,
            justification: 0.0,
            scale: 1.0,
            color: Color::BLACK,
            shown: true,
        }
    }

    /// Text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Anchor position in World coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the anchor.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Horizontal justification: 0 is left aligned, 1 right aligned.
    pub fn justification(&self) -> f64 {
        self.justification
    }

    /// Change the justification; must lie in `[0, 1]`.
    pub fn set_justification(&mut self, justification: f64) -> PlotResult<()> {
        if !(0.0..=1.0).contains(&justification) {
            return Err(PlotError::InvalidJustification(justification));
        }
        self.justification = justification;
        Ok(())
    }

    /// Size relative to the default text size.
    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Change the relative size; must be strictly positive.
    pub fn set_scale_factor(&mut self, scale: f64) -> PlotResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PlotError::InvalidScaleFactor(scale));
        }
        self.scale = scale;
        Ok(())
    }

    /// Text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the text color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let anchor = ctx.chain().world_to_device(self.position);
        let size = BASE_TEXT_SIZE * self.scale;
        ctx.text(
            DevicePoint::new(anchor.x, anchor.y - size * 0.5),
            self.text.clone(),
            TextStyle {
                color: self.color,
                size: size as f32,
                justify: self.justification as f32,
            },
        );
    }
}

/// A straight line between two World positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LineAnnotation {
    start: Point,
    end: Point,
    style: LineStyle,
    shown: bool,
}

impl LineAnnotation {
    /// Create a line; `width` must be strictly positive.
    pub fn new(start: Point, end: Point, color: Color, width: f64) -> PlotResult<Self> {
        let mut line = Self {
            start,
            end,
            style: LineStyle { color, width: 1.0 },
            shown: true,
        };
        line.set_width(width)?;
        Ok(line)
    }

    /// Start and end positions.
    pub fn endpoints(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    /// Stroke style.
    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// Change the stroke width; must be strictly positive.
    pub fn set_width(&mut self, width: f64) -> PlotResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PlotError::InvalidLineWidth(width));
        }
        self.style.width = width as f32;
        Ok(())
    }

    /// Change the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        ctx.polyline(&[self.start, self.end], self.style);
    }
}

/// Any annotation a 2D plot can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Text annotation.
    Text(TextAnnotation),
    /// Line annotation.
    Line(LineAnnotation),
}

impl Annotation {
    /// Whether the annotation is drawn.
    pub fn is_shown(&self) -> bool {
        match self {
            Self::Text(text) => text.shown,
            Self::Line(line) => line.shown,
        }
    }

    /// Show or hide the annotation.
    pub fn set_shown(&mut self, shown: bool) {
        match self {
            Self::Text(text) => text.shown = shown,
            Self::Line(line) => line.shown = shown,
        }
    }

    pub(crate) fn draw(&self, ctx: &mut DrawContext<'_>) {
        if !self.is_shown() {
            return;
        }
        match self {
            Self::Text(text) => text.draw(ctx),
            Self::Line(line) => line.draw(ctx),
        }
    }
}

impl From<TextAnnotation> for Annotation {
    fn from(text: TextAnnotation) -> Self {
        Self::Text(text)
    }
}

impl From<LineAnnotation> for Annotation {
    fn from(line: LineAnnotation) -> Self {
        Self::Line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn justification_and_scale_are_validated() {
        let mut text = TextAnnotation::new("peak", Point::new(1.0, 2.0));
        assert_eq!(
            text.set_justification(1.5),
            Err(PlotError::InvalidJustification(1.5))
        );
        assert!(text.set_scale_factor(0.0).is_err());
        text.set_justification(0.5).unwrap();
        text.set_scale_factor(2.0).unwrap();
        assert_eq!(text.justification(), 0.5);
        assert_eq!(text.scale_factor(), 2.0);
    }

    #[test]
    fn line_width_must_be_positive() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(1.0, 1.0);
        assert!(LineAnnotation::new(start, end, Color::BLACK, 0.0).is_err());
        let line = LineAnnotation::new(start, end, Color::BLACK, 2.0).unwrap();
        assert_eq!(line.style().width, 2.0);
    }

    #[test]
    fn visibility_toggles() {
        let mut annotation: Annotation = TextAnnotation::new("a", Point::new(0.0, 0.0)).into();
        assert!(annotation.is_shown());
        annotation.set_shown(false);
        assert!(!annotation.is_shown());
    }
}
