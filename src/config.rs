//! Gesture and canvas configuration.

use crate::error::{PlotError, PlotResult};
use crate::event::Modifier;
use crate::render::Color;

/// Per-plot gesture switches and selection box appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    selectable: bool,
    zoomable: bool,
    pannable: bool,
    zoom_factor: f64,
    selection_color: Color,
    selection_line_width: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            selectable: true,
            zoomable: true,
            pannable: true,
            zoom_factor: 2.0,
            selection_color: Color::BLACK,
            selection_line_width: 2.0,
        }
    }
}

impl GestureConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether box selection and double-click reset are enabled.
    pub fn selectable(&self) -> bool {
        self.selectable
    }

    /// Enable or disable box selection and double-click reset.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    /// Whether scroll zooming is enabled.
    pub fn zoomable(&self) -> bool {
        self.zoomable
    }

    /// Enable or disable scroll zooming.
    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.zoomable = zoomable;
    }

    /// Whether modifier-drag panning is enabled.
    pub fn pannable(&self) -> bool {
        self.pannable
    }

    /// Enable or disable modifier-drag panning.
    pub fn set_pannable(&mut self, pannable: bool) {
        self.pannable = pannable;
    }

    /// Zoom factor applied per scroll step.
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Set the zoom factor.
    ///
    /// The factor must be finite, strictly positive and different from 1.0.
    pub fn set_zoom_factor(&mut self, factor: f64) -> PlotResult<()> {
        if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
            return Err(PlotError::InvalidZoomFactor(factor));
        }
        self.zoom_factor = factor;
        Ok(())
    }

    /// Builder form of [`set_zoom_factor`](Self::set_zoom_factor).
    pub fn with_zoom_factor(mut self, factor: f64) -> PlotResult<Self> {
        self.set_zoom_factor(factor)?;
        Ok(self)
    }

    /// Stroke color of the selection box.
    pub fn selection_color(&self) -> Color {
        self.selection_color
    }

    /// Set the stroke color of the selection box.
    pub fn set_selection_color(&mut self, color: Color) {
        self.selection_color = color;
    }

    /// Stroke width of the selection box.
    pub fn selection_line_width(&self) -> f64 {
        self.selection_line_width
    }

    /// Set the stroke width of the selection box; must be strictly positive.
    pub fn set_selection_line_width(&mut self, width: f64) -> PlotResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PlotError::InvalidLineWidth(width));
        }
        self.selection_line_width = width;
        Ok(())
    }
}

/// Canvas-wide configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Fill color behind all plots.
    pub background: Color,
    /// Modifier that turns a primary drag into a pan.
    pub pan_modifier: Modifier,
    /// Scroll deltas smaller than this many pixels are ignored by host adapters.
    pub scroll_dead_zone_px: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            pan_modifier: Modifier::Control,
            scroll_dead_zone_px: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_factor_validation() {
        let mut config = GestureConfig::default();
        assert_eq!(config.zoom_factor(), 2.0);
        for bad in [1.0, 0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(config.set_zoom_factor(bad).is_err());
        }
        assert_eq!(config.zoom_factor(), 2.0);
        config.set_zoom_factor(1.5).unwrap();
        assert_eq!(config.zoom_factor(), 1.5);
        assert!(GestureConfig::new().with_zoom_factor(0.5).is_ok());
    }

    #[test]
    fn selection_width_must_be_positive() {
        let mut config = GestureConfig::default();
        assert_eq!(
            config.set_selection_line_width(0.0),
            Err(PlotError::InvalidLineWidth(0.0))
        );
        config.set_selection_line_width(3.0).unwrap();
        assert_eq!(config.selection_line_width(), 3.0);
    }
}
