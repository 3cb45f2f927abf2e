//! Axis configuration and scaling.

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    /// Linear scaling.
    #[default]
    Linear,
    /// Base-10 logarithmic scaling.
    Log10,
}

impl AxisScale {
    /// Map a value into axis space.
    pub fn map_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(value),
            Self::Log10 => {
                if value <= 0.0 {
                    None
                } else {
                    Some(value.log10())
                }
            }
        }
    }

    /// Invert a value from axis space back into data space.
    pub fn invert_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear => Some(value),
            Self::Log10 => Some(10_f64.powf(value)),
        }
    }

    /// Check whether the scale is logarithmic.
    pub fn is_log(self) -> bool {
        matches!(self, Self::Log10)
    }
}

/// How much of the frame the engine draws around the data box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    /// No box, ticks, labels or axes.
    None,
    /// Box outline only.
    BoxOnly,
    /// Box, ticks and numeric tick labels.
    #[default]
    BoxTicksLabels,
    /// Box, ticks, labels and grid lines at major ticks.
    BoxTicksLabelsGrid,
}

impl BoxStyle {
    /// Whether the box outline is drawn.
    pub fn draws_box(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether ticks and labels are drawn.
    pub fn draws_ticks(self) -> bool {
        matches!(self, Self::BoxTicksLabels | Self::BoxTicksLabelsGrid)
    }

    /// Whether grid lines are drawn.
    pub fn draws_grid(self) -> bool {
        matches!(self, Self::BoxTicksLabelsGrid)
    }
}

/// Per-axis configuration.
#[derive(Debug, Clone, Default)]
pub struct AxisConfig {
    scale: AxisScale,
    title: Option<String>,
}

impl AxisConfig {
    /// Create a new axis configuration.
    pub fn new(scale: AxisScale) -> Self {
        Self { scale, title: None }
    }

    /// Create a linear axis configuration.
    pub fn linear() -> Self {
        Self::new(AxisScale::Linear)
    }

    /// Create a log10 axis configuration.
    pub fn log10() -> Self {
        Self::new(AxisScale::Log10)
    }

    /// Access the axis scale.
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Set the axis scale.
    pub(crate) fn set_scale(&mut self, scale: AxisScale) {
        self.scale = scale;
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the axis title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Access the axis title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Format a tick value given in internal (possibly logarithmic) units.
    pub fn format_tick(&self, internal: f64) -> String {
        match self.scale.invert_value(internal) {
            Some(value) if self.scale.is_log() => format!("{value:e}"),
            Some(value) => format_compact(value),
            None => String::new(),
        }
    }
}

fn format_compact(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-3..1e5).contains(&magnitude) {
        return format!("{value:.2e}");
    }
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0');
    text.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_scale_rejects_non_positive() {
        let scale = AxisScale::Log10;
        assert!(scale.map_value(0.0).is_none());
        assert!(scale.map_value(-1.0).is_none());
        assert!(scale.map_value(1.0).is_some());
    }

    #[test]
    fn log_scale_roundtrip() {
        let scale = AxisScale::Log10;
        let value = 1000.0;
        let mapped = scale.map_value(value).unwrap();
        let roundtrip = scale.invert_value(mapped).unwrap();
        assert!((roundtrip - value).abs() < 1e-9);
    }

    #[test]
    fn tick_labels_trim_trailing_zeros() {
        let axis = AxisConfig::linear();
        assert_eq!(axis.format_tick(2.5), "2.5");
        assert_eq!(axis.format_tick(0.0), "0");
        assert_eq!(AxisConfig::log10().format_tick(2.0), "1e2");
    }
}
