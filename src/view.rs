//! Ranges, normalized viewports and plot placement.

use crate::error::{PlotError, PlotResult};
use crate::geom::{DevicePoint, DeviceRect};

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Union two ranges if both are finite.
    pub fn union(a: Self, b: Self) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        })
    }

    /// Range covering every finite value of an iterator.
    pub fn of_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut range: Option<Self> = None;
        for value in values {
            if !value.is_finite() {
                continue;
            }
            match range.as_mut() {
                None => range = Some(Self::new(value, value)),
                Some(existing) => existing.expand_to_include(value),
            }
        }
        range
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Shift both bounds by the same amount.
    pub fn translated(&self, delta: f64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Linear interpolation inside the range.
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * self.span()
    }
}

/// Normalized bounds of a plot box inside its drawing area.
///
/// These are the four scalars the plotting engine reports after laying out a
/// plot: fractions of the area width (left to right) and height (bottom to
/// top) that the data box occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedViewport {
    /// Left edge as a fraction of the area width.
    pub x_min: f64,
    /// Right edge as a fraction of the area width.
    pub x_max: f64,
    /// Bottom edge as a fraction of the area height, measured upwards.
    pub y_min: f64,
    /// Top edge as a fraction of the area height, measured upwards.
    pub y_max: f64,
}

impl NormalizedViewport {
    /// Create a normalized viewport.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The full drawing area.
    pub fn full() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Check whether the bounds are ordered and finite.
    pub fn is_valid(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|value| value.is_finite())
            && self.x_min < self.x_max
            && self.y_min < self.y_max
    }
}

/// Position and size of a plot inside its canvas, as fractions of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    offset_x: f64,
    offset_y: f64,
    width: f64,
    height: f64,
}

impl Placement {
    /// Create a placement.
    ///
    /// Offsets are measured from the top-left corner of the canvas. All four
    /// values must lie within `[0, 1]`.
    pub fn new(offset_x: f64, offset_y: f64, width: f64, height: f64) -> PlotResult<Self> {
        for (what, value) in [
            ("horizontal offset", offset_x),
            ("vertical offset", offset_y),
            ("width", width),
            ("height", height),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PlotError::NotNormalized { what, value });
            }
        }
        Ok(Self {
            offset_x,
            offset_y,
            width,
            height,
        })
    }

    /// Fill the whole canvas.
    pub fn full() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Resolve the placement against the canvas bounds.
    pub fn resolve(&self, canvas: DeviceRect) -> DeviceRect {
        let origin = DevicePoint::new(
            canvas.min.x + canvas.width() * self.offset_x,
            canvas.min.y + canvas.height() * self.offset_y,
        );
        DeviceRect::from_origin_size(
            origin,
            canvas.width() * self.width,
            canvas.height() * self.height,
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_new_orders_bounds() {
        let range = Range::new(3.0, -1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 3.0);
        assert!(range.is_valid());
    }

    #[test]
    fn of_values_skips_non_finite() {
        let range = Range::of_values([2.0, f64::NAN, -4.0, 9.0]).unwrap();
        assert_eq!(range, Range::new(-4.0, 9.0));
        assert!(Range::of_values([f64::INFINITY]).is_none());
    }

    #[test]
    fn placement_rejects_values_outside_unit_interval() {
        assert!(Placement::new(0.0, 0.0, 1.2, 0.5).is_err());
        assert!(Placement::new(-0.1, 0.0, 0.5, 0.5).is_err());
        let placement = Placement::new(0.5, 0.25, 0.5, 0.5).unwrap();
        let canvas = DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(200.0, 100.0));
        let area = placement.resolve(canvas);
        assert_eq!(area.min, DevicePoint::new(100.0, 25.0));
        assert_eq!(area.max, DevicePoint::new(200.0, 75.0));
    }
}
