//! Geometric primitives for the three coordinate spaces.
//!
//! [`Point`] carries World or Engine-Internal coordinates; which one is implied
//! by the API that returns it. Device types describe pixel positions on the
//! drawing surface with the origin in the top-left corner.

/// A point in World or Engine-Internal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X value.
    pub x: f64,
    /// Y value.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in device space (surface pixels, Y growing downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePoint {
    /// X value in device pixels.
    pub x: f64,
    /// Y value in device pixels.
    pub y: f64,
}

impl DevicePoint {
    /// Create a new device point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A rectangle in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRect {
    /// Top-left corner.
    pub min: DevicePoint,
    /// Bottom-right corner.
    pub max: DevicePoint,
}

impl DeviceRect {
    /// Create a new device rectangle from corners.
    pub fn new(min: DevicePoint, max: DevicePoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(origin: DevicePoint, width: f64, height: f64) -> Self {
        Self {
            min: origin,
            max: DevicePoint::new(origin.x + width, origin.y + height),
        }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive, finite area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0 && self.width().is_finite()
            && self.height().is_finite()
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: DevicePoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Clamp a point into the rectangle, axis by axis.
    pub fn clamp(&self, point: DevicePoint) -> DevicePoint {
        DevicePoint::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Shrink the rectangle by `amount` on every side.
    pub fn inset(&self, amount: f64) -> Self {
        Self {
            min: DevicePoint::new(self.min.x + amount, self.min.y + amount),
            max: DevicePoint::new(self.max.x - amount, self.max.y - amount),
        }
    }

    /// Build the rectangle spanned by two arbitrary corners.
    pub fn spanning(a: DevicePoint, b: DevicePoint) -> Self {
        Self {
            min: DevicePoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: DevicePoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }
}

/// A visible window expressed as two corners in World coordinates.
///
/// When passed into a plot, `(x_min, y_min)` and `(x_max, y_max)` are the
/// World images of the lower-left and upper-right internal corners. Under
/// polar plots those need not be ordered per axis. Extents read back from a
/// plot are always ordered per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Left X value.
    pub x_min: f64,
    /// Right X value.
    pub x_max: f64,
    /// Lower Y value.
    pub y_min: f64,
    /// Upper Y value.
    pub y_max: f64,
}

impl Extent {
    /// Create an extent from its four bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Create an extent from its lower-left and upper-right corners.
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x, max.x, min.y, max.y)
    }

    /// Lower-left corner.
    pub fn min_corner(&self) -> Point {
        Point::new(self.x_min, self.y_min)
    }

    /// Upper-right corner.
    pub fn max_corner(&self) -> Point {
        Point::new(self.x_max, self.y_max)
    }

    /// Check whether the extent collapses on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.x_min == self.x_max || self.y_min == self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_points_inside() {
        let rect = DeviceRect::new(DevicePoint::new(10.0, 20.0), DevicePoint::new(110.0, 220.0));
        let clamped = rect.clamp(DevicePoint::new(-5.0, 500.0));
        assert_eq!(clamped, DevicePoint::new(10.0, 220.0));
        assert!(rect.contains(clamped));
    }

    #[test]
    fn spanning_normalizes_corners() {
        let rect = DeviceRect::spanning(DevicePoint::new(5.0, 1.0), DevicePoint::new(1.0, 5.0));
        assert_eq!(rect.min, DevicePoint::new(1.0, 1.0));
        assert_eq!(rect.max, DevicePoint::new(5.0, 5.0));
    }

    #[test]
    fn degenerate_extent_on_one_axis() {
        assert!(Extent::new(1.0, 1.0, 0.0, 2.0).is_degenerate());
        assert!(Extent::new(0.0, 1.0, 2.0, 2.0).is_degenerate());
        assert!(!Extent::new(0.0, 1.0, 0.0, 2.0).is_degenerate());
    }
}
