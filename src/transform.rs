//! Coordinate transforms between World, Engine-Internal and Device space.
//!
//! A plot kind supplies the World <-> Internal pair through
//! [`WorldTransform`]; the Internal <-> Device pair is an affine map built
//! from the engine's normalized viewport, the plot's drawing area and the
//! visible internal window. [`TransformChain`] composes the two.

use crate::axis::AxisScale;
use crate::geom::{DevicePoint, DeviceRect, Point};
use crate::view::{NormalizedViewport, Range};

/// World <-> Engine-Internal mapping of a plot kind.
///
/// Both methods default to the identity. Implementations must be pure: the
/// result may only depend on the point and on the instance itself.
pub trait WorldTransform {
    /// Map a World point into Engine-Internal coordinates.
    fn world_to_internal(&self, point: Point) -> Point {
        point
    }

    /// Map an Engine-Internal point back into World coordinates.
    fn internal_to_world(&self, point: Point) -> Point {
        point
    }
}

/// The identity transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl WorldTransform for Identity {}

/// Independent per-axis logarithmic mapping.
///
/// Values that cannot be mapped (non-positive on a log axis) become NaN so
/// that callers validating the result reject them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogAxes {
    /// Scale of the X axis.
    pub x: AxisScale,
    /// Scale of the Y axis.
    pub y: AxisScale,
}

impl LogAxes {
    /// Create a mapping for the given axis scales.
    pub fn new(x: AxisScale, y: AxisScale) -> Self {
        Self { x, y }
    }
}

impl WorldTransform for LogAxes {
    fn world_to_internal(&self, point: Point) -> Point {
        Point::new(
            self.x.map_value(point.x).unwrap_or(f64::NAN),
            self.y.map_value(point.y).unwrap_or(f64::NAN),
        )
    }

    fn internal_to_world(&self, point: Point) -> Point {
        Point::new(
            self.x.invert_value(point.x).unwrap_or(f64::NAN),
            self.y.invert_value(point.y).unwrap_or(f64::NAN),
        )
    }
}

/// Polar mapping: World `(r, theta)` to Cartesian internal `(x, y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolarTransform;

impl WorldTransform for PolarTransform {
    fn world_to_internal(&self, point: Point) -> Point {
        let (sin, cos) = point.y.sin_cos();
        Point::new(point.x * cos, point.x * sin)
    }

    fn internal_to_world(&self, point: Point) -> Point {
        Point::new(point.x.hypot(point.y), point.y.atan2(point.x))
    }
}

/// Affine Internal <-> Device map for one rendered plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceTransform {
    plot_rect: DeviceRect,
    window_x: Range,
    window_y: Range,
}

impl DeviceTransform {
    /// Build the transform for a plot drawn in `area`.
    ///
    /// `viewport` holds the normalized box bounds reported by the engine and
    /// `window_x`/`window_y` the internal window drawn inside that box.
    /// Returns `None` when any of the inputs is degenerate.
    pub fn new(
        area: DeviceRect,
        viewport: NormalizedViewport,
        window_x: Range,
        window_y: Range,
    ) -> Option<Self> {
        if !area.is_valid() || !viewport.is_valid() {
            return None;
        }
        if !window_x.is_valid() || !window_y.is_valid() {
            return None;
        }
        let left = area.min.x + area.width() * viewport.x_min;
        let right = area.min.x + area.width() * viewport.x_max;
        // Device Y grows downwards while the normalized viewport grows upwards.
        let top = area.min.y + area.height() * (1.0 - viewport.y_max);
        let bottom = area.min.y + area.height() * (1.0 - viewport.y_min);
        let plot_rect = DeviceRect::new(DevicePoint::new(left, top), DevicePoint::new(right, bottom));
        if !plot_rect.is_valid() {
            return None;
        }
        Some(Self {
            plot_rect,
            window_x,
            window_y,
        })
    }

    /// The same box showing a different internal window.
    pub fn with_window(&self, window_x: Range, window_y: Range) -> Option<Self> {
        if !window_x.is_valid() || !window_y.is_valid() {
            return None;
        }
        Some(Self {
            plot_rect: self.plot_rect,
            window_x,
            window_y,
        })
    }

    /// Device rectangle of the data box.
    pub fn plot_rect(&self) -> DeviceRect {
        self.plot_rect
    }

    /// Visible internal window on X.
    pub fn window_x(&self) -> Range {
        self.window_x
    }

    /// Visible internal window on Y.
    pub fn window_y(&self) -> Range {
        self.window_y
    }

    /// Map an internal point into device space.
    pub fn internal_to_device(&self, point: Point) -> DevicePoint {
        let rect = self.plot_rect;
        let x_norm = (point.x - self.window_x.min) / self.window_x.span();
        let y_norm = (point.y - self.window_y.min) / self.window_y.span();
        DevicePoint::new(
            rect.min.x + x_norm * rect.width(),
            rect.max.y - y_norm * rect.height(),
        )
    }

    /// Map a device point into internal space.
    pub fn device_to_internal(&self, point: DevicePoint) -> Point {
        let rect = self.plot_rect;
        let x_norm = (point.x - rect.min.x) / rect.width();
        let y_norm = (rect.max.y - point.y) / rect.height();
        Point::new(self.window_x.lerp(x_norm), self.window_y.lerp(y_norm))
    }
}

/// World <-> Device composition of a plot's two transforms.
#[derive(Debug, Clone, Copy)]
pub struct TransformChain<'a, T: WorldTransform + ?Sized> {
    world: &'a T,
    device: &'a DeviceTransform,
}

impl<'a, T: WorldTransform + ?Sized> TransformChain<'a, T> {
    /// Chain a world mapping with a device mapping.
    pub fn new(world: &'a T, device: &'a DeviceTransform) -> Self {
        Self { world, device }
    }

    /// Access the device half of the chain.
    pub fn device(&self) -> &DeviceTransform {
        self.device
    }

    /// Map a World point into Engine-Internal coordinates.
    pub fn world_to_internal(&self, point: Point) -> Point {
        self.world.world_to_internal(point)
    }

    /// Map an Engine-Internal point into World coordinates.
    pub fn internal_to_world(&self, point: Point) -> Point {
        self.world.internal_to_world(point)
    }

    /// Map a World point to device pixels.
    pub fn world_to_device(&self, point: Point) -> DevicePoint {
        self.device
            .internal_to_device(self.world.world_to_internal(point))
    }

    /// Map device pixels to a World point.
    pub fn device_to_world(&self, point: DevicePoint) -> Point {
        self.world
            .internal_to_world(self.device.device_to_internal(point))
    }
}
