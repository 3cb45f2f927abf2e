//! Numeric helpers for selection, panning and zooming.
//!
//! These work on a single plot's [`DeviceTransform`] and produce new internal
//! windows; applying them to a region is left to the caller.

use crate::event::ScrollDirection;
use crate::geom::DevicePoint;
use crate::transform::DeviceTransform;
use crate::view::Range;

/// Inset applied to the plot box before converting a selection corner.
///
/// Corners touching the box edge are pulled this far inside on every side so
/// that the converted value never lands outside the visible window.
pub(crate) const BOUNDARY_EPSILON: f64 = 1e-10;

/// Internal window selected by a box drag from `origin` to `current`.
///
/// Both corners are clamped a hair inside the plot box, converted to internal
/// coordinates, ordered per axis and finally clamped into the visible window.
/// Returns `None` when the box has no area.
pub(crate) fn selection_window(
    device: &DeviceTransform,
    origin: DevicePoint,
    current: DevicePoint,
) -> Option<(Range, Range)> {
    let rect = device.plot_rect().inset(BOUNDARY_EPSILON);
    let start = device.device_to_internal(rect.clamp(origin));
    let end = device.device_to_internal(rect.clamp(current));
    let window_x = device.window_x();
    let window_y = device.window_y();
    let x = Range::new(window_x.clamp(start.x), window_x.clamp(end.x));
    let y = Range::new(window_y.clamp(start.y), window_y.clamp(end.y));
    if x.span() <= 0.0 || y.span() <= 0.0 {
        return None;
    }
    Some((x, y))
}

/// Internal-space translation that keeps the content under the pointer.
///
/// Dragging the pointer right moves the window left, so the returned delta
/// is the negative of the pointer's internal displacement. Only the scale of
/// the transform is used, which keeps the result correct even when the
/// window changed since the transform was built.
pub(crate) fn pan_delta(device: &DeviceTransform, from: DevicePoint, to: DevicePoint) -> (f64, f64) {
    let start = device.device_to_internal(from);
    let end = device.device_to_internal(to);
    (start.x - end.x, start.y - end.y)
}

/// Multiplier applied to the edge distances for one scroll step.
///
/// Scrolling up zooms in by `factor`, scrolling down zooms out.
pub(crate) fn scroll_scale(direction: ScrollDirection, factor: f64) -> f64 {
    match direction {
        ScrollDirection::Up => 1.0 / factor,
        ScrollDirection::Down => factor,
    }
}

/// Window obtained by zooming around a fixed device point.
///
/// The four distances from `anchor` to the edges of the plot box are scaled
/// independently and the new edges are converted back to internal space, so
/// the anchor keeps its device position and its internal value.
pub(crate) fn anchored_zoom(device: &DeviceTransform, anchor: DevicePoint, scale: f64) -> (Range, Range) {
    let rect = device.plot_rect();
    let left = anchor.x - (anchor.x - rect.min.x) * scale;
    let right = anchor.x + (rect.max.x - anchor.x) * scale;
    let top = anchor.y - (anchor.y - rect.min.y) * scale;
    let bottom = anchor.y + (rect.max.y - anchor.y) * scale;
    let lower_left = device.device_to_internal(DevicePoint::new(left, bottom));
    let upper_right = device.device_to_internal(DevicePoint::new(right, top));
    (
        Range::new(lower_left.x, upper_right.x),
        Range::new(lower_left.y, upper_right.y),
    )
}
