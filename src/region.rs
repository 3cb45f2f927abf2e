//! The authoritative visible window of a plot.
//!
//! Bounds are stored in Engine-Internal coordinates so that chains of pans and
//! zooms on logarithmic or polar plots do not accumulate round-trip error.
//! World values are produced on demand through the plot kind's transform.

use crate::error::{PlotError, PlotResult};
use crate::geom::{Extent, Point};
use crate::transform::WorldTransform;
use crate::view::Range;

/// Visible window plus the full data extent, both in internal coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionState {
    shown_x: Range,
    shown_y: Range,
    extent: Option<(Range, Range)>,
}

impl Default for RegionState {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionState {
    /// A unit window with no data extent.
    pub fn new() -> Self {
        Self {
            shown_x: Range::new(0.0, 1.0),
            shown_y: Range::new(0.0, 1.0),
            extent: None,
        }
    }

    /// Recompute the data extent and show all of it.
    ///
    /// The corners of `extent` are mapped through `transform`; an axis whose
    /// span collapses is widened so the window stays drawable. Returns `false`
    /// when no usable extent exists, in which case the current window is kept.
    pub fn initialize<T: WorldTransform + ?Sized>(
        &mut self,
        transform: &T,
        extent: Option<Extent>,
    ) -> bool {
        let Some(extent) = extent else {
            self.extent = None;
            return false;
        };
        let min = transform.world_to_internal(extent.min_corner());
        let max = transform.world_to_internal(extent.max_corner());
        let x = widen_if_flat(Range::new(min.x, max.x));
        let y = widen_if_flat(Range::new(min.y, max.y));
        if !x.is_valid() || !y.is_valid() {
            self.extent = None;
            return false;
        }
        self.extent = Some((x, y));
        self.shown_x = x;
        self.shown_y = y;
        true
    }

    /// Change the visible window, given in World coordinates.
    ///
    /// Returns `Ok(false)` without touching any state when the requested window
    /// collapses on either axis. Returns an error, again without touching any
    /// state, when the converted bounds are not finite or not strictly
    /// increasing. Returns `Ok(true)` when the new window was stored.
    pub fn set_region<T: WorldTransform + ?Sized>(
        &mut self,
        transform: &T,
        region: Extent,
    ) -> PlotResult<bool> {
        if region.is_degenerate() {
            return Ok(false);
        }
        let min = transform.world_to_internal(region.min_corner());
        let max = transform.world_to_internal(region.max_corner());
        self.set_internal(min.x, max.x, min.y, max.y)
    }

    /// Change the visible window, given in internal coordinates.
    pub fn set_internal(
        &mut self,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> PlotResult<bool> {
        let finite = [x_min, x_max, y_min, y_max]
            .iter()
            .all(|value| value.is_finite());
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(PlotError::InvalidRegion {
                xmin: x_min,
                xmax: x_max,
                ymin: y_min,
                ymax: y_max,
            });
        }
        self.shown_x = Range { min: x_min, max: x_max };
        self.shown_y = Range { min: y_min, max: y_max };
        Ok(true)
    }

    /// Current window in World coordinates, ordered per axis.
    pub fn get_region<T: WorldTransform + ?Sized>(&self, transform: &T) -> Extent {
        let min = transform.internal_to_world(Point::new(self.shown_x.min, self.shown_y.min));
        let max = transform.internal_to_world(Point::new(self.shown_x.max, self.shown_y.max));
        let x = Range::new(min.x, max.x);
        let y = Range::new(min.y, max.y);
        Extent::new(x.min, x.max, y.min, y.max)
    }

    /// Current window on X in internal coordinates.
    pub fn internal_x(&self) -> Range {
        self.shown_x
    }

    /// Current window on Y in internal coordinates.
    pub fn internal_y(&self) -> Range {
        self.shown_y
    }

    /// Full data extent in internal coordinates, if any data is attached.
    pub fn data_extent(&self) -> Option<(Range, Range)> {
        self.extent
    }

    /// Full data extent in World coordinates, ordered per axis.
    pub fn data_extent_world<T: WorldTransform + ?Sized>(&self, transform: &T) -> Option<Extent> {
        let (x, y) = self.extent?;
        let min = transform.internal_to_world(Point::new(x.min, y.min));
        let max = transform.internal_to_world(Point::new(x.max, y.max));
        let x = Range::new(min.x, max.x);
        let y = Range::new(min.y, max.y);
        Some(Extent::new(x.min, x.max, y.min, y.max))
    }

    /// Show the full data extent again.
    ///
    /// Returns `false` when no data extent is known.
    pub fn reset_to_extent(&mut self) -> bool {
        let Some((x, y)) = self.extent else {
            return false;
        };
        self.shown_x = x;
        self.shown_y = y;
        true
    }

    /// Shift the window by an internal-space delta.
    pub fn translate_internal(&mut self, dx: f64, dy: f64) -> PlotResult<bool> {
        let x = self.shown_x.translated(dx);
        let y = self.shown_y.translated(dy);
        self.set_internal(x.min, x.max, y.min, y.max)
    }
}

fn widen_if_flat(range: Range) -> Range {
    if !range.is_finite() || range.span() > 0.0 {
        return range;
    }
    let half = (range.min.abs() * 0.05).max(0.5);
    Range::new(range.min - half, range.max + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisScale;
    use crate::transform::{Identity, LogAxes, PolarTransform};

    fn initialized(transform: &dyn WorldTransform, extent: Extent) -> RegionState {
        let mut region = RegionState::new();
        assert!(region.initialize(transform, Some(extent)));
        region
    }

    #[test]
    fn initialize_shows_full_extent() {
        let region = initialized(&Identity, Extent::new(-2.0, 8.0, 1.0, 3.0));
        assert_eq!(region.get_region(&Identity), Extent::new(-2.0, 8.0, 1.0, 3.0));
        assert_eq!(region.data_extent(), Some((Range::new(-2.0, 8.0), Range::new(1.0, 3.0))));
    }

    #[test]
    fn set_region_stores_internal_bounds() {
        let log = LogAxes::new(AxisScale::Log10, AxisScale::Linear);
        let mut region = initialized(&log, Extent::new(1.0, 1000.0, 0.0, 1.0));
        assert_eq!(region.set_region(&log, Extent::new(10.0, 100.0, 0.25, 0.75)), Ok(true));
        assert!((region.internal_x().min - 1.0).abs() < 1e-12);
        assert!((region.internal_x().max - 2.0).abs() < 1e-12);
        let shown = region.get_region(&log);
        assert!((shown.x_min - 10.0).abs() < 1e-9);
        assert!((shown.x_max - 100.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_request_is_ignored() {
        let mut region = initialized(&Identity, Extent::new(0.0, 10.0, 0.0, 10.0));
        let before = region.clone();
        assert_eq!(region.set_region(&Identity, Extent::new(3.0, 3.0, 1.0, 4.0)), Ok(false));
        assert_eq!(region.set_region(&Identity, Extent::new(1.0, 4.0, 2.0, 2.0)), Ok(false));
        assert_eq!(region, before);
    }

    #[test]
    fn inverted_request_is_rejected_without_mutation() {
        let mut region = initialized(&Identity, Extent::new(0.0, 10.0, 0.0, 10.0));
        let before = region.clone();
        let err = region
            .set_region(&Identity, Extent::new(5.0, 1.0, 0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidRegion { .. }));
        assert_eq!(region, before);
    }

    #[test]
    fn non_positive_log_request_is_rejected() {
        let log = LogAxes::new(AxisScale::Log10, AxisScale::Log10);
        let mut region = initialized(&log, Extent::new(1.0, 10.0, 1.0, 10.0));
        assert!(region.set_region(&log, Extent::new(-1.0, 5.0, 1.0, 5.0)).is_err());
    }

    #[test]
    fn get_region_is_ordered_for_every_transform() {
        let transforms: [&dyn WorldTransform; 3] = [
            &Identity,
            &LogAxes {
                x: AxisScale::Log10,
                y: AxisScale::Log10,
            },
            &PolarTransform,
        ];
        for transform in transforms {
            let mut region = RegionState::new();
            region.set_internal(-10.0, 1.0, -10.0, 1.0).unwrap();
            let shown = region.get_region(transform);
            assert!(shown.x_min <= shown.x_max);
            assert!(shown.y_min <= shown.y_max);
        }
    }

    #[test]
    fn reset_restores_extent() {
        let mut region = initialized(&Identity, Extent::new(0.0, 10.0, 0.0, 10.0));
        region.set_region(&Identity, Extent::new(2.0, 3.0, 2.0, 3.0)).unwrap();
        assert!(region.reset_to_extent());
        assert_eq!(region.get_region(&Identity), Extent::new(0.0, 10.0, 0.0, 10.0));
        assert!(!RegionState::new().reset_to_extent());
    }

    #[test]
    fn flat_axis_is_widened() {
        let region = initialized(&Identity, Extent::new(0.0, 10.0, 4.0, 4.0));
        assert!(region.internal_y().is_valid());
        assert!(region.internal_y().min < 4.0 && region.internal_y().max > 4.0);
    }
}
