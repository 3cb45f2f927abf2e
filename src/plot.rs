//! Plots, plot kinds and their gesture capabilities.
//!
//! A [`Plot`] owns everything one data box needs: the boxed [`PlotKind`] that
//! supplies data and the World transform, the [`RegionState`] holding the
//! visible window, per-plot [`GestureConfig`], decorations and the layout of
//! the last rendered frame. Gesture support is discovered through the
//! capability queries on [`PlotKind`].

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::axis::{AxisConfig, AxisScale, BoxStyle};
use crate::config::GestureConfig;
use crate::error::PlotResult;
use crate::geom::{DevicePoint, DeviceRect, Extent, Point};
use crate::interaction::{anchored_zoom, pan_delta, selection_window};
use crate::legend::{Legend, LegendEntry};
use crate::region::RegionState;
use crate::render::engine::{Decorations, PlotEngine};
use crate::render::{DrawContext, RenderList};
use crate::style::Theme;
use crate::transform::{DeviceTransform, TransformChain, WorldTransform};
use crate::view::{NormalizedViewport, Placement, Range};

static PLOT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlotId(u64);

impl PlotId {
    pub(crate) fn next() -> Self {
        Self(PLOT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plot#{}", self.0)
    }
}

/// Data and drawing of one kind of plot.
///
/// The World <-> Internal mapping comes from the [`WorldTransform`]
/// supertrait. Capability queries default to `None`; a kind opts into a
/// gesture by returning itself.
pub trait PlotKind: WorldTransform + fmt::Debug + Any {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// World corners whose internal images span the initial window.
    ///
    /// `None` when the kind has no data to show.
    fn data_extent(&self) -> Option<Extent>;

    /// Scales of the two axes, used for tick placement and labels.
    fn axis_scales(&self) -> (AxisScale, AxisScale) {
        (AxisScale::Linear, AxisScale::Linear)
    }

    /// Whether the engine should draw a Cartesian box, ticks and labels.
    fn cartesian_axes(&self) -> bool {
        true
    }

    /// Draw the data. Commands are clipped to the data box.
    fn draw(&self, ctx: &mut DrawContext<'_>);

    /// Box selection and double-press support.
    fn as_selectable(&mut self) -> Option<&mut dyn Selectable> {
        None
    }

    /// Scroll zoom support.
    fn as_zoomable(&mut self) -> Option<&mut dyn Zoomable> {
        None
    }

    /// Modifier-drag pan support.
    fn as_pannable(&mut self) -> Option<&mut dyn Pannable> {
        None
    }

    /// Legend support.
    fn as_legend(&self) -> Option<&dyn HasLegend> {
        None
    }

    /// Mutable legend access.
    fn as_legend_mut(&mut self) -> Option<&mut dyn HasLegend> {
        None
    }
}

/// Box selection and double-press reset.
pub trait Selectable: WorldTransform {
    /// Apply a completed selection, given as World corners.
    ///
    /// Returns whether the region changed.
    fn on_select_region(&mut self, region: &mut RegionState, selection: Extent) -> PlotResult<bool> {
        region.set_region(&*self, selection)
    }

    /// Handle a double press at a World position; the default zooms to fit.
    fn on_double_press(&mut self, region: &mut RegionState, _at: Point) -> bool {
        region.reset_to_extent()
    }
}

/// Scroll zooming.
pub trait Zoomable: WorldTransform {
    /// Show a new internal window computed by an anchored zoom.
    fn on_zoom(&mut self, region: &mut RegionState, x: Range, y: Range) -> PlotResult<bool> {
        region.set_internal(x.min, x.max, y.min, y.max)
    }
}

/// Panning.
pub trait Pannable: WorldTransform {
    /// Shift the window by an internal delta for a pointer move from `from`
    /// to `to` (World coordinates).
    ///
    /// Returns the cursor position to report, which may differ from `to`
    /// when the kind restricts the movement.
    fn on_pan(
        &mut self,
        region: &mut RegionState,
        delta: (f64, f64),
        _from: Point,
        to: Point,
    ) -> PlotResult<Point> {
        region.translate_internal(delta.0, delta.1)?;
        Ok(to)
    }
}

/// Legend capability.
pub trait HasLegend {
    /// Legend settings.
    fn legend(&self) -> &Legend;

    /// Mutable legend settings.
    fn legend_mut(&mut self) -> &mut Legend;

    /// Entries to list, in order.
    fn legend_entries(&self) -> Vec<LegendEntry>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RenderedFrame {
    area: DeviceRect,
    viewport: NormalizedViewport,
}

/// One plot on a canvas.
#[derive(Debug)]
pub struct Plot {
    id: PlotId,
    kind: Box<dyn PlotKind>,
    region: RegionState,
    gestures: GestureConfig,
    placement: Placement,
    title: Option<String>,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    box_style: BoxStyle,
    theme: Theme,
    shown: bool,
    frame: Option<RenderedFrame>,
}

impl Plot {
    /// Create a plot showing the full data extent of `kind`.
    pub fn new(kind: impl PlotKind) -> Self {
        Self::from_boxed(Box::new(kind))
    }

    /// Create a plot from an already boxed kind.
    pub fn from_boxed(kind: Box<dyn PlotKind>) -> Self {
        let mut plot = Self {
            id: PlotId::next(),
            kind,
            region: RegionState::new(),
            gestures: GestureConfig::default(),
            placement: Placement::full(),
            title: None,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            box_style: BoxStyle::default(),
            theme: Theme::default(),
            shown: true,
            frame: None,
        };
        plot.reinitialize_region();
        plot
    }

    /// Set the placement inside the canvas.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the plot title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the axis titles.
    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis.set_title(x);
        self.y_axis.set_title(y);
        self
    }

    /// Set the gesture configuration.
    pub fn with_gestures(mut self, gestures: GestureConfig) -> Self {
        self.gestures = gestures;
        self
    }

    /// Access the plot identifier.
    pub fn id(&self) -> PlotId {
        self.id
    }

    /// Access the plot kind.
    pub fn kind(&self) -> &dyn PlotKind {
        self.kind.as_ref()
    }

    /// Access the plot kind as a concrete type.
    pub fn kind_ref<K: PlotKind>(&self) -> Option<&K> {
        let any: &dyn Any = self.kind.as_ref();
        any.downcast_ref::<K>()
    }

    /// Mutate the plot kind as a concrete type.
    ///
    /// When the mutation changes the data extent or the axis scales, the
    /// region is re-initialized to show the full data again. Returns `None`
    /// when the kind is not a `K`.
    pub fn update_kind<K: PlotKind, R>(&mut self, f: impl FnOnce(&mut K) -> R) -> Option<R> {
        let before = (self.kind.data_extent(), self.kind.axis_scales());
        let any: &mut dyn Any = self.kind.as_mut();
        let kind = any.downcast_mut::<K>()?;
        let result = f(kind);
        if (self.kind.data_extent(), self.kind.axis_scales()) != before {
            debug!(plot = %self.id, kind = self.kind.name(), "data changed, resetting region");
            self.reinitialize_region();
        }
        Some(result)
    }

    /// Access the region state.
    pub fn region(&self) -> &RegionState {
        &self.region
    }

    /// Change the visible window, given as World corners.
    ///
    /// See [`RegionState::set_region`] for the result semantics.
    pub fn set_region(&mut self, region: Extent) -> PlotResult<bool> {
        self.region.set_region(self.kind.as_ref(), region)
    }

    /// Current visible window in World coordinates, ordered per axis.
    pub fn get_region(&self) -> Extent {
        self.region.get_region(self.kind.as_ref())
    }

    /// Full data extent in World coordinates, ordered per axis.
    pub fn data_extent(&self) -> Option<Extent> {
        self.region.data_extent_world(self.kind.as_ref())
    }

    /// Show the full data extent again.
    pub fn reset_region(&mut self) -> bool {
        self.region.reset_to_extent()
    }

    /// Gesture configuration.
    pub fn gestures(&self) -> &GestureConfig {
        &self.gestures
    }

    /// Mutable gesture configuration.
    pub fn gestures_mut(&mut self) -> &mut GestureConfig {
        &mut self.gestures
    }

    /// Placement inside the canvas.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Change the placement inside the canvas.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Plot title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replace or clear the plot title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// X axis configuration.
    pub fn x_axis(&self) -> &AxisConfig {
        &self.x_axis
    }

    /// Y axis configuration.
    pub fn y_axis(&self) -> &AxisConfig {
        &self.y_axis
    }

    /// Set the axis titles.
    pub fn set_axis_titles(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.x_axis.set_title(x);
        self.y_axis.set_title(y);
    }

    /// Frame style.
    pub fn box_style(&self) -> BoxStyle {
        self.box_style
    }

    /// Change the frame style.
    pub fn set_box_style(&mut self, box_style: BoxStyle) {
        self.box_style = box_style;
    }

    /// Colors.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the colors.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Whether the plot is drawn and receives events.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Show or hide the plot.
    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
        if !shown {
            self.frame = None;
        }
    }

    /// Internal <-> Device transform for the current window.
    ///
    /// # Panics
    ///
    /// Panics when the plot has not been rendered yet: the engine layout the
    /// transform depends on is only known after a render pass.
    pub fn device_transform(&self) -> DeviceTransform {
        self.try_device_transform()
            .expect("device transform requested before the plot was rendered")
    }

    /// Internal <-> Device transform, or `None` before the first render.
    pub fn try_device_transform(&self) -> Option<DeviceTransform> {
        let frame = self.frame?;
        DeviceTransform::new(
            frame.area,
            frame.viewport,
            self.region.internal_x(),
            self.region.internal_y(),
        )
    }

    /// Map a device position to World coordinates.
    ///
    /// # Panics
    ///
    /// Panics when the plot has not been rendered yet.
    pub fn device_to_world(&self, point: DevicePoint) -> Point {
        let device = self.device_transform();
        TransformChain::new(self.kind.as_ref(), &device).device_to_world(point)
    }

    /// Map a World position to device coordinates.
    ///
    /// # Panics
    ///
    /// Panics when the plot has not been rendered yet.
    pub fn world_to_device(&self, point: Point) -> DevicePoint {
        let device = self.device_transform();
        TransformChain::new(self.kind.as_ref(), &device).world_to_device(point)
    }

    /// Device rectangle of the data box after the last render.
    pub fn plot_rect(&self) -> Option<DeviceRect> {
        self.try_device_transform().map(|device| device.plot_rect())
    }

    /// Whether a device position lies in the data box.
    pub fn contains(&self, point: DevicePoint) -> bool {
        self.shown && self.plot_rect().is_some_and(|rect| rect.contains(point))
    }

    /// Lay out and draw the plot into `area`.
    pub fn render(&mut self, area: DeviceRect, engine: &dyn PlotEngine, list: &mut RenderList) {
        if !self.shown {
            self.frame = None;
            return;
        }
        let (x_scale, y_scale) = self.kind.axis_scales();
        self.x_axis.set_scale(x_scale);
        self.y_axis.set_scale(y_scale);
        let decorations = Decorations {
            title: self.title.as_deref(),
            x_axis: &self.x_axis,
            y_axis: &self.y_axis,
            box_style: self.box_style,
            theme: &self.theme,
            cartesian: self.kind.cartesian_axes(),
        };
        let viewport = engine.layout(area, &decorations);
        let Some(device) = DeviceTransform::new(
            area,
            viewport,
            self.region.internal_x(),
            self.region.internal_y(),
        ) else {
            debug!(plot = %self.id, "area too small to lay out, skipping");
            self.frame = None;
            return;
        };
        self.frame = Some(RenderedFrame { area, viewport });

        let world: &dyn WorldTransform = self.kind.as_ref();
        let mut ctx = DrawContext::new(world, device, list);
        engine.draw_background(&mut ctx, &decorations);
        ctx.clip_to_plot();
        self.kind.draw(&mut ctx);
        ctx.clip_end();
        engine.draw_frame(&mut ctx, &decorations);
        if let Some(source) = self.kind.as_legend() {
            let legend = source.legend();
            if legend.is_shown() {
                legend.draw(&mut ctx, &source.legend_entries());
            }
        }
    }

    fn reinitialize_region(&mut self) {
        let extent = self.kind.data_extent();
        if !self.region.initialize(self.kind.as_ref(), extent) {
            debug!(plot = %self.id, kind = self.kind.name(), "no usable data extent");
        }
    }

    pub(crate) fn can_select(&mut self) -> bool {
        self.shown && self.gestures.selectable() && self.kind.as_selectable().is_some()
    }

    pub(crate) fn can_zoom(&mut self) -> bool {
        self.shown && self.gestures.zoomable() && self.kind.as_zoomable().is_some()
    }

    pub(crate) fn can_pan(&mut self) -> bool {
        self.shown && self.gestures.pannable() && self.kind.as_pannable().is_some()
    }

    /// World position under a device point, if the plot has been rendered.
    pub(crate) fn world_at(&self, point: DevicePoint) -> Option<Point> {
        let device = self.try_device_transform()?;
        Some(TransformChain::new(self.kind.as_ref(), &device).device_to_world(point))
    }

    /// Clamp a device point into the data box.
    pub(crate) fn clamp_to_box(&self, point: DevicePoint) -> DevicePoint {
        match self.plot_rect() {
            Some(rect) => rect.clamp(point),
            None => point,
        }
    }

    /// Apply a box selection dragged from `origin` to `current`.
    ///
    /// Returns the selected World corners and whether the region changed, or
    /// `None` when the box has no area.
    pub(crate) fn apply_selection(
        &mut self,
        origin: DevicePoint,
        current: DevicePoint,
    ) -> PlotResult<Option<(Extent, bool)>> {
        let Some(device) = self.try_device_transform() else {
            return Ok(None);
        };
        let Some((x, y)) = selection_window(&device, origin, current) else {
            return Ok(None);
        };
        let min = self.kind.internal_to_world(Point::new(x.min, y.min));
        let max = self.kind.internal_to_world(Point::new(x.max, y.max));
        let selection = Extent::from_corners(min, max);
        let Some(selectable) = self.kind.as_selectable() else {
            return Ok(None);
        };
        let changed = selectable.on_select_region(&mut self.region, selection)?;
        Ok(Some((selection, changed)))
    }

    /// Apply a double press; returns the World position and whether the
    /// region changed.
    pub(crate) fn apply_double_press(&mut self, at: DevicePoint) -> Option<(Point, bool)> {
        let world = self.world_at(at)?;
        let selectable = self.kind.as_selectable()?;
        let changed = selectable.on_double_press(&mut self.region, world);
        Some((world, changed))
    }

    /// Apply one pan step; returns the World start and reported end.
    pub(crate) fn apply_pan(
        &mut self,
        from: DevicePoint,
        to: DevicePoint,
    ) -> PlotResult<Option<(Point, Point)>> {
        let Some(device) = self.try_device_transform() else {
            return Ok(None);
        };
        let delta = pan_delta(&device, from, to);
        let chain = TransformChain::new(self.kind.as_ref(), &device);
        let from_world = chain.device_to_world(from);
        let to_world = chain.device_to_world(to);
        let Some(pannable) = self.kind.as_pannable() else {
            return Ok(None);
        };
        let reported = pannable.on_pan(&mut self.region, delta, from_world, to_world)?;
        Ok(Some((from_world, reported)))
    }

    /// Apply one anchored zoom step; returns the World anchor and whether
    /// the region changed.
    pub(crate) fn apply_zoom(
        &mut self,
        anchor: DevicePoint,
        scale: f64,
    ) -> PlotResult<Option<(Point, bool)>> {
        let Some(device) = self.try_device_transform() else {
            return Ok(None);
        };
        let anchor_world = TransformChain::new(self.kind.as_ref(), &device).device_to_world(anchor);
        let (x, y) = anchored_zoom(&device, anchor, scale);
        let Some(zoomable) = self.kind.as_zoomable() else {
            return Ok(None);
        };
        let changed = zoomable.on_zoom(&mut self.region, x, y)?;
        Ok(Some((anchor_world, changed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::engine::BoxEngine;

    #[derive(Debug)]
    struct Fixed {
        extent: Extent,
    }

    impl WorldTransform for Fixed {}

    impl Selectable for Fixed {}

    impl PlotKind for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn data_extent(&self) -> Option<Extent> {
            Some(self.extent)
        }

        fn draw(&self, _ctx: &mut DrawContext<'_>) {}

        fn as_selectable(&mut self) -> Option<&mut dyn Selectable> {
            Some(self)
        }
    }

    fn fixed() -> Plot {
        Plot::new(Fixed {
            extent: Extent::new(0.0, 10.0, -1.0, 1.0),
        })
    }

    fn area() -> DeviceRect {
        DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(400.0, 300.0))
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(fixed().id(), fixed().id());
    }

    #[test]
    fn new_plot_shows_full_extent() {
        let plot = fixed();
        assert_eq!(plot.get_region(), Extent::new(0.0, 10.0, -1.0, 1.0));
        assert_eq!(plot.data_extent(), Some(Extent::new(0.0, 10.0, -1.0, 1.0)));
    }

    #[test]
    #[should_panic(expected = "before the plot was rendered")]
    fn unrendered_plot_has_no_device_transform() {
        fixed().device_transform();
    }

    #[test]
    fn transform_follows_region_after_render() {
        let mut plot = fixed();
        assert!(plot.try_device_transform().is_none());
        plot.render(area(), &BoxEngine::default(), &mut RenderList::new());
        let before = plot.device_transform();
        plot.set_region(Extent::new(2.0, 4.0, 0.0, 1.0)).unwrap();
        let after = plot.device_transform();
        assert_eq!(before.plot_rect(), after.plot_rect());
        assert_eq!(after.window_x(), Range::new(2.0, 4.0));
        let corner = plot.world_to_device(Point::new(2.0, 0.0));
        assert_eq!(corner.x, after.plot_rect().min.x);
    }

    #[test]
    fn update_kind_resets_region_on_new_extent() {
        let mut plot = fixed();
        plot.set_region(Extent::new(2.0, 4.0, 0.0, 1.0)).unwrap();
        plot.update_kind::<Fixed, _>(|_| ()).unwrap();
        assert_eq!(plot.get_region(), Extent::new(2.0, 4.0, 0.0, 1.0));
        plot.update_kind::<Fixed, _>(|kind| kind.extent = Extent::new(0.0, 5.0, 0.0, 5.0))
            .unwrap();
        assert_eq!(plot.get_region(), Extent::new(0.0, 5.0, 0.0, 5.0));
        assert!(plot.update_kind::<crate::kinds::Plot2d, _>(|_| ()).is_none());
    }

    #[test]
    fn capability_queries_respect_config() {
        let mut plot = fixed();
        assert!(plot.can_select());
        assert!(!plot.can_zoom());
        assert!(!plot.can_pan());
        plot.gestures_mut().set_selectable(false);
        assert!(!plot.can_select());
        assert!(plot.kind_ref::<Fixed>().is_some());
    }

    #[test]
    fn hidden_plot_is_not_hit() {
        let mut plot = fixed();
        plot.render(area(), &BoxEngine::default(), &mut RenderList::new());
        let center = DevicePoint::new(200.0, 150.0);
        assert!(plot.contains(center));
        plot.set_shown(false);
        assert!(!plot.contains(center));
    }
}
