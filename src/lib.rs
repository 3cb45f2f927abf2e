//! gpui_sciplot is an interactive scientific plot canvas built for GPUI.
//! Plots support box selection, anchored zoom and panning over line, polar,
//! histogram and contour data; every region is kept in the plotting engine's
//! internal coordinates so log and polar axes stay exact across gestures.

#![forbid(unsafe_code)]

pub mod annotation;
pub mod axis;
pub mod canvas;
pub mod config;
pub mod data;
pub mod error;
pub mod event;
pub mod geom;
pub mod gesture;
pub mod gpui_backend;
mod interaction;
pub mod kinds;
pub mod legend;
pub mod plot;
pub mod region;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;

pub use annotation::{Annotation, LineAnnotation, TextAnnotation};
pub use axis::{AxisConfig, AxisScale, BoxStyle};
pub use canvas::{Canvas, CanvasHost, SubscriptionId};
pub use config::{CanvasConfig, GestureConfig};
pub use data::{ContourGrid, Dataset2d, HistogramBins, Palette};
pub use error::{Axis, HandlerError, PlotError, PlotResult};
pub use event::{
    CursorStyle, InputEvent, Key, Modifier, Modifiers, PlotEvent, PlotEventKind, PointerButton,
    ScrollDirection,
};
pub use geom::{DevicePoint, DeviceRect, Extent, Point};
pub use gesture::{GestureMachine, GestureState};
pub use gpui_backend::{CanvasHandle, GpuiCanvasView};
pub use kinds::{Plot2d, PlotContour, PlotHistogram, PlotPolar};
pub use legend::{Legend, LegendCorner, LegendEntry};
pub use plot::{HasLegend, Pannable, Plot, PlotId, PlotKind, Selectable, Zoomable};
pub use region::RegionState;
pub use render::engine::{BoxEngine, Decorations, PlotEngine};
pub use render::{
    Color, LineDash, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle,
    RenderCommand, RenderList, TextStyle,
};
pub use style::Theme;
pub use transform::{
    DeviceTransform, Identity, LogAxes, PolarTransform, TransformChain, WorldTransform,
};
pub use view::{NormalizedViewport, Placement, Range};
