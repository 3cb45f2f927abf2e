//! Rendering primitives and clipping helpers.
//!
//! These types are backend-agnostic: plot kinds and the engine describe what
//! to draw as a [`RenderList`] in device space, and a render backend (such as
//! the GPUI backend) paints it.

pub mod engine;

use crate::geom::{DevicePoint, DeviceRect, Point};
use crate::transform::{DeviceTransform, TransformChain, WorldTransform};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque red.
    pub const RED: Self = Self::new(0.86, 0.15, 0.15, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.12, 0.35, 0.85, 1.0);

    /// The same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Dash pattern of a dataset line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineDash {
    /// Uninterrupted line.
    #[default]
    Solid,
    /// Short dashes, short gaps.
    ShortDashShortGap,
    /// Long dashes, long gaps.
    LongDashLongGap,
    /// Long dashes, short gaps.
    LongDashShortGap,
    /// Long dash, short gap, short dash, short gap.
    DashDot,
    /// Two long dashes per repeat, short gaps.
    LongDashPairs,
    /// Short, medium and long dashes with matching gaps.
    ShortMediumLong,
    /// Short, medium and long dashes with short gaps.
    ShortMediumLongTight,
}

impl LineDash {
    /// Alternating on/off lengths in pixels; empty for a solid line.
    pub fn pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::ShortDashShortGap => &[4.0, 4.0],
            Self::LongDashLongGap => &[8.0, 8.0],
            Self::LongDashShortGap => &[8.0, 4.0],
            Self::DashDot => &[8.0, 4.0, 2.0, 4.0],
            Self::LongDashPairs => &[8.0, 4.0, 8.0, 8.0],
            Self::ShortMediumLong => &[2.0, 2.0, 5.0, 5.0, 8.0, 8.0],
            Self::ShortMediumLongTight => &[2.0, 3.0, 5.0, 3.0, 8.0, 3.0],
        }
    }
}

/// Marker shape for scatter data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Circle marker.
    Circle,
    /// Square marker.
    Square,
    /// Cross marker.
    Cross,
}

/// Marker styling for scatter data.
///
/// Marker sizes are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 4.0,
            shape: MarkerShape::Circle,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal anchor: 0 puts the position at the left edge of the text,
    /// 1 at the right edge.
    pub justify: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            justify: 0.0,
        }
    }
}

/// A line segment in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: DevicePoint,
    /// Segment end.
    pub end: DevicePoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: DevicePoint, end: DevicePoint) -> Self {
        Self { start, end }
    }
}

/// A single drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(DeviceRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw markers.
    Points {
        /// Marker centers.
        points: Vec<DevicePoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: DeviceRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw a single line of text; `position` is the top of the line.
    Text {
        /// Anchor position.
        position: DevicePoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands, in painting order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Drawing surface handed to plot kinds and the engine for one plot.
///
/// Carries the plot's transform chain so callers can emit commands in World
/// or internal coordinates.
pub struct DrawContext<'a> {
    world: &'a dyn WorldTransform,
    device: DeviceTransform,
    list: &'a mut RenderList,
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(
        world: &'a dyn WorldTransform,
        device: DeviceTransform,
        list: &'a mut RenderList,
    ) -> Self {
        Self {
            world,
            device,
            list,
        }
    }

    /// The World <-> Device chain of the plot being drawn.
    pub fn chain(&self) -> TransformChain<'_, dyn WorldTransform + 'a> {
        TransformChain::new(self.world, &self.device)
    }

    /// The Internal <-> Device half of the chain.
    pub fn device(&self) -> &DeviceTransform {
        &self.device
    }

    /// Device rectangle of the data box.
    pub fn plot_rect(&self) -> DeviceRect {
        self.device.plot_rect()
    }

    /// Push a raw command.
    pub fn push(&mut self, command: RenderCommand) {
        self.list.push(command);
    }

    /// Clip subsequent commands to the data box until [`clip_end`](Self::clip_end).
    pub fn clip_to_plot(&mut self) {
        let rect = self.plot_rect();
        self.list.push(RenderCommand::ClipRect(rect));
    }

    /// End the innermost clip.
    pub fn clip_end(&mut self) {
        self.list.push(RenderCommand::ClipEnd);
    }

    /// Draw a polyline through World points, clipped to the data box.
    pub fn polyline(&mut self, points: &[Point], style: LineStyle) {
        self.dashed_polyline(points, style, LineDash::Solid);
    }

    /// Draw a dashed polyline through World points, clipped to the data box.
    ///
    /// The pattern runs on across joints and restarts after a break.
    pub fn dashed_polyline(&mut self, points: &[Point], style: LineStyle, dash: LineDash) {
        let chain = TransformChain::new(self.world, &self.device);
        let mut segments = Vec::new();
        build_line_segments(
            points,
            |point| chain.world_to_device(point),
            self.device.plot_rect(),
            &mut segments,
        );
        if dash != LineDash::Solid {
            let solid = std::mem::take(&mut segments);
            dash_segments(&solid, dash.pattern(), &mut segments);
        }
        if !segments.is_empty() {
            self.list
                .push(RenderCommand::LineSegments { segments, style });
        }
    }

    /// Draw independent World segments, clipped to the data box.
    pub fn segments(&mut self, pairs: impl IntoIterator<Item = (Point, Point)>, style: LineStyle) {
        let chain = TransformChain::new(self.world, &self.device);
        let clip = self.device.plot_rect();
        let segments: Vec<LineSegment> = pairs
            .into_iter()
            .map(|(a, b)| (chain.world_to_device(a), chain.world_to_device(b)))
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .filter_map(|(a, b)| clip_segment(a, b, clip))
            .map(|(a, b)| LineSegment::new(a, b))
            .collect();
        if !segments.is_empty() {
            self.list
                .push(RenderCommand::LineSegments { segments, style });
        }
    }

    /// Draw markers at World points inside the data box.
    pub fn markers(&mut self, points: &[Point], style: MarkerStyle) {
        let chain = TransformChain::new(self.world, &self.device);
        let mut out = Vec::new();
        build_scatter_points(
            points,
            |point| chain.world_to_device(point),
            self.device.plot_rect(),
            &mut out,
        );
        if !out.is_empty() {
            self.list.push(RenderCommand::Points { points: out, style });
        }
    }

    /// Draw the rectangle spanned by two World corners.
    pub fn world_rect(&mut self, a: Point, b: Point, style: RectStyle) {
        let chain = TransformChain::new(self.world, &self.device);
        let a = chain.world_to_device(a);
        let b = chain.world_to_device(b);
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        self.list.push(RenderCommand::Rect {
            rect: DeviceRect::spanning(a, b),
            style,
        });
    }

    /// Draw text at a device position.
    pub fn text(&mut self, position: DevicePoint, text: impl Into<String>, style: TextStyle) {
        let text = text.into();
        if text.is_empty() || !position.is_finite() {
            return;
        }
        self.list.push(RenderCommand::Text {
            position,
            text,
            style,
        });
    }
}

/// Build clipped line segments from consecutive points.
///
/// Points whose device image is not finite break the line.
pub(crate) fn build_line_segments(
    points: &[Point],
    to_device: impl Fn(Point) -> DevicePoint,
    clip: DeviceRect,
    out: &mut Vec<LineSegment>,
) {
    out.clear();
    if points.len() < 2 {
        return;
    }
    let mapped: Vec<DevicePoint> = points.iter().map(|point| to_device(*point)).collect();
    for window in mapped.windows(2) {
        let (start, end) = (window[0], window[1]);
        if !start.is_finite() || !end.is_finite() {
            continue;
        }
        if let Some((clipped_start, clipped_end)) = clip_segment(start, end, clip) {
            out.push(LineSegment::new(clipped_start, clipped_end));
        }
    }
}

/// Cut solid segments into dashes following an on/off `pattern`.
pub(crate) fn dash_segments(segments: &[LineSegment], pattern: &[f64], out: &mut Vec<LineSegment>) {
    out.clear();
    if pattern.is_empty() {
        out.extend_from_slice(segments);
        return;
    }
    let mut index = 0;
    let mut left = pattern[0];
    let mut joint: Option<DevicePoint> = None;
    for segment in segments {
        if joint != Some(segment.start) {
            index = 0;
            left = pattern[0];
        }
        joint = Some(segment.end);
        let dx = segment.end.x - segment.start.x;
        let dy = segment.end.y - segment.start.y;
        let length = dx.hypot(dy);
        if length <= 0.0 {
            continue;
        }
        let at = |distance: f64| {
            let t = distance / length;
            DevicePoint::new(segment.start.x + dx * t, segment.start.y + dy * t)
        };
        let mut travelled = 0.0;
        while travelled < length {
            let step = left.min(length - travelled);
            if index % 2 == 0 {
                out.push(LineSegment::new(at(travelled), at(travelled + step)));
            }
            travelled += step;
            left -= step;
            if left <= 0.0 {
                index = (index + 1) % pattern.len();
                left = pattern[index];
            }
        }
    }
}

/// Build scatter marker centers inside the clip rectangle.
pub(crate) fn build_scatter_points(
    points: &[Point],
    to_device: impl Fn(Point) -> DevicePoint,
    clip: DeviceRect,
    out: &mut Vec<DevicePoint>,
) {
    out.clear();
    for point in points {
        let device = to_device(*point);
        if device.is_finite() && clip.contains(device) {
            out.push(device);
        }
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

fn clip_segment(
    mut start: DevicePoint,
    mut end: DevicePoint,
    rect: DeviceRect,
) -> Option<(DevicePoint, DevicePoint)> {
    let mut out_start = region_code(start, rect);
    let mut out_end = region_code(end, rect);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x, y) = if (out_code & TOP) != 0 {
            (
                start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y),
                rect.min.y,
            )
        } else if (out_code & BOTTOM) != 0 {
            (
                start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y),
                rect.max.y,
            )
        } else if (out_code & RIGHT) != 0 {
            (
                rect.max.x,
                start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x),
            )
        } else {
            (
                rect.min.x,
                start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x),
            )
        };

        let clipped = DevicePoint::new(x, y);
        if out_code == out_start {
            start = clipped;
            out_start = region_code(start, rect);
        } else {
            end = clipped;
            out_end = region_code(end, rect);
        }
    }
}

fn region_code(point: DevicePoint, rect: DeviceRect) -> u8 {
    let mut code = 0;
    if point.x < rect.min.x {
        code |= LEFT;
    } else if point.x > rect.max.x {
        code |= RIGHT;
    }
    if point.y < rect.min.y {
        code |= TOP;
    } else if point.y > rect.max.y {
        code |= BOTTOM;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DeviceRect {
        DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(10.0, 10.0))
    }

    #[test]
    fn dashes_run_on_across_joints() {
        let segments = [
            LineSegment::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(6.0, 0.0)),
            LineSegment::new(DevicePoint::new(6.0, 0.0), DevicePoint::new(6.0, 10.0)),
        ];
        let mut out = Vec::new();
        dash_segments(&segments, &[4.0, 4.0], &mut out);
        assert_eq!(
            out,
            [
                LineSegment::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(4.0, 0.0)),
                LineSegment::new(DevicePoint::new(6.0, 2.0), DevicePoint::new(6.0, 6.0)),
            ]
        );
    }

    #[test]
    fn dash_pattern_restarts_after_a_break() {
        let segments = [
            LineSegment::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(2.0, 0.0)),
            LineSegment::new(DevicePoint::new(5.0, 0.0), DevicePoint::new(8.0, 0.0)),
        ];
        let mut out = Vec::new();
        dash_segments(&segments, LineDash::LongDashShortGap.pattern(), &mut out);
        assert_eq!(out, segments);
        dash_segments(&segments, LineDash::Solid.pattern(), &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn clip_segment_inside() {
        let start = DevicePoint::new(2.0, 2.0);
        let end = DevicePoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, square()).expect("segment should clip");
        assert_eq!(clipped, (start, end));
    }

    #[test]
    fn clip_segment_crossing_edge() {
        let clipped = clip_segment(
            DevicePoint::new(5.0, 5.0),
            DevicePoint::new(15.0, 5.0),
            square(),
        )
        .expect("segment should clip");
        assert_eq!(clipped.1, DevicePoint::new(10.0, 5.0));
        assert!(
            clip_segment(
                DevicePoint::new(-5.0, -5.0),
                DevicePoint::new(-1.0, 20.0),
                square()
            )
            .is_none()
        );
    }

    #[test]
    fn non_finite_points_break_the_line() {
        let points = [
            Point::new(1.0, 1.0),
            Point::new(f64::NAN, 2.0),
            Point::new(3.0, 3.0),
            Point::new(4.0, 4.0),
        ];
        let mut out = Vec::new();
        build_line_segments(&points, |p| DevicePoint::new(p.x, p.y), square(), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start, DevicePoint::new(3.0, 3.0));
    }

    #[test]
    fn color_lerp_clamps() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 3.0), Color::WHITE);
    }
}
