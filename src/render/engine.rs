//! Plot layout and frame drawing.
//!
//! The [`PlotEngine`] decides where the data box sits inside a plot's area and
//! draws everything around the data: background, grid, box, ticks, tick labels
//! and titles. [`BoxEngine`] is the built-in implementation; it uses fixed pixel
//! margins so layouts are deterministic and independent of font metrics.

use crate::axis::{AxisConfig, BoxStyle};
use crate::geom::{DevicePoint, DeviceRect, Point};
use crate::render::{DrawContext, LineSegment, LineStyle, RectStyle, RenderCommand, TextStyle};
use crate::style::Theme;
use crate::view::{NormalizedViewport, Range};

/// Everything the engine draws around the data of one plot.
#[derive(Debug, Clone, Copy)]
pub struct Decorations<'a> {
    /// Plot title.
    pub title: Option<&'a str>,
    /// X axis title and scale.
    pub x_axis: &'a AxisConfig,
    /// Y axis title and scale.
    pub y_axis: &'a AxisConfig,
    /// Amount of frame to draw.
    pub box_style: BoxStyle,
    /// Colors.
    pub theme: &'a Theme,
    /// Whether the plot uses Cartesian axes; polar plots draw their own grid.
    pub cartesian: bool,
}

/// Layout and frame drawing for plots.
pub trait PlotEngine {
    /// Normalized bounds of the data box inside `area`.
    fn layout(&self, area: DeviceRect, decorations: &Decorations<'_>) -> NormalizedViewport;

    /// Draw what goes under the data: background fill and grid.
    fn draw_background(&self, ctx: &mut DrawContext<'_>, decorations: &Decorations<'_>);

    /// Draw what goes over the data: box, ticks, labels and titles.
    fn draw_frame(&self, ctx: &mut DrawContext<'_>, decorations: &Decorations<'_>);
}

const TICK_LENGTH: f64 = 5.0;
const LABEL_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 14.0;
const AXIS_TITLE_SIZE: f32 = 12.0;
const MAX_MARGIN_FRACTION: f64 = 0.3;
const TARGET_TICKS: usize = 6;

/// Default engine with fixed pixel margins.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxEngine {
    /// Margin left of the box, in pixels, before axis titles.
    pub left: f64,
    /// Margin right of the box, in pixels.
    pub right: f64,
    /// Margin above the box, in pixels, before the plot title.
    pub top: f64,
    /// Margin below the box, in pixels, before the X axis title.
    pub bottom: f64,
}

impl Default for BoxEngine {
    fn default() -> Self {
        Self {
            left: 56.0,
            right: 16.0,
            top: 12.0,
            bottom: 28.0,
        }
    }
}

impl BoxEngine {
    fn margins(&self, decorations: &Decorations<'_>) -> (f64, f64, f64, f64) {
        let mut left = self.left;
        let mut bottom = self.bottom;
        let mut top = self.top;
        if decorations.title.is_some() {
            top += f64::from(TITLE_SIZE) + 8.0;
        }
        if decorations.cartesian && decorations.box_style.draws_ticks() {
            if decorations.x_axis.title().is_some() {
                bottom += f64::from(AXIS_TITLE_SIZE) + 6.0;
            }
            if decorations.y_axis.title().is_some() {
                top += f64::from(AXIS_TITLE_SIZE) + 6.0;
            }
        } else {
            left = self.right;
            bottom = self.right;
        }
        (left, self.right, top, bottom)
    }
}

impl PlotEngine for BoxEngine {
    fn layout(&self, area: DeviceRect, decorations: &Decorations<'_>) -> NormalizedViewport {
        let (left, right, top, bottom) = self.margins(decorations);
        let fraction = |pixels: f64, total: f64| (pixels / total).clamp(0.0, MAX_MARGIN_FRACTION);
        let width = area.width().max(1.0);
        let height = area.height().max(1.0);
        NormalizedViewport::new(
            fraction(left, width),
            1.0 - fraction(right, width),
            fraction(bottom, height),
            1.0 - fraction(top, height),
        )
    }

    fn draw_background(&self, ctx: &mut DrawContext<'_>, decorations: &Decorations<'_>) {
        let rect = ctx.plot_rect();
        let theme = decorations.theme;
        if theme.background.a > 0.0 {
            ctx.push(RenderCommand::Rect {
                rect,
                style: RectStyle {
                    fill: theme.background,
                    stroke: theme.background,
                    stroke_width: 0.0,
                },
            });
        }
        if !decorations.cartesian || !decorations.box_style.draws_grid() {
            return;
        }
        let device = *ctx.device();
        let mut segments = Vec::new();
        for x in ticks_for(device.window_x(), decorations.x_axis) {
            let px = device.internal_to_device(Point::new(x, device.window_y().min)).x;
            segments.push(LineSegment::new(
                DevicePoint::new(px, rect.min.y),
                DevicePoint::new(px, rect.max.y),
            ));
        }
        for y in ticks_for(device.window_y(), decorations.y_axis) {
            let py = device.internal_to_device(Point::new(device.window_x().min, y)).y;
            segments.push(LineSegment::new(
                DevicePoint::new(rect.min.x, py),
                DevicePoint::new(rect.max.x, py),
            ));
        }
        if !segments.is_empty() {
            ctx.push(RenderCommand::LineSegments {
                segments,
                style: LineStyle {
                    color: theme.grid,
                    width: 1.0,
                },
            });
        }
    }

    fn draw_frame(&self, ctx: &mut DrawContext<'_>, decorations: &Decorations<'_>) {
        let rect = ctx.plot_rect();
        let theme = decorations.theme;

        if let Some(title) = decorations.title {
            let position = DevicePoint::new(
                (rect.min.x + rect.max.x) * 0.5,
                rect.min.y - f64::from(TITLE_SIZE) - 6.0 - y_title_room(decorations),
            );
            ctx.text(
                position,
                title,
                TextStyle {
                    color: theme.titles,
                    size: TITLE_SIZE,
                    justify: 0.5,
                },
            );
        }

        if !decorations.cartesian || !decorations.box_style.draws_box() {
            return;
        }
        ctx.push(RenderCommand::Rect {
            rect,
            style: RectStyle {
                fill: crate::render::Color::TRANSPARENT,
                stroke: theme.axes,
                stroke_width: 1.0,
            },
        });
        if !decorations.box_style.draws_ticks() {
            return;
        }

        let device = *ctx.device();
        let label_style = |justify| TextStyle {
            color: theme.axes,
            size: LABEL_SIZE,
            justify,
        };
        let mut ticks = Vec::new();
        for x in ticks_for(device.window_x(), decorations.x_axis) {
            let px = device.internal_to_device(Point::new(x, device.window_y().min)).x;
            ticks.push(LineSegment::new(
                DevicePoint::new(px, rect.max.y),
                DevicePoint::new(px, rect.max.y - TICK_LENGTH),
            ));
            ctx.text(
                DevicePoint::new(px, rect.max.y + 4.0),
                decorations.x_axis.format_tick(x),
                label_style(0.5),
            );
        }
        for y in ticks_for(device.window_y(), decorations.y_axis) {
            let py = device.internal_to_device(Point::new(device.window_x().min, y)).y;
            ticks.push(LineSegment::new(
                DevicePoint::new(rect.min.x, py),
                DevicePoint::new(rect.min.x + TICK_LENGTH, py),
            ));
            ctx.text(
                DevicePoint::new(rect.min.x - 4.0, py - f64::from(LABEL_SIZE) * 0.5),
                decorations.y_axis.format_tick(y),
                label_style(1.0),
            );
        }
        if !ticks.is_empty() {
            ctx.push(RenderCommand::LineSegments {
                segments: ticks,
                style: LineStyle {
                    color: theme.axes,
                    width: 1.0,
                },
            });
        }

        let title_style = |justify| TextStyle {
            color: theme.titles,
            size: AXIS_TITLE_SIZE,
            justify,
        };
        if let Some(title) = decorations.x_axis.title() {
            ctx.text(
                DevicePoint::new(
                    (rect.min.x + rect.max.x) * 0.5,
                    rect.max.y + f64::from(LABEL_SIZE) + 10.0,
                ),
                title,
                title_style(0.5),
            );
        }
        if let Some(title) = decorations.y_axis.title() {
            ctx.text(
                DevicePoint::new(rect.min.x, rect.min.y - f64::from(AXIS_TITLE_SIZE) - 4.0),
                title,
                title_style(0.0),
            );
        }
    }
}

fn y_title_room(decorations: &Decorations<'_>) -> f64 {
    let has_y_title = decorations.cartesian
        && decorations.box_style.draws_ticks()
        && decorations.y_axis.title().is_some();
    if has_y_title {
        f64::from(AXIS_TITLE_SIZE) + 6.0
    } else {
        0.0
    }
}

fn ticks_for(window: Range, axis: &AxisConfig) -> Vec<f64> {
    let mut step = nice_step(window.span() / TARGET_TICKS as f64);
    if axis.scale().is_log() && window.span() >= 2.0 {
        step = step.max(1.0);
    }
    tick_values(window, step)
}

/// Round a raw step to 1, 2 or 5 times a power of ten.
pub(crate) fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of `step` inside `window`.
pub(crate) fn tick_values(window: Range, step: f64) -> Vec<f64> {
    const MAX_TICKS: usize = 100;
    let mut values = Vec::new();
    if !window.is_valid() || !step.is_finite() || step <= 0.0 {
        return values;
    }
    let tolerance = step * 1e-9;
    let mut index = (window.min / step).ceil();
    loop {
        let value = index * step;
        if value > window.max + tolerance || values.len() >= MAX_TICKS {
            break;
        }
        // Snap values like 0.30000000000000004 and -0.0.
        let snapped = if value.abs() < tolerance { 0.0 } else { value };
        values.push(snapped);
        index += 1.0;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderList;
    use crate::transform::{DeviceTransform, Identity};

    fn decorations<'a>(axis: &'a AxisConfig, theme: &'a Theme) -> Decorations<'a> {
        Decorations {
            title: Some("title"),
            x_axis: axis,
            y_axis: axis,
            box_style: BoxStyle::BoxTicksLabelsGrid,
            theme,
            cartesian: true,
        }
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(0.13), 0.2);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(-1.0), 1.0);
    }

    #[test]
    fn ticks_cover_window() {
        let ticks = tick_values(Range::new(-0.95, 1.0), 0.5);
        assert_eq!(ticks, vec![-0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn layout_leaves_room_for_labels() {
        let axis = AxisConfig::linear();
        let theme = Theme::default();
        let area = DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(400.0, 300.0));
        let viewport = BoxEngine::default().layout(area, &decorations(&axis, &theme));
        assert!(viewport.is_valid());
        assert!(viewport.x_min > 0.0 && viewport.x_max < 1.0);
        assert!(viewport.y_min > 0.0 && viewport.y_max < 1.0);

        let tiny = DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(20.0, 20.0));
        assert!(BoxEngine::default().layout(tiny, &decorations(&axis, &theme)).is_valid());
    }

    #[test]
    fn frame_draws_box_ticks_and_labels() {
        let axis = AxisConfig::linear().with_title("x");
        let theme = Theme::default();
        let deco = decorations(&axis, &theme);
        let area = DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(400.0, 300.0));
        let viewport = BoxEngine::default().layout(area, &deco);
        let device =
            DeviceTransform::new(area, viewport, Range::new(0.0, 10.0), Range::new(0.0, 1.0))
                .unwrap();
        let mut list = RenderList::new();
        let mut ctx = DrawContext::new(&Identity, device, &mut list);
        BoxEngine::default().draw_frame(&mut ctx, &deco);
        let texts: Vec<&str> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"title"));
        assert!(texts.contains(&"x"));
        assert!(texts.contains(&"10"));
        assert!(
            list.commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::Rect { .. }))
        );
    }
}
