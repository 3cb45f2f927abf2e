use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{DevicePoint, DeviceRect};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand,
    RenderList, TextStyle,
};

pub(crate) fn paint_list(list: &RenderList, window: &mut Window, cx: &mut App) {
    let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
    for command in list.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clip_stack.push(ContentMask {
                    bounds: to_bounds(*rect),
                });
            }
            RenderCommand::ClipEnd => {
                clip_stack.pop();
            }
            RenderCommand::LineSegments { segments, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_lines(window, segments, *style);
                });
            }
            RenderCommand::Points { points, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_points(window, points, *style);
                });
            }
            RenderCommand::Rect { rect, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_rect(window, *rect, *style);
                });
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                with_clip(window, &clip_stack, |window| {
                    paint_text(window, cx, *position, text, style);
                });
            }
        }
    }
}

fn paint_lines(window: &mut Window, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    for segment in segments {
        builder.move_to(to_point(segment.start));
        builder.line_to(to_point(segment.end));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_points(window: &mut Window, points: &[DevicePoint], style: MarkerStyle) {
    if points.is_empty() {
        return;
    }
    let half = f64::from(style.size.max(2.0)) * 0.5;
    match style.shape {
        MarkerShape::Circle | MarkerShape::Square => {
            let corner = if style.shape == MarkerShape::Circle {
                half as f32
            } else {
                0.0
            };
            for center in points {
                window.paint_quad(quad(
                    marker_bounds(*center, half),
                    Corners::all(px(corner)),
                    to_rgba(style.color),
                    Edges::all(px(0.0)),
                    to_rgba(style.color),
                    BorderStyle::default(),
                ));
            }
        }
        MarkerShape::Cross => {
            let mut builder = PathBuilder::stroke(px(1.0));
            for center in points {
                builder.move_to(to_point(DevicePoint::new(center.x - half, center.y)));
                builder.line_to(to_point(DevicePoint::new(center.x + half, center.y)));
                builder.move_to(to_point(DevicePoint::new(center.x, center.y - half)));
                builder.line_to(to_point(DevicePoint::new(center.x, center.y + half)));
            }
            if let Ok(path) = builder.build() {
                window.paint_path(path, to_rgba(style.color));
            }
        }
    }
}

fn marker_bounds(center: DevicePoint, half: f64) -> Bounds<Pixels> {
    to_bounds(DeviceRect::new(
        DevicePoint::new(center.x - half, center.y - half),
        DevicePoint::new(center.x + half, center.y + half),
    ))
}

fn paint_rect(window: &mut Window, rect: DeviceRect, style: RectStyle) {
    if style.fill.a == 0.0 && (style.stroke.a == 0.0 || style.stroke_width <= 0.0) {
        return;
    }
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width.max(0.0))),
        to_rgba(style.stroke),
        BorderStyle::default(),
    ));
}

/// Paint a single line of text whose top edge sits at `position.y`; the
/// shaped width decides where the justified text starts.
fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: DevicePoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let shift = f32::from(shaped.width) * style.justify.clamp(0.0, 1.0);
    let origin = point(px(position.x as f32 - shift), px(position.y as f32));
    let _ = shaped.paint(origin, line_height, window, cx);
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_point(device: DevicePoint) -> gpui::Point<Pixels> {
    point(px(device.x as f32), px(device.y as f32))
}

fn to_bounds(rect: DeviceRect) -> Bounds<Pixels> {
    Bounds::from_corners(to_point(rect.min), to_point(rect.max))
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
