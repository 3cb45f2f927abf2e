use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{
    FocusHandle, Modifiers as GpuiModifiers, ModifiersChangedEvent, MouseButton, MouseDownEvent,
    MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollWheelEvent, Subscription, Window, canvas,
    div, px,
};
use tracing::trace;

use crate::canvas::{Canvas, CanvasHost};
use crate::event::{
    CursorStyle, InputEvent, Key, Modifier, Modifiers, PointerButton, ScrollDirection,
};
use crate::geom::{DevicePoint, DeviceRect};

use super::paint::{paint_list, to_hsla};

/// A GPUI view that renders a [`Canvas`] and feeds it pointer, scroll and
/// modifier input.
///
/// Gesture handling lives in the canvas; this view only translates GPUI
/// events into [`InputEvent`]s and applies the redraw and cursor requests
/// the canvas makes.
pub struct GpuiCanvasView {
    canvas: Arc<RwLock<Canvas>>,
    focus_handle: FocusHandle,
    cursor: CursorStyle,
    held: Modifiers,
    _blur: Subscription,
}

impl GpuiCanvasView {
    /// Create a view for `canvas`.
    ///
    /// The view takes focus on the first press; losing focus aborts any
    /// running gesture.
    pub fn new(canvas: Canvas, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let focus_handle = cx.focus_handle();
        let blur = cx.on_blur(&focus_handle, window, |this, _window, cx| {
            this.dispatch(InputEvent::FocusLost, cx);
        });
        Self {
            canvas: Arc::new(RwLock::new(canvas)),
            focus_handle,
            cursor: CursorStyle::Default,
            held: Modifiers::none(),
            _blur: blur,
        }
    }

    /// Get a handle for reading and mutating the canvas.
    ///
    /// Mutations made through the handle show up on the next frame.
    pub fn canvas_handle(&self) -> CanvasHandle {
        CanvasHandle {
            canvas: Arc::clone(&self.canvas),
        }
    }

    fn dispatch(&mut self, event: InputEvent, cx: &mut Context<Self>) {
        let mut host = ViewHost::default();
        self.canvas
            .write()
            .expect("canvas lock")
            .handle_event(event, &mut host);
        if let Some(cursor) = host.cursor {
            self.cursor = cursor;
            host.redraw = true;
        }
        if host.redraw {
            cx.notify();
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle);
        let Some(button) = pointer_button(ev.button) else {
            return;
        };
        self.dispatch(
            InputEvent::PointerDown {
                position: device_point(ev.position),
                button,
                click_count: ev.click_count as u32,
                modifiers: modifiers(&ev.modifiers),
            },
            cx,
        );
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let Some(button) = pointer_button(ev.button) else {
            return;
        };
        self.dispatch(
            InputEvent::PointerUp {
                position: device_point(ev.position),
                button,
                modifiers: modifiers(&ev.modifiers),
            },
            cx,
        );
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        self.dispatch(
            InputEvent::PointerMove {
                position: device_point(ev.position),
                modifiers: modifiers(&ev.modifiers),
            },
            cx,
        );
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let dead_zone = self.canvas.read().expect("canvas lock").config().scroll_dead_zone_px;
        let delta = f32::from(ev.delta.pixel_delta(px(16.0)).y);
        if delta.abs() < dead_zone {
            trace!(delta, "scroll delta inside dead zone");
            return;
        }
        let direction = if delta > 0.0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        };
        self.dispatch(
            InputEvent::Scroll {
                position: device_point(ev.position),
                direction,
                modifiers: modifiers(&ev.modifiers),
            },
            cx,
        );
    }

    fn on_modifiers_changed(&mut self, ev: &ModifiersChangedEvent, cx: &mut Context<Self>) {
        let next = modifiers(&ev.modifiers);
        for modifier in [Modifier::Control, Modifier::Shift, Modifier::Alt] {
            let (was, is) = (self.held.is_held(modifier), next.is_held(modifier));
            if was != is {
                let key = Key::Modifier(modifier);
                let event = if is {
                    InputEvent::KeyPress(key)
                } else {
                    InputEvent::KeyRelease(key)
                };
                self.dispatch(event, cx);
            }
        }
        self.held = next;
    }
}

impl Render for GpuiCanvasView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let canvas_state = Arc::clone(&self.canvas);
        let background = self.canvas.read().expect("canvas lock").config().background;

        div()
            .id("sciplot-canvas")
            .size_full()
            .track_focus(&self.focus_handle)
            .bg(to_hsla(background))
            .cursor(cursor_style(self.cursor))
            .child(
                canvas(
                    move |bounds, _, _| {
                        canvas_state
                            .write()
                            .expect("canvas lock")
                            .render(device_rect(bounds))
                    },
                    move |_, list, window, cx| {
                        paint_list(&list, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up(
                MouseButton::Right,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
            .on_modifiers_changed(cx.listener(|this, ev, _, cx| {
                this.on_modifiers_changed(ev, cx);
            }))
            .on_hover(cx.listener(|this, hovered: &bool, _, cx| {
                if !*hovered {
                    this.dispatch(InputEvent::PointerLeave, cx);
                }
            }))
    }
}

/// A handle for reading and mutating a [`Canvas`] held inside a
/// `GpuiCanvasView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct CanvasHandle {
    canvas: Arc<RwLock<Canvas>>,
}

impl CanvasHandle {
    /// Read the canvas.
    ///
    /// The canvas is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Canvas) -> R) -> R {
        let canvas = self.canvas.read().expect("canvas lock");
        f(&canvas)
    }

    /// Mutate the canvas.
    ///
    /// The canvas is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Canvas) -> R) -> R {
        let mut canvas = self.canvas.write().expect("canvas lock");
        f(&mut canvas)
    }
}

/// Collects what the canvas asked for during one dispatch.
#[derive(Debug, Default)]
struct ViewHost {
    redraw: bool,
    cursor: Option<CursorStyle>,
}

impl CanvasHost for ViewHost {
    fn request_redraw(&mut self) {
        self.redraw = true;
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = Some(cursor);
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Navigate(_) => None,
    }
}

fn modifiers(modifiers: &GpuiModifiers) -> Modifiers {
    Modifiers {
        control: modifiers.control,
        shift: modifiers.shift,
        alt: modifiers.alt,
    }
}

fn cursor_style(cursor: CursorStyle) -> gpui::CursorStyle {
    match cursor {
        CursorStyle::Default => gpui::CursorStyle::Arrow,
        CursorStyle::Crosshair => gpui::CursorStyle::Crosshair,
        CursorStyle::Grab => gpui::CursorStyle::OpenHand,
        CursorStyle::Grabbing => gpui::CursorStyle::ClosedHand,
    }
}

fn device_point(point: Point<Pixels>) -> DevicePoint {
    DevicePoint::new(f64::from(f32::from(point.x)), f64::from(f32::from(point.y)))
}

fn device_rect(bounds: gpui::Bounds<Pixels>) -> DeviceRect {
    DeviceRect::new(
        device_point(bounds.origin),
        device_point(bounds.bottom_right()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_names_map_to_platform_cursors() {
        assert_eq!(cursor_style(CursorStyle::Default), gpui::CursorStyle::Arrow);
        assert_eq!(cursor_style(CursorStyle::Grab), gpui::CursorStyle::OpenHand);
        assert_eq!(
            cursor_style(CursorStyle::Grabbing),
            gpui::CursorStyle::ClosedHand
        );
    }

    #[test]
    fn view_host_records_requests() {
        let mut host = ViewHost::default();
        host.set_cursor(CursorStyle::Grab);
        host.request_redraw();
        assert!(host.redraw);
        assert_eq!(host.cursor, Some(CursorStyle::Grab));
    }

    #[test]
    fn only_known_buttons_are_forwarded() {
        assert_eq!(pointer_button(MouseButton::Left), Some(PointerButton::Primary));
        assert_eq!(
            pointer_button(MouseButton::Navigate(gpui::NavigationDirection::Back)),
            None
        );
    }
}
