use tracing::{debug, trace, warn};

use crate::event::{
    CursorStyle, InputEvent, Key, Modifiers, PlotEvent, PlotEventKind, PointerButton,
    ScrollDirection,
};
use crate::geom::DevicePoint;
use crate::gesture::GestureState;
use crate::interaction::scroll_scale;
use crate::plot::PlotId;

use super::{Canvas, CanvasHost};

impl Canvas {
    /// Feed one input event through the gesture machine.
    ///
    /// Region changes, redraw requests and cursor changes happen as side
    /// effects; notifications are delivered to subscribers before returning.
    pub fn handle_event(&mut self, event: InputEvent, host: &mut dyn CanvasHost) {
        let mut events = Vec::new();
        match event {
            InputEvent::PointerEnter {
                position,
                modifiers,
            }
            | InputEvent::PointerMove {
                position,
                modifiers,
            } => {
                self.sync_modifier(modifiers);
                self.pointer_moved(position, &mut events, host);
            }
            InputEvent::PointerLeave => self.pointer_left(&mut events),
            InputEvent::PointerDown {
                position,
                button,
                click_count,
                modifiers,
            } => {
                self.sync_modifier(modifiers);
                if button == PointerButton::Primary {
                    self.pointer_pressed(position, click_count, &mut events, host);
                }
            }
            InputEvent::PointerUp {
                position,
                button,
                modifiers,
            } => {
                self.sync_modifier(modifiers);
                if button == PointerButton::Primary {
                    self.pointer_released(position, &mut events, host);
                }
            }
            InputEvent::Scroll {
                position,
                direction,
                modifiers,
            } => {
                self.sync_modifier(modifiers);
                self.scrolled(position, direction, &mut events, host);
            }
            InputEvent::KeyPress(Key::Modifier(modifier)) if modifier == self.config.pan_modifier => {
                self.gesture.set_modifier_held(true);
            }
            InputEvent::KeyRelease(Key::Modifier(modifier))
                if modifier == self.config.pan_modifier =>
            {
                self.gesture.set_modifier_held(false);
            }
            InputEvent::KeyPress(_) | InputEvent::KeyRelease(_) => {}
            InputEvent::FocusLost => self.focus_lost(&mut events, host),
        }
        self.update_cursor(host);
        self.notify(&events);
    }

    fn sync_modifier(&mut self, modifiers: Modifiers) {
        self.gesture
            .set_modifier_held(modifiers.is_held(self.config.pan_modifier));
    }

    /// Hit-test the pointer and emit enter, motion and leave notifications.
    fn update_hover(&mut self, position: DevicePoint, events: &mut Vec<PlotEvent>) {
        let hit = self.hit_test(position);
        let previous = self.gesture.hover_target();
        if let Some(previous) = previous
            && hit != Some(previous)
        {
            events.push(PlotEvent {
                plot: previous,
                kind: PlotEventKind::CursorLeave,
            });
        }
        self.gesture.set_hover(hit);
        let Some(id) = hit else {
            return;
        };
        let Some(world) = self.plot(id).and_then(|plot| plot.world_at(position)) else {
            return;
        };
        let kind = if previous == Some(id) {
            trace!(plot = %id, x = world.x, y = world.y, "cursor motion");
            PlotEventKind::CursorMotion(world)
        } else {
            debug!(plot = %id, "cursor entered plot");
            PlotEventKind::CursorEnter(world)
        };
        events.push(PlotEvent { plot: id, kind });
    }

    fn pointer_moved(
        &mut self,
        position: DevicePoint,
        events: &mut Vec<PlotEvent>,
        host: &mut dyn CanvasHost,
    ) {
        self.update_hover(position, events);
        match self.gesture.state() {
            GestureState::AwaitingGesture { target, origin } => {
                self.classify_gesture(target, origin, position, events, host);
            }
            GestureState::Selecting { target, .. } => {
                let Some(plot) = self.plot(target) else {
                    return;
                };
                let current = plot.clamp_to_box(position);
                self.gesture.update_current(current);
                host.request_redraw();
            }
            GestureState::Panning {
                target, current, ..
            } => self.pan_step(target, current, position, events, host),
            GestureState::Idle | GestureState::Hovering(_) => {}
        }
    }

    /// Decide between panning and selecting using the modifier state of
    /// this move.
    fn classify_gesture(
        &mut self,
        target: PlotId,
        origin: DevicePoint,
        position: DevicePoint,
        events: &mut Vec<PlotEvent>,
        host: &mut dyn CanvasHost,
    ) {
        let modifier = self.gesture.modifier_held();
        let Some(index) = self.index_of(target) else {
            self.gesture.abort();
            return;
        };
        let plot = &mut self.plots[index];
        if modifier && plot.can_pan() {
            debug!(plot = %target, "pan started");
            self.gesture.start_panning(target, origin);
            self.pan_step(target, origin, position, events, host);
        } else if !modifier && plot.can_select() {
            let current = plot.clamp_to_box(position);
            debug!(plot = %target, "selection started");
            self.gesture.start_selecting(target, origin, current);
            host.request_redraw();
        }
    }

    fn pan_step(
        &mut self,
        target: PlotId,
        from: DevicePoint,
        to: DevicePoint,
        events: &mut Vec<PlotEvent>,
        host: &mut dyn CanvasHost,
    ) {
        if from == to {
            return;
        }
        let Some(plot) = self.plot_mut(target) else {
            return;
        };
        match plot.apply_pan(from, to) {
            Ok(Some((from_world, to_world))) => {
                trace!(plot = %target, x = to_world.x, y = to_world.y, "pan step");
                events.push(PlotEvent {
                    plot: target,
                    kind: PlotEventKind::PanStep {
                        from: from_world,
                        to: to_world,
                    },
                });
            }
            Ok(None) => {}
            Err(error) => warn!(plot = %target, %error, "pan step rejected"),
        }
        self.gesture.update_current(to);
        host.request_redraw();
    }

    fn pointer_left(&mut self, events: &mut Vec<PlotEvent>) {
        if let Some(previous) = self.gesture.hover_target() {
            events.push(PlotEvent {
                plot: previous,
                kind: PlotEventKind::CursorLeave,
            });
        }
        self.gesture.set_hover(None);
    }

    fn pointer_pressed(
        &mut self,
        position: DevicePoint,
        click_count: u32,
        events: &mut Vec<PlotEvent>,
        host: &mut dyn CanvasHost,
    ) {
        if self.gesture.active_target().is_some() {
            // The previous release never arrived.
            let dropped = self.gesture.release();
            debug!(?dropped, "new press drops the unfinished gesture");
            host.request_redraw();
        }
        self.update_hover(position, events);
        let Some(target) = self.gesture.hover_target() else {
            return;
        };
        let modifier = self.gesture.modifier_held();
        let Some(plot) = self.plot_mut(target) else {
            return;
        };
        if click_count >= 2 && !modifier && plot.can_select() {
            if let Some((world, changed)) = plot.apply_double_press(position) {
                debug!(plot = %target, changed, "double press");
                events.push(PlotEvent {
                    plot: target,
                    kind: PlotEventKind::DoublePress(world),
                });
                if changed {
                    events.push(PlotEvent {
                        plot: target,
                        kind: PlotEventKind::RegionChanged(plot.get_region()),
                    });
                }
            }
            host.request_redraw();
            return;
        }
        let pannable = modifier && plot.can_pan();
        if pannable || plot.can_select() {
            self.gesture.press(target, position);
        }
    }

    fn pointer_released(
        &mut self,
        position: DevicePoint,
        events: &mut Vec<PlotEvent>,
        host: &mut dyn CanvasHost,
    ) {
        self.update_hover(position, events);
        match self.gesture.release() {
            GestureState::Selecting { target, origin, .. } => {
                self.finish_selection(target, origin, position, events);
                host.request_redraw();
            }
            GestureState::Panning {
                target,
                origin,
                current,
            } => {
                debug!(plot = %target, "pan finished");
                if current != origin
                    && let Some(plot) = self.plot(target)
                {
                    events.push(PlotEvent {
                        plot: target,
                        kind: PlotEventKind::RegionChanged(plot.get_region()),
                    });
                }
                host.request_redraw();
            }
            GestureState::AwaitingGesture { .. } | GestureState::Idle | GestureState::Hovering(_) => {}
        }
    }

    fn finish_selection(
        &mut self,
        target: PlotId,
        origin: DevicePoint,
        position: DevicePoint,
        events: &mut Vec<PlotEvent>,
    ) {
        let Some(plot) = self.plot_mut(target) else {
            return;
        };
        let origin = plot.clamp_to_box(origin);
        let current = plot.clamp_to_box(position);
        if origin == current {
            debug!(plot = %target, "zero-size selection discarded");
            return;
        }
        match plot.apply_selection(origin, current) {
            Ok(Some((selection, changed))) => {
                debug!(plot = %target, changed, "selection committed");
                events.push(PlotEvent {
                    plot: target,
                    kind: PlotEventKind::SelectRegion(selection),
                });
                if changed {
                    events.push(PlotEvent {
                        plot: target,
                        kind: PlotEventKind::RegionChanged(plot.get_region()),
                    });
                }
            }
            Ok(None) => debug!(plot = %target, "empty selection discarded"),
            Err(error) => warn!(plot = %target, %error, "selection rejected, overlay discarded"),
        }
    }

    fn scrolled(
        &mut self,
        position: DevicePoint,
        direction: ScrollDirection,
        events: &mut Vec<PlotEvent>,
        host: &mut dyn CanvasHost,
    ) {
        self.update_hover(position, events);
        if self.gesture.active_target().is_some() {
            return;
        }
        let Some(target) = self.gesture.hover_target() else {
            return;
        };
        let Some(plot) = self.plot_mut(target) else {
            return;
        };
        if !plot.can_zoom() {
            return;
        }
        let scale = scroll_scale(direction, plot.gestures().zoom_factor());
        match plot.apply_zoom(position, scale) {
            Ok(Some((anchor, changed))) => {
                debug!(plot = %target, scale, "zoom step");
                events.push(PlotEvent {
                    plot: target,
                    kind: PlotEventKind::ZoomStep { anchor, scale },
                });
                if changed {
                    events.push(PlotEvent {
                        plot: target,
                        kind: PlotEventKind::RegionChanged(plot.get_region()),
                    });
                }
                host.request_redraw();
            }
            Ok(None) => {}
            Err(error) => warn!(plot = %target, %error, "zoom step rejected"),
        }
    }

    fn focus_lost(&mut self, events: &mut Vec<PlotEvent>, host: &mut dyn CanvasHost) {
        let hovered = self.gesture.hover_target();
        let aborted = self.gesture.abort();
        if let Some(previous) = hovered {
            events.push(PlotEvent {
                plot: previous,
                kind: PlotEventKind::CursorLeave,
            });
        }
        if matches!(
            aborted,
            GestureState::Selecting { .. } | GestureState::Panning { .. }
        ) {
            debug!(?aborted, "gesture aborted on focus loss");
            host.request_redraw();
        }
    }

    fn desired_cursor(&mut self) -> CursorStyle {
        match self.gesture.state() {
            GestureState::Panning { .. } => return CursorStyle::Grabbing,
            GestureState::Selecting { .. } => return CursorStyle::Crosshair,
            _ => {}
        }
        let Some(target) = self
            .gesture
            .active_target()
            .or(self.gesture.hover_target())
        else {
            return CursorStyle::Default;
        };
        let modifier = self.gesture.modifier_held();
        let pointer_down = self.gesture.pointer_down();
        let Some(plot) = self.plot_mut(target) else {
            return CursorStyle::Default;
        };
        if !(modifier && plot.can_pan()) {
            CursorStyle::Crosshair
        } else if pointer_down {
            CursorStyle::Grabbing
        } else {
            CursorStyle::Grab
        }
    }

    fn update_cursor(&mut self, host: &mut dyn CanvasHost) {
        let cursor = self.desired_cursor();
        if cursor != self.cursor {
            self.cursor = cursor;
            host.set_cursor(cursor);
        }
    }
}
