use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::data::Dataset2d;
use crate::event::{InputEvent, Key, Modifier, Modifiers, PointerButton, ScrollDirection};
use crate::geom::Point;
use crate::kinds::Plot2d;
use crate::view::Placement;

#[derive(Debug, Default)]
struct RecordingHost {
    redraws: usize,
    cursors: Vec<CursorStyle>,
}

impl CanvasHost for RecordingHost {
    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursors.push(cursor);
    }
}

struct Fixture {
    canvas: Canvas,
    host: RecordingHost,
    plot: PlotId,
    events: Rc<RefCell<Vec<PlotEvent>>>,
}

fn bounds() -> DeviceRect {
    DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(400.0, 300.0))
}

fn line_plot() -> Plot {
    let data = Dataset2d::new(vec![0.0, 5.0, 10.0], vec![0.0, 10.0, 5.0]).unwrap();
    Plot::new(Plot2d::with_dataset(data))
}

fn fixture() -> Fixture {
    let mut canvas = Canvas::new();
    let plot = canvas.add_plot(line_plot());
    canvas.render(bounds());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    canvas.subscribe(move |event| {
        sink.borrow_mut().push(*event);
        Ok(())
    });
    Fixture {
        canvas,
        host: RecordingHost::default(),
        plot,
        events,
    }
}

impl Fixture {
    fn send(&mut self, event: InputEvent) {
        self.canvas.handle_event(event, &mut self.host);
    }

    fn at(&self, x: f64, y: f64) -> DevicePoint {
        self.canvas
            .plot(self.plot)
            .unwrap()
            .world_to_device(Point::new(x, y))
    }

    fn move_to(&mut self, position: DevicePoint) {
        self.move_with(position, Modifiers::none());
    }

    fn move_with(&mut self, position: DevicePoint, modifiers: Modifiers) {
        self.send(InputEvent::PointerMove {
            position,
            modifiers,
        });
    }

    fn press(&mut self, position: DevicePoint, click_count: u32) {
        self.press_with(position, click_count, Modifiers::none());
    }

    fn press_with(&mut self, position: DevicePoint, click_count: u32, modifiers: Modifiers) {
        self.send(InputEvent::PointerDown {
            position,
            button: PointerButton::Primary,
            click_count,
            modifiers,
        });
    }

    fn release(&mut self, position: DevicePoint) {
        self.release_with(position, Modifiers::none());
    }

    fn release_with(&mut self, position: DevicePoint, modifiers: Modifiers) {
        self.send(InputEvent::PointerUp {
            position,
            button: PointerButton::Primary,
            modifiers,
        });
    }

    fn scroll(&mut self, position: DevicePoint, direction: ScrollDirection) {
        self.send(InputEvent::Scroll {
            position,
            direction,
            modifiers: Modifiers::none(),
        });
    }

    fn drag(&mut self, from: DevicePoint, to: DevicePoint) {
        self.move_to(from);
        self.press(from, 1);
        self.move_to(to);
        self.release(to);
    }

    fn region(&self) -> Extent {
        self.canvas.get_region(self.plot).unwrap()
    }

    fn count(&self, matches: impl Fn(&PlotEventKind) -> bool) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches(&event.kind))
            .count()
    }

    fn region_changes(&self) -> usize {
        self.count(|kind| matches!(kind, PlotEventKind::RegionChanged(_)))
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

fn same_extent(a: Extent, b: Extent) -> bool {
    close(a.x_min, b.x_min) && close(a.x_max, b.x_max) && close(a.y_min, b.y_min) && close(a.y_max, b.y_max)
}

#[test]
fn box_select_changes_region_once_on_release() {
    let mut f = fixture();
    let start = f.at(2.0, 8.0);
    let middle = f.at(3.0, 6.0);
    let end = f.at(4.0, 4.0);

    f.move_to(start);
    f.press(start, 1);
    f.move_to(middle);
    f.move_to(end);
    assert!(f.canvas.gesture().is_selecting());
    assert_eq!(f.region_changes(), 0);

    f.release(end);
    assert_eq!(f.region_changes(), 1);
    assert_eq!(f.count(|kind| matches!(kind, PlotEventKind::SelectRegion(_))), 1);
    assert!(same_extent(f.region(), Extent::new(2.0, 4.0, 4.0, 8.0)));
    assert_eq!(f.canvas.gesture().state(), GestureState::Hovering(f.plot));
    assert!(matches!(
        f.events.borrow().last().map(|event| event.kind),
        Some(PlotEventKind::RegionChanged(_))
    ));
}

#[test]
fn selection_direction_does_not_matter() {
    let mut f = fixture();
    f.drag(f.at(4.0, 4.0), f.at(2.0, 8.0));
    assert!(same_extent(f.region(), Extent::new(2.0, 4.0, 4.0, 8.0)));
}

#[test]
fn drag_past_the_box_is_clamped_to_the_edge() {
    let mut f = fixture();
    let before = f.region();
    let start = f.at(5.0, 5.0);
    f.drag(start, DevicePoint::new(1_000.0, 1_000.0));
    let after = f.region();
    assert!(close(after.x_min, 5.0));
    assert!(close(after.y_max, 5.0));
    assert!(close(after.x_max, before.x_max));
    assert!(close(after.y_min, before.y_min));
}

#[test]
fn drag_past_the_top_left_is_clamped_to_the_edge() {
    let mut f = fixture();
    let before = f.region();
    let start = f.at(5.0, 5.0);
    f.drag(start, DevicePoint::new(-1_000.0, -1_000.0));
    let after = f.region();
    assert!(close(after.x_min, before.x_min));
    assert!(close(after.y_max, before.y_max));
    assert!(close(after.x_max, 5.0));
    assert!(close(after.y_min, 5.0));
}

#[test]
fn new_press_replaces_a_gesture_whose_release_was_lost() {
    let mut f = fixture();
    let (a, b, c, d) = (f.at(1.0, 1.0), f.at(3.0, 3.0), f.at(6.0, 6.0), f.at(8.0, 8.0));
    f.move_to(a);
    f.press(a, 1);
    f.move_to(b);
    assert!(f.canvas.gesture().is_selecting());
    f.press(c, 1);
    assert_eq!(f.canvas.gesture().drag_origin(), Some(c));
    f.move_to(d);
    f.release(d);
    assert!(same_extent(f.region(), Extent::new(6.0, 8.0, 6.0, 8.0)));
    assert_eq!(f.region_changes(), 1);
    assert!(!f.canvas.gesture().pointer_down());
}

#[test]
fn selection_overlay_stays_inside_the_box() {
    let mut f = fixture();
    let start = f.at(5.0, 5.0);
    f.move_to(start);
    f.press(start, 1);
    f.move_to(DevicePoint::new(-50.0, -50.0));
    let list = f.canvas.render(bounds());
    let rect = f.canvas.plot(f.plot).unwrap().plot_rect().unwrap();
    let Some(RenderCommand::Rect { rect: overlay, style }) = list.commands().last() else {
        panic!("expected a selection overlay");
    };
    assert_eq!(overlay.min, rect.min);
    assert_eq!(style.stroke, Color::BLACK);
    assert_eq!(style.stroke_width, 2.0);
}

#[test]
fn double_press_after_box_select_restores_the_full_extent() {
    let mut f = fixture();
    let full = f.region();
    f.drag(f.at(2.0, 8.0), f.at(4.0, 4.0));
    assert!(!same_extent(f.region(), full));

    let point = f.at(3.0, 6.0);
    f.press(point, 1);
    f.release(point);
    f.press(point, 2);
    f.release(point);

    assert!(same_extent(f.region(), full));
    assert_eq!(f.count(|kind| matches!(kind, PlotEventKind::DoublePress(_))), 1);
    assert_eq!(f.region_changes(), 2);
}

#[test]
fn zero_size_drag_is_discarded() {
    let mut f = fixture();
    let before = f.region();
    let point = f.at(5.0, 5.0);
    f.move_to(point);
    f.press(point, 1);
    f.move_to(point);
    f.release(point);
    assert_eq!(f.region(), before);
    assert_eq!(f.region_changes(), 0);
    assert_eq!(f.count(|kind| matches!(kind, PlotEventKind::SelectRegion(_))), 0);
}

#[test]
fn zoom_in_then_out_restores_the_region() {
    let mut f = fixture();
    let before = f.region();
    let anchor = f.at(7.5, 2.5);
    let world_before = f.canvas.plot(f.plot).unwrap().device_to_world(anchor);

    f.scroll(anchor, ScrollDirection::Up);
    let zoomed = f.region();
    assert!(zoomed.x_max - zoomed.x_min < before.x_max - before.x_min);
    let world_after = f.canvas.plot(f.plot).unwrap().device_to_world(anchor);
    assert!(close(world_before.x, world_after.x));
    assert!(close(world_before.y, world_after.y));

    f.scroll(anchor, ScrollDirection::Down);
    assert!(same_extent(f.region(), before));
    assert_eq!(f.count(|kind| matches!(kind, PlotEventKind::ZoomStep { .. })), 2);
}

#[test]
fn scroll_is_ignored_during_a_selection() {
    let mut f = fixture();
    let before = f.region();
    let start = f.at(2.0, 2.0);
    f.move_to(start);
    f.press(start, 1);
    f.move_to(f.at(3.0, 3.0));
    f.scroll(start, ScrollDirection::Up);
    assert_eq!(f.region(), before);
}

#[test]
fn zoom_respects_gesture_config() {
    let mut f = fixture();
    f.canvas
        .plot_mut(f.plot)
        .unwrap()
        .gestures_mut()
        .set_zoomable(false);
    let before = f.region();
    let anchor = f.at(5.0, 5.0);
    f.move_to(anchor);
    f.scroll(anchor, ScrollDirection::Up);
    assert_eq!(f.region(), before);
}

#[test]
fn modifier_drag_pans_the_window() {
    let mut f = fixture();
    let before = f.region();
    let control = Modifiers::only(Modifier::Control);
    let start = f.at(5.0, 5.0);
    let end = f.at(6.0, 5.0);

    f.move_with(start, control);
    f.press_with(start, 1, control);
    f.move_with(DevicePoint::new((start.x + end.x) * 0.5, start.y), control);
    f.move_with(end, control);
    assert!(f.canvas.gesture().is_panning());
    assert_eq!(f.region_changes(), 0);
    f.release_with(end, control);

    let after = f.region();
    assert!(close(after.x_min, before.x_min - 1.0));
    assert!(close(after.x_max, before.x_max - 1.0));
    assert!(close(after.y_min, before.y_min));
    assert_eq!(f.count(|kind| matches!(kind, PlotEventKind::PanStep { .. })), 2);
    assert_eq!(f.region_changes(), 1);
}

#[test]
fn failing_handler_does_not_break_the_gesture() {
    let mut f = fixture();
    f.canvas
        .subscribe(|_| Err("subscriber exploded".into()));
    f.drag(f.at(2.0, 8.0), f.at(4.0, 4.0));
    assert_eq!(f.region_changes(), 1);
    assert_eq!(f.canvas.gesture().state(), GestureState::Hovering(f.plot));
}

#[test]
fn unsubscribed_handler_is_not_called() {
    let mut f = fixture();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let id = f.canvas.subscribe(move |_| {
        *counter.borrow_mut() += 1;
        Ok(())
    });
    assert!(f.canvas.unsubscribe(id));
    assert!(!f.canvas.unsubscribe(id));
    f.move_to(f.at(5.0, 5.0));
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn focus_loss_aborts_the_selection() {
    let mut f = fixture();
    let before = f.region();
    let start = f.at(2.0, 8.0);
    f.move_to(start);
    f.press(start, 1);
    f.move_to(f.at(4.0, 4.0));
    f.send(InputEvent::FocusLost);
    assert_eq!(f.canvas.gesture().state(), GestureState::Idle);
    assert!(!f.canvas.gesture().pointer_down());

    f.release(f.at(4.0, 4.0));
    assert_eq!(f.region(), before);
    assert_eq!(f.region_changes(), 0);
}

#[test]
fn hover_notifications_follow_the_pointer() {
    let mut f = fixture();
    f.move_to(f.at(5.0, 5.0));
    f.move_to(f.at(6.0, 5.0));
    f.move_to(DevicePoint::new(2.0, 2.0));
    let kinds: Vec<_> = f.events.borrow().iter().map(|event| event.kind).collect();
    assert!(matches!(kinds[0], PlotEventKind::CursorEnter(_)));
    assert!(matches!(kinds[1], PlotEventKind::CursorMotion(point) if close(point.x, 6.0)));
    assert_eq!(kinds[2], PlotEventKind::CursorLeave);
    assert_eq!(f.canvas.gesture().state(), GestureState::Idle);
}

#[test]
fn cursor_tracks_hover_modifier_and_pan() {
    let mut f = fixture();
    let inside = f.at(5.0, 5.0);
    f.move_to(inside);
    assert_eq!(f.canvas.cursor(), CursorStyle::Crosshair);

    f.send(InputEvent::KeyPress(Key::Modifier(Modifier::Control)));
    assert_eq!(f.canvas.cursor(), CursorStyle::Grab);

    let control = Modifiers::only(Modifier::Control);
    f.press_with(inside, 1, control);
    assert_eq!(f.canvas.cursor(), CursorStyle::Grabbing);
    f.move_with(f.at(6.0, 5.0), control);
    assert!(f.canvas.gesture().is_panning());

    f.send(InputEvent::KeyRelease(Key::Modifier(Modifier::Control)));
    assert_eq!(f.canvas.cursor(), CursorStyle::Grabbing);

    f.release(inside);
    assert_eq!(f.canvas.cursor(), CursorStyle::Crosshair);

    f.move_to(DevicePoint::new(2.0, 2.0));
    assert_eq!(f.canvas.cursor(), CursorStyle::Default);
    assert_eq!(
        f.host.cursors,
        [
            CursorStyle::Crosshair,
            CursorStyle::Grab,
            CursorStyle::Grabbing,
            CursorStyle::Crosshair,
            CursorStyle::Default,
        ]
    );
}

#[test]
fn release_with_modifier_shows_grab() {
    let mut f = fixture();
    let control = Modifiers::only(Modifier::Control);
    let start = f.at(5.0, 5.0);
    f.move_with(start, control);
    f.press_with(start, 1, control);
    f.move_with(f.at(6.0, 5.0), control);
    f.release_with(f.at(6.0, 5.0), control);
    assert_eq!(f.canvas.cursor(), CursorStyle::Grab);
}

#[test]
fn modifier_key_off_plot_has_no_effect() {
    let mut f = fixture();
    f.move_to(DevicePoint::new(2.0, 2.0));
    f.send(InputEvent::KeyPress(Key::Modifier(Modifier::Control)));
    assert_eq!(f.canvas.cursor(), CursorStyle::Default);
    assert!(f.host.cursors.is_empty());
}

#[test]
fn topmost_plot_wins_the_hit_test() {
    let mut canvas = Canvas::new();
    let bottom = canvas.add_plot(line_plot());
    let top = canvas.add_plot(line_plot());
    let left = canvas.add_plot(
        line_plot().with_placement(Placement::new(0.0, 0.0, 0.5, 1.0).unwrap()),
    );
    canvas.render(bounds());
    let mut host = RecordingHost::default();

    canvas.handle_event(
        InputEvent::PointerMove {
            position: DevicePoint::new(350.0, 150.0),
            modifiers: Modifiers::none(),
        },
        &mut host,
    );
    assert_eq!(canvas.gesture().hover_target(), Some(top));
    assert_ne!(canvas.gesture().hover_target(), Some(bottom));

    canvas.handle_event(
        InputEvent::PointerMove {
            position: DevicePoint::new(120.0, 150.0),
            modifiers: Modifiers::none(),
        },
        &mut host,
    );
    assert_eq!(canvas.gesture().hover_target(), Some(left));
}

#[test]
fn unknown_plot_is_an_error() {
    let mut f = fixture();
    let removed = f.canvas.remove_plot(f.plot).unwrap();
    assert_eq!(
        f.canvas.get_region(removed.id()),
        Err(PlotError::UnknownPlot(removed.id()))
    );
    assert!(
        f.canvas
            .set_region(removed.id(), Extent::new(0.0, 1.0, 0.0, 1.0))
            .is_err()
    );
}

#[test]
fn programmatic_region_change_notifies() {
    let mut f = fixture();
    assert!(f.canvas.set_region(f.plot, Extent::new(1.0, 2.0, 1.0, 2.0)).unwrap());
    assert!(!f.canvas.set_region(f.plot, Extent::new(1.0, 1.0, 1.0, 2.0)).unwrap());
    assert_eq!(f.region_changes(), 1);
}
