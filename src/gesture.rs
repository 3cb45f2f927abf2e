//! Gesture state shared by all plots of a canvas.
//!
//! Only one plot can own a gesture at a time. The machine stores what the
//! dispatcher needs between events; the dispatcher in `canvas` drives the
//! transitions.

use crate::geom::DevicePoint;
use crate::plot::PlotId;

/// Classified pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// Pointer outside every plot, no button held.
    Idle,
    /// Pointer over a plot, no button held.
    Hovering(PlotId),
    /// Primary button down over a plot; the gesture is classified on the
    /// first move using the modifier state at that moment.
    AwaitingGesture {
        /// Plot owning the gesture.
        target: PlotId,
        /// Device position of the press.
        origin: DevicePoint,
    },
    /// Box selection in progress.
    Selecting {
        /// Plot owning the gesture.
        target: PlotId,
        /// Device position of the press.
        origin: DevicePoint,
        /// Latest pointer position, clamped to the plot box.
        current: DevicePoint,
    },
    /// Pan in progress.
    Panning {
        /// Plot owning the gesture.
        target: PlotId,
        /// Device position of the press.
        origin: DevicePoint,
        /// Pointer position of the last applied pan step.
        current: DevicePoint,
    },
}

/// Gesture state plus the pointer and modifier flags.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureMachine {
    state: GestureState,
    hover: Option<PlotId>,
    pointer_down: bool,
    modifier_held: bool,
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMachine {
    /// An idle machine.
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            hover: None,
            pointer_down: false,
            modifier_held: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Plot under the pointer, if any.
    pub fn hover_target(&self) -> Option<PlotId> {
        self.hover
    }

    /// Plot owning the running gesture, if any.
    pub fn active_target(&self) -> Option<PlotId> {
        match self.state {
            GestureState::AwaitingGesture { target, .. }
            | GestureState::Selecting { target, .. }
            | GestureState::Panning { target, .. } => Some(target),
            GestureState::Idle | GestureState::Hovering(_) => None,
        }
    }

    /// Whether a box selection is in progress.
    pub fn is_selecting(&self) -> bool {
        matches!(self.state, GestureState::Selecting { .. })
    }

    /// Whether a pan is in progress.
    pub fn is_panning(&self) -> bool {
        matches!(self.state, GestureState::Panning { .. })
    }

    /// Whether the primary button is held.
    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Whether the pan modifier is held.
    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Device position where the running gesture started.
    pub fn drag_origin(&self) -> Option<DevicePoint> {
        match self.state {
            GestureState::AwaitingGesture { origin, .. }
            | GestureState::Selecting { origin, .. }
            | GestureState::Panning { origin, .. } => Some(origin),
            GestureState::Idle | GestureState::Hovering(_) => None,
        }
    }

    /// Latest device position of the running drag.
    pub fn drag_current(&self) -> Option<DevicePoint> {
        match self.state {
            GestureState::Selecting { current, .. } | GestureState::Panning { current, .. } => {
                Some(current)
            }
            GestureState::AwaitingGesture { origin, .. } => Some(origin),
            GestureState::Idle | GestureState::Hovering(_) => None,
        }
    }

    pub(crate) fn set_modifier_held(&mut self, held: bool) {
        self.modifier_held = held;
    }

    /// Record the hovered plot; only valid while no gesture is running.
    pub(crate) fn set_hover(&mut self, hover: Option<PlotId>) {
        self.hover = hover;
        if self.active_target().is_none() {
            self.state = match hover {
                Some(id) => GestureState::Hovering(id),
                None => GestureState::Idle,
            };
        }
    }

    pub(crate) fn press(&mut self, target: PlotId, origin: DevicePoint) {
        self.pointer_down = true;
        self.state = GestureState::AwaitingGesture { target, origin };
    }

    pub(crate) fn start_selecting(&mut self, target: PlotId, origin: DevicePoint, current: DevicePoint) {
        self.state = GestureState::Selecting {
            target,
            origin,
            current,
        };
    }

    pub(crate) fn start_panning(&mut self, target: PlotId, origin: DevicePoint) {
        self.state = GestureState::Panning {
            target,
            origin,
            current: origin,
        };
    }

    /// Move the drag's current point.
    pub(crate) fn update_current(&mut self, position: DevicePoint) {
        match &mut self.state {
            GestureState::Selecting { current, .. } | GestureState::Panning { current, .. } => {
                *current = position;
            }
            _ => {}
        }
    }

    /// Release the button and fall back to hovering; returns the finished state.
    pub(crate) fn release(&mut self) -> GestureState {
        let finished = self.state;
        self.pointer_down = false;
        self.state = match self.hover {
            Some(id) => GestureState::Hovering(id),
            None => GestureState::Idle,
        };
        finished
    }

    /// Drop every gesture and flag.
    pub(crate) fn abort(&mut self) -> GestureState {
        let aborted = self.state;
        *self = Self::new();
        aborted
    }
}
