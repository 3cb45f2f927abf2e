//! Input events consumed by the canvas and notifications it emits.

use crate::geom::{DevicePoint, Extent, Point};
use crate::plot::PlotId;

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button.
    Secondary,
    /// Middle button.
    Middle,
}

/// Modifier key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    /// Control key.
    #[default]
    Control,
    /// Shift key.
    Shift,
    /// Alt / Option key.
    Alt,
}

/// Snapshot of the modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Control key held.
    pub control: bool,
    /// Shift key held.
    pub shift: bool,
    /// Alt key held.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub fn none() -> Self {
        Self::default()
    }

    /// Only the given modifier held.
    pub fn only(modifier: Modifier) -> Self {
        let mut modifiers = Self::default();
        modifiers.set(modifier, true);
        modifiers
    }

    /// Check whether a modifier is held.
    pub fn is_held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Control => self.control,
            Modifier::Shift => self.shift,
            Modifier::Alt => self.alt,
        }
    }

    /// Update a single modifier.
    pub fn set(&mut self, modifier: Modifier, held: bool) {
        match modifier {
            Modifier::Control => self.control = held,
            Modifier::Shift => self.shift = held,
            Modifier::Alt => self.alt = held,
        }
    }
}

/// Scroll direction; `Up` zooms in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scroll away from the user.
    Up,
    /// Scroll towards the user.
    Down,
}

/// Keyboard key relevant to gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A modifier key.
    Modifier(Modifier),
    /// Any other key.
    Other,
}

/// Named pointer appearances the canvas asks its host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// The platform default pointer.
    #[default]
    Default,
    /// Crosshair shown over a plot.
    Crosshair,
    /// Open hand: ready to pan.
    Grab,
    /// Closed hand: panning.
    Grabbing,
}

/// Low-level input delivered by the windowing layer, in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer entered the canvas.
    PointerEnter {
        /// Pointer position.
        position: DevicePoint,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// The pointer left the canvas.
    PointerLeave,
    /// The pointer moved.
    PointerMove {
        /// Pointer position.
        position: DevicePoint,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// A pointer button was pressed.
    PointerDown {
        /// Pointer position.
        position: DevicePoint,
        /// Button pressed.
        button: PointerButton,
        /// Click count as classified by the toolkit (2 for a double click).
        click_count: u32,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// A pointer button was released.
    PointerUp {
        /// Pointer position.
        position: DevicePoint,
        /// Button released.
        button: PointerButton,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// A scroll step.
    Scroll {
        /// Pointer position.
        position: DevicePoint,
        /// Scroll direction.
        direction: ScrollDirection,
        /// Modifier keys held.
        modifiers: Modifiers,
    },
    /// A key was pressed.
    KeyPress(Key),
    /// A key was released.
    KeyRelease(Key),
    /// The canvas lost input focus; any running gesture is abandoned.
    FocusLost,
}

/// Notification about a plot, carrying World coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotEvent {
    /// Plot the notification is about.
    pub plot: PlotId,
    /// What happened.
    pub kind: PlotEventKind,
}

/// Kinds of plot notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotEventKind {
    /// The pointer entered the plot box.
    CursorEnter(Point),
    /// The pointer moved inside the plot box.
    CursorMotion(Point),
    /// The pointer left the plot box.
    CursorLeave,
    /// A selection box was completed.
    SelectRegion(Extent),
    /// The plot was double-clicked.
    DoublePress(Point),
    /// One panning step; `to` is the position reported by the plot kind.
    PanStep {
        /// World position before the step.
        from: Point,
        /// World position after the step.
        to: Point,
    },
    /// One zoom step around `anchor`.
    ZoomStep {
        /// World position kept fixed.
        anchor: Point,
        /// Multiplier applied to the edge distances (below 1 zooms in).
        scale: f64,
    },
    /// The visible region changed.
    RegionChanged(Extent),
}
