//! The plot canvas: plots, the shared gesture machine and notifications.
//!
//! A [`Canvas`] owns its plots in drawing order and a single
//! [`GestureMachine`], so only one plot can be mid-gesture at a time. Input
//! arrives through [`Canvas::handle_event`]; redraw requests and cursor
//! changes go out through a [`CanvasHost`], and [`PlotEvent`] notifications
//! go to subscribers registered with [`Canvas::subscribe`].

mod dispatch;
#[cfg(test)]
mod tests;

use std::fmt;

use tracing::{debug, warn};

use crate::config::CanvasConfig;
use crate::error::{HandlerError, PlotError, PlotResult};
use crate::event::{CursorStyle, PlotEvent, PlotEventKind};
use crate::geom::{DevicePoint, DeviceRect, Extent};
use crate::gesture::{GestureMachine, GestureState};
use crate::plot::{Plot, PlotId};
use crate::render::engine::{BoxEngine, PlotEngine};
use crate::render::{Color, RectStyle, RenderCommand, RenderList};

/// Sink for the requests a canvas makes to its windowing layer.
pub trait CanvasHost {
    /// Schedule a repaint of the canvas.
    fn request_redraw(&mut self);

    /// Change the pointer appearance.
    fn set_cursor(&mut self, cursor: CursorStyle);
}

/// Identifier returned by [`Canvas::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&PlotEvent) -> Result<(), HandlerError>>;

/// A drawing surface holding one or more plots.
pub struct Canvas {
    plots: Vec<Plot>,
    gesture: GestureMachine,
    config: CanvasConfig,
    engine: Box<dyn PlotEngine>,
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_subscription: u64,
    cursor: CursorStyle,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("plots", &self.plots)
            .field("gesture", &self.gesture)
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration and engine.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// Create an empty canvas with a custom configuration.
    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            plots: Vec::new(),
            gesture: GestureMachine::new(),
            config,
            engine: Box::new(BoxEngine::default()),
            subscribers: Vec::new(),
            next_subscription: 0,
            cursor: CursorStyle::Default,
        }
    }

    /// Replace the layout and decoration engine.
    pub fn with_engine(mut self, engine: impl PlotEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Canvas configuration.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Mutable canvas configuration.
    pub fn config_mut(&mut self) -> &mut CanvasConfig {
        &mut self.config
    }

    /// Add a plot on top of the existing ones and return its identifier.
    pub fn add_plot(&mut self, plot: Plot) -> PlotId {
        let id = plot.id();
        debug!(plot = %id, kind = plot.kind().name(), "plot added");
        self.plots.push(plot);
        id
    }

    /// Remove a plot; a gesture it owned is abandoned.
    pub fn remove_plot(&mut self, id: PlotId) -> Option<Plot> {
        let index = self.index_of(id)?;
        if self.gesture.active_target() == Some(id) || self.gesture.hover_target() == Some(id) {
            self.gesture.abort();
        }
        debug!(plot = %id, "plot removed");
        Some(self.plots.remove(index))
    }

    /// Plots in drawing order.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Look up a plot.
    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.plots.iter().find(|plot| plot.id() == id)
    }

    /// Look up a plot for mutation.
    pub fn plot_mut(&mut self, id: PlotId) -> Option<&mut Plot> {
        self.plots.iter_mut().find(|plot| plot.id() == id)
    }

    /// Gesture state shared by all plots.
    pub fn gesture(&self) -> &GestureMachine {
        &self.gesture
    }

    /// Cursor last requested from the host.
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Change the visible window of a plot, given as World corners.
    ///
    /// Notifies subscribers with [`PlotEventKind::RegionChanged`] when the
    /// window changed.
    pub fn set_region(&mut self, id: PlotId, region: Extent) -> PlotResult<bool> {
        let plot = self.plot_mut(id).ok_or(PlotError::UnknownPlot(id))?;
        let changed = plot.set_region(region)?;
        if changed {
            let region = plot.get_region();
            self.notify(&[PlotEvent {
                plot: id,
                kind: PlotEventKind::RegionChanged(region),
            }]);
        }
        Ok(changed)
    }

    /// Current visible window of a plot in World coordinates.
    pub fn get_region(&self, id: PlotId) -> PlotResult<Extent> {
        self.plot(id)
            .map(Plot::get_region)
            .ok_or(PlotError::UnknownPlot(id))
    }

    /// Register a notification handler.
    ///
    /// Handler errors are logged and otherwise ignored.
    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&PlotEvent) -> Result<(), HandlerError> + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Remove a notification handler; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Lay out and draw every plot into `bounds`, followed by the selection
    /// overlay of a running box selection.
    pub fn render(&mut self, bounds: DeviceRect) -> RenderList {
        let mut list = RenderList::new();
        list.push(RenderCommand::Rect {
            rect: bounds,
            style: RectStyle {
                fill: self.config.background,
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        });
        for plot in &mut self.plots {
            let area = plot.placement().resolve(bounds);
            plot.render(area, self.engine.as_ref(), &mut list);
        }
        if let GestureState::Selecting {
            target,
            origin,
            current,
        } = self.gesture.state()
            && let Some(plot) = self.plot(target)
        {
            let gestures = plot.gestures();
            list.push(RenderCommand::Rect {
                rect: DeviceRect::spanning(plot.clamp_to_box(origin), current),
                style: RectStyle {
                    fill: Color::TRANSPARENT,
                    stroke: gestures.selection_color(),
                    stroke_width: gestures.selection_line_width() as f32,
                },
            });
        }
        list
    }

    fn index_of(&self, id: PlotId) -> Option<usize> {
        self.plots.iter().position(|plot| plot.id() == id)
    }

    /// Topmost shown plot whose data box contains `position`.
    fn hit_test(&self, position: DevicePoint) -> Option<PlotId> {
        self.plots
            .iter()
            .rev()
            .find(|plot| plot.contains(position))
            .map(Plot::id)
    }

    fn notify(&mut self, events: &[PlotEvent]) {
        for event in events {
            for (id, handler) in &mut self.subscribers {
                if let Err(error) = handler(event) {
                    warn!(
                        plot = %event.plot,
                        subscription = id.0,
                        %error,
                        "plot event handler failed"
                    );
                }
            }
        }
    }
}
