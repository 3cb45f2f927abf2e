//! GPUI integration for gpui_sciplot.
//!
//! This module provides a GPUI view that hosts a [`Canvas`](crate::canvas::Canvas):
//! it forwards pointer, scroll and modifier input, paints the canvas render
//! list and shows the cursor the gesture machine asks for.

mod paint;
mod view;

pub use view::{CanvasHandle, GpuiCanvasView};
