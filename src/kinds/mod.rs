//! Built-in plot kinds.
//!
//! Each kind owns its data and draws it through a [`DrawContext`]; the
//! surrounding [`Plot`](crate::plot::Plot) handles regions and gestures.
//!
//! [`DrawContext`]: crate::render::DrawContext

mod contour;
mod histogram;
mod plot2d;
mod polar;

pub use contour::PlotContour;
pub use histogram::PlotHistogram;
pub use plot2d::Plot2d;
pub use polar::PlotPolar;

use crate::data::Dataset2d;
use crate::legend::LegendEntry;
use crate::render::{DrawContext, LineStyle};

/// Legend rows for the shown datasets; unnamed ones are numbered.
fn dataset_legend_entries(datasets: &[Dataset2d]) -> Vec<LegendEntry> {
    datasets
        .iter()
        .enumerate()
        .filter(|(_, data)| data.is_shown())
        .map(|(index, data)| LegendEntry {
            label: if data.name().is_empty() {
                format!("Data {index}")
            } else {
                data.name().to_string()
            },
            line: data.line(),
            marker: data.marker(),
        })
        .collect()
}

/// Draw the line, error bars and markers of every shown dataset.
fn draw_datasets(ctx: &mut DrawContext<'_>, datasets: &[Dataset2d]) {
    let mut points = Vec::new();
    for data in datasets.iter().filter(|data| data.is_shown()) {
        points.clear();
        points.extend(data.points());
        if let Some(style) = data.line() {
            ctx.dashed_polyline(&points, style, data.line_dash());
        }
        let bars = LineStyle {
            color: data.error_color(),
            width: 1.0,
        };
        ctx.segments(data.error_bars(), bars);
        if let Some(style) = data.marker() {
            ctx.markers(&points, style);
        }
    }
}
