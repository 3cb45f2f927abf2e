use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2, TAU};

use crate::data::Dataset2d;
use crate::error::{PlotError, PlotResult};
use crate::geom::{DevicePoint, Extent, Point};
use crate::legend::{Legend, LegendEntry};
use crate::plot::{HasLegend, Pannable, PlotKind, Selectable, Zoomable};
use crate::render::{Color, DrawContext, LineStyle, TextStyle};
use crate::transform::{PolarTransform, WorldTransform};

use super::{dataset_legend_entries, draw_datasets};

const SPOKES: usize = 24;
const RING_SEGMENTS: usize = 96;
const WINDOW_MARGIN: f64 = 1.3;
const LABEL_SIZE: f32 = 11.0;

/// Polar plot of `(r, theta)` datasets, theta in radians.
///
/// The visible window is a Cartesian window over `(r cos theta, r sin theta)`.
#[derive(Debug, Clone)]
pub struct PlotPolar {
    datasets: Vec<Dataset2d>,
    grid: LineStyle,
    minor_grid: LineStyle,
    labels: Color,
    legend: Legend,
}

impl Default for PlotPolar {
    fn default() -> Self {
        Self {
            datasets: Vec::new(),
            grid: LineStyle {
                color: Color::new(0.55, 0.55, 0.55, 1.0),
                width: 1.0,
            },
            minor_grid: LineStyle {
                color: Color::new(0.8, 0.8, 0.8, 1.0),
                width: 1.0,
            },
            labels: Color::BLACK,
            legend: Legend::default(),
        }
    }
}

impl PlotPolar {
    /// Create an empty polar plot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a polar plot showing one dataset; r values must be non-negative.
    pub fn with_dataset(dataset: Dataset2d) -> PlotResult<Self> {
        let mut plot = Self::default();
        plot.add_dataset(dataset)?;
        Ok(plot)
    }

    /// Add a dataset and return its index; r values must be non-negative.
    pub fn add_dataset(&mut self, dataset: Dataset2d) -> PlotResult<usize> {
        check_radii(dataset.x_values())?;
        self.datasets.push(dataset);
        Ok(self.datasets.len() - 1)
    }

    /// Append an `(r, theta)` point to one dataset; r must be non-negative.
    pub fn push_point(&mut self, index: usize, point: Point) -> PlotResult<()> {
        let dataset = self
            .datasets
            .get_mut(index)
            .ok_or(PlotError::UnknownDataset(index))?;
        check_radii([point.x])?;
        dataset.push_point(point);
        Ok(())
    }

    /// Edit one dataset in place; an edit that leaves a negative radius is undone.
    pub fn update_dataset<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Dataset2d) -> R,
    ) -> PlotResult<R> {
        let dataset = self
            .datasets
            .get_mut(index)
            .ok_or(PlotError::UnknownDataset(index))?;
        let saved = dataset.clone();
        let result = edit(dataset);
        if let Err(err) = check_radii(dataset.x_values()) {
            *dataset = saved;
            return Err(err);
        }
        Ok(result)
    }

    /// Remove a dataset by index.
    pub fn remove_dataset(&mut self, index: usize) -> Option<Dataset2d> {
        (index < self.datasets.len()).then(|| self.datasets.remove(index))
    }

    /// Attached datasets in drawing order.
    pub fn datasets(&self) -> &[Dataset2d] {
        &self.datasets
    }

    /// Color of the major spokes and rings.
    pub fn set_grid_color(&mut self, color: Color) {
        self.grid.color = color;
    }

    /// Color of the angle and radius labels.
    pub fn set_label_color(&mut self, color: Color) {
        self.labels = color;
    }

    fn max_radius(&self) -> Option<f64> {
        self.datasets
            .iter()
            .filter_map(|data| data.x_range(f64::is_finite))
            .map(|range| range.max)
            .reduce(f64::max)
            .filter(|r| *r > 0.0)
    }

    fn draw_grid(&self, ctx: &mut DrawContext<'_>, max_r: f64) {
        let label = TextStyle {
            color: self.labels,
            size: LABEL_SIZE,
            justify: 0.5,
        };
        for index in 0..SPOKES {
            let theta = index as f64 * TAU / SPOKES as f64;
            let major = index % 3 == 0;
            let style = if major { self.grid } else { self.minor_grid };
            ctx.polyline(
                &[Point::new(0.0, theta), Point::new(max_r * 1.1, theta)],
                style,
            );
            if major {
                let anchor = ctx.chain().world_to_device(Point::new(max_r * 1.2, theta));
                let degrees = theta.to_degrees().round();
                ctx.text(
                    centered(anchor, LABEL_SIZE),
                    format!("{degrees}\u{b0}"),
                    label,
                );
            }
        }

        let step = ring_step(max_r);
        let mut ring = Vec::with_capacity(RING_SEGMENTS + 1);
        let mut radius = step;
        while radius <= max_r * (1.0 + 1e-9) {
            ring.clear();
            ring.extend(
                (0..=RING_SEGMENTS)
                    .map(|i| Point::new(radius, i as f64 * TAU / RING_SEGMENTS as f64)),
            );
            ctx.polyline(&ring, self.grid);
            let anchor = ctx
                .chain()
                .world_to_device(Point::new(radius + step * 0.2, FRAC_PI_2));
            ctx.text(
                centered(anchor, LABEL_SIZE),
                format_radius(radius),
                TextStyle {
                    justify: 1.0,
                    ..label
                },
            );
            radius += step;
        }
    }
}

fn check_radii(radii: impl IntoIterator<Item = f64>) -> PlotResult<()> {
    if radii.into_iter().any(|r| r < 0.0) {
        return Err(PlotError::NegativeRadius);
    }
    Ok(())
}

fn centered(anchor: DevicePoint, size: f32) -> DevicePoint {
    DevicePoint::new(anchor.x, anchor.y - f64::from(size) * 0.5)
}

fn format_radius(value: f64) -> String {
    let text = format!("{value:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Ring spacing giving between three and nine rings up to `max_r`.
fn ring_step(max_r: f64) -> f64 {
    let mut step = 10_f64.powf(max_r.log10().floor());
    let count = (max_r / step).floor();
    if count <= 1.0 {
        step /= 5.0;
    } else if count <= 2.0 {
        step /= 2.0;
    }
    step
}

impl WorldTransform for PlotPolar {
    fn world_to_internal(&self, point: Point) -> Point {
        PolarTransform.world_to_internal(point)
    }

    fn internal_to_world(&self, point: Point) -> Point {
        PolarTransform.internal_to_world(point)
    }
}

impl PlotKind for PlotPolar {
    fn name(&self) -> &'static str {
        "polar"
    }

    /// Corners whose Cartesian images span `[-1.3 r, 1.3 r]` on both axes.
    fn data_extent(&self) -> Option<Extent> {
        let radius = self.max_radius()? * SQRT_2 * WINDOW_MARGIN;
        Some(Extent::new(radius, radius, 5.0 * FRAC_PI_4, FRAC_PI_4))
    }

    fn cartesian_axes(&self) -> bool {
        false
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        if let Some(max_r) = self.max_radius() {
            self.draw_grid(ctx, max_r);
        }
        draw_datasets(ctx, &self.datasets);
    }

    fn as_selectable(&mut self) -> Option<&mut dyn Selectable> {
        Some(self)
    }

    fn as_zoomable(&mut self) -> Option<&mut dyn Zoomable> {
        Some(self)
    }

    fn as_pannable(&mut self) -> Option<&mut dyn Pannable> {
        Some(self)
    }

    fn as_legend(&self) -> Option<&dyn HasLegend> {
        Some(self)
    }

    fn as_legend_mut(&mut self) -> Option<&mut dyn HasLegend> {
        Some(self)
    }
}

impl Selectable for PlotPolar {}

impl Zoomable for PlotPolar {}

impl Pannable for PlotPolar {}

impl HasLegend for PlotPolar {
    fn legend(&self) -> &Legend {
        &self.legend
    }

    fn legend_mut(&mut self) -> &mut Legend {
        &mut self.legend
    }

    fn legend_entries(&self) -> Vec<LegendEntry> {
        dataset_legend_entries(&self.datasets)
    }
}
