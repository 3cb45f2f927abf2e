use crate::data::{ContourGrid, band_of};
use crate::geom::{Extent, Point};
use crate::plot::{Pannable, PlotKind, Selectable, Zoomable};
use crate::render::{Color, DrawContext, RectStyle};
use crate::transform::WorldTransform;

/// Shaded contour plot over a rectilinear grid.
///
/// Each grid cell is filled with the palette color of the level band its
/// mean value falls into; band boundaries are outlined when edges are on.
#[derive(Debug, Clone)]
pub struct PlotContour {
    grid: ContourGrid,
}

impl PlotContour {
    /// Create a contour plot from a validated grid.
    pub fn new(grid: ContourGrid) -> Self {
        Self { grid }
    }

    /// The grid being drawn.
    pub fn grid(&self) -> &ContourGrid {
        &self.grid
    }

    /// Mutable access to levels, palette and edges.
    pub fn grid_mut(&mut self) -> &mut ContourGrid {
        &mut self.grid
    }

    /// Band of every cell, row-major over `(ny - 1) x (nx - 1)` cells.
    fn cell_bands(&self) -> Vec<Option<usize>> {
        let grid = &self.grid;
        let (nx, ny) = (grid.x().len(), grid.y().len());
        let Some(range) = grid.z_range() else {
            return vec![None; (nx - 1) * (ny - 1)];
        };
        let mut bands = Vec::with_capacity((nx - 1) * (ny - 1));
        for j in 0..ny - 1 {
            for i in 0..nx - 1 {
                let corners = [(i, j), (i + 1, j), (i, j + 1), (i + 1, j + 1)];
                let sum: f64 = corners
                    .iter()
                    .filter_map(|(ci, cj)| grid.z(*ci, *cj))
                    .sum();
                bands.push(band_of(sum / 4.0, range, grid.nlevels()));
            }
        }
        bands
    }
}

impl WorldTransform for PlotContour {}

impl PlotKind for PlotContour {
    fn name(&self) -> &'static str {
        "contour"
    }

    fn data_extent(&self) -> Option<Extent> {
        Some(self.grid.extent())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let grid = &self.grid;
        let (x, y) = (grid.x(), grid.y());
        let cells = x.len() - 1;
        let bands = self.cell_bands();
        for (index, band) in bands.iter().enumerate() {
            let Some(band) = band else { continue };
            let (i, j) = (index % cells, index / cells);
            let fill = grid.band_color(*band);
            ctx.world_rect(
                Point::new(x[i], y[j]),
                Point::new(x[i + 1], y[j + 1]),
                RectStyle {
                    fill,
                    stroke: Color::TRANSPARENT,
                    stroke_width: 0.0,
                },
            );
        }

        let Some(edge) = grid.edges() else {
            return;
        };
        for (index, band) in bands.iter().enumerate() {
            let (i, j) = (index % cells, index / cells);
            if i + 1 < cells && bands[index + 1] != *band {
                ctx.polyline(
                    &[Point::new(x[i + 1], y[j]), Point::new(x[i + 1], y[j + 1])],
                    edge,
                );
            }
            if index + cells < bands.len() && bands[index + cells] != *band {
                ctx.polyline(
                    &[Point::new(x[i], y[j + 1]), Point::new(x[i + 1], y[j + 1])],
                    edge,
                );
            }
        }
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
}

impl Selectable for PlotContour {}

impl Zoomable for PlotContour {}

impl Pannable for PlotContour {}
