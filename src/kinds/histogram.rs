use crate::data::HistogramBins;
use crate::geom::{Extent, Point};
use crate::plot::{Pannable, PlotKind, Selectable, Zoomable};
use crate::render::{DrawContext, RectStyle};
use crate::transform::WorldTransform;

/// Bar chart of pre-binned counts.
#[derive(Debug, Clone)]
pub struct PlotHistogram {
    bins: HistogramBins,
}

impl PlotHistogram {
    /// Create a histogram from validated bins.
    pub fn new(bins: HistogramBins) -> Self {
        Self { bins }
    }

    /// The bins being drawn.
    pub fn bins(&self) -> &HistogramBins {
        &self.bins
    }

    /// Replace the bins.
    pub fn set_bins(&mut self, bins: HistogramBins) {
        self.bins = bins;
    }

    /// Mutable access to the bin styling.
    pub fn bins_mut(&mut self) -> &mut HistogramBins {
        &mut self.bins
    }
}

impl WorldTransform for PlotHistogram {}

impl PlotKind for PlotHistogram {
    fn name(&self) -> &'static str {
        "histogram"
    }

    fn data_extent(&self) -> Option<Extent> {
        Some(self.bins.extent())
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let outline = self.bins.outline();
        let style = RectStyle {
            fill: self.bins.fill(),
            stroke: outline.color,
            stroke_width: outline.width,
        };
        for (left, right, count) in self.bins.bins() {
            if count > 0.0 {
                ctx.world_rect(Point::new(left, 0.0), Point::new(right, count), style);
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

impl Selectable for PlotHistogram {}

impl Zoomable for PlotHistogram {}

impl Pannable for PlotHistogram {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{DevicePoint, DeviceRect};
    use crate::plot::Plot;
    use crate::render::engine::BoxEngine;
    use crate::render::{RenderCommand, RenderList};

    fn histogram() -> PlotHistogram {
        PlotHistogram::new(
            HistogramBins::new(vec![0.0, 1.0, 2.0, 3.0], vec![2.0, 0.0, 4.0]).unwrap(),
        )
    }

    #[test]
    fn region_covers_bins_and_zero() {
        let plot = Plot::new(histogram());
        assert_eq!(plot.get_region(), Extent::new(0.0, 3.0, 0.0, 4.0));
    }

    #[test]
    fn empty_bins_draw_no_bar() {
        let mut plot = Plot::new(histogram());
        let mut list = RenderList::new();
        plot.render(
            DeviceRect::new(DevicePoint::new(0.0, 0.0), DevicePoint::new(300.0, 200.0)),
            &BoxEngine::default(),
            &mut list,
        );
        let bars = list
            .commands()
            .iter()
            .skip_while(|command| !matches!(command, RenderCommand::ClipRect(_)))
            .take_while(|command| !matches!(command, RenderCommand::ClipEnd))
            .filter(|command| matches!(command, RenderCommand::Rect { .. }))
            .count();
        assert_eq!(bars, 2);
    }
}
