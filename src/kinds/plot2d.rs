use crate::annotation::Annotation;
use crate::axis::AxisScale;
use crate::data::Dataset2d;
use crate::error::{Axis, PlotError, PlotResult};
use crate::geom::{Extent, Point};
use crate::legend::{Legend, LegendEntry};
use crate::plot::{HasLegend, Pannable, PlotKind, Selectable, Zoomable};
use crate::render::DrawContext;
use crate::transform::{LogAxes, WorldTransform};
use crate::view::Range;

use super::{dataset_legend_entries, draw_datasets};

/// Line and scatter plot with optional base-10 logarithmic axes.
#[derive(Debug, Clone, Default)]
pub struct Plot2d {
    datasets: Vec<Dataset2d>,
    scales: LogAxes,
    annotations: Vec<Annotation>,
    legend: Legend,
}

impl Plot2d {
    /// Create an empty plot with linear axes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plot showing one dataset.
    pub fn with_dataset(dataset: Dataset2d) -> Self {
        Self {
            datasets: vec![dataset],
            ..Self::default()
        }
    }

    /// Add a dataset and return its index.
    ///
    /// Fails when a logarithmic axis is active and the dataset has values
    /// `<= 0` on it.
    pub fn add_dataset(&mut self, dataset: Dataset2d) -> PlotResult<usize> {
        check_log_values(&self.scales, dataset.x_values(), dataset.y_values())?;
        self.datasets.push(dataset);
        Ok(self.datasets.len() - 1)
    }

    /// Append a point to one dataset, under the same rules as [`Self::add_dataset`].
    pub fn push_point(&mut self, index: usize, point: Point) -> PlotResult<()> {
        let dataset = self
            .datasets
            .get_mut(index)
            .ok_or(PlotError::UnknownDataset(index))?;
        check_log_values(&self.scales, [point.x], [point.y])?;
        dataset.push_point(point);
        Ok(())
    }

    /// Edit one dataset in place.
    ///
    /// The edit is undone and an error returned when it leaves values `<= 0`
    /// on a logarithmic axis.
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
        let checked = check_log_values(&self.scales, dataset.x_values(), dataset.y_values());
        if let Err(err) = checked {
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

    /// Whether the X axis is logarithmic.
    pub fn is_log_x(&self) -> bool {
        self.scales.x.is_log()
    }

    /// Whether the Y axis is logarithmic.
    pub fn is_log_y(&self) -> bool {
        self.scales.y.is_log()
    }

    /// Switch the X axis between linear and base-10 logarithmic.
    ///
    /// Enabling fails when any X value is `<= 0`.
    pub fn set_log_x(&mut self, log: bool) -> PlotResult<()> {
        if log && !self.datasets.iter().all(|data| all_positive(data.x_values())) {
            return Err(PlotError::NonPositiveLogValue { axis: Axis::X });
        }
        self.scales.x = scale_for(log);
        Ok(())
    }

    /// Switch the Y axis between linear and base-10 logarithmic.
    ///
    /// Enabling fails when any Y value is `<= 0`.
    pub fn set_log_y(&mut self, log: bool) -> PlotResult<()> {
        if log && !self.datasets.iter().all(|data| all_positive(data.y_values())) {
            return Err(PlotError::NonPositiveLogValue { axis: Axis::Y });
        }
        self.scales.y = scale_for(log);
        Ok(())
    }

    /// Add an annotation and return its index.
    pub fn add_annotation(&mut self, annotation: impl Into<Annotation>) -> usize {
        self.annotations.push(annotation.into());
        self.annotations.len() - 1
    }

    /// Remove an annotation by index.
    pub fn remove_annotation(&mut self, index: usize) -> Option<Annotation> {
        (index < self.annotations.len()).then(|| self.annotations.remove(index))
    }

    /// Attached annotations.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Mutable access to one annotation.
    pub fn annotation_mut(&mut self, index: usize) -> Option<&mut Annotation> {
        self.annotations.get_mut(index)
    }
}

fn check_log_values(
    scales: &LogAxes,
    x: impl IntoIterator<Item = f64>,
    y: impl IntoIterator<Item = f64>,
) -> PlotResult<()> {
    if scales.x.is_log() && !all_positive(x) {
        return Err(PlotError::NonPositiveLogValue { axis: Axis::X });
    }
    if scales.y.is_log() && !all_positive(y) {
        return Err(PlotError::NonPositiveLogValue { axis: Axis::Y });
    }
    Ok(())
}

fn all_positive(values: impl IntoIterator<Item = f64>) -> bool {
    values.into_iter().all(|value| value > 0.0)
}

fn scale_for(log: bool) -> AxisScale {
    if log { AxisScale::Log10 } else { AxisScale::Linear }
}

impl WorldTransform for Plot2d {
    fn world_to_internal(&self, point: Point) -> Point {
        self.scales.world_to_internal(point)
    }

    fn internal_to_world(&self, point: Point) -> Point {
        self.scales.internal_to_world(point)
    }
}

impl PlotKind for Plot2d {
    fn name(&self) -> &'static str {
        "plot2d"
    }

    fn data_extent(&self) -> Option<Extent> {
        let x_scale = self.scales.x;
        let y_scale = self.scales.y;
        let keep_x = |value: f64| x_scale.map_value(value).is_some();
        let keep_y = |value: f64| y_scale.map_value(value).is_some();
        let x = self
            .datasets
            .iter()
            .filter_map(|data| data.x_range(keep_x))
            .reduce(|a, b| Range::union(a, b).unwrap_or(a))?;
        let y = self
            .datasets
            .iter()
            .filter_map(|data| data.y_range(keep_y))
            .reduce(|a, b| Range::union(a, b).unwrap_or(a))?;
        Some(Extent::new(x.min, x.max, y.min, y.max))
    }

    fn axis_scales(&self) -> (AxisScale, AxisScale) {
        (self.scales.x, self.scales.y)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        draw_datasets(ctx, &self.datasets);
        for annotation in &self.annotations {
            annotation.draw(ctx);
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

    fn as_legend(&self) -> Option<&dyn HasLegend> {
        Some(self)
    }

    fn as_legend_mut(&mut self) -> Option<&mut dyn HasLegend> {
        Some(self)
    }
}

impl Selectable for Plot2d {}

impl Zoomable for Plot2d {}

impl Pannable for Plot2d {}

impl HasLegend for Plot2d {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::TextAnnotation;
    use crate::plot::Plot;

    fn dataset(x: Vec<f64>, y: Vec<f64>) -> Dataset2d {
        Dataset2d::new(x, y).unwrap()
    }

    #[test]
    fn extent_spans_every_dataset() {
        let mut plot = Plot2d::with_dataset(dataset(vec![0.0, 1.0], vec![2.0, 3.0]));
        plot.add_dataset(dataset(vec![-1.0, 0.5], vec![5.0, 4.0]))
            .unwrap();
        assert_eq!(plot.data_extent(), Some(Extent::new(-1.0, 1.0, 2.0, 5.0)));
        assert_eq!(Plot2d::new().data_extent(), None);
    }

    #[test]
    fn log_axis_requires_positive_values() {
        let mut plot = Plot2d::with_dataset(dataset(vec![-1.0, 10.0], vec![1.0, 100.0]));
        assert_eq!(
            plot.set_log_x(true),
            Err(PlotError::NonPositiveLogValue { axis: Axis::X })
        );
        assert!(!plot.is_log_x());
        plot.set_log_y(true).unwrap();
        assert_eq!(plot.axis_scales(), (AxisScale::Linear, AxisScale::Log10));
        assert!(
            plot.add_dataset(dataset(vec![1.0, 2.0], vec![0.0, 1.0]))
                .is_err()
        );
        assert_eq!(plot.datasets().len(), 1);
    }

    #[test]
    fn pushed_points_must_fit_the_log_axis() {
        let mut plot = Plot2d::with_dataset(dataset(vec![1.0, 10.0], vec![1.0, 100.0]));
        plot.set_log_x(true).unwrap();
        assert_eq!(
            plot.push_point(0, Point::new(-3.0, 5.0)),
            Err(PlotError::NonPositiveLogValue { axis: Axis::X })
        );
        assert_eq!(plot.datasets()[0].x(), [1.0, 10.0]);
        plot.push_point(0, Point::new(100.0, -5.0)).unwrap();
        assert_eq!(plot.datasets()[0].len(), 3);
        assert_eq!(
            plot.push_point(1, Point::new(2.0, 2.0)),
            Err(PlotError::UnknownDataset(1))
        );
    }

    #[test]
    fn error_bars_count_toward_extent_and_log_checks() {
        let data = dataset(vec![1.0, 2.0], vec![1.0, 4.0])
            .with_y_errors(vec![-1.0, 3.0], vec![2.0, 6.0])
            .unwrap();
        let mut plot = Plot2d::with_dataset(data);
        assert_eq!(plot.data_extent(), Some(Extent::new(1.0, 2.0, -1.0, 6.0)));
        assert_eq!(
            plot.set_log_y(true),
            Err(PlotError::NonPositiveLogValue { axis: Axis::Y })
        );
        plot.set_log_x(true).unwrap();
    }

    #[test]
    fn rejected_dataset_edit_is_rolled_back() {
        let mut plot = Plot2d::with_dataset(dataset(vec![1.0, 10.0], vec![1.0, 100.0]));
        plot.set_log_y(true).unwrap();
        let result = plot.update_dataset(0, |data| {
            data.set_shown(false);
            data.push_point(Point::new(20.0, 0.0));
        });
        assert_eq!(result, Err(PlotError::NonPositiveLogValue { axis: Axis::Y }));
        assert_eq!(plot.datasets()[0].len(), 2);
        assert!(plot.datasets()[0].is_shown());
    }

    #[test]
    fn toggling_log_axis_resets_the_region() {
        let mut plot = Plot::new(Plot2d::with_dataset(dataset(
            vec![1.0, 10.0, 100.0],
            vec![1.0, 2.0, 3.0],
        )));
        plot.set_region(Extent::new(2.0, 5.0, 1.5, 2.5)).unwrap();
        plot.update_kind::<Plot2d, _>(|kind| kind.set_log_x(true))
            .unwrap()
            .unwrap();
        let region = plot.get_region();
        assert!((region.x_min - 1.0).abs() < 1e-9);
        assert!((region.x_max - 100.0).abs() < 1e-9);
        assert_eq!(plot.region().internal_x(), Range::new(0.0, 2.0));
    }

    #[test]
    fn unnamed_datasets_are_numbered_in_the_legend() {
        let mut plot = Plot2d::with_dataset(dataset(vec![0.0, 1.0], vec![0.0, 1.0]));
        plot.add_dataset(dataset(vec![0.0, 1.0], vec![1.0, 0.0]).with_name("decay"))
            .unwrap();
        let labels: Vec<_> = plot
            .legend_entries()
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(labels, ["Data 0", "decay"]);
        plot.update_dataset(0, |data| data.set_shown(false)).unwrap();
        assert_eq!(plot.legend_entries().len(), 1);
    }

    #[test]
    fn annotations_can_be_removed() {
        let mut plot = Plot2d::new();
        let index = plot.add_annotation(TextAnnotation::new("peak", Point::new(1.0, 1.0)));
        assert_eq!(plot.annotations().len(), 1);
        assert!(plot.remove_annotation(index).is_some());
        assert!(plot.remove_annotation(index).is_none());
    }
}
