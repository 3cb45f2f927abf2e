//! Datasets attached to plot kinds.
//!
//! Constructors validate their input and return [`PlotError`] on bad data, so
//! a dataset that exists is always drawable.

use crate::error::{Axis, PlotError, PlotResult};
use crate::geom::{Extent, Point};
use crate::render::{Color, LineDash, LineStyle, MarkerShape, MarkerStyle};
use crate::view::Range;

/// A named series of `(x, y)` values drawn as a line, markers or both.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset2d {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    line: Option<LineStyle>,
    dash: LineDash,
    marker: Option<MarkerStyle>,
    x_errors: Option<ErrorBounds>,
    y_errors: Option<ErrorBounds>,
    error_color: Color,
    shown: bool,
}

/// Per-point lower and upper error bounds along one axis.
#[derive(Debug, Clone, PartialEq)]
struct ErrorBounds {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl ErrorBounds {
    fn new(axis: Axis, values: &[f64], low: Vec<f64>, high: Vec<f64>) -> PlotResult<Self> {
        for bound in [&low, &high] {
            if bound.len() != values.len() {
                return Err(PlotError::LengthMismatch {
                    left: values.len(),
                    right: bound.len(),
                });
            }
        }
        let misplaced = values
            .iter()
            .zip(low.iter().zip(&high))
            .position(|(value, (low, high))| low > value || high < value);
        if let Some(index) = misplaced {
            return Err(PlotError::ErrorBarOutOfOrder { axis, index });
        }
        Ok(Self { low, high })
    }

    fn bounds(&self) -> impl Iterator<Item = f64> + '_ {
        self.low.iter().chain(&self.high).copied()
    }
}

impl Dataset2d {
    /// Create a dataset drawn as a continuous black line.
    ///
    /// `x` and `y` must have the same length, hold at least two values, and
    /// `x` must contain at least two different values.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> PlotResult<Self> {
        if x.len() != y.len() {
            return Err(PlotError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(PlotError::TooFewPoints {
                required: 2,
                actual: x.len(),
            });
        }
        if x.iter().all(|value| *value == x[0]) {
            return Err(PlotError::DegenerateData);
        }
        Ok(Self {
            name: String::new(),
            x,
            y,
            line: Some(LineStyle::default()),
            dash: LineDash::Solid,
            marker: None,
            x_errors: None,
            y_errors: None,
            error_color: Color::BLACK,
            shown: true,
        })
    }

    /// Attach horizontal error bars; `low[i] <= x[i] <= high[i]` for every point.
    pub fn with_x_errors(mut self, low: Vec<f64>, high: Vec<f64>) -> PlotResult<Self> {
        self.x_errors = Some(ErrorBounds::new(Axis::X, &self.x, low, high)?);
        Ok(self)
    }

    /// Attach vertical error bars; `low[i] <= y[i] <= high[i]` for every point.
    pub fn with_y_errors(mut self, low: Vec<f64>, high: Vec<f64>) -> PlotResult<Self> {
        self.y_errors = Some(ErrorBounds::new(Axis::Y, &self.y, low, high)?);
        Ok(self)
    }

    /// Build a dataset from points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> PlotResult<Self> {
        let (x, y) = points.into_iter().map(|point| (point.x, point.y)).unzip();
        Self::new(x, y)
    }

    /// Set the dataset name shown in legends.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the line color.
    pub fn with_color(mut self, color: Color) -> Self {
        if let Some(line) = self.line.as_mut() {
            line.color = color;
        }
        if let Some(marker) = self.marker.as_mut() {
            marker.color = color;
        }
        self.error_color = color;
        self
    }

    /// Dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// X values.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y values.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: a dataset holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(x, y)| Point::new(*x, *y))
    }

    /// Append a point. Error bars, if any, get a zero-width bar at the point.
    pub fn push_point(&mut self, point: Point) {
        self.x.push(point.x);
        self.y.push(point.y);
        for (errors, value) in [(&mut self.x_errors, point.x), (&mut self.y_errors, point.y)] {
            if let Some(errors) = errors {
                errors.low.push(value);
                errors.high.push(value);
            }
        }
    }

    /// Lower and upper X error bounds.
    pub fn x_errors(&self) -> Option<(&[f64], &[f64])> {
        self.x_errors
            .as_ref()
            .map(|errors| (errors.low.as_slice(), errors.high.as_slice()))
    }

    /// Lower and upper Y error bounds.
    pub fn y_errors(&self) -> Option<(&[f64], &[f64])> {
        self.y_errors
            .as_ref()
            .map(|errors| (errors.low.as_slice(), errors.high.as_slice()))
    }

    /// Color of the error bars.
    pub fn error_color(&self) -> Color {
        self.error_color
    }

    /// Set the color of the error bars.
    pub fn set_error_color(&mut self, color: Color) {
        self.error_color = color;
    }

    /// Line style, or `None` when no line is drawn.
    pub fn line(&self) -> Option<LineStyle> {
        self.line
    }

    /// Draw a line with the given color and width; width must be strictly positive.
    pub fn set_line(&mut self, color: Color, width: f64) -> PlotResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PlotError::InvalidLineWidth(width));
        }
        self.line = Some(LineStyle {
            color,
            width: width as f32,
        });
        Ok(())
    }

    /// Dash pattern of the line.
    pub fn line_dash(&self) -> LineDash {
        self.dash
    }

    /// Set the dash pattern of the line.
    pub fn set_line_dash(&mut self, dash: LineDash) {
        self.dash = dash;
    }

    /// Stop drawing the line.
    pub fn hide_line(&mut self) {
        self.line = None;
    }

    /// Marker style, or `None` when no markers are drawn.
    pub fn marker(&self) -> Option<MarkerStyle> {
        self.marker
    }

    /// Draw markers of the given shape and color at the default size.
    pub fn set_marker(&mut self, shape: MarkerShape, color: Color) {
        self.marker = Some(MarkerStyle {
            shape,
            color,
            ..MarkerStyle::default()
        });
    }

    /// Scale the marker relative to the default size; must be strictly positive.
    pub fn set_marker_scale(&mut self, scale: f64) -> PlotResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PlotError::InvalidScaleFactor(scale));
        }
        if let Some(marker) = self.marker.as_mut() {
            marker.size = MarkerStyle::default().size * scale as f32;
        }
        Ok(())
    }

    /// Stop drawing markers.
    pub fn hide_marker(&mut self) {
        self.marker = None;
    }

    /// Whether the dataset is drawn.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Show or hide the dataset.
    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    /// X values followed by the X error bounds.
    pub(crate) fn x_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.x
            .iter()
            .copied()
            .chain(self.x_errors.iter().flat_map(ErrorBounds::bounds))
    }

    /// Y values followed by the Y error bounds.
    pub(crate) fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.y
            .iter()
            .copied()
            .chain(self.y_errors.iter().flat_map(ErrorBounds::bounds))
    }

    /// Range of the finite X values and error bounds accepted by `keep`.
    pub(crate) fn x_range(&self, keep: impl Fn(f64) -> bool) -> Option<Range> {
        Range::of_values(self.x_values().filter(|value| keep(*value)))
    }

    /// Range of the finite Y values and error bounds accepted by `keep`.
    pub(crate) fn y_range(&self, keep: impl Fn(f64) -> bool) -> Option<Range> {
        Range::of_values(self.y_values().filter(|value| keep(*value)))
    }

    /// World endpoints of every error bar.
    pub(crate) fn error_bars(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let horizontal = self.x_errors.iter().flat_map(move |errors| {
            errors
                .low
                .iter()
                .zip(&errors.high)
                .zip(&self.y)
                .map(|((low, high), y)| (Point::new(*low, *y), Point::new(*high, *y)))
        });
        let vertical = self.y_errors.iter().flat_map(move |errors| {
            errors
                .low
                .iter()
                .zip(&errors.high)
                .zip(&self.x)
                .map(|((low, high), x)| (Point::new(*x, *low), Point::new(*x, *high)))
        });
        horizontal.chain(vertical)
    }
}

/// Pre-binned histogram data.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    edges: Vec<f64>,
    counts: Vec<f64>,
    fill: Color,
    outline: LineStyle,
}

impl HistogramBins {
    /// Create bins from `counts.len() + 1` strictly increasing edges.
    ///
    /// At least two bins are required and every count must be non-negative.
    pub fn new(edges: Vec<f64>, counts: Vec<f64>) -> PlotResult<Self> {
        if edges.len() != counts.len() + 1 {
            return Err(PlotError::LengthMismatch {
                left: edges.len(),
                right: counts.len() + 1,
            });
        }
        if edges.len() < 3 {
            return Err(PlotError::TooFewPoints {
                required: 3,
                actual: edges.len(),
            });
        }
        if !is_strictly_increasing(&edges) {
            return Err(PlotError::NotStrictlyIncreasing("bin edges"));
        }
        if counts.iter().any(|count| !(*count >= 0.0)) {
            return Err(PlotError::NegativeCount);
        }
        Ok(Self {
            edges,
            counts,
            fill: Color::new(0.45, 0.6, 0.85, 1.0),
            outline: LineStyle::default(),
        })
    }

    /// Bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin counts.
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Bar fill color.
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Change the bar fill color.
    pub fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    /// Bar outline.
    pub fn outline(&self) -> LineStyle {
        self.outline
    }

    /// Change the bar outline; width must be strictly positive.
    pub fn set_outline(&mut self, color: Color, width: f64) -> PlotResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PlotError::InvalidLineWidth(width));
        }
        self.outline = LineStyle {
            color,
            width: width as f32,
        };
        Ok(())
    }

    /// `[first edge, last edge] x [0, max count]`.
    pub fn extent(&self) -> Extent {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        let max = self.counts.iter().copied().fold(0.0, f64::max);
        Extent::new(first, last, 0.0, max)
    }

    /// Bins as `(left edge, right edge, count)`.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edges, count)| (edges[0], edges[1], *count))
    }
}

/// Named color gradients for contour shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// Blue through red.
    #[default]
    Default,
    /// Blue to red.
    BlueRed,
    /// Blue to yellow.
    BlueYellow,
    /// Black to white.
    Gray,
    /// Dark teal to bright orange.
    HighFrequency,
    /// Deep purple to pale green.
    LowFrequency,
    /// Black to radar green.
    Radar,
}

impl Palette {
    /// Low and high end colors of the gradient.
    pub const fn stops(self) -> (Color, Color) {
        match self {
            Self::Default => (Color::new(0.0, 0.0, 0.8, 1.0), Color::new(0.9, 0.0, 0.0, 1.0)),
            Self::BlueRed => (Color::new(0.0, 0.0, 1.0, 1.0), Color::new(1.0, 0.0, 0.0, 1.0)),
            Self::BlueYellow => (Color::new(0.0, 0.0, 1.0, 1.0), Color::new(1.0, 1.0, 0.0, 1.0)),
            Self::Gray => (Color::new(0.0, 0.0, 0.0, 1.0), Color::new(1.0, 1.0, 1.0, 1.0)),
            Self::HighFrequency => (Color::new(0.0, 0.3, 0.35, 1.0), Color::new(1.0, 0.6, 0.1, 1.0)),
            Self::LowFrequency => (Color::new(0.3, 0.0, 0.4, 1.0), Color::new(0.8, 1.0, 0.7, 1.0)),
            Self::Radar => (Color::new(0.0, 0.0, 0.0, 1.0), Color::new(0.2, 1.0, 0.2, 1.0)),
        }
    }

    /// Color at position `t` in `[0, 1]` along the gradient.
    pub fn color_at(self, t: f64) -> Color {
        let (low, high) = self.stops();
        low.lerp(high, t as f32)
    }
}

/// Values sampled on a rectilinear grid, shaded in level bands.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourGrid {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<Vec<f64>>,
    nlevels: usize,
    palette: Palette,
    edges: Option<LineStyle>,
}

impl ContourGrid {
    /// Create a grid; `z` holds one row of `x.len()` values per `y` value.
    ///
    /// `x` and `y` need at least two strictly increasing values each, and at
    /// least three levels are required.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<Vec<f64>>, nlevels: usize) -> PlotResult<Self> {
        let shortest = x.len().min(y.len());
        if shortest < 2 {
            return Err(PlotError::TooFewPoints {
                required: 2,
                actual: shortest,
            });
        }
        if !is_strictly_increasing(&x) {
            return Err(PlotError::NotStrictlyIncreasing("x"));
        }
        if !is_strictly_increasing(&y) {
            return Err(PlotError::NotStrictlyIncreasing("y"));
        }
        if z.len() != y.len() || z.iter().any(|row| row.len() != x.len()) {
            return Err(PlotError::GridMismatch {
                rows: z.len(),
                cols: z.first().map_or(0, Vec::len),
                nx: x.len(),
                ny: y.len(),
            });
        }
        if nlevels < 3 {
            return Err(PlotError::TooFewLevels(nlevels));
        }
        Ok(Self {
            x,
            y,
            z,
            nlevels,
            palette: Palette::default(),
            edges: Some(LineStyle::default()),
        })
    }

    /// X coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Value at column `i`, row `j`.
    pub fn z(&self, i: usize, j: usize) -> Option<f64> {
        self.z.get(j)?.get(i).copied()
    }

    /// Number of levels.
    pub fn nlevels(&self) -> usize {
        self.nlevels
    }

    /// Change the number of levels; at least three are required.
    pub fn set_nlevels(&mut self, nlevels: usize) -> PlotResult<()> {
        if nlevels < 3 {
            return Err(PlotError::TooFewLevels(nlevels));
        }
        self.nlevels = nlevels;
        Ok(())
    }

    /// Shading palette.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Change the shading palette.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Style of the lines between bands, or `None` when hidden.
    pub fn edges(&self) -> Option<LineStyle> {
        self.edges
    }

    /// Draw band edges with the given color and width; width must be strictly positive.
    pub fn set_edges(&mut self, color: Color, width: f64) -> PlotResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PlotError::InvalidLineWidth(width));
        }
        self.edges = Some(LineStyle {
            color,
            width: width as f32,
        });
        Ok(())
    }

    /// Hide band edges.
    pub fn hide_edges(&mut self) {
        self.edges = None;
    }

    /// Range of the finite z values.
    pub fn z_range(&self) -> Option<Range> {
        Range::of_values(self.z.iter().flatten().copied())
    }

    /// Grid bounds.
    pub fn extent(&self) -> Extent {
        Extent::new(
            self.x[0],
            self.x[self.x.len() - 1],
            self.y[0],
            self.y[self.y.len() - 1],
        )
    }

    /// Level band of a value: `0..nlevels - 1`, or `None` for non-finite values.
    pub fn band(&self, value: f64) -> Option<usize> {
        let range = self.z_range()?;
        band_of(value, range, self.nlevels)
    }

    /// Fill color of a band.
    pub fn band_color(&self, band: usize) -> Color {
        let bands = self.nlevels - 1;
        let t = if bands <= 1 {
            0.0
        } else {
            band as f64 / (bands - 1) as f64
        };
        self.palette.color_at(t)
    }
}

/// Band index of `value` among `nlevels` evenly spaced levels over `range`.
pub(crate) fn band_of(value: f64, range: Range, nlevels: usize) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let bands = nlevels.saturating_sub(1).max(1);
    if range.span() <= 0.0 {
        return Some(0);
    }
    let t = ((value - range.min) / range.span()).clamp(0.0, 1.0);
    Some(((t * bands as f64) as usize).min(bands - 1))
}

fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_bounds_must_enclose_their_point() {
        let data = Dataset2d::new(vec![1.0, 2.0], vec![5.0, 6.0]).unwrap();
        assert_eq!(
            data.clone().with_x_errors(vec![0.5], vec![1.5, 2.5]).err(),
            Some(PlotError::LengthMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            data.clone().with_y_errors(vec![4.0, 6.5], vec![5.5, 7.0]).err(),
            Some(PlotError::ErrorBarOutOfOrder {
                axis: Axis::Y,
                index: 1
            })
        );
        assert!(data.with_x_errors(vec![1.0, 1.5], vec![1.0, 3.0]).is_ok());
    }

    #[test]
    fn error_bars_widen_the_range() {
        let mut data = Dataset2d::new(vec![1.0, 2.0], vec![5.0, 6.0])
            .unwrap()
            .with_y_errors(vec![4.0, 5.5], vec![5.5, 9.0])
            .unwrap();
        assert_eq!(data.y_range(|_| true), Some(Range::new(4.0, 9.0)));
        assert_eq!(data.x_range(|_| true), Some(Range::new(1.0, 2.0)));
        data.push_point(Point::new(3.0, 1.0));
        assert_eq!(data.y_errors().map(|(low, _)| low.len()), Some(3));
        let bars: Vec<_> = data.error_bars().collect();
        assert_eq!(bars[1], (Point::new(2.0, 5.5), Point::new(2.0, 9.0)));
        assert_eq!(bars[2], (Point::new(3.0, 1.0), Point::new(3.0, 1.0)));
    }

    #[test]
    fn dataset_validation() {
        assert_eq!(
            Dataset2d::new(vec![1.0, 2.0], vec![1.0]),
            Err(PlotError::LengthMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            Dataset2d::new(vec![1.0], vec![1.0]),
            Err(PlotError::TooFewPoints {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            Dataset2d::new(vec![3.0, 3.0, 3.0], vec![1.0, 2.0, 3.0]),
            Err(PlotError::DegenerateData)
        );
        let data = Dataset2d::new(vec![0.0, 1.0], vec![5.0, 5.0]).unwrap();
        assert_eq!(data.len(), 2);
        assert!(data.line().is_some());
        assert!(data.marker().is_none());
    }

    #[test]
    fn dataset_styles_are_validated() {
        let mut data = Dataset2d::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        assert!(data.set_line(Color::RED, 0.0).is_err());
        assert!(data.set_marker_scale(-1.0).is_err());
        data.set_marker(MarkerShape::Square, Color::BLUE);
        data.set_marker_scale(2.0).unwrap();
        assert_eq!(data.marker().map(|marker| marker.size), Some(8.0));
    }

    #[test]
    fn histogram_validation() {
        assert!(HistogramBins::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert_eq!(
            HistogramBins::new(vec![0.0, 2.0, 1.0], vec![1.0, 1.0]),
            Err(PlotError::NotStrictlyIncreasing("bin edges"))
        );
        assert_eq!(
            HistogramBins::new(vec![0.0, 1.0, 2.0], vec![1.0, -1.0]),
            Err(PlotError::NegativeCount)
        );
        let bins = HistogramBins::new(vec![0.0, 1.0, 3.0], vec![4.0, 2.0]).unwrap();
        assert_eq!(bins.extent(), Extent::new(0.0, 3.0, 0.0, 4.0));
        assert_eq!(bins.bins().nth(1), Some((1.0, 3.0, 2.0)));
    }

    #[test]
    fn contour_validation() {
        let z = vec![vec![0.0, 1.0], vec![2.0, 3.0]];
        assert_eq!(
            ContourGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], z.clone(), 2),
            Err(PlotError::TooFewLevels(2))
        );
        assert_eq!(
            ContourGrid::new(vec![1.0, 0.0], vec![0.0, 1.0], z.clone(), 5),
            Err(PlotError::NotStrictlyIncreasing("x"))
        );
        assert!(matches!(
            ContourGrid::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], z.clone(), 5),
            Err(PlotError::GridMismatch { nx: 3, ny: 2, .. })
        ));
        let grid = ContourGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], z, 5).unwrap();
        assert_eq!(grid.z(1, 0), Some(1.0));
        assert_eq!(grid.band(0.0), Some(0));
        assert_eq!(grid.band(3.0), Some(3));
        assert_eq!(grid.band(f64::NAN), None);
    }

    #[test]
    fn palette_endpoints() {
        let (low, high) = Palette::Gray.stops();
        assert_eq!(Palette::Gray.color_at(0.0), low);
        assert_eq!(Palette::Gray.color_at(1.0), high);
    }
}
