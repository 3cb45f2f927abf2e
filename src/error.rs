//! Error types for plot configuration and region updates.

use crate::plot::PlotId;

/// Result alias used across the crate.
pub type PlotResult<T> = Result<T, PlotError>;

/// Error returned by event subscribers.
///
/// Subscriber failures never propagate into the gesture machinery; they are
/// logged and dropped at the dispatch boundary.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Axis identifier used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

/// Rejected arguments and invalid plot state transitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlotError {
    /// Region bounds are inverted, empty or not finite after conversion.
    #[error("invalid region: x [{xmin}, {xmax}], y [{ymin}, {ymax}]")]
    InvalidRegion {
        /// Lower X bound in internal coordinates.
        xmin: f64,
        /// Upper X bound in internal coordinates.
        xmax: f64,
        /// Lower Y bound in internal coordinates.
        ymin: f64,
        /// Upper Y bound in internal coordinates.
        ymax: f64,
    },
    /// Line width was zero, negative or not finite.
    #[error("line width must be strictly positive, got {0}")]
    InvalidLineWidth(f64),
    /// Zoom factor was not finite, not positive or exactly 1.0.
    #[error("zoom factor must be finite, positive and different from 1.0, got {0}")]
    InvalidZoomFactor(f64),
    /// Text justification outside `[0, 1]`.
    #[error("justification must be within [0.0, 1.0], got {0}")]
    InvalidJustification(f64),
    /// Scale factor was zero, negative or not finite.
    #[error("scale factor must be strictly positive, got {0}")]
    InvalidScaleFactor(f64),
    /// A value expected in normalized coordinates was outside `[0, 1]`.
    #[error("{what} must be expressed in normalized coordinates, got {value}")]
    NotNormalized {
        /// Which parameter was rejected.
        what: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Paired data arrays differ in length.
    #[error("data arrays must have the same size ({left} != {right})")]
    LengthMismatch {
        /// Length of the first array.
        left: usize,
        /// Length of the second array.
        right: usize,
    },
    /// Fewer data points than the plot kind requires.
    #[error("at least {required} data points are required, got {actual}")]
    TooFewPoints {
        /// Minimum number of points.
        required: usize,
        /// Provided number of points.
        actual: usize,
    },
    /// X values are all identical, so no extent can be derived.
    #[error("data array x must have at least two different elements")]
    DegenerateData,
    /// Coordinates of a grid or bin edges are not strictly increasing.
    #[error("{0} must consist of unique elements sorted in ascending order")]
    NotStrictlyIncreasing(&'static str),
    /// A logarithmic axis was requested for data with values <= 0.
    #[error("plot {axis} values must be strictly positive on a logarithmic axis")]
    NonPositiveLogValue {
        /// The offending axis.
        axis: Axis,
    },
    /// Polar radius values must be non-negative.
    #[error("plot R values must be non-negative")]
    NegativeRadius,
    /// Histogram counts must be non-negative.
    #[error("histogram counts must be greater than or equal to zero")]
    NegativeCount,
    /// Contour grid dimensions do not match.
    #[error("grid of {rows}x{cols} does not match x ({nx}) and y ({ny})")]
    GridMismatch {
        /// Rows in the supplied grid.
        rows: usize,
        /// Columns in the first row of the supplied grid.
        cols: usize,
        /// Number of X coordinates.
        nx: usize,
        /// Number of Y coordinates.
        ny: usize,
    },
    /// Contour plots need at least three levels.
    #[error("nlevels must be greater than or equal to 3, got {0}")]
    TooFewLevels(usize),
    /// The canvas does not own a plot with this identifier.
    #[error("no plot with id {0:?} on this canvas")]
    UnknownPlot(PlotId),
    /// An error bar whose bounds do not enclose its point.
    #[error("{axis} error bar {index} must satisfy low <= value <= high")]
    ErrorBarOutOfOrder {
        /// Axis of the error bar.
        axis: Axis,
        /// Index of the offending point.
        index: usize,
    },
    /// A dataset index past the end of the plot's datasets.
    #[error("no dataset at index {0}")]
    UnknownDataset(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_rejected_value() {
        let err = PlotError::InvalidZoomFactor(1.0);
        assert!(err.to_string().contains("1"));
        let err = PlotError::NonPositiveLogValue { axis: Axis::Y };
        assert_eq!(
            err.to_string(),
            "plot Y values must be strictly positive on a logarithmic axis"
        );
    }
}
