use thiserror::Error;

/// Errors raised by hierarchy building, layout and color classification.
///
/// All variants are raised synchronously at the point of detection; the
/// computation is deterministic, so none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Malformed input: a bad item (missing id or category, non-positive
    /// weight), an unknown category, or an ill-formed color bucket table.
    #[error("invalid input for {id:?}: {reason}")]
    Validation { id: String, reason: String },

    /// Container width or height is not a positive finite number.
    #[error("container dimensions must be positive and finite, got {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },

    /// The padding configuration leaves no positive working area, e.g. the
    /// header band is taller than the space available to a category.
    #[error("padding leaves no usable area inside {width}x{height}")]
    DegenerateLayout { width: f64, height: f64 },

    /// A not-a-number metric value was passed to the classifier.
    #[error("metric value is not a number")]
    InvalidMetric,
}

pub type Result<T> = std::result::Result<T, LayoutError>;
