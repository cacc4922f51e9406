use crate::roi::Axis;

/// An error type for the mtf module.
#[derive(thiserror::Error, Debug)]
pub enum MtfError {
    /// Error when the region of interest is too small to differentiate.
    #[error("ROI of {rows}x{cols} pixels is too small, both sides must be at least {min}")]
    RoiTooSmall {
        /// Number of rows of the ROI.
        rows: usize,
        /// Number of columns of the ROI.
        cols: usize,
        /// Minimum number of samples required along each side.
        min: usize,
    },

    /// Error when the data length does not match the ROI size.
    #[error("Data length ({0}) does not match the ROI size ({1})")]
    InvalidRoiData(usize, usize),

    /// Error when the rows used to build a ROI have different lengths.
    #[error("Row {row} has {len} samples, expected {expected}")]
    RaggedRoi {
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// Error when a profile sample is NaN or infinite.
    #[error("Non-finite sample at index {index} of the {axis} profile")]
    NonFiniteSample {
        /// Axis of the profile.
        axis: Axis,
        /// Index of the sample within the profile.
        index: usize,
    },

    /// Error when the pixel pitch vector does not hold one value per axis.
    #[error("Pixel pitch must have 2 elements, got {0}")]
    InvalidPixelPitchLength(usize),

    /// Error when the pixel pitch is not strictly positive.
    #[error("Pixel pitch along {axis} must be finite and positive, got {value}")]
    InvalidPixelPitch {
        /// Axis of the offending pitch.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },

    /// Error when the fit degree vector does not hold one value per axis.
    #[error("Fit degree must have 2 elements, got {0}")]
    InvalidFitDegreeLength(usize),

    /// Error when a negative polynomial degree is requested.
    #[error("Fit degree along {axis} must be non-negative, got {value}")]
    NegativeFitDegree {
        /// Axis of the offending degree.
        axis: Axis,
        /// The rejected value.
        value: i64,
    },

    /// Error when the polynomial degree is not lower than the number of frequency samples.
    #[error("Fit degree {degree} along {axis} needs more than {samples} frequency samples")]
    FitDegreeTooLarge {
        /// Axis of the offending degree.
        axis: Axis,
        /// The requested degree.
        degree: usize,
        /// Number of frequency samples available on that axis.
        samples: usize,
    },

    /// Error when the line spread function is zero everywhere.
    #[error("The {axis} profile is constant, its line spread function is zero everywhere")]
    DegenerateProfile {
        /// Axis of the degenerate profile.
        axis: Axis,
    },

    /// Error when the least squares fit could not produce finite coefficients.
    #[error("Polynomial fit along {axis} is singular")]
    SingularFit {
        /// Axis of the failed fit.
        axis: Axis,
    },

    /// Error when the configuration document cannot be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
