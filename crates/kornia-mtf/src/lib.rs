#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Numeric backends for the estimator.
pub mod backend;

/// Estimator configuration module.
pub mod config;

/// Error types for the mtf module.
pub mod error;

/// The slanted-edge MTF estimator.
pub mod estimator;

/// Discrete derivative of 1D profiles.
pub mod gradient;

/// Polynomial least squares fitting.
pub mod polynomial;

/// Per-axis estimation results.
pub mod result;

/// Region of interest representation.
pub mod roi;

/// Fourier transform and frequency axis utilities.
pub mod spectrum;

pub use crate::backend::{CpuBackend, NumericBackend};
pub use crate::config::{FitDegree, MtfConfig, PixelPitch};
pub use crate::error::MtfError;
pub use crate::estimator::{modulation_transfer_function, MtfEstimator};
pub use crate::polynomial::Polynomial;
pub use crate::result::{AxisMtf, MtfResult};
pub use crate::roi::{Axis, Roi, RoiSize};

pub use rustfft::num_complex::Complex64;
