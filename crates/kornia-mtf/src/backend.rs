//! Numeric backend abstraction for the MTF estimator.
//!
//! The estimator is written once against [`NumericBackend`]; each compute
//! target (CPU, GPU array libraries, etc.) provides its own implementation and
//! is selected at compile time through the estimator's type parameter.

use rustfft::num_complex::Complex64;

use crate::{
    gradient::gradient_1d,
    polynomial::{PolyFitError, Polynomial},
    spectrum::fft_1d,
};

/// Backend trait defining the numeric operations of the MTF pipeline.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so both axes can be processed
/// concurrently with a shared backend.
pub trait NumericBackend: Send + Sync + 'static {
    /// Short name of the backend, used in log records.
    fn name(&self) -> &'static str;

    /// First order derivative of a 1D profile.
    ///
    /// Centred differences in the interior, one-sided differences at both ends.
    fn gradient(&self, profile: &[f64]) -> Vec<f64>;

    /// Unnormalized forward DFT of a real signal.
    fn fft(&self, signal: &[f64]) -> Vec<Complex64>;

    /// Least squares polynomial fit of degree `degree` to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs do not determine the polynomial.
    fn polyfit(&self, x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial, PolyFitError>;
}

/// CPU backend implementation.
///
/// Uses `rustfft` for the transform and a `faer` QR solve for the fit.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// Creates a new CPU backend.
    pub fn new() -> Self {
        Self
    }
}

impl NumericBackend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn gradient(&self, profile: &[f64]) -> Vec<f64> {
        gradient_1d(profile)
    }

    fn fft(&self, signal: &[f64]) -> Vec<Complex64> {
        fft_1d(signal)
    }

    fn polyfit(&self, x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial, PolyFitError> {
        Polynomial::fit(x, y, degree)
    }
}
