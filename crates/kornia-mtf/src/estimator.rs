use log::{debug, warn};

use crate::{
    backend::{CpuBackend, NumericBackend},
    config::{FitDegree, MtfConfig, PixelPitch},
    error::MtfError,
    polynomial::PolyFitError,
    result::{AxisMtf, MtfResult},
    roi::{Axis, Roi},
    spectrum::{frequency_axis, normalized_half_spectrum},
};

/// Minimum number of samples along each side of the ROI.
pub const MIN_ROI_SIDE: usize = 3;

/// Slanted-edge MTF estimator.
///
/// Follows Burns, "Slanted-edge MTF for digital camera and scanner analysis"
/// (IS&T PICS 2000), restricted to a centre slice per axis: the edge spread
/// profile through the ROI centre is differentiated into a line spread function,
/// transformed, normalized by its largest bin and fitted with a polynomial.
///
/// The ROI must be cropped so that the edge crosses its centre.
pub struct MtfEstimator<B: NumericBackend = CpuBackend> {
    backend: B,
    config: MtfConfig,
}

impl MtfEstimator<CpuBackend> {
    /// Creates a new estimator on the CPU backend.
    pub fn with_config(config: MtfConfig) -> Self {
        Self::new(CpuBackend, config)
    }
}

impl<B: NumericBackend> MtfEstimator<B> {
    /// Creates a new estimator.
    ///
    /// # Arguments
    ///
    /// * `backend` - The numeric backend running the gradient, FFT and fit.
    /// * `config` - The pixel pitch and fit degrees.
    pub fn new(backend: B, config: MtfConfig) -> Self {
        Self { backend, config }
    }

    /// The estimator configuration.
    pub fn config(&self) -> &MtfConfig {
        &self.config
    }

    /// The numeric backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Measure the MTF along both axes.
    ///
    /// # Arguments
    ///
    /// * `roi` - The region of interest, at least 3x3, with the edge through its centre.
    ///
    /// # Returns
    ///
    /// The horizontal and vertical results.
    ///
    /// # Errors
    ///
    /// Fails if the ROI is too small, a fit degree is too large for its axis, a
    /// profile holds non-finite samples or is constant, or a fit is singular.
    /// No partial result is returned.
    pub fn estimate(&self, roi: &Roi) -> Result<MtfResult, MtfError> {
        check_roi_size(roi)?;

        let (x, y) = if self.config.parallel {
            rayon::join(
                || self.estimate_axis(roi, Axis::X),
                || self.estimate_axis(roi, Axis::Y),
            )
        } else {
            (
                self.estimate_axis(roi, Axis::X),
                self.estimate_axis(roi, Axis::Y),
            )
        };

        Ok(MtfResult { x: x?, y: y? })
    }

    /// Measure the MTF along a single axis.
    ///
    /// Useful when only one axis of the ROI crosses the edge; the other axis
    /// would be rejected as degenerate by [`MtfEstimator::estimate`].
    ///
    /// # Errors
    ///
    /// Same as [`MtfEstimator::estimate`], restricted to `axis`.
    pub fn estimate_axis(&self, roi: &Roi, axis: Axis) -> Result<AxisMtf, MtfError> {
        check_roi_size(roi)?;

        let profile = roi.profile(axis);
        if let Some(index) = profile.iter().position(|v| !v.is_finite()) {
            return Err(MtfError::NonFiniteSample { axis, index });
        }

        let num_samples = profile.len();
        let num_bins = num_samples / 2;
        let degree = self.config.fit_degree.get(axis);
        if degree >= num_bins {
            return Err(MtfError::FitDegreeTooLarge {
                axis,
                degree,
                samples: num_bins,
            });
        }

        // edge spread -> line spread -> spectrum
        let lsf = self.backend.gradient(&profile);
        let spectrum = self.backend.fft(&lsf);

        let (mtf, peak_bin) =
            normalized_half_spectrum(&spectrum).ok_or(MtfError::DegenerateProfile { axis })?;

        if peak_bin != 0 {
            warn!(
                "{axis} spectrum peaks at bin {peak_bin} instead of DC, normalizing by that bin"
            );
        }

        let frequencies = frequency_axis(num_samples, self.config.pixel_pitch.get(axis));
        let magnitudes = mtf.iter().map(|v| v.norm()).collect::<Vec<_>>();

        let fit = self
            .backend
            .polyfit(&frequencies, &magnitudes, degree)
            .map_err(|e| match e {
                PolyFitError::DegreeTooLarge { degree, samples } => {
                    MtfError::FitDegreeTooLarge {
                        axis,
                        degree,
                        samples,
                    }
                }
                PolyFitError::LengthMismatch(..) | PolyFitError::Singular => {
                    MtfError::SingularFit { axis }
                }
            })?;

        debug!(
            "{axis} mtf on {} backend: {num_samples} samples, {num_bins} bins, degree {degree} fit",
            self.backend.name(),
        );

        Ok(AxisMtf {
            axis,
            mtf,
            frequencies,
            fit,
            peak_bin,
        })
    }
}

fn check_roi_size(roi: &Roi) -> Result<(), MtfError> {
    if roi.rows() < MIN_ROI_SIDE || roi.cols() < MIN_ROI_SIDE {
        return Err(MtfError::RoiTooSmall {
            rows: roi.rows(),
            cols: roi.cols(),
            min: MIN_ROI_SIDE,
        });
    }
    Ok(())
}

/// Compute the modulation transfer function of a slanted edge ROI.
///
/// Convenience wrapper over [`MtfEstimator`] on the CPU backend.
///
/// # Arguments
///
/// * `roi` - The region of interest containing the edge at its centre.
/// * `pixel_pitch` - Physical size of a pixel along each axis.
/// * `fit_degree` - Polynomial degree of the fit along each axis.
///
/// # Returns
///
/// The MTF samples, frequencies and polynomial fit of each axis.
///
/// # Example
///
/// ```
/// use kornia_mtf::{modulation_transfer_function, FitDegree, PixelPitch, Roi};
///
/// // 45 degree blurred edge
/// let roi = Roi::from_fn([32, 32].into(), |r, c| {
///     let d = (c as f64 - 16.0) + (r as f64 - 16.0);
///     0.5 * (1.0 + (d / 2.0).tanh())
/// });
///
/// let mtf = modulation_transfer_function(
///     &roi,
///     PixelPitch::new(1.0, 1.0).unwrap(),
///     FitDegree::new(6, 6),
/// )
/// .unwrap();
///
/// assert_eq!(mtf.x.len(), 16);
/// assert_eq!(mtf.x.frequencies[0], 0.0);
/// ```
pub fn modulation_transfer_function(
    roi: &Roi,
    pixel_pitch: PixelPitch,
    fit_degree: FitDegree,
) -> Result<MtfResult, MtfError> {
    let config = MtfConfig::new(pixel_pitch).with_fit_degree(fit_degree);
    MtfEstimator::with_config(config).estimate(roi)
}
