use rustfft::num_complex::Complex64;
use serde::{ser::SerializeSeq, Serialize, Serializer};

use crate::{polynomial::Polynomial, roi::Axis};

/// MTF measured along one axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisMtf {
    /// The measured axis.
    pub axis: Axis,
    /// Normalized half spectrum of the line spread function.
    #[serde(serialize_with = "serialize_complex")]
    pub mtf: Vec<Complex64>,
    /// Spatial frequency of each MTF sample, in the inverse unit of the pixel pitch.
    pub frequencies: Vec<f64>,
    /// Least squares polynomial approximation of `|mtf|` over `frequencies`.
    pub fit: Polynomial,
    /// Index of the raw spectrum bin used for normalization.
    ///
    /// This is `0` for a one-signed line spread function; a different value means
    /// the DC bin was not the largest and every sample was divided by that bin.
    pub peak_bin: usize,
}

impl AxisMtf {
    /// Number of MTF samples.
    pub fn len(&self) -> usize {
        self.mtf.len()
    }

    /// Whether there are no MTF samples.
    pub fn is_empty(&self) -> bool {
        self.mtf.is_empty()
    }

    /// Magnitude of each MTF sample.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.mtf.iter().map(|v| v.norm()).collect()
    }

    /// Evaluate the fitted polynomial at `frequency`.
    pub fn evaluate(&self, frequency: f64) -> f64 {
        self.fit.evaluate(frequency)
    }

    /// Mean squared residual of the polynomial fit over the sampled frequencies.
    pub fn fit_mse(&self) -> f64 {
        self.fit
            .mse(&self.frequencies, &self.magnitudes())
            .unwrap_or(0.0)
    }

    /// First frequency at which the sampled MTF magnitude falls to `threshold`.
    ///
    /// The crossing is linearly interpolated between the two bracketing samples,
    /// so `frequency_at(0.5)` is the usual MTF50 figure.
    ///
    /// # Returns
    ///
    /// The frequency, or `None` if the magnitude never drops to `threshold`.
    pub fn frequency_at(&self, threshold: f64) -> Option<f64> {
        let magnitudes = self.magnitudes();

        if *magnitudes.first()? <= threshold {
            return self.frequencies.first().copied();
        }

        magnitudes
            .windows(2)
            .zip(self.frequencies.windows(2))
            .find(|(m, _)| m[1] <= threshold)
            .map(|(m, f)| f[0] + (m[0] - threshold) / (m[0] - m[1]) * (f[1] - f[0]))
    }
}

/// MTF measured along both axes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MtfResult {
    /// Horizontal MTF, sampled along the centre row.
    pub x: AxisMtf,
    /// Vertical MTF, sampled along the centre column.
    pub y: AxisMtf,
}

impl MtfResult {
    /// The result for `axis`.
    pub fn axis(&self, axis: Axis) -> &AxisMtf {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

/// Serialize complex samples as `[re, im]` pairs.
fn serialize_complex<S: Serializer>(values: &[Complex64], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for v in values {
        seq.serialize_element(&[v.re, v.im])?;
    }
    seq.end()
}
