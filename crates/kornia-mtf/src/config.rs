use serde::{Deserialize, Serialize};

use crate::{error::MtfError, roi::Axis};

/// Physical size of a pixel along each axis.
///
/// The unit is free (microns, arcseconds, ...); frequencies come out in its inverse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct PixelPitch {
    x: f64,
    y: f64,
}

impl PixelPitch {
    /// Create a new pixel pitch.
    ///
    /// # Errors
    ///
    /// Both values must be finite and strictly positive.
    pub fn new(x: f64, y: f64) -> Result<Self, MtfError> {
        for (axis, value) in [(Axis::X, x), (Axis::Y, y)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MtfError::InvalidPixelPitch { axis, value });
            }
        }
        Ok(Self { x, y })
    }

    /// Pitch along the horizontal axis.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Pitch along the vertical axis.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Pitch along `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl TryFrom<&[f64]> for PixelPitch {
    type Error = MtfError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match values {
            [x, y] => Self::new(*x, *y),
            _ => Err(MtfError::InvalidPixelPitchLength(values.len())),
        }
    }
}

impl TryFrom<Vec<f64>> for PixelPitch {
    type Error = MtfError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl From<PixelPitch> for [f64; 2] {
    fn from(pitch: PixelPitch) -> Self {
        [pitch.x, pitch.y]
    }
}

/// Degree of the polynomial fitted to the MTF of each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "[usize; 2]")]
pub struct FitDegree {
    /// Degree of the horizontal fit.
    pub x: usize,
    /// Degree of the vertical fit.
    pub y: usize,
}

impl FitDegree {
    /// Create a new fit degree pair.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Degree along `axis`.
    pub fn get(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl Default for FitDegree {
    fn default() -> Self {
        Self { x: 10, y: 10 }
    }
}

impl TryFrom<&[i64]> for FitDegree {
    type Error = MtfError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        let [x, y] = values else {
            return Err(MtfError::InvalidFitDegreeLength(values.len()));
        };

        let check = |axis: Axis, value: i64| {
            usize::try_from(value).map_err(|_| MtfError::NegativeFitDegree { axis, value })
        };

        Ok(Self {
            x: check(Axis::X, *x)?,
            y: check(Axis::Y, *y)?,
        })
    }
}

impl TryFrom<Vec<i64>> for FitDegree {
    type Error = MtfError;

    fn try_from(values: Vec<i64>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl From<FitDegree> for [usize; 2] {
    fn from(degree: FitDegree) -> Self {
        [degree.x, degree.y]
    }
}

/// Configuration of the MTF estimator.
///
/// # Examples
///
/// ```
/// use kornia_mtf::config::MtfConfig;
///
/// let config = MtfConfig::from_json_str(r#"{"pixel_pitch": [2.0, 2.0]}"#).unwrap();
/// assert_eq!(config.fit_degree.x, 10);
/// assert!(!config.parallel);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MtfConfig {
    /// Physical pixel pitch along each axis.
    pub pixel_pitch: PixelPitch,
    /// Polynomial degree of the fit along each axis.
    #[serde(default)]
    pub fit_degree: FitDegree,
    /// Process both axes concurrently.
    #[serde(default)]
    pub parallel: bool,
}

impl MtfConfig {
    /// Creates a new `MtfConfig` with the default fit degree `(10, 10)`.
    pub fn new(pixel_pitch: PixelPitch) -> Self {
        Self {
            pixel_pitch,
            fit_degree: FitDegree::default(),
            parallel: false,
        }
    }

    /// Set the polynomial degree of both fits.
    pub fn with_fit_degree(mut self, fit_degree: FitDegree) -> Self {
        self.fit_degree = fit_degree;
        self
    }

    /// Enable or disable processing both axes concurrently.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parse and validate a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MtfError::InvalidConfig`] if the document is malformed or holds
    /// an invalid pixel pitch or fit degree.
    pub fn from_json_str(s: &str) -> Result<Self, MtfError> {
        Ok(serde_json::from_str(s)?)
    }
}
