use faer::prelude::SpSolverLstsq;
use serde::{Deserialize, Serialize};

/// An error type for polynomial least squares fitting.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PolyFitError {
    /// The abscissae and ordinates have different lengths.
    #[error("Sample length mismatch: {0} x values vs {1} y values")]
    LengthMismatch(usize, usize),

    /// Not enough samples to determine all the coefficients.
    #[error("Degree {degree} needs more than {samples} samples")]
    DegreeTooLarge {
        /// The requested degree.
        degree: usize,
        /// Number of samples provided.
        samples: usize,
    },

    /// The solve produced non-finite coefficients.
    #[error("Least squares system is singular")]
    Singular,
}

/// A polynomial in one variable.
///
/// The coefficients are stored highest power first, so `[a, b, c]` is
/// `a x^2 + b x + c`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients, highest power first.
    ///
    /// An empty coefficient vector is the zero polynomial.
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self {
                coefficients: vec![0.0],
            };
        }
        Self { coefficients }
    }

    /// Least squares fit of a degree `degree` polynomial to `(x, y)` samples.
    ///
    /// The Vandermonde columns are scaled to unit norm before the QR solve to
    /// keep high degree fits on small abscissae well conditioned.
    ///
    /// # Arguments
    ///
    /// * `x` - The sample abscissae.
    /// * `y` - The sample ordinates.
    /// * `degree` - The degree of the polynomial.
    ///
    /// # Errors
    ///
    /// Fails if the inputs have different lengths, if `degree` is not lower than
    /// the number of samples, or if the solve is singular.
    ///
    /// # Example
    ///
    /// ```
    /// use kornia_mtf::polynomial::Polynomial;
    ///
    /// let x = [0.0, 1.0, 2.0, 3.0];
    /// let y = [1.0, 3.0, 5.0, 7.0];
    /// let p = Polynomial::fit(&x, &y, 1).unwrap();
    /// assert!((p.evaluate(4.0) - 9.0).abs() < 1e-9);
    /// ```
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Self, PolyFitError> {
        if x.len() != y.len() {
            return Err(PolyFitError::LengthMismatch(x.len(), y.len()));
        }

        let num_samples = x.len();
        if degree >= num_samples {
            return Err(PolyFitError::DegreeTooLarge {
                degree,
                samples: num_samples,
            });
        }

        let num_coeffs = degree + 1;
        let power = |i: usize, j: usize| x[i].powi((degree - j) as i32);

        // column norms of the vandermonde matrix
        let scale = (0..num_coeffs)
            .map(|j| {
                let norm = (0..num_samples)
                    .map(|i| power(i, j).powi(2))
                    .sum::<f64>()
                    .sqrt();
                if norm > 0.0 {
                    norm
                } else {
                    1.0
                }
            })
            .collect::<Vec<_>>();

        let mat_a = faer::Mat::<f64>::from_fn(num_samples, num_coeffs, |i, j| {
            power(i, j) / scale[j]
        });
        let mat_b = faer::Mat::<f64>::from_fn(num_samples, 1, |i, _| y[i]);

        let params = mat_a.qr().solve_lstsq(mat_b);
        let params = params.col(0);

        let coefficients = (0..num_coeffs)
            .map(|j| params[j] / scale[j])
            .collect::<Vec<_>>();

        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PolyFitError::Singular);
        }

        Ok(Self { coefficients })
    }

    /// The coefficients, highest power first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The degree of the polynomial, `coefficients().len() - 1`.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Evaluate the polynomial at every value of `xs`.
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Mean squared residual of the polynomial over `(x, y)` samples.
    ///
    /// Returns `None` if the slices are empty or have different lengths.
    pub fn mse(&self, x: &[f64], y: &[f64]) -> Option<f64> {
        if x.is_empty() || x.len() != y.len() {
            return None;
        }

        let sum = x
            .iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| (self.evaluate(xi) - yi).powi(2))
            .sum::<f64>();

        Some(sum / x.len() as f64)
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(p: Polynomial) -> Self {
        p.coefficients
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let degree = self.degree();
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            match degree - i {
                0 => write!(f, "{c}")?,
                1 => write!(f, "{c} x")?,
                p => write!(f, "{c} x^{p}")?,
            }
        }
        Ok(())
    }
}
