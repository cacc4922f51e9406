use serde::{Deserialize, Serialize};

use crate::error::MtfError;

/// Measurement axis of the MTF.
///
/// `X` is the horizontal direction, sampled along the columns of the centre row.
/// `Y` is the vertical direction, sampled along the rows of the centre column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Both axes, in output order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Position of the axis in the `(x, y)` parameter pairs.
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// ROI size in pixels
///
/// # Examples
///
/// ```
/// use kornia_mtf::roi::RoiSize;
///
/// let size = RoiSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiSize {
    /// Width of the ROI in pixels (number of columns).
    pub width: usize,
    /// Height of the ROI in pixels (number of rows).
    pub height: usize,
}

impl std::fmt::Display for RoiSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RoiSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for RoiSize {
    fn from(size: [usize; 2]) -> Self {
        RoiSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single channel region of interest cropped around an edge.
///
/// The samples are stored row-major with shape (H, W). The edge is expected to
/// cross the centre of the ROI; the estimator slices the centre row and the
/// centre column and never searches for the edge itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Roi {
    size: RoiSize,
    data: Vec<f64>,
}

impl Roi {
    /// Create a new ROI from row-major intensity samples.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the ROI in pixels.
    /// * `data` - The intensity samples, `size.width * size.height` of them.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the ROI size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use kornia_mtf::roi::{Roi, RoiSize};
    ///
    /// let roi = Roi::new(
    ///     RoiSize {
    ///         width: 3,
    ///         height: 2,
    ///     },
    ///     vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(roi.cols(), 3);
    /// assert_eq!(roi.rows(), 2);
    /// ```
    pub fn new(size: RoiSize, data: Vec<f64>) -> Result<Self, MtfError> {
        if data.len() != size.width * size.height {
            return Err(MtfError::InvalidRoiData(
                data.len(),
                size.width * size.height,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new ROI filled with a constant value.
    pub fn from_size_val(size: RoiSize, val: f64) -> Self {
        Self {
            size,
            data: vec![val; size.width * size.height],
        }
    }

    /// Create a new ROI by evaluating `f(row, col)` at every pixel.
    pub fn from_fn<F>(size: RoiSize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(size.width * size.height);
        for r in 0..size.height {
            for c in 0..size.width {
                data.push(f(r, c));
            }
        }
        Self { size, data }
    }

    /// Create a new ROI from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`MtfError::RaggedRoi`] if the rows do not all have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MtfError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * rows.len());

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MtfError::RaggedRoi {
                    row: i,
                    len: row.len(),
                    expected: width,
                });
            }
            data.extend_from_slice(row);
        }

        Self::new(
            RoiSize {
                width,
                height: rows.len(),
            },
            data,
        )
    }

    /// The size of the ROI in pixels.
    pub fn size(&self) -> RoiSize {
        self.size
    }

    /// Number of rows (height).
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of columns (width).
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The raw row-major samples.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Sample at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(self.data[row * self.cols() + col])
    }

    /// Borrow row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r` is out of bounds.
    pub fn row(&self, r: usize) -> &[f64] {
        let cols = self.cols();
        &self.data[r * cols..(r + 1) * cols]
    }

    /// Copy column `c` into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of bounds.
    pub fn col(&self, c: usize) -> Vec<f64> {
        assert!(c < self.cols(), "column {c} out of bounds");
        self.data
            .iter()
            .skip(c)
            .step_by(self.cols())
            .copied()
            .collect()
    }

    /// The row through the geometric centre, `rows / 2`.
    pub fn center_row(&self) -> &[f64] {
        self.row(self.rows() / 2)
    }

    /// The column through the geometric centre, `cols / 2`.
    pub fn center_col(&self) -> Vec<f64> {
        self.col(self.cols() / 2)
    }

    /// The edge spread profile sampled along `axis`.
    ///
    /// The X profile is the centre row (one sample per column), the Y profile is
    /// the centre column (one sample per row).
    pub fn profile(&self, axis: Axis) -> Vec<f64> {
        match axis {
            Axis::X => self.center_row().to_vec(),
            Axis::Y => self.center_col(),
        }
    }

    /// Number of samples of the profile along `axis`.
    pub fn axis_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.cols(),
            Axis::Y => self.rows(),
        }
    }

    /// Return a copy of the ROI with every sample multiplied by `k`.
    pub fn scale(&self, k: f64) -> Self {
        Self {
            size: self.size,
            data: self.data.iter().map(|v| v * k).collect(),
        }
    }
}
