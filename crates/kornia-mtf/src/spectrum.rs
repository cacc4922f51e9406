use rustfft::{num_complex::Complex64, Fft, FftPlanner};

/// Compute the forward discrete Fourier transform of a real signal.
///
/// The transform is unnormalized, `X[k] = sum_n x[n] exp(-2 pi i k n / N)`.
///
/// # Arguments
///
/// * `signal` - The real input signal.
///
/// # Returns
///
/// The complex spectrum, same length as the input.
pub fn fft_1d(signal: &[f64]) -> Vec<Complex64> {
    let mut buffer = signal
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect::<Vec<_>>();

    if buffer.is_empty() {
        return buffer;
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    buffer
}

/// Normalize a spectrum by its largest bin and keep the non-negative half.
///
/// Every bin is divided by the bin with the largest magnitude, which is not
/// necessarily the DC bin: a line spread function with both positive and
/// negative lobes peaks elsewhere. Only the first `N / 2` bins are returned
/// since the spectrum of a real signal is conjugate symmetric.
///
/// # Arguments
///
/// * `spectrum` - The full spectrum of a real signal.
///
/// # Returns
///
/// The normalized half spectrum and the index of the peak bin, or `None` if all
/// bins are zero or the peak is not finite.
pub fn normalized_half_spectrum(spectrum: &[Complex64]) -> Option<(Vec<Complex64>, usize)> {
    // first bin wins on ties
    let (peak_bin, peak) = spectrum
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, Complex64)>, (i, &v)| match best {
            Some((_, b)) if b.norm() >= v.norm() => best,
            _ => Some((i, v)),
        })?;

    let norm = peak.norm();
    if !norm.is_finite() || norm <= f64::MIN_POSITIVE {
        return None;
    }

    let half = spectrum
        .iter()
        .take(spectrum.len() / 2)
        .map(|&v| v / peak)
        .collect();

    Some((half, peak_bin))
}

/// Build the physical frequency of each bin kept by [`normalized_half_spectrum`].
///
/// Bin `k` of an `n` sample signal with pixel pitch `pitch` sits at
/// `k / (n * pitch)`, in the inverse unit of the pitch.
///
/// # Example
///
/// ```
/// use kornia_mtf::spectrum::frequency_axis;
///
/// let frq = frequency_axis(8, 0.5);
/// assert_eq!(frq, vec![0.0, 0.25, 0.5, 0.75]);
/// ```
pub fn frequency_axis(n: usize, pitch: f64) -> Vec<f64> {
    let period = n as f64 * pitch;
    (0..n / 2).map(|k| k as f64 / period).collect()
}
