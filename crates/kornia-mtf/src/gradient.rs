/// Compute the first order derivative of a 1D signal.
///
/// Interior samples use the centred difference `(f[i + 1] - f[i - 1]) / 2`, the
/// first and last samples use one-sided differences. Applied to an edge spread
/// profile this yields the line spread function.
///
/// # Arguments
///
/// * `profile` - The input signal.
///
/// # Returns
///
/// The derivative, same length as the input. Signals shorter than two samples
/// have no defined slope and produce zeros.
///
/// # Example
///
/// ```
/// use kornia_mtf::gradient::gradient_1d;
///
/// let der = gradient_1d(&[1.0, 2.0, 4.0, 7.0, 11.0]);
/// assert_eq!(der, vec![1.0, 1.5, 2.5, 3.5, 4.0]);
/// ```
pub fn gradient_1d(profile: &[f64]) -> Vec<f64> {
    let n = profile.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut der = Vec::with_capacity(n);
    der.push(profile[1] - profile[0]);
    der.extend(profile.windows(3).map(|w| (w[2] - w[0]) * 0.5));
    der.push(profile[n - 1] - profile[n - 2]);

    der
}
