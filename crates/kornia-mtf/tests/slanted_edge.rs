use approx::assert_relative_eq;
use kornia_mtf::{
    gradient::gradient_1d, modulation_transfer_function, Axis, FitDegree, MtfConfig, MtfError,
    MtfEstimator, PixelPitch, Roi, RoiSize,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Blurred straight edge through the ROI centre.
///
/// `angle_deg` is the angle between the edge normal and the X axis, `blur` the
/// width of the tanh transition in pixels.
fn slanted_edge(size: RoiSize, angle_deg: f64, blur: f64) -> Roi {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (cy, cx) = ((size.height / 2) as f64, (size.width / 2) as f64);
    Roi::from_fn(size, |r, c| {
        let d = (c as f64 - cx) * cos + (r as f64 - cy) * sin;
        0.5 * (1.0 + (d / blur).tanh())
    })
}

fn step_edge(size: RoiSize) -> Roi {
    Roi::from_fn(size, |_, c| if c < size.width / 2 { 0.0 } else { 1.0 })
}

fn unit_pitch() -> PixelPitch {
    PixelPitch::new(1.0, 1.0).unwrap()
}

#[test]
fn lengths_follow_roi_shape() -> Result<(), MtfError> {
    let roi = slanted_edge(RoiSize { width: 37, height: 50 }, 30.0, 1.0);
    let mtf = modulation_transfer_function(&roi, unit_pitch(), FitDegree::new(6, 6))?;

    assert_eq!(mtf.x.mtf.len(), 18);
    assert_eq!(mtf.x.frequencies.len(), 18);
    assert_eq!(mtf.y.mtf.len(), 25);
    assert_eq!(mtf.y.frequencies.len(), 25);
    assert_eq!(mtf.axis(Axis::X).axis, Axis::X);
    assert_eq!(mtf.axis(Axis::Y).axis, Axis::Y);
    Ok(())
}

#[test]
fn frequencies_start_at_zero_and_increase() -> Result<(), MtfError> {
    let roi = slanted_edge([64, 48].into(), 30.0, 1.0);
    let pitch = PixelPitch::new(2.5e-3, 4.0e-3)?;
    let mtf = modulation_transfer_function(&roi, pitch, FitDegree::default())?;

    for axis in Axis::ALL {
        let frq = &mtf.axis(axis).frequencies;
        assert_eq!(frq[0], 0.0);
        assert!(frq.windows(2).all(|w| w[0] <= w[1]));
    }

    assert_relative_eq!(mtf.x.frequencies[1], 1.0 / (64.0 * 2.5e-3));
    assert_relative_eq!(mtf.y.frequencies[1], 1.0 / (48.0 * 4.0e-3));
    Ok(())
}

#[test]
fn magnitudes_are_bounded_by_one() -> Result<(), MtfError> {
    let roi = slanted_edge([64, 64].into(), 45.0, 1.5);
    let mtf = modulation_transfer_function(&roi, unit_pitch(), FitDegree::default())?;

    for axis in Axis::ALL {
        let magnitudes = mtf.axis(axis).magnitudes();
        assert!(magnitudes.iter().all(|&m| m <= 1.0 + 1e-12));
        assert_relative_eq!(magnitudes[0], 1.0, epsilon = 1e-12);
        assert_eq!(mtf.axis(axis).peak_bin, 0);
    }
    Ok(())
}

#[test]
fn intensity_scale_does_not_change_mtf() -> Result<(), MtfError> {
    let roi = slanted_edge([48, 48].into(), 20.0, 1.0);
    let fit_degree = FitDegree::new(8, 8);

    let reference = modulation_transfer_function(&roi, unit_pitch(), fit_degree)?;
    let scaled = modulation_transfer_function(&roi.scale(37.5), unit_pitch(), fit_degree)?;

    for axis in Axis::ALL {
        let (a, b) = (reference.axis(axis), scaled.axis(axis));
        assert_eq!(a.frequencies, b.frequencies);
        for (ma, mb) in a.magnitudes().iter().zip(b.magnitudes().iter()) {
            assert_relative_eq!(*ma, *mb, epsilon = 1e-12);
        }
    }
    Ok(())
}

#[test]
fn doubling_pitch_halves_frequencies() -> Result<(), MtfError> {
    let roi = slanted_edge([40, 40].into(), 35.0, 1.0);
    let fit_degree = FitDegree::new(5, 5);

    let reference = modulation_transfer_function(&roi, unit_pitch(), fit_degree)?;
    let doubled = modulation_transfer_function(&roi, PixelPitch::new(2.0, 1.0)?, fit_degree)?;

    for (f1, f2) in reference.x.frequencies.iter().zip(doubled.x.frequencies.iter()) {
        assert_relative_eq!(*f2, f1 / 2.0);
    }
    assert_eq!(reference.x.mtf, doubled.x.mtf);
    assert_eq!(reference.y, doubled.y);

    // the fit follows the frequency axis
    assert_relative_eq!(
        reference.x.evaluate(0.2),
        doubled.x.evaluate(0.1),
        epsilon = 1e-6
    );
    Ok(())
}

#[test]
fn degenerate_inputs_are_rejected() {
    let tiny = Roi::from_rows(&[[0.0, 1.0], [0.0, 1.0]]).unwrap();
    assert!(matches!(
        modulation_transfer_function(&tiny, unit_pitch(), FitDegree::new(0, 0)),
        Err(MtfError::RoiTooSmall { .. })
    ));

    assert!(matches!(
        PixelPitch::new(0.0, 1.0),
        Err(MtfError::InvalidPixelPitch { axis: Axis::X, .. })
    ));
    assert!(matches!(
        PixelPitch::new(1.0, -1.0),
        Err(MtfError::InvalidPixelPitch { axis: Axis::Y, .. })
    ));
    assert!(matches!(
        PixelPitch::try_from(&[1.0][..]),
        Err(MtfError::InvalidPixelPitchLength(1))
    ));
    assert!(matches!(
        FitDegree::try_from(&[-2i64, 3][..]),
        Err(MtfError::NegativeFitDegree {
            axis: Axis::X,
            value: -2
        })
    ));

    let roi = slanted_edge([20, 64].into(), 30.0, 1.0);
    assert!(matches!(
        modulation_transfer_function(&roi, unit_pitch(), FitDegree::new(10, 10)),
        Err(MtfError::FitDegreeTooLarge {
            axis: Axis::X,
            degree: 10,
            samples: 10
        })
    ));
}

#[test]
fn smallest_roi_supports_constant_fit() -> Result<(), MtfError> {
    let roi = Roi::from_rows(&[[0.0, 0.5, 1.0], [0.0, 0.5, 1.0], [0.0, 1.0, 1.0]])?;
    let mtf = modulation_transfer_function(&roi, unit_pitch(), FitDegree::new(0, 0))?;
    assert_eq!(mtf.x.len(), 1);
    assert_eq!(mtf.y.len(), 1);
    assert_eq!(mtf.x.fit.degree(), 0);
    Ok(())
}

#[test]
fn perfect_step_edge() -> Result<(), MtfError> {
    let roi = step_edge([64, 64].into());

    // the line spread function is a spike on the column boundary
    let lsf = gradient_1d(&roi.profile(Axis::X));
    let support = lsf
        .iter()
        .enumerate()
        .filter(|(_, v)| **v != 0.0)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    assert_eq!(support, vec![31, 32]);

    let estimator = MtfEstimator::with_config(MtfConfig::new(unit_pitch()));
    let x = estimator.estimate_axis(&roi, Axis::X)?;
    let magnitudes = x.magnitudes();
    assert_eq!(magnitudes.len(), 32);
    assert_relative_eq!(magnitudes[0], 1.0, epsilon = 1e-12);
    assert!(magnitudes.windows(2).all(|w| w[1] < w[0]));

    // two half spikes one pixel apart: |cos(pi k / N)|
    for (k, m) in magnitudes.iter().enumerate() {
        let expected = (std::f64::consts::PI * k as f64 / 64.0).cos();
        assert_relative_eq!(*m, expected, epsilon = 1e-9);
    }

    // the edge is constant along the columns, the vertical axis has no signal
    assert!(matches!(
        estimator.estimate(&roi),
        Err(MtfError::DegenerateProfile { axis: Axis::Y })
    ));
    Ok(())
}

#[test]
fn fit_tracks_smooth_mtf() -> Result<(), MtfError> {
    let roi = slanted_edge([64, 64].into(), 30.0, 1.0);
    let mtf = modulation_transfer_function(&roi, unit_pitch(), FitDegree::new(5, 5))?;

    for axis in Axis::ALL {
        let axis_mtf = mtf.axis(axis);
        assert_eq!(axis_mtf.fit.degree(), 5);
        assert!(axis_mtf.fit_mse() < 1e-3, "{axis}: {}", axis_mtf.fit_mse());
    }
    Ok(())
}

#[test]
fn fit_smooths_noisy_edge() -> Result<(), MtfError> {
    let mut rng = StdRng::seed_from_u64(42);
    let clean = slanted_edge([64, 64].into(), 30.0, 1.0);
    let noisy = Roi::new(
        clean.size(),
        clean
            .as_slice()
            .iter()
            .map(|v| v + rng.random_range(-2e-3..2e-3))
            .collect(),
    )?;

    let config = MtfConfig::new(unit_pitch()).with_parallel(true);
    let mtf = MtfEstimator::with_config(config).estimate(&noisy)?;

    for axis in Axis::ALL {
        let axis_mtf = mtf.axis(axis);
        assert!(axis_mtf.magnitudes().iter().all(|&m| m <= 1.0 + 1e-12));
        assert!(axis_mtf.fit_mse() < 1e-2, "{axis}: {}", axis_mtf.fit_mse());
    }
    Ok(())
}

#[test]
fn blur_lowers_mtf50() -> Result<(), MtfError> {
    let sharp = slanted_edge([64, 64].into(), 30.0, 0.5);
    let soft = slanted_edge([64, 64].into(), 30.0, 2.0);

    let sharp = modulation_transfer_function(&sharp, unit_pitch(), FitDegree::default())?;
    let soft = modulation_transfer_function(&soft, unit_pitch(), FitDegree::default())?;

    let mtf50_sharp = sharp.x.frequency_at(0.5).unwrap();
    let mtf50_soft = soft.x.frequency_at(0.5).unwrap();
    assert!(mtf50_soft < mtf50_sharp);
    Ok(())
}
