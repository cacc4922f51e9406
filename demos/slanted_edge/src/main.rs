use argh::FromArgs;
use rand::{rngs::StdRng, Rng, SeedableRng};

use kornia_mtf::{Axis, FitDegree, MtfConfig, MtfEstimator, PixelPitch, Roi, RoiSize};

/// Measure the MTF of a synthetic slanted edge.
#[derive(FromArgs, Debug)]
struct Args {
    /// width of the region of interest in pixels
    #[argh(option, default = "64")]
    width: usize,

    /// height of the region of interest in pixels
    #[argh(option, default = "64")]
    height: usize,

    /// edge normal angle with respect to the x axis, in degrees
    #[argh(option, short = 'a', default = "30.0")]
    angle: f64,

    /// width of the edge transition in pixels
    #[argh(option, short = 'b', default = "1.0")]
    blur: f64,

    /// amplitude of the uniform noise added to the intensities
    #[argh(option, short = 'n', default = "0.0")]
    noise: f64,

    /// pixel pitch along x and y, e.g. `--pitch 3.45 --pitch 3.45`
    #[argh(option, short = 'p')]
    pitch: Vec<f64>,

    /// polynomial fit degree along x and y
    #[argh(option, short = 'd')]
    degree: Vec<i64>,

    /// process both axes concurrently
    #[argh(switch)]
    parallel: bool,

    /// seed of the noise generator
    #[argh(option, default = "0")]
    seed: u64,
}

fn synthetic_edge(size: RoiSize, angle: f64, blur: f64, noise: f64, seed: u64) -> Roi {
    let mut rng = StdRng::seed_from_u64(seed);
    let (sin, cos) = angle.to_radians().sin_cos();
    let (cy, cx) = ((size.height / 2) as f64, (size.width / 2) as f64);

    Roi::from_fn(size, |r, c| {
        let d = (c as f64 - cx) * cos + (r as f64 - cy) * sin;
        let v = 0.5 * (1.0 + (d / blur).tanh());
        if noise > 0.0 {
            v + rng.random_range(-noise..noise)
        } else {
            v
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let pixel_pitch = match args.pitch.as_slice() {
        [] => PixelPitch::new(1.0, 1.0)?,
        values => PixelPitch::try_from(values)?,
    };
    let fit_degree = match args.degree.as_slice() {
        [] => FitDegree::default(),
        values => FitDegree::try_from(values)?,
    };

    let config = MtfConfig::new(pixel_pitch)
        .with_fit_degree(fit_degree)
        .with_parallel(args.parallel);

    let size = RoiSize {
        width: args.width,
        height: args.height,
    };
    let roi = synthetic_edge(size, args.angle, args.blur, args.noise, args.seed);
    log::info!("measuring {size} with {config:?}");

    let result = MtfEstimator::with_config(config).estimate(&roi)?;

    for axis in Axis::ALL {
        let mtf = result.axis(axis);
        match mtf.frequency_at(0.5) {
            Some(f) => log::info!("{axis}: MTF50 at {f:.4}, fit mse {:.3e}", mtf.fit_mse()),
            None => log::info!("{axis}: MTF stays above 0.5, fit mse {:.3e}", mtf.fit_mse()),
        }
    }

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
