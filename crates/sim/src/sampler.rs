use std::f64::consts::PI;

use rand::Rng;
use rand_distr::Distribution;

use crate::error::{SimError, SimResult};

/// Normal distribution sampled with the cosine branch of Box–Muller.
///
/// Each draw consumes two uniforms and yields one variate; the sine twin is
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSampler {
    mean: f64,
    std_dev: f64,
}

impl GaussianSampler {
    pub fn new(mean: f64, std_dev: f64) -> SimResult<Self> {
        if !mean.is_finite() {
            return Err(SimError::InvalidMean(mean));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SimError::InvalidStdDev(std_dev));
        }
        Ok(Self { mean, std_dev })
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

// Uniform in (0, 1): ln(0) would blow up the radius.
#[inline]
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u != 0.0 {
            return u;
        }
    }
}

impl Distribution<f64> for GaussianSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = open_unit(rng);
        let v = open_unit(rng);
        let z = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
        self.mean + z * self.std_dev
    }
}
