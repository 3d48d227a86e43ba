use projectile_shared::config::Launcher;
use projectile_shared::result::BatchResult;
use rand::Rng;
use rand_distr::Distribution;

use crate::error::{SimError, SimResult};
use crate::sampler::GaussianSampler;
use crate::trajectory::{projectile_range, validate_angle, validate_gravity};

/// Fires batches from one launcher at a fixed angle.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    launcher_id: u32,
    velocity: GaussianSampler,
    angle_deg: f64,
    gravity: f64,
}

impl SampleGenerator {
    pub fn new(launcher: &Launcher, angle_deg: f64, gravity: f64) -> SimResult<Self> {
        Ok(Self {
            launcher_id: launcher.id,
            velocity: GaussianSampler::new(launcher.velocity_mean, launcher.velocity_std_dev)?,
            angle_deg: validate_angle(angle_deg)?,
            gravity: validate_gravity(gravity)?,
        })
    }

    pub fn launcher_id(&self) -> u32 {
        self.launcher_id
    }

    /// One landing distance per projectile, each from its own velocity draw.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        sample_size: usize,
        rng: &mut R,
    ) -> SimResult<BatchResult> {
        if sample_size == 0 {
            return Err(SimError::InvalidSampleSize);
        }
        let distances = (0..sample_size)
            .map(|_| {
                let v = self.velocity.sample(&mut *rng);
                projectile_range(v, self.angle_deg, self.gravity)
            })
            .collect();
        Ok(BatchResult::new(self.launcher_id, distances))
    }
}

/// Convenience wrapper around [`SampleGenerator`] for a one-off batch.
pub fn generate_samples<R: Rng + ?Sized>(
    launcher: &Launcher,
    angle_deg: f64,
    gravity: f64,
    sample_size: usize,
    rng: &mut R,
) -> SimResult<BatchResult> {
    SampleGenerator::new(launcher, angle_deg, gravity)?.generate(sample_size, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use projectile_shared::config::GRAVITY;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn launcher_one() -> Launcher {
        Launcher::new(1, "Launcher 1", 20.0, 0.5, "#FF6B6B")
    }

    #[test]
    fn batch_matches_range_of_each_drawn_velocity() {
        let launcher = launcher_one();
        let mut rng = Pcg64::seed_from_u64(11);
        let batch = generate_samples(&launcher, 45.0, GRAVITY, 5, &mut rng).unwrap();
        assert_eq!(batch.sample_size(), 5);
        assert_eq!(batch.launcher_id, 1);

        // Replay the velocity stream with the same seed.
        let sampler = GaussianSampler::new(20.0, 0.5).unwrap();
        let mut replay = Pcg64::seed_from_u64(11);
        for d in &batch.distances {
            let v = sampler.sample(&mut replay);
            assert!((d - v * v / GRAVITY).abs() < 1e-9);
        }
    }

    #[test]
    fn exact_launcher_gives_constant_batch() {
        let launcher = Launcher::new(9, "exact", 20.0, 0.0, "#000000");
        let mut rng = Pcg64::seed_from_u64(0);
        let batch = generate_samples(&launcher, 45.0, GRAVITY, 40, &mut rng).unwrap();
        let expected = 400.0 / GRAVITY;
        assert!(batch.distances.iter().all(|d| (d - expected).abs() < 1e-9));
        assert!((batch.mean() - expected).abs() < 1e-9);
    }

    #[test]
    fn rejects_empty_batch() {
        let mut rng = Pcg64::seed_from_u64(0);
        let err = generate_samples(&launcher_one(), 45.0, GRAVITY, 0, &mut rng).unwrap_err();
        assert_eq!(err, SimError::InvalidSampleSize);
    }

    #[test]
    fn rejects_bad_launcher() {
        let launcher = Launcher::new(2, "broken", 20.0, -1.0, "#000000");
        assert!(matches!(
            SampleGenerator::new(&launcher, 45.0, GRAVITY),
            Err(SimError::InvalidStdDev(_))
        ));
    }
}
