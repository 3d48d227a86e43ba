use rand::SeedableRng;
use rand_pcg::Pcg64;
use rayon::prelude::*;

use projectile_shared::config::{Launcher, SimulationConfig};
use projectile_shared::result::{SampleSizeResult, StudyResult};

use crate::error::SimError;
use crate::generator::SampleGenerator;

/// Seeds for batch `i` are `seed_start + i * seed_stride`.
#[derive(Debug, Clone, Copy)]
pub struct StudyPlan {
    pub batches_per_size: u32,
    pub seed_start: u64,
    pub seed_stride: u64,
}

impl Default for StudyPlan {
    fn default() -> Self {
        Self {
            batches_per_size: projectile_shared::config::DEFAULT_STUDY_BATCHES,
            seed_start: 0,
            seed_stride: 1,
        }
    }
}

impl StudyPlan {
    fn seed(&self, sample_size: usize, batch: u32) -> u64 {
        // Each sample size gets its own seed lane so sizes stay independent.
        let lane = (sample_size as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.seed_start
            .wrapping_add((batch as u64).wrapping_mul(self.seed_stride))
            ^ lane
    }
}

fn run_size(
    generator: &SampleGenerator,
    sample_size: usize,
    plan: &StudyPlan,
) -> Result<SampleSizeResult, SimError> {
    let means: Result<Vec<f64>, SimError> = (0..plan.batches_per_size)
        .into_par_iter()
        .map(|i| {
            let mut rng = Pcg64::seed_from_u64(plan.seed(sample_size, i));
            generator.generate(sample_size, &mut rng).map(|b| b.mean())
        })
        .collect();
    Ok(SampleSizeResult {
        sample_size,
        means: means?,
    })
}

/// Builds the sampling distribution of the batch mean for every sample size
/// at once, in parallel. Results are independent of the worker count.
pub fn run_study(
    launcher: &Launcher,
    config: &SimulationConfig,
    plan: &StudyPlan,
    n_workers: Option<usize>,
) -> anyhow::Result<StudyResult> {
    let generator = SampleGenerator::new(launcher, config.launch_angle_deg, config.gravity)?;
    if config.sample_sizes.contains(&0) {
        return Err(SimError::InvalidSampleSize.into());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers.unwrap_or_else(|| rayon::current_num_threads().min(8)))
        .build()?;

    log::info!(
        "study: {} x{} batches for sizes {:?}",
        launcher.name,
        plan.batches_per_size,
        config.sample_sizes
    );

    let per_size: Result<Vec<SampleSizeResult>, SimError> = pool.install(|| {
        config
            .sample_sizes
            .par_iter()
            .map(|&n| run_size(&generator, n, plan))
            .collect()
    });

    Ok(StudyResult {
        launcher_id: launcher.id,
        per_size: per_size?,
    })
}

pub fn run_default_study(
    launcher_id: u32,
    batches_per_size: u32,
    n_workers: Option<usize>,
) -> anyhow::Result<StudyResult> {
    let config = SimulationConfig::default();
    let launcher = config
        .launcher(launcher_id)
        .ok_or(SimError::UnknownLauncher(launcher_id))?;
    let plan = StudyPlan {
        batches_per_size,
        ..StudyPlan::default()
    };
    run_study(launcher, &config, &plan, n_workers)
}
