use projectile_shared::config::SimulationConfig;
use projectile_sim::runner::{self, StudyPlan};
use projectile_sim::{build_histogram, SimError};

use crate::output;

pub fn run(
    launcher_id: u32,
    batches: u32,
    bin_width: f64,
    workers: usize,
    seed_start: u64,
    seed_stride: u64,
) -> anyhow::Result<()> {
    let config = SimulationConfig::default();
    let launcher = config
        .launcher(launcher_id)
        .ok_or(SimError::UnknownLauncher(launcher_id))?;
    let n_workers = if workers == 0 { None } else { Some(workers) };
    let plan = StudyPlan {
        batches_per_size: batches,
        seed_start,
        seed_stride,
    };

    println!(
        "Running {} batches per sample size with {}...",
        batches, launcher.name
    );
    let start = std::time::Instant::now();
    let result = runner::run_study(launcher, &config, &plan, n_workers)?;
    let elapsed = start.elapsed();

    println!("\n========================================");
    println!("  Batches:  {}", result.n_batches());
    println!("  Time:     {:.2}s", elapsed.as_secs_f64());
    println!("========================================");
    for size in &result.per_size {
        let hist = build_histogram(&size.means, bin_width)?;
        output::print_summary_row(size.sample_size, &hist);
    }
    for size in &result.per_size {
        let hist = build_histogram(&size.means, bin_width)?;
        output::print_histogram(&format!("n = {}", size.sample_size), &hist);
    }
    Ok(())
}
