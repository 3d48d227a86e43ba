use anyhow::Context;
use projectile_shared::config::SimulationConfig;
use projectile_sim::Session;

use crate::output;

pub fn run(
    launcher: u32,
    sample_size: usize,
    count: u32,
    bin_width: f64,
    seed: u64,
) -> anyhow::Result<()> {
    let mut session = Session::new(SimulationConfig {
        seed,
        ..SimulationConfig::default()
    })?;
    session
        .select_launcher(launcher)
        .with_context(|| format!("cannot select launcher {launcher}"))?;
    session.select_sample_size(sample_size)?;
    session.set_bin_width(bin_width)?;

    println!(
        "Launching {} x {} projectiles with {}...",
        count,
        sample_size,
        session.launcher().name
    );
    for _ in 0..count {
        let report = session.launch_once()?;
        if count <= 10 {
            output::print_launch(&report);
        }
    }

    let hist = session.histogram()?;
    output::print_histogram(&format!("Mean Distances (n={sample_size})"), &hist);
    Ok(())
}
