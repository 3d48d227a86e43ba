use std::time::Instant;

use projectile_shared::config::{SimulationConfig, Speed};
use projectile_sim::Session;

use crate::output;

pub fn run(
    launcher: u32,
    sample_size: usize,
    speed: Speed,
    launches: usize,
    bin_width: f64,
    seed: u64,
) -> anyhow::Result<()> {
    if launches == 0 {
        anyhow::bail!("--launches must be at least 1");
    }
    let mut session = Session::new(SimulationConfig {
        seed,
        speed,
        ..SimulationConfig::default()
    })?;
    session.select_launcher(launcher)?;
    session.select_sample_size(sample_size)?;
    session.set_bin_width(bin_width)?;
    session.set_continuous_mode(true);
    let handle = session.start()?;

    println!(
        "Continuous mode: {} n={} every {}ms (Ctrl-C to abort)",
        session.launcher().name,
        sample_size,
        handle.interval.as_millis()
    );

    let mut fired = 0;
    let mut last = Instant::now();
    while fired < launches {
        if let Some(wait) = session.time_to_next_launch() {
            std::thread::sleep(wait);
        }
        let now = Instant::now();
        for report in session.advance(now - last)? {
            output::print_launch(&report);
            fired += 1;
            if fired == launches {
                break;
            }
        }
        last = now;
    }
    session.stop();

    let hist = session.histogram()?;
    output::print_histogram(&format!("Mean Distances (n={sample_size})"), &hist);
    Ok(())
}
