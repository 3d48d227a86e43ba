use projectile_shared::config::SimulationConfig;
use projectile_sim::Trajectory;

pub fn run() -> anyhow::Result<()> {
    let config = SimulationConfig::default();
    println!(
        "Angle: {}° (fixed) | Gravity: {} m/s²\n",
        config.launch_angle_deg, config.gravity
    );
    println!("  id  name          mean    σ      color    range   max range");
    for launcher in &config.launchers {
        let traj =
            Trajectory::new(launcher.velocity_mean, config.launch_angle_deg, config.gravity)?;
        println!(
            "  {:<3} {:<12} {:>5.1}  {:>5.2}  {}  {:>6.2}m  {:>6.2}m",
            launcher.id,
            launcher.name,
            launcher.velocity_mean,
            launcher.velocity_std_dev,
            launcher.color,
            traj.range(),
            launcher.max_expected_range(config.launch_angle_deg, config.gravity),
        );
    }
    Ok(())
}
