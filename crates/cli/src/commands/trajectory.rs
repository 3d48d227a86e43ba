use projectile_sim::Trajectory;

pub fn run(velocity: f64, angle: f64, time_step: f64, gravity: f64) -> anyhow::Result<()> {
    let traj = Trajectory::new(velocity, angle, gravity)?;
    println!("v = {velocity} m/s, θ = {angle}°, g = {gravity} m/s²");
    println!("  Range:          {:.3}m", traj.range());
    println!("  Time of flight: {:.3}s", traj.time_of_flight());
    println!("  Apex height:    {:.3}m", traj.apex_height());
    println!("\n         x          y");
    for point in traj.path(time_step)? {
        println!("  {:>8.3}   {:>8.3}", point.x, point.y);
    }
    Ok(())
}
