use std::time::Duration;

// Baseline simulation parameters
pub const GRAVITY: f64 = 9.8; // m/s²
pub const LAUNCH_ANGLE_DEG: f64 = 45.0;
pub const TRAJECTORY_TIME_STEP: f64 = 0.1; // seconds
pub const SAMPLE_SIZES: [usize; 4] = [2, 5, 15, 40];
pub const BIN_WIDTHS: [f64; 4] = [0.1, 0.2, 0.5, 1.0];
pub const DEFAULT_BIN_WIDTH: f64 = 0.2; // meters
pub const NORMAL_INTERVAL_MS: u64 = 1_000;
pub const FAST_INTERVAL_MS: u64 = 300;
pub const DEFAULT_STUDY_BATCHES: u32 = 500;

/// A simulated, imperfect launching device.
#[derive(Debug, Clone, PartialEq)]
pub struct Launcher {
    pub id: u32,
    pub name: String,
    pub velocity_mean: f64,
    pub velocity_std_dev: f64,
    pub color: String,
}

impl Launcher {
    pub fn new(
        id: u32,
        name: &str,
        velocity_mean: f64,
        velocity_std_dev: f64,
        color: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            velocity_mean,
            velocity_std_dev,
            color: color.to_string(),
        }
    }

    /// Range reached at three standard deviations above the mean velocity.
    /// Used to size a field of view that holds practically every landing.
    pub fn max_expected_range(&self, angle_deg: f64, gravity: f64) -> f64 {
        let v = self.velocity_mean + 3.0 * self.velocity_std_dev;
        v * v * (2.0 * angle_deg.to_radians()).sin() / gravity
    }
}

pub fn default_launchers() -> Vec<Launcher> {
    vec![
        Launcher::new(1, "Launcher 1", 20.0, 0.5, "#FF6B6B"),
        Launcher::new(2, "Launcher 2", 22.0, 1.0, "#4ECDC4"),
        Launcher::new(3, "Launcher 3", 18.0, 0.2, "#FFD166"),
        Launcher::new(4, "Launcher 4", 25.0, 1.5, "#6A0572"),
        Launcher::new(5, "Launcher 5", 19.0, 0.8, "#1A535C"),
        Launcher::new(6, "Launcher 6", 21.0, 0.4, "#F9C80E"),
    ]
}

/// Interval between launches in continuous mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub fn interval(self) -> Duration {
        match self {
            Speed::Normal => Duration::from_millis(NORMAL_INTERVAL_MS),
            Speed::Fast => Duration::from_millis(FAST_INTERVAL_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub launchers: Vec<Launcher>,
    pub sample_sizes: Vec<usize>,
    pub bin_widths: Vec<f64>,
    pub default_bin_width: f64,
    pub launch_angle_deg: f64,
    pub gravity: f64,
    pub time_step: f64,
    pub speed: Speed,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            launchers: default_launchers(),
            sample_sizes: SAMPLE_SIZES.to_vec(),
            bin_widths: BIN_WIDTHS.to_vec(),
            default_bin_width: DEFAULT_BIN_WIDTH,
            launch_angle_deg: LAUNCH_ANGLE_DEG,
            gravity: GRAVITY,
            time_step: TRAJECTORY_TIME_STEP,
            speed: Speed::Normal,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn launcher(&self, id: u32) -> Option<&Launcher> {
        self.launchers.iter().find(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_matches_ids() {
        let config = SimulationConfig::default();
        assert_eq!(config.launchers.len(), 6);
        for (i, launcher) in config.launchers.iter().enumerate() {
            assert_eq!(launcher.id, i as u32 + 1);
        }
        assert_eq!(config.launcher(4).map(|l| l.velocity_mean), Some(25.0));
        assert!(config.launcher(7).is_none());
    }

    #[test]
    fn speed_intervals() {
        assert_eq!(Speed::Normal.interval(), Duration::from_millis(1000));
        assert_eq!(Speed::Fast.interval(), Duration::from_millis(300));
    }

    #[test]
    fn max_expected_range_uses_three_sigma() {
        let launcher = Launcher::new(1, "L", 20.0, 0.5, "#000000");
        let expected = 21.5 * 21.5 / GRAVITY;
        assert!((launcher.max_expected_range(45.0, GRAVITY) - expected).abs() < 1e-9);
    }
}
