mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use projectile_shared::config::{
    Speed, DEFAULT_BIN_WIDTH, DEFAULT_STUDY_BATCHES, GRAVITY, LAUNCH_ANGLE_DEG,
    TRAJECTORY_TIME_STEP,
};

#[derive(Parser)]
#[command(name = "projectile-lab", about = "Projectile sampling distribution lab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SpeedArg {
    Normal,
    Fast,
}

impl From<SpeedArg> for Speed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Normal => Speed::Normal,
            SpeedArg::Fast => Speed::Fast,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the launcher roster
    Launchers,
    /// Fire single-shot launches and show the histogram of batch means
    Launch {
        /// Launcher id (1-6)
        #[arg(long, default_value = "1")]
        launcher: u32,
        /// Projectiles per launch
        #[arg(long, default_value = "2")]
        sample_size: usize,
        /// Number of launches
        #[arg(long, default_value = "1")]
        count: u32,
        /// Histogram bin width in meters
        #[arg(long, default_value_t = DEFAULT_BIN_WIDTH)]
        bin_width: f64,
        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Launch continuously in real time
    Run {
        /// Launcher id (1-6)
        #[arg(long, default_value = "1")]
        launcher: u32,
        /// Projectiles per launch
        #[arg(long, default_value = "2")]
        sample_size: usize,
        /// Interval between launches
        #[arg(long, value_enum, default_value = "normal")]
        speed: SpeedArg,
        /// Stop after this many launches
        #[arg(long, default_value = "10")]
        launches: usize,
        /// Histogram bin width in meters
        #[arg(long, default_value_t = DEFAULT_BIN_WIDTH)]
        bin_width: f64,
        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Print the flight path of one projectile
    Trajectory {
        /// Initial velocity in m/s
        #[arg(long, default_value = "20")]
        velocity: f64,
        /// Launch angle in degrees (0-90)
        #[arg(long, default_value_t = LAUNCH_ANGLE_DEG)]
        angle: f64,
        /// Sampling interval in seconds
        #[arg(long, default_value_t = TRAJECTORY_TIME_STEP)]
        time_step: f64,
        /// Gravitational acceleration in m/s²
        #[arg(long, default_value_t = GRAVITY)]
        gravity: f64,
    },
    /// Compare sampling distributions across every sample size
    Study {
        /// Launcher id (1-6)
        #[arg(long, default_value = "1")]
        launcher: u32,
        /// Batches per sample size
        #[arg(long, default_value_t = DEFAULT_STUDY_BATCHES)]
        batches: u32,
        /// Histogram bin width in meters
        #[arg(long, default_value_t = DEFAULT_BIN_WIDTH)]
        bin_width: f64,
        /// Number of parallel workers (0 = auto)
        #[arg(long, default_value = "0")]
        workers: usize,
        /// Starting seed
        #[arg(long, default_value = "0")]
        seed_start: u64,
        /// Seed step between batches
        #[arg(long, default_value = "1")]
        seed_stride: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Launchers => commands::launchers::run(),
        Commands::Launch {
            launcher,
            sample_size,
            count,
            bin_width,
            seed,
        } => commands::launch::run(launcher, sample_size, count, bin_width, seed),
        Commands::Run {
            launcher,
            sample_size,
            speed,
            launches,
            bin_width,
            seed,
        } => commands::run::run(launcher, sample_size, speed.into(), launches, bin_width, seed),
        Commands::Trajectory {
            velocity,
            angle,
            time_step,
            gravity,
        } => commands::trajectory::run(velocity, angle, time_step, gravity),
        Commands::Study {
            launcher,
            batches,
            bin_width,
            workers,
            seed_start,
            seed_stride,
        } => commands::study::run(launcher, batches, bin_width, workers, seed_start, seed_stride),
    }
}
