pub mod error;
pub mod generator;
pub mod histogram;
pub mod runner;
pub mod sampler;
pub mod session;
pub mod timer;
pub mod trajectory;

pub use error::{SimError, SimResult};
pub use generator::{generate_samples, SampleGenerator};
pub use histogram::{build_histogram, mean_and_std_dev, Bin, Histogram};
pub use sampler::GaussianSampler;
pub use session::{LaunchReport, RunStatus, Session, Triggered};
pub use timer::{TimerHandle, TimerSlot};
pub use trajectory::{projectile_range, FlightPath, PathPoint, Trajectory};
