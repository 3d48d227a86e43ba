#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("mean must be finite, got {0}")]
    InvalidMean(f64),
    #[error("standard deviation must be finite and non-negative, got {0}")]
    InvalidStdDev(f64),
    #[error("initial velocity must be finite and positive, got {0} m/s")]
    InvalidVelocity(f64),
    #[error("launch angle must be within [0, 90] degrees, got {0}")]
    InvalidAngle(f64),
    #[error("gravity must be finite and positive, got {0} m/s²")]
    InvalidGravity(f64),
    #[error("time step must be finite and positive, got {0} s")]
    InvalidTimeStep(f64),
    #[error("sample size must be at least 1")]
    InvalidSampleSize,
    #[error("bin width must be finite and positive, got {0}")]
    InvalidBinWidth(f64),
    #[error("bin width {bin_width} is lost in rounding at magnitude {magnitude}")]
    BinWidthBelowResolution { bin_width: f64, magnitude: f64 },
    #[error("histogram would need {bins} bins, limit is {max}")]
    TooManyBins { bins: u64, max: usize },
    #[error("value at index {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },
    #[error("no launcher with id {0}")]
    UnknownLauncher(u32),
    #[error("launcher roster is empty")]
    EmptyRoster,
    #[error("continuous mode is off")]
    ContinuousModeOff,
}

pub type SimResult<T> = Result<T, SimError>;
