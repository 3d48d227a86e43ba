use std::iter::FusedIterator;

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

// sin(2θ) with the flat launches pinned to zero; sin(π) rounds to ~1e-16.
#[inline]
fn double_angle_sine(angle_deg: f64) -> f64 {
    if angle_deg == 0.0 || angle_deg == 90.0 {
        0.0
    } else {
        (2.0 * angle_deg.to_radians()).sin()
    }
}

/// Closed-form range `v² sin(2θ) / g` over flat ground.
///
/// Unchecked; use [`Trajectory::new`] when the inputs come from outside.
#[inline]
pub fn projectile_range(velocity: f64, angle_deg: f64, gravity: f64) -> f64 {
    velocity * velocity * double_angle_sine(angle_deg) / gravity
}

pub(crate) fn validate_angle(angle_deg: f64) -> SimResult<f64> {
    if !(0.0..=90.0).contains(&angle_deg) {
        return Err(SimError::InvalidAngle(angle_deg));
    }
    Ok(angle_deg)
}

pub(crate) fn validate_gravity(gravity: f64) -> SimResult<f64> {
    if !gravity.is_finite() || gravity <= 0.0 {
        return Err(SimError::InvalidGravity(gravity));
    }
    Ok(gravity)
}

/// Drag-free flight of a single projectile launched from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    velocity: f64,
    angle_deg: f64,
    gravity: f64,
    vx: f64,
    vy: f64,
    degenerate: bool,
}

impl Trajectory {
    pub fn new(velocity: f64, angle_deg: f64, gravity: f64) -> SimResult<Self> {
        if !velocity.is_finite() || velocity <= 0.0 {
            return Err(SimError::InvalidVelocity(velocity));
        }
        let angle_deg = validate_angle(angle_deg)?;
        let gravity = validate_gravity(gravity)?;
        let rad = angle_deg.to_radians();
        Ok(Self {
            velocity,
            angle_deg,
            gravity,
            vx: velocity * rad.cos(),
            vy: velocity * rad.sin(),
            degenerate: double_angle_sine(angle_deg) == 0.0,
        })
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn range(&self) -> f64 {
        projectile_range(self.velocity, self.angle_deg, self.gravity)
    }

    pub fn time_of_flight(&self) -> f64 {
        if self.degenerate {
            0.0
        } else {
            2.0 * self.vy / self.gravity
        }
    }

    pub fn apex_height(&self) -> f64 {
        if self.degenerate {
            0.0
        } else {
            self.vy * self.vy / (2.0 * self.gravity)
        }
    }

    pub fn position_at(&self, t: f64) -> PathPoint {
        PathPoint {
            x: self.vx * t,
            y: self.vy * t - 0.5 * self.gravity * t * t,
        }
    }

    /// Positions sampled every `time_step` seconds, ending on the exact
    /// landing point.
    pub fn path(&self, time_step: f64) -> SimResult<FlightPath> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimError::InvalidTimeStep(time_step));
        }
        let flight_time = self.time_of_flight();
        let landing = if self.degenerate {
            PathPoint { x: 0.0, y: 0.0 }
        } else {
            PathPoint {
                x: self.vx * flight_time,
                y: 0.0,
            }
        };
        Ok(FlightPath {
            trajectory: *self,
            time_step,
            flight_time,
            index: 0,
            sampling: !self.degenerate,
            landing: Some(landing),
        })
    }
}

/// Single-pass iterator over a flight path; see [`Trajectory::path`].
#[derive(Debug)]
pub struct FlightPath {
    trajectory: Trajectory,
    time_step: f64,
    flight_time: f64,
    index: u64,
    sampling: bool,
    landing: Option<PathPoint>,
}

impl Iterator for FlightPath {
    type Item = PathPoint;

    fn next(&mut self) -> Option<PathPoint> {
        while self.sampling {
            // Multiply rather than accumulate so late samples do not drift.
            let t = self.index as f64 * self.time_step;
            if t > self.flight_time {
                self.sampling = false;
                break;
            }
            self.index += 1;
            let point = self.trajectory.position_at(t);
            if point.y >= 0.0 {
                return Some(point);
            }
        }
        self.landing.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let landing = usize::from(self.landing.is_some());
        if !self.sampling {
            return (landing, Some(landing));
        }
        // One spare slot absorbs rounding in the quotient.
        let remaining = (self.flight_time / self.time_step).floor() as usize + 2;
        let remaining = remaining.saturating_sub(self.index as usize);
        (landing, Some(remaining + landing))
    }
}

impl FusedIterator for FlightPath {}
