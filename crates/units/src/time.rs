use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A time interval using f64 precision.
///
/// Base unit is seconds; the simulation clock advances by one animation
/// frame (typically 1/60 s) per step.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let frame = Time::from_seconds(1.0 / 60.0);
/// assert!((frame.to_milliseconds() - 16.666).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Seconds

impl Time {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_seconds(value: f64) -> Self {
        Self(value)
    }

    pub fn from_milliseconds(value: f64) -> Self {
        Self(value / 1000.0)
    }

    pub fn to_seconds(&self) -> f64 {
        self.0
    }

    pub fn to_milliseconds(&self) -> f64 {
        self.0 * 1000.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}
