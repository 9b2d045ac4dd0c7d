use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Milliliters per liter
const ML_PER_L: f64 = 1_000.0;

/// A liquid volume quantity using f64 precision.
///
/// The `Volume` struct represents volumes with liters as the base unit,
/// which is the unit every beaker, faucet and dropper in the simulation
/// reports in.
///
/// # Examples
///
/// ```rust
/// use units::Volume;
///
/// let beaker = Volume::from_liters(1.0);
/// let drop = Volume::from_milliliters(0.05);
///
/// assert_eq!(beaker.to_milliliters(), 1_000.0);
/// assert!(drop < beaker);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Volume(f64); // Base unit: Liters

impl Volume {
    /// Creates a zero volume
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Volume` from a value in liters.
    ///
    /// This is the most direct constructor since liters are the base unit.
    pub fn from_liters(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Volume` from a value in milliliters.
    pub fn from_milliliters(value: f64) -> Self {
        Self(value / ML_PER_L)
    }

    /// Returns the volume in liters.
    pub fn to_liters(&self) -> f64 {
        self.0
    }

    /// Returns the volume in milliliters.
    pub fn to_milliliters(&self) -> f64 {
        self.0 * ML_PER_L
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Clamps the volume to `[min, max]`.
    pub fn clamp(self, min: Volume, max: Volume) -> Volume {
        Volume(self.0.clamp(min.0, max.0))
    }

    pub fn min(self, other: Volume) -> Volume {
        Volume(self.0.min(other.0))
    }

    pub fn max(self, other: Volume) -> Volume {
        Volume(self.0.max(other.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Volume {
    type Output = Volume;

    fn add(self, rhs: Volume) -> Volume {
        Volume(self.0 + rhs.0)
    }
}

impl Sub for Volume {
    type Output = Volume;

    fn sub(self, rhs: Volume) -> Volume {
        Volume(self.0 - rhs.0)
    }
}

impl Mul<f64> for Volume {
    type Output = Volume;

    fn mul(self, rhs: f64) -> Volume {
        Volume(self.0 * rhs)
    }
}

impl Div<f64> for Volume {
    type Output = Volume;

    fn div(self, rhs: f64) -> Volume {
        Volume(self.0 / rhs)
    }
}

/// Division of Volume by Volume returns a dimensionless ratio
impl Div for Volume {
    type Output = f64;

    fn div(self, rhs: Volume) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Volume (commutative multiplication)
impl Mul<Volume> for f64 {
    type Output = Volume;

    fn mul(self, rhs: Volume) -> Volume {
        rhs * self
    }
}
