use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// A mass quantity using f64 precision.
///
/// Base unit is grams, the scale at which beaker contents are weighed.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let salt = Mass::from_grams(29.2);
/// let water = Mass::from_kg(0.5);
///
/// assert_eq!(water.to_grams(), 500.0);
/// assert!((salt + water).to_kg() > 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: Grams

impl Mass {
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Mass` from a value in grams.
    pub fn from_grams(value: f64) -> Self {
        Self(value)
    }

    pub fn from_kg(value: f64) -> Self {
        Self(value * 1000.0)
    }

    /// Returns the mass in grams.
    pub fn to_grams(&self) -> f64 {
        self.0
    }

    pub fn to_kg(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Division of Mass by Mass returns a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Mass (commutative multiplication)
impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}
