use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::amount::Amount;
use crate::volume::Volume;

/// A molar concentration (amount of substance per liquid volume).
///
/// Base unit is moles per liter (M). Multiplying by a [`Volume`] recovers the
/// dissolved [`Amount`]; this is how drained or dropped solution carries solute
/// with it.
///
/// # Examples
///
/// ```rust
/// use units::{Molarity, Volume};
///
/// let stock = Molarity::from_moles_per_liter(5.0);
/// let dose = stock * Volume::from_liters(0.1);
/// assert_eq!(dose.to_moles(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Molarity(f64); // Base unit: mol/L

impl Molarity {
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Molarity` from a value in mol/L.
    pub fn from_moles_per_liter(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Molarity` from a value in mmol/L.
    pub fn from_millimoles_per_liter(value: f64) -> Self {
        Self(value / 1_000.0)
    }

    /// Returns the concentration in mol/L.
    pub fn to_moles_per_liter(&self) -> f64 {
        self.0
    }

    /// Returns the concentration in mmol/L.
    pub fn to_millimoles_per_liter(&self) -> f64 {
        self.0 * 1_000.0
    }

    pub fn min(self, other: Molarity) -> Molarity {
        Molarity(self.0.min(other.0))
    }

    pub fn max(self, other: Molarity) -> Molarity {
        Molarity(self.0.max(other.0))
    }
}

impl Add for Molarity {
    type Output = Molarity;

    fn add(self, rhs: Molarity) -> Molarity {
        Molarity(self.0 + rhs.0)
    }
}

impl Sub for Molarity {
    type Output = Molarity;

    fn sub(self, rhs: Molarity) -> Molarity {
        Molarity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Molarity {
    type Output = Molarity;

    fn mul(self, rhs: f64) -> Molarity {
        Molarity(self.0 * rhs)
    }
}

/// Concentration times volume is the amount dissolved in that volume
impl Mul<Volume> for Molarity {
    type Output = Amount;

    fn mul(self, rhs: Volume) -> Amount {
        Amount::from_moles(self.0 * rhs.to_liters())
    }
}

impl Mul<Molarity> for Volume {
    type Output = Amount;

    fn mul(self, rhs: Molarity) -> Amount {
        rhs * self
    }
}
