use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::mass::Mass;
use crate::molarity::Molarity;
use crate::volume::Volume;

/// An amount of substance using f64 precision.
///
/// The `Amount` struct represents a quantity of solute with moles as the base
/// unit. Dividing an amount by a [`Volume`] yields a [`Molarity`], and
/// multiplying by a molar mass (g/mol) yields a [`Mass`].
///
/// # Examples
///
/// ```rust
/// use units::{Amount, Volume};
///
/// let solute = Amount::from_moles(0.5);
/// let solvent = Volume::from_liters(0.25);
///
/// let concentration = solute / solvent;
/// assert_eq!(concentration.to_moles_per_liter(), 2.0);
///
/// // 0.5 mol of table salt
/// let grams = solute.to_mass(58.443);
/// assert!((grams.to_grams() - 29.2215).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Amount(f64); // Base unit: Moles

impl Amount {
    /// Creates a zero amount
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Amount` from a value in moles.
    pub fn from_moles(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Amount` from a value in millimoles.
    pub fn from_millimoles(value: f64) -> Self {
        Self(value / 1_000.0)
    }

    /// Returns the amount in moles.
    pub fn to_moles(&self) -> f64 {
        self.0
    }

    /// Returns the amount in millimoles.
    pub fn to_millimoles(&self) -> f64 {
        self.0 * 1_000.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Converts to a mass given a molar mass in grams per mole.
    pub fn to_mass(&self, molar_mass: f64) -> Mass {
        Mass::from_grams(self.0 * molar_mass)
    }

    /// Clamps the amount to `[min, max]`.
    pub fn clamp(self, min: Amount, max: Amount) -> Amount {
        Amount(self.0.clamp(min.0, max.0))
    }

    pub fn min(self, other: Amount) -> Amount {
        Amount(self.0.min(other.0))
    }

    pub fn max(self, other: Amount) -> Amount {
        Amount(self.0.max(other.0))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Mul<f64> for Amount {
    type Output = Amount;

    fn mul(self, rhs: f64) -> Amount {
        Amount(self.0 * rhs)
    }
}

impl Div<f64> for Amount {
    type Output = Amount;

    fn div(self, rhs: f64) -> Amount {
        Amount(self.0 / rhs)
    }
}

/// Amount per volume is a concentration
impl Div<Volume> for Amount {
    type Output = Molarity;

    fn div(self, rhs: Volume) -> Molarity {
        Molarity::from_moles_per_liter(self.0 / rhs.to_liters())
    }
}

/// Division of Amount by Amount returns a dimensionless ratio
impl Div for Amount {
    type Output = f64;

    fn div(self, rhs: Amount) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Amount (commutative multiplication)
impl Mul<Amount> for f64 {
    type Output = Amount;

    fn mul(self, rhs: Amount) -> Amount {
        rhs * self
    }
}
