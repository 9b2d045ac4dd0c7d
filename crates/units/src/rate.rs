//! Flow rates: quantities per second.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::amount::Amount;
use crate::time::Time;
use crate::volume::Volume;

/// A volumetric flow rate, base unit liters per second.
///
/// # Examples
///
/// ```rust
/// use units::{Time, VolumeRate};
///
/// let faucet = VolumeRate::from_liters_per_second(0.25);
/// let poured = faucet.integrate(Time::from_seconds(2.0));
/// assert_eq!(poured.to_liters(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VolumeRate(f64); // Base unit: L/s

impl VolumeRate {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_liters_per_second(value: f64) -> Self {
        Self(value)
    }

    pub fn from_milliliters_per_second(value: f64) -> Self {
        Self(value / 1000.0)
    }

    pub fn to_liters_per_second(&self) -> f64 {
        self.0
    }

    pub fn to_milliliters_per_second(&self) -> f64 {
        self.0 * 1000.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Volume transferred over `duration` at this rate.
    pub fn integrate(&self, duration: Time) -> Volume {
        Volume::from_liters(self.0 * duration.to_seconds())
    }

    pub fn clamp(self, min: VolumeRate, max: VolumeRate) -> VolumeRate {
        VolumeRate(self.0.clamp(min.0, max.0))
    }
}

impl Add for VolumeRate {
    type Output = VolumeRate;

    fn add(self, rhs: VolumeRate) -> VolumeRate {
        VolumeRate(self.0 + rhs.0)
    }
}

impl Sub for VolumeRate {
    type Output = VolumeRate;

    fn sub(self, rhs: VolumeRate) -> VolumeRate {
        VolumeRate(self.0 - rhs.0)
    }
}

impl Mul<f64> for VolumeRate {
    type Output = VolumeRate;

    fn mul(self, rhs: f64) -> VolumeRate {
        VolumeRate(self.0 * rhs)
    }
}

impl Mul<Time> for VolumeRate {
    type Output = Volume;

    fn mul(self, rhs: Time) -> Volume {
        self.integrate(rhs)
    }
}

/// A solute dispensing rate, base unit moles per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AmountRate(f64); // Base unit: mol/s

impl AmountRate {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_moles_per_second(value: f64) -> Self {
        Self(value)
    }

    pub fn to_moles_per_second(&self) -> f64 {
        self.0
    }

    /// Amount dispensed over `duration` at this rate.
    pub fn integrate(&self, duration: Time) -> Amount {
        Amount::from_moles(self.0 * duration.to_seconds())
    }
}

impl Mul<f64> for AmountRate {
    type Output = AmountRate;

    fn mul(self, rhs: f64) -> AmountRate {
        AmountRate(self.0 * rhs)
    }
}

impl Mul<Time> for AmountRate {
    type Output = Amount;

    fn mul(self, rhs: Time) -> Amount {
        self.integrate(rhs)
    }
}
