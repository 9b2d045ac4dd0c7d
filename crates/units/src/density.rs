use serde::{Deserialize, Serialize};
use std::ops::Mul;

use crate::mass::Mass;
use crate::volume::Volume;

/// Mass density of a liquid, base unit grams per liter.
///
/// Water at room temperature is 1000 g/L.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Density(f64); // Base unit: g/L

impl Density {
    pub fn from_grams_per_liter(value: f64) -> Self {
        Self(value)
    }

    pub fn from_grams_per_ml(value: f64) -> Self {
        Self(value * 1000.0)
    }

    pub fn to_grams_per_liter(&self) -> f64 {
        self.0
    }

    pub fn to_grams_per_ml(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// Density times volume is the mass of that volume
impl Mul<Volume> for Density {
    type Output = Mass;

    fn mul(self, rhs: Volume) -> Mass {
        Mass::from_grams(self.0 * rhs.to_liters())
    }
}
