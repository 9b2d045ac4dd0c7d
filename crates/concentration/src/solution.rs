//! Scalar mass balance of the solution in the beaker.
//!
//! The solution stores two independent quantities, total solute moles
//! (dissolved plus precipitated) and volume. Everything else is derived.
//! Precipitate is the one derived value that is stored: it may be frozen
//! during a compound update so observers never see it computed against a
//! half-applied state.

use units::{Amount, Mass, Molarity, Volume};

use crate::absorbance;
use crate::color::Color;
use crate::config::ValueRange;
use crate::solute::{Solute, Solvent};

/// Tolerance for the non-negative dissolved amount check
const AMOUNT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationSolution {
    solvent: Solvent,
    solute: Solute,
    solute_moles: Amount,
    volume: Volume,
    solute_amount_range: ValueRange<Amount>,
    volume_range: ValueRange<Volume>,
    update_precipitate_amount: bool,
    precipitate_moles: Amount,
}

impl ConcentrationSolution {
    /// Creates a solution at the default amount and volume of each range.
    ///
    /// # Examples
    ///
    /// ```
    /// use concentration::config::ValueRange;
    /// use concentration::solute::{Solute, Solvent};
    /// use concentration::solution::ConcentrationSolution;
    /// use units::{Amount, Volume};
    ///
    /// let mut solution = ConcentrationSolution::new(
    ///     Solvent::water(),
    ///     Solute::SodiumChloride,
    ///     ValueRange::new(Amount::zero(), Amount::from_moles(5.0), Amount::zero()),
    ///     ValueRange::new(Volume::zero(), Volume::from_liters(1.0), Volume::from_liters(0.5)),
    /// );
    ///
    /// let added = solution.add_solvent(Volume::from_liters(0.75));
    /// assert_eq!(added, Volume::from_liters(0.5));
    /// assert_eq!(solution.volume(), Volume::from_liters(1.0));
    /// ```
    pub fn new(
        solvent: Solvent,
        solute: Solute,
        solute_amount_range: ValueRange<Amount>,
        volume_range: ValueRange<Volume>,
    ) -> Self {
        let mut solution = Self {
            solvent,
            solute,
            solute_moles: solute_amount_range.default,
            volume: volume_range.default,
            solute_amount_range,
            volume_range,
            update_precipitate_amount: true,
            precipitate_moles: Amount::zero(),
        };
        solution.update_derived();
        solution
    }

    pub fn solvent(&self) -> &Solvent {
        &self.solvent
    }

    pub fn solute(&self) -> Solute {
        self.solute
    }

    /// Total solute, dissolved and precipitated
    pub fn solute_moles(&self) -> Amount {
        self.solute_moles
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn volume_range(&self) -> &ValueRange<Volume> {
        &self.volume_range
    }

    pub fn solute_amount_range(&self) -> &ValueRange<Amount> {
        &self.solute_amount_range
    }

    /// Switches the solute. Solute moles are left untouched; the caller
    /// decides whether a solute change discards the previous amount.
    pub fn set_solute(&mut self, solute: Solute) {
        self.solute = solute;
        self.update_derived();
    }

    /// Sets total solute, clamped to its range. Non-finite input is ignored.
    pub fn set_solute_moles(&mut self, moles: Amount) {
        if !moles.is_finite() {
            return;
        }
        self.solute_moles = self.solute_amount_range.clamp(moles);
        self.update_derived();
    }

    /// Sets the volume, clamped to its range. Non-finite input is ignored.
    pub fn set_volume(&mut self, volume: Volume) {
        if !volume.is_finite() {
            return;
        }
        self.volume = self.volume_range.clamp(volume);
        self.update_derived();
    }

    /// Adds solvent, returning the volume actually added
    pub fn add_solvent(&mut self, delta: Volume) -> Volume {
        let before = self.volume;
        self.set_volume(before + delta);
        self.volume - before
    }

    /// Removes solvent, returning the volume actually removed
    pub fn remove_solvent(&mut self, delta: Volume) -> Volume {
        let before = self.volume;
        self.set_volume(before - delta);
        before - self.volume
    }

    /// Adds solute, returning the amount actually added
    pub fn add_solute(&mut self, delta: Amount) -> Amount {
        let before = self.solute_moles;
        self.set_solute_moles(before + delta);
        self.solute_moles - before
    }

    /// Removes solute, returning the amount actually removed
    pub fn remove_solute(&mut self, delta: Amount) -> Amount {
        let before = self.solute_moles;
        self.set_solute_moles(before - delta);
        before - self.solute_moles
    }

    /// Whether precipitate tracks amount and volume. While false, the
    /// precipitate amount holds its last value; setting it back to true
    /// recomputes it once against the current state.
    pub fn set_update_precipitate_amount(&mut self, update: bool) {
        self.update_precipitate_amount = update;
        self.update_derived();
    }

    pub fn update_precipitate_amount(&self) -> bool {
        self.update_precipitate_amount
    }

    pub fn saturated_concentration(&self) -> Molarity {
        self.solute.saturated_concentration()
    }

    /// Dissolved concentration, capped at saturation. Zero for an empty beaker.
    pub fn concentration(&self) -> Molarity {
        if self.volume > Volume::zero() {
            (self.solute_moles / self.volume).min(self.saturated_concentration())
        } else {
            Molarity::zero()
        }
    }

    pub fn is_saturated(&self) -> bool {
        self.volume > Volume::zero()
            && (self.solute_moles / self.volume) > self.saturated_concentration()
    }

    /// Solute in excess of saturation
    pub fn precipitate_moles(&self) -> Amount {
        self.precipitate_moles
    }

    /// Mass of the dissolved solute
    pub fn solute_grams(&self) -> Mass {
        let dissolved = self.solute_moles - self.precipitate_moles;
        dissolved.max(Amount::zero()).to_mass(self.solute.molar_mass())
    }

    /// Mass percent of dissolved solute, in [0, 100]
    pub fn percent_concentration(&self) -> f64 {
        let solute_grams = self.solute_grams().to_grams();
        let solvent_grams = (self.solvent.density * self.volume).to_grams();
        let total = solute_grams + solvent_grams;

        if total > 0.0 {
            (100.0 * solute_grams / total).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Color of the solution at its current concentration
    pub fn color(&self) -> Color {
        Self::create_color(&self.solvent, self.solute, self.concentration())
    }

    /// Color of `solute` dissolved in `solvent` at `concentration`
    pub fn create_color(solvent: &Solvent, solute: Solute, concentration: Molarity) -> Color {
        if concentration > Molarity::zero() {
            solute.color_scheme().concentration_to_color(concentration)
        } else {
            solvent.color
        }
    }

    /// Beer's Law absorbance of the solution for light crossing `path_length_cm`
    pub fn absorbance(&self, molar_absorptivity: f64, path_length_cm: f64) -> f64 {
        absorbance::absorbance(molar_absorptivity, path_length_cm, self.concentration())
    }

    pub fn reset(&mut self) {
        self.solute_moles = self.solute_amount_range.default;
        self.volume = self.volume_range.default;
        self.update_precipitate_amount = true;
        self.update_derived();
    }

    /// Resets only the solute amount, keeping the volume
    pub fn reset_solute_moles(&mut self) {
        self.set_solute_moles(self.solute_amount_range.default);
    }

    fn update_derived(&mut self) {
        if self.update_precipitate_amount {
            let saturated_amount = self.saturated_concentration() * self.volume;
            self.precipitate_moles = (self.solute_moles - saturated_amount).max(Amount::zero());

            debug_assert!(
                (self.solute_moles - self.precipitate_moles).to_moles() >= -AMOUNT_EPSILON,
                "dissolved amount went negative: moles={:?} precipitate={:?}",
                self.solute_moles,
                self.precipitate_moles
            );
        }
        debug_assert!(self.solute_amount_range.contains(self.solute_moles));
        debug_assert!(self.volume_range.contains(self.volume));
    }
}
