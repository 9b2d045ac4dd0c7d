//! Top-level model that owns the solution, the beaker and every source that
//! adds to or removes from it.
//!
//! The host calls [`ConcentrationModel::step`] once per animation frame.
//! Ordering inside a step is significant for mass conservation: solvent is
//! added before solute when stock solution drips in, and the drained solute
//! amount uses the concentration from before the drain.

use nalgebra::Point2;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use units::{Amount, Molarity, Time, Volume, VolumeRate};

use crate::beaker::Beaker;
use crate::bounds::Bounds;
use crate::config::{ConfigError, ModelConfig};
use crate::flow::{Dropper, Evaporator, Faucet, FlowSource};
use crate::meter::ConcentrationMeter;
use crate::precipitate::PrecipitateParticleSystem;
use crate::shaker::Shaker;
use crate::shaker_particles::{ShakerParticleSystem, ShakerStepReport};
use crate::solute::{Solute, SoluteForm, Solvent};
use crate::solution::ConcentrationSolution;

/// Length of the drain stream below the drain spout
const DRAIN_STREAM_LENGTH: f64 = 1000.0;

/// What happens to the solute amount when the selected solute changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoluteChange {
    /// Empty the beaker of solute (interactive selection)
    #[default]
    Reset,
    /// Keep the current amount (restoring a saved state)
    Restore,
}

/// Settable values of a model, enough to put it back in the same place.
///
/// Particle pools are not captured: shaker particles are discarded on restore
/// and the precipitate is rebuilt from the restored amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelState {
    pub solute: Solute,
    pub solute_form: SoluteForm,
    pub solute_moles: Amount,
    pub volume: Volume,
    pub solvent_flow_rate: VolumeRate,
    pub drain_flow_rate: VolumeRate,
    pub dropper_flow_rate: VolumeRate,
    pub evaporation_rate: VolumeRate,
    pub shaker_position: [f64; 2],
    pub meter_position: [f64; 2],
    pub time: Time,
}

#[derive(Debug, Clone)]
pub struct ConcentrationModel {
    config: ModelConfig,
    solute: Solute,
    solute_form: SoluteForm,
    solution: ConcentrationSolution,
    beaker: Beaker,
    solvent_faucet: Faucet,
    drain_faucet: Faucet,
    dropper: Dropper,
    evaporator: Evaporator,
    shaker: Shaker,
    shaker_particles: ShakerParticleSystem,
    precipitate_particles: PrecipitateParticleSystem,
    meter: ConcentrationMeter,
    rng: ChaChaRng,
    time: Time,
}

impl ConcentrationModel {
    /// Creates a model with the stock configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use concentration::model::ConcentrationModel;
    /// use units::{Time, Volume, VolumeRate};
    ///
    /// let mut model = ConcentrationModel::new();
    /// model.set_solvent_flow_rate(VolumeRate::from_liters_per_second(0.25));
    /// model.step(Time::from_seconds(1.0));
    ///
    /// assert_eq!(model.solution().volume(), Volume::from_liters(0.75));
    /// ```
    pub fn new() -> Self {
        Self::build(ModelConfig::default())
    }

    /// Creates a model from a custom configuration
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`ModelConfig::validate`].
    pub fn with_config(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ModelConfig) -> Self {
        let solute = Solute::default();
        let solution = ConcentrationSolution::new(
            Solvent::water(),
            solute,
            config.solute_amount,
            config.solution_volume,
        );

        let mut model = Self {
            solute,
            solute_form: SoluteForm::default(),
            solution,
            beaker: Beaker::from_config(&config.beaker),
            solvent_faucet: Faucet::from_config(&config.solvent_faucet),
            drain_faucet: Faucet::from_config(&config.drain_faucet),
            dropper: Dropper::from_config(&config.dropper, solute),
            evaporator: Evaporator::from_config(&config.evaporator),
            shaker: Shaker::from_config(&config.shaker, solute),
            shaker_particles: ShakerParticleSystem::new(config.shaker_particles.clone()),
            precipitate_particles: PrecipitateParticleSystem::new(solute),
            meter: ConcentrationMeter::new(Point2::new(
                config.meter_position[0],
                config.meter_position[1],
            )),
            rng: ChaChaRng::seed_from_u64(config.seed),
            time: Time::zero(),
            config,
        };
        model.apply_solute_form();
        model.sync();

        tracing::debug!(
            seed = model.config.seed,
            solute = %model.solute,
            "concentration model created"
        );
        model
    }

    /// Advances the model by `dt`
    ///
    /// # Arguments
    ///
    /// * `dt` - Frame duration. A negative or non-finite `dt` leaves the
    ///   model untouched.
    pub fn step(&mut self, dt: Time) -> ShakerStepReport {
        if !dt.is_finite() || dt < Time::zero() {
            tracing::debug!(dt = dt.to_seconds(), "ignoring invalid step duration");
            return ShakerStepReport::default();
        }

        self.solution.add_solvent(self.solvent_faucet.volume_over(dt));

        let drain_volume = self.drain_faucet.volume_over(dt);
        if drain_volume > Volume::zero() {
            let concentration_before = self.solution.concentration();
            let removed = self.solution.remove_solvent(drain_volume);
            self.solution.remove_solute(concentration_before * removed);
        }

        let dropper_volume = self.dropper.volume_over(dt);
        if dropper_volume > Volume::zero() {
            self.solution.set_update_precipitate_amount(false);
            let added = self.solution.add_solvent(dropper_volume);
            self.solution.set_update_precipitate_amount(true);
            self.solution.add_solute(self.dropper.stock_concentration() * added);
        }

        self.solution.remove_solvent(self.evaporator.volume_over(dt));

        let report = self.shaker_particles.step(
            dt,
            &self.shaker,
            &self.beaker,
            &mut self.solution,
            &mut self.rng,
        );
        self.shaker.step();

        self.time = self.time + dt;
        self.sync();

        tracing::trace!(
            time = self.time.to_seconds(),
            volume = self.solution.volume().to_liters(),
            moles = self.solution.solute_moles().to_moles(),
            precipitate = self.solution.precipitate_moles().to_moles(),
            airborne = self.shaker_particles.len(),
            "step"
        );
        report
    }

    /// Restores every component to its default state
    pub fn reset(&mut self) {
        let solute = Solute::default();
        self.solute = solute;
        self.solute_form = SoluteForm::default();

        self.solution.set_solute(solute);
        self.solution.reset();
        self.solvent_faucet.reset();
        self.drain_faucet.reset();
        self.dropper.reset();
        self.dropper.set_solute(solute);
        self.evaporator.reset();
        self.shaker.reset();
        self.shaker.set_solute(solute);
        self.meter.reset();

        self.time = Time::zero();
        self.rng = ChaChaRng::seed_from_u64(self.config.seed);

        self.shaker_particles.reset();
        self.precipitate_particles
            .set_solute(solute, &self.solution, &self.beaker, &mut self.rng);

        self.apply_solute_form();
        self.sync();
        tracing::debug!("concentration model reset");
    }

    /// Selects the active solute.
    ///
    /// Airborne shaker particles are discarded, not dissolved, and the
    /// precipitate pool is rebuilt for the new solute. With
    /// [`SoluteChange::Reset`] the solute amount returns to its configured
    /// default, zero unless configured otherwise.
    pub fn select_solute(&mut self, solute: Solute, change: SoluteChange) {
        if solute == self.solute {
            return;
        }
        tracing::debug!(from = %self.solute, to = %solute, ?change, "solute changed");

        self.solute = solute;
        self.solution.set_solute(solute);
        self.shaker.set_solute(solute);
        self.dropper.set_solute(solute);
        self.shaker_particles.remove_all_particles();

        if change == SoluteChange::Reset {
            self.solution.reset_solute_moles();
        }

        self.precipitate_particles
            .set_solute(solute, &self.solution, &self.beaker, &mut self.rng);
        self.sync();
    }

    pub fn set_solute_form(&mut self, form: SoluteForm) {
        if form == self.solute_form {
            return;
        }
        tracing::debug!(?form, "solute form changed");
        self.solute_form = form;
        self.apply_solute_form();
        self.sync();
    }

    pub fn set_solvent_flow_rate(&mut self, rate: VolumeRate) {
        self.solvent_faucet.set_flow_rate(rate);
        self.update_meter();
    }

    pub fn set_drain_flow_rate(&mut self, rate: VolumeRate) {
        self.drain_faucet.set_flow_rate(rate);
        self.update_meter();
    }

    pub fn set_dropper_flow_rate(&mut self, rate: VolumeRate) {
        self.dropper.set_flow_rate(rate);
        self.update_meter();
    }

    /// Turn the dropper on at its maximum rate, or off
    pub fn set_dropper_dispensing(&mut self, dispensing: bool) {
        self.dropper.set_dispensing(dispensing);
        self.update_meter();
    }

    pub fn set_evaporation_rate(&mut self, rate: VolumeRate) {
        self.evaporator.set_flow_rate(rate);
    }

    /// Moves the shaker (clamped to its drag bounds). Movement is turned into
    /// dispensing on the next step.
    pub fn set_shaker_position(&mut self, position: Point2<f64>) {
        self.shaker.set_position(position);
    }

    pub fn set_meter_position(&mut self, position: Point2<f64>) {
        self.meter.set_position(position);
        self.update_meter();
    }

    /// Snapshot of the settable values
    pub fn state(&self) -> ModelState {
        let shaker = self.shaker.position();
        let meter = self.meter.position();
        ModelState {
            solute: self.solute,
            solute_form: self.solute_form,
            solute_moles: self.solution.solute_moles(),
            volume: self.solution.volume(),
            solvent_flow_rate: self.solvent_faucet.flow_rate(),
            drain_flow_rate: self.drain_faucet.flow_rate(),
            dropper_flow_rate: self.dropper.flow_rate(),
            evaporation_rate: self.evaporator.flow_rate(),
            shaker_position: [shaker.x, shaker.y],
            meter_position: [meter.x, meter.y],
            time: self.time,
        }
    }

    /// Puts the model back into a previously captured state.
    ///
    /// The solute amount is kept across the solute change. Values outside the
    /// configured ranges are clamped.
    pub fn restore(&mut self, state: &ModelState) {
        self.shaker_particles.remove_all_particles();
        self.select_solute(state.solute, SoluteChange::Restore);
        self.set_solute_form(state.solute_form);

        self.solution.set_volume(state.volume);
        self.solution.set_solute_moles(state.solute_moles);
        self.shaker
            .restore_position(Point2::new(state.shaker_position[0], state.shaker_position[1]));
        self.meter
            .set_position(Point2::new(state.meter_position[0], state.meter_position[1]));
        if state.time.is_finite() {
            self.time = state.time;
        }

        // enable states first, so rates are accepted or zeroed consistently
        self.sync();
        self.solvent_faucet.set_flow_rate(state.solvent_flow_rate);
        self.drain_faucet.set_flow_rate(state.drain_flow_rate);
        self.dropper.set_flow_rate(state.dropper_flow_rate);
        self.evaporator.set_flow_rate(state.evaporation_rate);
        self.update_meter();

        tracing::debug!(solute = %self.solute, time = self.time.to_seconds(), "state restored");
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn solute(&self) -> Solute {
        self.solute
    }

    pub fn solute_form(&self) -> SoluteForm {
        self.solute_form
    }

    pub fn solution(&self) -> &ConcentrationSolution {
        &self.solution
    }

    pub fn beaker(&self) -> &Beaker {
        &self.beaker
    }

    pub fn solvent_faucet(&self) -> &Faucet {
        &self.solvent_faucet
    }

    pub fn drain_faucet(&self) -> &Faucet {
        &self.drain_faucet
    }

    pub fn dropper(&self) -> &Dropper {
        &self.dropper
    }

    pub fn evaporator(&self) -> &Evaporator {
        &self.evaporator
    }

    pub fn shaker(&self) -> &Shaker {
        &self.shaker
    }

    pub fn shaker_particles(&self) -> &ShakerParticleSystem {
        &self.shaker_particles
    }

    pub fn precipitate_particles(&self) -> &PrecipitateParticleSystem {
        &self.precipitate_particles
    }

    pub fn meter(&self) -> &ConcentrationMeter {
        &self.meter
    }

    /// Elapsed simulated time
    pub fn time(&self) -> Time {
        self.time
    }

    /// Region of the falling solvent stream, empty when the faucet is off
    pub fn solvent_stream_bounds(&self) -> Bounds {
        self.solvent_faucet.stream_bounds(self.beaker.bottom())
    }

    /// Region of the drain stream, empty when the drain is closed
    pub fn drain_stream_bounds(&self) -> Bounds {
        self.drain_faucet
            .stream_bounds(self.drain_faucet.position.y + DRAIN_STREAM_LENGTH)
    }

    pub fn dropper_stream_bounds(&self) -> Bounds {
        self.dropper.stream_bounds(self.beaker.bottom())
    }

    fn apply_solute_form(&mut self) {
        let solid = self.solute_form == SoluteForm::Solid;
        self.shaker.set_visible(solid);
        self.dropper.set_visible(!solid);
    }

    /// Recomputes everything that depends on the solution: enable states of
    /// the sources, the precipitate pool and the meter reading.
    fn sync(&mut self) {
        let volume = self.solution.volume();
        let volume_range = *self.solution.volume_range();
        let full = volume >= volume_range.max;
        let dry = volume <= volume_range.min;
        let solute_maxed = self.solution.solute_moles() >= self.solution.solute_amount_range().max;

        let before = self.enable_flags();
        self.solvent_faucet.set_enabled(!full);
        self.drain_faucet.set_enabled(!dry);
        self.evaporator.set_enabled(!dry);
        self.shaker.set_empty(solute_maxed);
        self.dropper.set_empty(solute_maxed);
        self.dropper.set_enabled(!solute_maxed && !full);

        let after = self.enable_flags();
        if before != after {
            tracing::debug!(
                solvent_faucet = after[0],
                drain_faucet = after[1],
                evaporator = after[2],
                dropper = after[3],
                shaker_empty = after[4],
                "enable states changed"
            );
        }

        self.precipitate_particles
            .update_particles(&self.solution, &self.beaker, &mut self.rng);
        self.update_meter();
    }

    fn enable_flags(&self) -> [bool; 5] {
        [
            self.solvent_faucet.is_enabled(),
            self.drain_faucet.is_enabled(),
            self.evaporator.is_enabled(),
            self.dropper.is_enabled(),
            self.shaker.is_empty(),
        ]
    }

    /// Probe reading, checked in order: solution, drain stream, dropper
    /// stream, solvent stream.
    fn update_meter(&mut self) {
        let probe = self.meter.position();
        let volume = self.solution.volume();

        let in_solution =
            volume > Volume::zero() && self.beaker.solution_bounds(volume).contains(&probe);
        let value = if in_solution {
            Some(self.solution.concentration())
        } else if self.drain_faucet.is_flowing() && self.drain_stream_bounds().contains(&probe) {
            Some(self.solution.concentration())
        } else if self.dropper.is_flowing() && self.dropper_stream_bounds().contains(&probe) {
            Some(self.dropper.stock_concentration())
        } else if self.solvent_faucet.is_flowing()
            && self.solvent_stream_bounds().contains(&probe)
        {
            Some(Molarity::zero())
        } else {
            None
        };
        self.meter.set_value(value);
    }
}

impl Default for ConcentrationModel {
    fn default() -> Self {
        Self::new()
    }
}
