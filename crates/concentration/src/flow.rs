//! Liquid sources and sinks that feed the beaker.
//!
//! Every flow source exposes an instantaneous rate setpoint in L/s. Rates are
//! clamped to `[0, max]` and forced to zero while the source is disabled;
//! integration into the solution happens in the model's step.

use nalgebra::Point2;
use units::{Molarity, Time, Volume, VolumeRate};

use crate::bounds::Bounds;
use crate::color::Color;
use crate::config::{DropperConfig, EvaporatorConfig, FaucetConfig};
use crate::solute::{Solute, Solvent};
use crate::solution::ConcentrationSolution;

/// A source of liquid transfer with a bounded rate
pub trait FlowSource {
    /// Current rate setpoint
    fn flow_rate(&self) -> VolumeRate;

    /// Upper bound of the rate setpoint
    fn max_flow_rate(&self) -> VolumeRate;

    /// Requests a new rate. The stored rate is clamped to `[0, max]` and is
    /// zero whenever the source cannot flow.
    fn set_flow_rate(&mut self, rate: VolumeRate);

    fn is_enabled(&self) -> bool;

    /// Restore default values
    fn reset(&mut self);

    /// Volume transferred over one step of length `dt`
    fn volume_over(&self, dt: Time) -> Volume {
        self.flow_rate().integrate(dt)
    }

    fn is_flowing(&self) -> bool {
        self.flow_rate() > VolumeRate::zero()
    }
}

// A non-finite request stops the flow.
fn clamp_rate(rate: VolumeRate, max: VolumeRate) -> VolumeRate {
    if !rate.is_finite() {
        return VolumeRate::zero();
    }
    rate.clamp(VolumeRate::zero(), max)
}

/// A faucet: either the solvent inlet above the beaker or the drain below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Faucet {
    /// Center of the spout outlet
    pub position: Point2<f64>,
    pub pipe_min_x: f64,
    pub spout_width: f64,
    max_flow_rate: VolumeRate,
    flow_rate: VolumeRate,
    enabled: bool,
}

impl Faucet {
    pub fn new(
        position: Point2<f64>,
        pipe_min_x: f64,
        spout_width: f64,
        max_flow_rate: VolumeRate,
    ) -> Self {
        Self {
            position,
            pipe_min_x,
            spout_width,
            max_flow_rate,
            flow_rate: VolumeRate::zero(),
            enabled: true,
        }
    }

    pub fn from_config(config: &FaucetConfig) -> Self {
        Self::new(
            Point2::new(config.position[0], config.position[1]),
            config.pipe_min_x,
            config.spout_width,
            config.max_flow_rate,
        )
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.flow_rate = VolumeRate::zero();
        }
    }

    /// Width of the falling stream; proportional to the flow rate
    pub fn stream_width(&self) -> f64 {
        if self.max_flow_rate == VolumeRate::zero() {
            return 0.0;
        }
        let fraction =
            self.flow_rate.to_liters_per_second() / self.max_flow_rate.to_liters_per_second();
        self.spout_width * fraction
    }

    /// Region covered by the stream falling from the spout down to `bottom_y`
    pub fn stream_bounds(&self, bottom_y: f64) -> Bounds {
        let half = self.stream_width() / 2.0;
        Bounds::new(self.position.x - half, self.position.y, self.position.x + half, bottom_y)
    }
}

impl FlowSource for Faucet {
    fn flow_rate(&self) -> VolumeRate {
        self.flow_rate
    }

    fn max_flow_rate(&self) -> VolumeRate {
        self.max_flow_rate
    }

    fn set_flow_rate(&mut self, rate: VolumeRate) {
        self.flow_rate = if self.enabled {
            clamp_rate(rate, self.max_flow_rate)
        } else {
            VolumeRate::zero()
        };
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn reset(&mut self) {
        self.flow_rate = VolumeRate::zero();
        self.enabled = true;
    }
}

/// Dispenses stock solution of the current solute.
///
/// The dropper only flows while it is visible (solute form is "solution"),
/// enabled, and not empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Dropper {
    /// Tip of the dropper
    pub position: Point2<f64>,
    pub stream_width: f64,
    solute: Solute,
    max_flow_rate: VolumeRate,
    flow_rate: VolumeRate,
    enabled: bool,
    visible: bool,
    empty: bool,
}

impl Dropper {
    pub fn new(
        position: Point2<f64>,
        stream_width: f64,
        max_flow_rate: VolumeRate,
        solute: Solute,
    ) -> Self {
        Self {
            position,
            stream_width,
            solute,
            max_flow_rate,
            flow_rate: VolumeRate::zero(),
            enabled: true,
            visible: false,
            empty: false,
        }
    }

    pub fn from_config(config: &DropperConfig, solute: Solute) -> Self {
        Self::new(
            Point2::new(config.position[0], config.position[1]),
            config.stream_width,
            config.max_flow_rate,
            solute,
        )
    }

    pub fn solute(&self) -> Solute {
        self.solute
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Concentration of the fluid in the dropper
    pub fn stock_concentration(&self) -> Molarity {
        self.solute.stock_solution_concentration()
    }

    /// Color of the stock solution held by the dropper
    pub fn fluid_color(&self, solvent: &Solvent) -> Color {
        ConcentrationSolution::create_color(solvent, self.solute, self.stock_concentration())
    }

    /// Turn dispensing on (at max rate) or off
    pub fn set_dispensing(&mut self, dispensing: bool) {
        let rate = if dispensing { self.max_flow_rate } else { VolumeRate::zero() };
        self.set_flow_rate(rate);
    }

    /// Region covered by the falling stock solution, down to `bottom_y`
    pub fn stream_bounds(&self, bottom_y: f64) -> Bounds {
        let half = self.stream_width / 2.0;
        Bounds::new(self.position.x - half, self.position.y, self.position.x + half, bottom_y)
    }

    pub(crate) fn set_solute(&mut self, solute: Solute) {
        self.solute = solute;
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.zero_unless_flowable();
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.zero_unless_flowable();
    }

    pub(crate) fn set_empty(&mut self, empty: bool) {
        self.empty = empty;
        self.zero_unless_flowable();
    }

    fn can_flow(&self) -> bool {
        self.enabled && self.visible && !self.empty
    }

    fn zero_unless_flowable(&mut self) {
        if !self.can_flow() {
            self.flow_rate = VolumeRate::zero();
        }
    }
}

impl FlowSource for Dropper {
    fn flow_rate(&self) -> VolumeRate {
        self.flow_rate
    }

    fn max_flow_rate(&self) -> VolumeRate {
        self.max_flow_rate
    }

    fn set_flow_rate(&mut self, rate: VolumeRate) {
        self.flow_rate = if self.can_flow() {
            clamp_rate(rate, self.max_flow_rate)
        } else {
            VolumeRate::zero()
        };
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    // Visibility follows the solute form and is restored by the model.
    fn reset(&mut self) {
        self.flow_rate = VolumeRate::zero();
        self.enabled = true;
        self.empty = false;
    }
}

/// Removes solvent (never solute) from the solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaporator {
    max_evaporation_rate: VolumeRate,
    evaporation_rate: VolumeRate,
    enabled: bool,
}

impl Evaporator {
    pub fn new(max_evaporation_rate: VolumeRate) -> Self {
        Self {
            max_evaporation_rate,
            evaporation_rate: VolumeRate::zero(),
            enabled: true,
        }
    }

    pub fn from_config(config: &EvaporatorConfig) -> Self {
        Self::new(config.max_evaporation_rate)
    }

    pub fn evaporation_rate(&self) -> VolumeRate {
        self.evaporation_rate
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.evaporation_rate = VolumeRate::zero();
        }
    }
}

impl FlowSource for Evaporator {
    fn flow_rate(&self) -> VolumeRate {
        self.evaporation_rate
    }

    fn max_flow_rate(&self) -> VolumeRate {
        self.max_evaporation_rate
    }

    fn set_flow_rate(&mut self, rate: VolumeRate) {
        self.evaporation_rate = if self.enabled {
            clamp_rate(rate, self.max_evaporation_rate)
        } else {
            VolumeRate::zero()
        };
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn reset(&mut self) {
        self.evaporation_rate = VolumeRate::zero();
        self.enabled = true;
    }
}
