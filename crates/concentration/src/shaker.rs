use nalgebra::Point2;
use units::AmountRate;

use crate::bounds::Bounds;
use crate::config::ShakerConfig;
use crate::solute::Solute;

/// A salt-shaker style emitter of solid solute.
///
/// Dispensing is two-state: any movement since the previous step dispenses at
/// the maximum rate, no movement dispenses nothing. The ejected particle
/// ballistics are tuned against this coarse model.
#[derive(Debug, Clone, PartialEq)]
pub struct Shaker {
    position: Point2<f64>,
    previous_position: Point2<f64>,
    default_position: Point2<f64>,
    /// Direction particles leave the shaker, in radians
    pub orientation: f64,
    pub drag_bounds: Bounds,
    max_dispensing_rate: AmountRate,
    dispensing_rate: AmountRate,
    solute: Solute,
    visible: bool,
    empty: bool,
}

impl Shaker {
    pub fn new(
        position: Point2<f64>,
        orientation: f64,
        drag_bounds: Bounds,
        max_dispensing_rate: AmountRate,
        solute: Solute,
    ) -> Self {
        let position = drag_bounds.clamp(position);
        Self {
            position,
            previous_position: position,
            default_position: position,
            orientation,
            drag_bounds,
            max_dispensing_rate,
            dispensing_rate: AmountRate::zero(),
            solute,
            visible: true,
            empty: false,
        }
    }

    pub fn from_config(config: &ShakerConfig, solute: Solute) -> Self {
        Self::new(
            Point2::new(config.position[0], config.position[1]),
            config.orientation,
            config.drag_bounds,
            config.max_dispensing_rate,
            solute,
        )
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    /// Moves the shaker; the position is constrained to the drag bounds.
    /// Points with a non-finite coordinate are ignored.
    pub fn set_position(&mut self, position: Point2<f64>) {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return;
        }
        self.position = self.drag_bounds.clamp(position);
    }

    pub fn dispensing_rate(&self) -> AmountRate {
        self.dispensing_rate
    }

    pub fn max_dispensing_rate(&self) -> AmountRate {
        self.max_dispensing_rate
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

    /// Recomputes the dispensing rate from the motion since the last step.
    pub fn step(&mut self) {
        self.dispensing_rate = if !self.visible || self.empty {
            AmountRate::zero()
        } else if self.position == self.previous_position {
            AmountRate::zero()
        } else {
            self.max_dispensing_rate
        };
        self.previous_position = self.position;
    }

    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.previous_position = self.default_position;
        self.dispensing_rate = AmountRate::zero();
        self.empty = false;
    }

    /// Places the shaker without registering it as movement.
    pub(crate) fn restore_position(&mut self, position: Point2<f64>) {
        self.set_position(position);
        self.previous_position = self.position;
        self.dispensing_rate = AmountRate::zero();
    }

    pub(crate) fn set_solute(&mut self, solute: Solute) {
        self.solute = solute;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.dispensing_rate = AmountRate::zero();
        }
    }

    pub(crate) fn set_empty(&mut self, empty: bool) {
        self.empty = empty;
        if empty {
            self.dispensing_rate = AmountRate::zero();
        }
    }
}
