use nalgebra::Point2;
use units::Molarity;

/// Probe that reads the concentration of whatever fluid it is dipped in.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationMeter {
    position: Point2<f64>,
    default_position: Point2<f64>,
    value: Option<Molarity>,
}

impl ConcentrationMeter {
    pub fn new(position: Point2<f64>) -> Self {
        Self {
            position,
            default_position: position,
            value: None,
        }
    }

    /// Tip of the probe
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    /// Moves the probe; points with a non-finite coordinate are ignored.
    pub fn set_position(&mut self, position: Point2<f64>) {
        if position.x.is_finite() && position.y.is_finite() {
            self.position = position;
        }
    }

    /// Current reading; `None` when the probe is not in any fluid
    pub fn value(&self) -> Option<Molarity> {
        self.value
    }

    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.value = None;
    }

    pub(crate) fn set_value(&mut self, value: Option<Molarity>) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_reading() {
        let meter = ConcentrationMeter::new(Point2::new(785.0, 210.0));
        assert_eq!(meter.value(), None);
        assert_eq!(meter.position(), Point2::new(785.0, 210.0));
    }

    #[test]
    fn reset_restores_position_and_clears_reading() {
        let mut meter = ConcentrationMeter::new(Point2::new(785.0, 210.0));
        meter.set_position(Point2::new(300.0, 500.0));
        meter.set_value(Some(Molarity::from_moles_per_liter(1.5)));

        meter.reset();
        assert_eq!(meter.position(), Point2::new(785.0, 210.0));
        assert_eq!(meter.value(), None);
    }

    #[test]
    fn ignores_non_finite_position() {
        let mut meter = ConcentrationMeter::new(Point2::new(785.0, 210.0));
        meter.set_position(Point2::new(f64::NAN, 500.0));
        assert_eq!(meter.position(), Point2::new(785.0, 210.0));
    }
}
