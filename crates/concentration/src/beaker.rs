use nalgebra::Point2;
use units::Volume;

use crate::bounds::Bounds;
use crate::config::BeakerConfig;

/// Immutable beaker geometry.
///
/// `position` is the bottom-center of the beaker. Model coordinates have y
/// growing downward, so the bottom has the largest y.
#[derive(Debug, Clone, PartialEq)]
pub struct Beaker {
    pub position: Point2<f64>,
    pub width: f64,
    pub height: f64,
    /// Capacity when filled to the top
    pub volume: Volume,
}

impl Beaker {
    pub fn new(position: Point2<f64>, width: f64, height: f64, volume: Volume) -> Self {
        Self {
            position,
            width,
            height,
            volume,
        }
    }

    pub fn from_config(config: &BeakerConfig) -> Self {
        Self::new(
            Point2::new(config.position[0], config.position[1]),
            config.width,
            config.height,
            config.volume,
        )
    }

    pub fn left(&self) -> f64 {
        self.position.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.position.y - self.height
    }

    pub fn bottom(&self) -> f64 {
        self.position.y
    }

    /// Fraction of capacity occupied by `volume`
    pub fn percent_full(&self, volume: Volume) -> f64 {
        volume / self.volume
    }

    /// y coordinate of the free surface of a solution of the given volume
    pub fn solution_surface_y(&self, volume: Volume) -> f64 {
        self.bottom() - self.percent_full(volume) * self.height
    }

    /// Region occupied by a solution of the given volume
    pub fn solution_bounds(&self, volume: Volume) -> Bounds {
        Bounds::new(
            self.left(),
            self.solution_surface_y(volume),
            self.right(),
            self.bottom(),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn beaker() -> Beaker {
        Beaker::new(Point2::new(350.0, 550.0), 600.0, 300.0, Volume::from_liters(1.0))
    }

    #[test]
    fn edges() {
        let beaker = beaker();

        assert_relative_eq!(beaker.left(), 50.0);
        assert_relative_eq!(beaker.right(), 650.0);
        assert_relative_eq!(beaker.top(), 250.0);
        assert_relative_eq!(beaker.bottom(), 550.0);
    }

    #[test]
    fn surface_rises_with_volume() {
        let beaker = beaker();

        assert_relative_eq!(beaker.solution_surface_y(Volume::zero()), 550.0);
        assert_relative_eq!(beaker.solution_surface_y(Volume::from_liters(0.5)), 400.0);
        assert_relative_eq!(beaker.solution_surface_y(Volume::from_liters(1.0)), 250.0);
    }

    #[test]
    fn solution_bounds_cover_liquid() {
        let bounds = beaker().solution_bounds(Volume::from_liters(0.5));

        assert!(bounds.contains(&Point2::new(350.0, 500.0)));
        assert!(!bounds.contains(&Point2::new(350.0, 350.0)));
    }
}
