use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in model coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.width() < 0.0 || self.height() < 0.0
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Nearest point inside the rectangle.
    pub fn clamp(&self, point: Point2<f64>) -> Point2<f64> {
        Point2::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y.clamp(self.min_y, self.max_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 5.0);

        assert!(bounds.contains(&Point2::new(0.0, 0.0)));
        assert!(bounds.contains(&Point2::new(10.0, 5.0)));
        assert!(!bounds.contains(&Point2::new(10.1, 2.0)));
        assert!(!bounds.contains(&Point2::new(5.0, -0.1)));
    }

    #[test]
    fn clamp_pulls_points_inside() {
        let bounds = Bounds::new(250.0, 20.0, 575.0, 170.0);

        assert_eq!(bounds.clamp(Point2::new(0.0, 500.0)), Point2::new(250.0, 170.0));
        assert_eq!(bounds.clamp(Point2::new(300.0, 100.0)), Point2::new(300.0, 100.0));
    }

    #[test]
    fn inverted_bounds_are_empty() {
        assert!(Bounds::new(10.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!Bounds::new(0.0, 0.0, 0.0, 0.0).is_empty());
    }
}
