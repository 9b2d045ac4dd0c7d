use approx::assert_relative_eq;

use crate::volume::Volume;

#[test]
fn test_volume_conversions() {
    let volume = Volume::from_milliliters(250.0);
    assert_relative_eq!(volume.to_liters(), 0.25);
    assert_relative_eq!(Volume::from_liters(0.6).to_milliliters(), 600.0);
}

#[test]
fn test_volume_clamp() {
    let min = Volume::zero();
    let max = Volume::from_liters(1.0);

    assert_eq!(Volume::from_liters(1.4).clamp(min, max), max);
    assert_eq!(Volume::from_liters(-0.1).clamp(min, max), min);
    assert_eq!(
        Volume::from_liters(0.3).clamp(min, max),
        Volume::from_liters(0.3)
    );
}

#[test]
fn test_volume_arithmetic() {
    let a = Volume::from_liters(0.5);
    let b = Volume::from_liters(0.1);

    assert_relative_eq!((a + b).to_liters(), 0.6);
    assert_relative_eq!((a - b).to_liters(), 0.4);
    assert_relative_eq!(b / a, 0.2);
    assert_relative_eq!((2.0 * a).to_liters(), 1.0);
    assert!(Volume::zero().is_zero());
}
