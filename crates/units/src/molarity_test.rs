use approx::assert_relative_eq;

use crate::molarity::Molarity;
use crate::volume::Volume;

#[test]
fn test_molarity_conversions() {
    let m = Molarity::from_millimoles_per_liter(500.0);
    assert_relative_eq!(m.to_moles_per_liter(), 0.5);
    assert_relative_eq!(m.to_millimoles_per_liter(), 500.0);
}

#[test]
fn test_molarity_times_volume() {
    let stock = Molarity::from_moles_per_liter(5.0);
    let volume = Volume::from_liters(0.1);

    assert_relative_eq!((stock * volume).to_moles(), 0.5);
    assert_relative_eq!((volume * stock).to_moles(), 0.5);
}

#[test]
fn test_molarity_min_max() {
    let saturated = Molarity::from_moles_per_liter(5.96);
    let over = Molarity::from_moles_per_liter(7.0);

    assert_eq!(over.min(saturated), saturated);
    assert_eq!(over.max(saturated), over);
}
