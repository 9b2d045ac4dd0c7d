use approx::assert_relative_eq;
use nalgebra::Point2;
use units::{Time, VolumeRate};

use crate::flow::{Dropper, Evaporator, Faucet, FlowSource};
use crate::solute::{Solute, Solvent};

fn lps(value: f64) -> VolumeRate {
    VolumeRate::from_liters_per_second(value)
}

fn faucet() -> Faucet {
    Faucet::new(Point2::new(155.0, 220.0), -400.0, 45.0, lps(0.25))
}

fn visible_dropper() -> Dropper {
    let mut dropper = Dropper::new(
        Point2::new(410.0, 225.0),
        15.0,
        lps(0.05),
        Solute::CopperSulfate,
    );
    dropper.set_visible(true);
    dropper
}

#[test]
fn faucet_rate_is_clamped() {
    let mut faucet = faucet();

    faucet.set_flow_rate(lps(1.0));
    assert_eq!(faucet.flow_rate(), lps(0.25));

    faucet.set_flow_rate(lps(-0.1));
    assert_eq!(faucet.flow_rate(), VolumeRate::zero());

    faucet.set_flow_rate(lps(0.1));
    assert_eq!(faucet.flow_rate(), lps(0.1));
    assert!(faucet.is_flowing());
}

#[test]
fn non_finite_rate_stops_flow() {
    let mut faucet = faucet();
    faucet.set_flow_rate(lps(0.2));
    faucet.set_flow_rate(lps(f64::NAN));
    assert_eq!(faucet.flow_rate(), VolumeRate::zero());
    assert_eq!(faucet.volume_over(Time::from_seconds(1.0)).to_liters(), 0.0);

    faucet.set_flow_rate(lps(f64::INFINITY));
    assert_eq!(faucet.flow_rate(), VolumeRate::zero());

    let mut dropper = visible_dropper();
    dropper.set_flow_rate(lps(f64::NAN));
    assert_eq!(dropper.flow_rate(), VolumeRate::zero());

    let mut evaporator = Evaporator::new(lps(0.25));
    evaporator.set_flow_rate(lps(f64::NAN));
    assert_eq!(evaporator.flow_rate(), VolumeRate::zero());
}

#[test]
fn disabling_faucet_zeroes_rate() {
    let mut faucet = faucet();
    faucet.set_flow_rate(lps(0.2));

    faucet.set_enabled(false);
    assert_eq!(faucet.flow_rate(), VolumeRate::zero());

    // requests while disabled are ignored
    faucet.set_flow_rate(lps(0.2));
    assert_eq!(faucet.flow_rate(), VolumeRate::zero());

    faucet.set_enabled(true);
    faucet.set_flow_rate(lps(0.2));
    assert_eq!(faucet.flow_rate(), lps(0.2));
}

#[test]
fn faucet_volume_over_step() {
    let mut faucet = faucet();
    faucet.set_flow_rate(lps(0.25));

    let volume = faucet.volume_over(Time::from_seconds(0.1));
    assert_relative_eq!(volume.to_liters(), 0.025);
}

#[test]
fn faucet_stream_scales_with_rate() {
    let mut faucet = faucet();
    assert_relative_eq!(faucet.stream_width(), 0.0);

    faucet.set_flow_rate(lps(0.125));
    assert_relative_eq!(faucet.stream_width(), 22.5);

    let stream = faucet.stream_bounds(550.0);
    assert!(stream.contains(&Point2::new(155.0, 400.0)));
    assert!(!stream.contains(&Point2::new(180.0, 400.0)));
}

#[test]
fn faucet_reset_restores_defaults() {
    let mut faucet = faucet();
    faucet.set_flow_rate(lps(0.2));
    faucet.set_enabled(false);

    faucet.reset();
    assert!(faucet.is_enabled());
    assert_eq!(faucet.flow_rate(), VolumeRate::zero());
}

#[test]
fn hidden_dropper_does_not_flow() {
    let mut dropper = Dropper::new(Point2::new(410.0, 225.0), 15.0, lps(0.05), Solute::DrinkMix);
    assert!(!dropper.is_visible());

    dropper.set_dispensing(true);
    assert_eq!(dropper.flow_rate(), VolumeRate::zero());
}

#[test]
fn dropper_dispensing_toggles_max_rate() {
    let mut dropper = visible_dropper();

    dropper.set_dispensing(true);
    assert_eq!(dropper.flow_rate(), lps(0.05));

    dropper.set_dispensing(false);
    assert_eq!(dropper.flow_rate(), VolumeRate::zero());
}

#[test]
fn dropper_stops_when_hidden_or_empty() {
    let mut dropper = visible_dropper();
    dropper.set_dispensing(true);
    dropper.set_visible(false);
    assert_eq!(dropper.flow_rate(), VolumeRate::zero());

    let mut dropper = visible_dropper();
    dropper.set_dispensing(true);
    dropper.set_empty(true);
    assert!(dropper.is_empty());
    assert_eq!(dropper.flow_rate(), VolumeRate::zero());

    let mut dropper = visible_dropper();
    dropper.set_dispensing(true);
    dropper.set_enabled(false);
    assert_eq!(dropper.flow_rate(), VolumeRate::zero());
}

#[test]
fn dropper_fluid_is_stock_solution() {
    let dropper = visible_dropper();
    let solvent = Solvent::water();

    assert_eq!(dropper.stock_concentration(), Solute::CopperSulfate.stock_solution_concentration());
    let expected = Solute::CopperSulfate
        .color_scheme()
        .concentration_to_color(dropper.stock_concentration());
    assert_eq!(dropper.fluid_color(&solvent), expected);
}

#[test]
fn evaporator_clamps_and_disables() {
    let mut evaporator = Evaporator::new(lps(0.25));

    evaporator.set_flow_rate(lps(0.5));
    assert_eq!(evaporator.evaporation_rate(), lps(0.25));

    evaporator.set_enabled(false);
    assert_eq!(evaporator.evaporation_rate(), VolumeRate::zero());
    assert!(!evaporator.is_enabled());

    evaporator.reset();
    assert!(evaporator.is_enabled());
}
