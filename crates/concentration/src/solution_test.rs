use approx::assert_relative_eq;
use units::{Amount, Molarity, Volume};

use crate::config::ValueRange;
use crate::solute::{Solute, Solvent};
use crate::solution::ConcentrationSolution;

fn liters(value: f64) -> Volume {
    Volume::from_liters(value)
}

fn moles(value: f64) -> Amount {
    Amount::from_moles(value)
}

fn solution(solute: Solute) -> ConcentrationSolution {
    ConcentrationSolution::new(
        Solvent::water(),
        solute,
        ValueRange::new(Amount::zero(), moles(5.0), Amount::zero()),
        ValueRange::new(Volume::zero(), liters(1.0), liters(0.5)),
    )
}

#[test]
fn starts_at_range_defaults() {
    let solution = solution(Solute::DrinkMix);

    assert_eq!(solution.volume(), liters(0.5));
    assert_eq!(solution.solute_moles(), Amount::zero());
    assert_eq!(solution.concentration(), Molarity::zero());
    assert!(!solution.is_saturated());
    assert_eq!(solution.color(), Solvent::water().color);
}

#[test]
fn solvent_changes_report_applied_delta() {
    let mut solution = solution(Solute::DrinkMix);

    let added = solution.add_solvent(liters(0.8));
    assert_eq!(added, liters(0.5));
    assert_eq!(solution.volume(), liters(1.0));

    let removed = solution.remove_solvent(liters(0.3));
    assert_relative_eq!(removed.to_liters(), 0.3);

    let removed = solution.remove_solvent(liters(5.0));
    assert_relative_eq!(removed.to_liters(), 0.7);
    assert_eq!(solution.volume(), Volume::zero());
}

#[test]
fn solute_changes_report_applied_delta() {
    let mut solution = solution(Solute::DrinkMix);

    let added = solution.add_solute(moles(7.0));
    assert_eq!(added, moles(5.0));

    let removed = solution.remove_solute(moles(6.0));
    assert_eq!(removed, moles(5.0));
    assert_eq!(solution.solute_moles(), Amount::zero());
}

#[test]
fn concentration_is_capped_at_saturation() {
    let mut solution = solution(Solute::CopperSulfate);
    solution.set_solute_moles(moles(2.0));

    // 2 mol in 0.5 L is 4 M; copper sulfate saturates at 1.38 M
    assert_eq!(solution.concentration(), Solute::CopperSulfate.saturated_concentration());
    assert!(solution.is_saturated());
    assert_relative_eq!(solution.precipitate_moles().to_moles(), 2.0 - 1.38 * 0.5);
}

#[test]
fn unsaturated_solution_has_no_precipitate() {
    let mut solution = solution(Solute::DrinkMix);
    solution.set_solute_moles(moles(1.0));

    assert_relative_eq!(solution.concentration().to_moles_per_liter(), 2.0);
    assert!(!solution.is_saturated());
    assert_eq!(solution.precipitate_moles(), Amount::zero());
}

#[test]
fn empty_beaker_is_never_saturated() {
    let mut solution = solution(Solute::PotassiumPermanganate);
    solution.set_solute_moles(moles(1.0));
    solution.set_volume(Volume::zero());

    assert!(!solution.is_saturated());
    assert_eq!(solution.concentration(), Molarity::zero());
    // everything precipitates
    assert_eq!(solution.precipitate_moles(), moles(1.0));
    assert_relative_eq!(solution.solute_grams().to_grams(), 0.0);
    assert_relative_eq!(solution.percent_concentration(), 0.0);
}

#[test]
fn exactly_saturated_is_not_saturated() {
    let mut solution = solution(Solute::PotassiumDichromate);
    solution.set_volume(liters(1.0));
    solution.set_solute_moles(moles(0.51));

    assert!(!solution.is_saturated());
    assert_eq!(solution.precipitate_moles(), Amount::zero());
}

#[test]
fn solute_grams_counts_only_dissolved_solute() {
    let mut solution = solution(Solute::SodiumChloride);
    solution.set_volume(liters(0.5));
    solution.set_solute_moles(moles(1.0));

    assert_relative_eq!(solution.solute_grams().to_grams(), 58.443);

    // saturate: only 5.37 * 0.5 mol dissolve
    solution.set_solute_moles(moles(4.0));
    assert_relative_eq!(solution.solute_grams().to_grams(), 58.443 * 2.685, epsilon = 1e-9);
}

#[test]
fn percent_concentration_is_mass_percent() {
    let mut solution = solution(Solute::SodiumChloride);
    solution.set_volume(liters(1.0));
    solution.set_solute_moles(moles(1.0));

    let expected = 100.0 * 58.443 / (58.443 + 1000.0);
    assert_relative_eq!(solution.percent_concentration(), expected);
    assert!(solution.percent_concentration() <= 100.0);
}

#[test]
fn frozen_precipitate_holds_until_released() {
    let mut solution = solution(Solute::CobaltIINitrate);
    solution.set_solute_moles(moles(3.0));
    let before = solution.precipitate_moles();
    assert!(before > Amount::zero());

    solution.set_update_precipitate_amount(false);
    solution.add_solvent(liters(0.5));
    assert_eq!(solution.precipitate_moles(), before);
    assert!(solution.solute_grams() >= units::Mass::zero());

    solution.set_update_precipitate_amount(true);
    assert_eq!(solution.precipitate_moles(), Amount::zero());
}

#[test]
fn stock_solution_compound_update() {
    let mut solution = solution(Solute::CobaltIINitrate);
    assert_eq!(solution.volume(), liters(0.5));

    solution.set_update_precipitate_amount(false);
    let added = solution.add_solvent(liters(0.1));
    solution.set_update_precipitate_amount(true);
    solution.add_solute(Solute::CobaltIINitrate.stock_solution_concentration() * added);

    assert_relative_eq!(solution.volume().to_liters(), 0.6);
    assert_relative_eq!(solution.solute_moles().to_moles(), 0.5);
    let expected = (0.5 - 5.64 * solution.volume().to_liters()).max(0.0);
    assert_relative_eq!(solution.precipitate_moles().to_moles(), expected);
}

#[test]
fn compound_update_near_saturation_uses_final_volume() {
    let mut solution = solution(Solute::DrinkMix);
    solution.set_solute_moles(moles(3.2));
    assert_relative_eq!(solution.precipitate_moles().to_moles(), 0.22, epsilon = 1e-9);

    solution.set_update_precipitate_amount(false);
    let added = solution.add_solvent(liters(0.1));
    // held while the update is in progress
    assert_relative_eq!(solution.precipitate_moles().to_moles(), 0.22, epsilon = 1e-9);
    solution.set_update_precipitate_amount(true);
    solution.add_solute(Solute::DrinkMix.stock_solution_concentration() * added);

    // 3.75 mol against 5.96 M * 0.6 L, not against the 0.5 L before the drop
    assert_relative_eq!(solution.solute_moles().to_moles(), 3.75, epsilon = 1e-9);
    assert_relative_eq!(solution.precipitate_moles().to_moles(), 0.174, epsilon = 1e-9);
}

#[test]
fn non_finite_amounts_are_ignored() {
    let mut solution = solution(Solute::DrinkMix);
    solution.set_solute_moles(moles(1.0));

    solution.set_volume(liters(f64::NAN));
    assert_eq!(solution.volume(), liters(0.5));
    solution.set_solute_moles(moles(f64::NAN));
    assert_eq!(solution.solute_moles(), moles(1.0));

    assert_eq!(solution.add_solvent(liters(f64::INFINITY)), Volume::zero());
    assert_eq!(solution.remove_solute(moles(f64::NAN)), Amount::zero());
    assert_relative_eq!(solution.concentration().to_moles_per_liter(), 2.0);
}

#[test]
fn reset_solute_moles_keeps_volume() {
    let mut solution = solution(Solute::DrinkMix);
    solution.set_solute_moles(moles(4.0));
    solution.set_volume(liters(0.75));

    solution.reset_solute_moles();
    assert_eq!(solution.solute_moles(), Amount::zero());
    assert_eq!(solution.volume(), liters(0.75));
    assert_eq!(solution.precipitate_moles(), Amount::zero());
}

#[test]
fn create_color_uses_solvent_when_dilute() {
    let water = Solvent::water();

    assert_eq!(
        ConcentrationSolution::create_color(&water, Solute::CopperSulfate, Molarity::zero()),
        water.color
    );
    assert_eq!(
        ConcentrationSolution::create_color(
            &water,
            Solute::CopperSulfate,
            Molarity::from_moles_per_liter(1.38)
        ),
        Solute::CopperSulfate.color_scheme().max_color
    );
}

#[test]
fn absorbance_follows_dissolved_concentration() {
    let mut solution = solution(Solute::PotassiumPermanganate);
    solution.set_solute_moles(moles(0.1));

    assert_relative_eq!(solution.absorbance(10.0, 1.0), 10.0 * 0.2);

    // precipitate does not absorb: capped at 0.48 M
    solution.set_solute_moles(moles(2.0));
    assert_relative_eq!(solution.absorbance(10.0, 1.0), 10.0 * 0.48);
}

#[test]
fn reset_restores_defaults() {
    let mut solution = solution(Solute::DrinkMix);
    solution.set_volume(liters(0.9));
    solution.set_solute_moles(moles(3.0));
    solution.set_update_precipitate_amount(false);

    solution.reset();
    assert_eq!(solution.volume(), liters(0.5));
    assert_eq!(solution.solute_moles(), Amount::zero());
    assert!(solution.update_precipitate_amount());
}
