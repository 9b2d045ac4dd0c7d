//! Property-based tests for the mass balance and particle pools.
//!
//! Invariants checked across random operation sequences:
//! - volume and solute amount stay inside their ranges
//! - mutators report exactly the change they applied
//! - concentration never exceeds saturation
//! - saturation flag agrees with the raw moles / volume ratio
//! - the precipitate pool matches its target count and only changes at the tail

use concentration::config::ValueRange;
use concentration::precipitate::PrecipitateParticleSystem;
use concentration::{
    ConcentrationModel, ConcentrationSolution, Solute, SoluteChange, SoluteForm, Solvent,
};
use nalgebra::Point2;
use proptest::prelude::*;
use units::{Amount, Time, Volume, VolumeRate};

const MAX_VOLUME: f64 = 1.0;
const MAX_MOLES: f64 = 5.0;

fn solution(solute: Solute) -> ConcentrationSolution {
    ConcentrationSolution::new(
        Solvent::water(),
        solute,
        ValueRange::new(Amount::zero(), Amount::from_moles(MAX_MOLES), Amount::zero()),
        ValueRange::new(Volume::zero(), Volume::from_liters(MAX_VOLUME), Volume::from_liters(0.5)),
    )
}

fn lps(value: f64) -> VolumeRate {
    VolumeRate::from_liters_per_second(value)
}

fn any_solute() -> impl Strategy<Value = Solute> {
    (0..Solute::ALL.len()).prop_map(|index| Solute::ALL[index])
}

#[derive(Debug, Clone)]
enum SolventOp {
    Add(f64),
    Remove(f64),
}

fn solvent_op() -> impl Strategy<Value = SolventOp> {
    prop_oneof![
        (0.0..0.8f64).prop_map(SolventOp::Add),
        (0.0..0.8f64).prop_map(SolventOp::Remove),
    ]
}

#[derive(Debug, Clone)]
enum Action {
    SolventRate(f64),
    DrainRate(f64),
    EvaporationRate(f64),
    Dropper(bool),
    Form(bool),
    MoveShaker(f64, f64),
    SelectSolute(Solute),
    Step(f64),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => (0.0..0.3f64).prop_map(Action::SolventRate),
        1 => (0.0..0.3f64).prop_map(Action::DrainRate),
        1 => (0.0..0.3f64).prop_map(Action::EvaporationRate),
        1 => any::<bool>().prop_map(Action::Dropper),
        1 => any::<bool>().prop_map(Action::Form),
        2 => (200.0..600.0f64, 0.0..200.0f64).prop_map(|(x, y)| Action::MoveShaker(x, y)),
        1 => any_solute().prop_map(Action::SelectSolute),
        4 => (0.0..0.5f64).prop_map(Action::Step),
    ]
}

fn apply(model: &mut ConcentrationModel, action: &Action) {
    match *action {
        Action::SolventRate(rate) => model.set_solvent_flow_rate(lps(rate)),
        Action::DrainRate(rate) => model.set_drain_flow_rate(lps(rate)),
        Action::EvaporationRate(rate) => model.set_evaporation_rate(lps(rate)),
        Action::Dropper(on) => model.set_dropper_dispensing(on),
        Action::Form(solid) => {
            let form = if solid { SoluteForm::Solid } else { SoluteForm::Solution };
            model.set_solute_form(form)
        }
        Action::MoveShaker(x, y) => model.set_shaker_position(Point2::new(x, y)),
        Action::SelectSolute(solute) => model.select_solute(solute, SoluteChange::Reset),
        Action::Step(dt) => {
            model.step(Time::from_seconds(dt));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn volume_stays_in_range(ops in prop::collection::vec(solvent_op(), 1..40)) {
        let mut solution = solution(Solute::DrinkMix);

        for op in &ops {
            let before = solution.volume();
            match *op {
                SolventOp::Add(liters) => {
                    let added = solution.add_solvent(Volume::from_liters(liters));
                    prop_assert_eq!(added, solution.volume() - before);
                    prop_assert!(added >= Volume::zero());
                }
                SolventOp::Remove(liters) => {
                    let removed = solution.remove_solvent(Volume::from_liters(liters));
                    prop_assert_eq!(removed, before - solution.volume());
                    prop_assert!(removed >= Volume::zero());
                }
            }
            let volume = solution.volume().to_liters();
            prop_assert!((0.0..=MAX_VOLUME).contains(&volume));
        }
    }

    #[test]
    fn concentration_never_exceeds_saturation(
        solute in any_solute(),
        moles in 0.0..MAX_MOLES,
        liters in 0.0..MAX_VOLUME,
    ) {
        let mut solution = solution(solute);
        solution.set_volume(Volume::from_liters(liters));
        solution.set_solute_moles(Amount::from_moles(moles));

        prop_assert!(solution.concentration() <= solute.saturated_concentration());
        prop_assert!(solution.solute_grams().to_grams() >= 0.0);
        let percent = solution.percent_concentration();
        prop_assert!((0.0..=100.0).contains(&percent));
    }

    #[test]
    fn saturation_agrees_with_ratio(
        solute in any_solute(),
        moles in 0.0..MAX_MOLES,
        liters in 0.0..MAX_VOLUME,
    ) {
        let mut solution = solution(solute);
        solution.set_volume(Volume::from_liters(liters));
        solution.set_solute_moles(Amount::from_moles(moles));

        let saturated = solute.saturated_concentration().to_moles_per_liter();
        let expected = liters > 0.0 && moles / liters > saturated;
        prop_assert_eq!(solution.is_saturated(), expected);
    }

    #[test]
    fn model_stays_consistent(actions in prop::collection::vec(action(), 1..60)) {
        let mut model = ConcentrationModel::new();

        for action in &actions {
            let before = model.precipitate_particles().particles().as_slice().to_vec();
            apply(&mut model, action);

            let solution = model.solution();
            let volume = solution.volume().to_liters();
            let moles = solution.solute_moles().to_moles();
            prop_assert!((0.0..=MAX_VOLUME).contains(&volume));
            prop_assert!((0.0..=MAX_MOLES).contains(&moles));
            prop_assert!(solution.concentration() <= solution.saturated_concentration());

            let pool = model.precipitate_particles();
            let precipitate = solution.precipitate_moles();
            let target = PrecipitateParticleSystem::target_count(model.solute(), precipitate);
            prop_assert_eq!(pool.len(), target);

            if !matches!(action, Action::SelectSolute(_)) {
                let after = pool.particles().as_slice();
                let kept = before.len().min(after.len());
                prop_assert_eq!(&before[..kept], &after[..kept]);
            }
        }
    }
}
