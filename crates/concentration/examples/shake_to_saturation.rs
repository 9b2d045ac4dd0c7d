//! Shake drink mix into the beaker until it saturates, then dilute it.
//!
//! Prints the solution state once per simulated second. The first argument
//! picks the log level (`info`, `debug` or `trace`).
//!
//! Run with: cargo run --package concentration --example shake_to_saturation -- debug

use concentration::{ConcentrationModel, SoluteForm};
use nalgebra::Point2;
use units::{Time, VolumeRate};

const FRAMES_PER_SECOND: usize = 60;

fn main() {
    let level = match std::env::args().nth(1).as_deref() {
        Some("trace") => tracing::Level::TRACE,
        Some("debug") => tracing::Level::DEBUG,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let mut model = ConcentrationModel::new();
    let dt = Time::from_seconds(1.0 / FRAMES_PER_SECOND as f64);
    let wiggle = [Point2::new(330.0, 170.0), Point2::new(345.0, 150.0)];

    println!("Concentration: shake to saturation\n");
    println!("{}", "=".repeat(72));
    println!(
        "{:>6} {:>10} {:>10} {:>12} {:>12} {:>9}",
        "t (s)", "V (L)", "n (mol)", "C (mol/L)", "ppt (mol)", "ppt #"
    );

    for second in 0..30 {
        if second == 15 {
            model.set_solvent_flow_rate(VolumeRate::from_liters_per_second(0.1));
        } else if second == 20 {
            // switch to stock solution
            model.set_solvent_flow_rate(VolumeRate::zero());
            model.set_solute_form(SoluteForm::Solution);
            model.set_dropper_dispensing(true);
        }

        for frame in 0..FRAMES_PER_SECOND {
            if second < 12 {
                model.set_shaker_position(wiggle[frame % 2]);
            }
            model.step(dt);
        }

        let solution = model.solution();
        println!(
            "{:>6.1} {:>10.3} {:>10.3} {:>12.3} {:>12.3} {:>9}{}",
            model.time().to_seconds(),
            solution.volume().to_liters(),
            solution.solute_moles().to_moles(),
            solution.concentration().to_moles_per_liter(),
            solution.precipitate_moles().to_moles(),
            model.precipitate_particles().len(),
            if solution.is_saturated() { "  saturated" } else { "" }
        );
    }

    println!("{}", "=".repeat(72));
    println!("Color: {}", model.solution().color().to_hex());
    println!("Percent by mass: {:.2}%", model.solution().percent_concentration());
}
