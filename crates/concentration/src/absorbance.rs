//! Beer's Law: light absorbed by a solution grows linearly with concentration.
//!
//! `A = a·b·C` where `a` is the molar absorptivity (L/(mol·cm)), `b` the path
//! length through the solution (cm) and `C` the concentration (mol/L).

use units::Molarity;

/// Absorbance `A = a·b·C`. Negative inputs are treated as zero.
pub fn absorbance(molar_absorptivity: f64, path_length_cm: f64, concentration: Molarity) -> f64 {
    molar_absorptivity.max(0.0)
        * path_length_cm.max(0.0)
        * concentration.to_moles_per_liter().max(0.0)
}

/// Fraction of light transmitted, `T = 10^-A`, in (0, 1]
pub fn transmittance(absorbance: f64) -> f64 {
    10f64.powf(-absorbance)
}

pub fn percent_transmittance(absorbance: f64) -> f64 {
    100.0 * transmittance(absorbance)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn absorbance_is_linear_in_concentration() {
        let a1 = absorbance(100.0, 1.0, Molarity::from_moles_per_liter(0.01));
        let a2 = absorbance(100.0, 1.0, Molarity::from_moles_per_liter(0.02));

        assert_relative_eq!(a1, 1.0);
        assert_relative_eq!(a2, 2.0 * a1);
    }

    #[test]
    fn clear_solution_transmits_everything() {
        assert_relative_eq!(transmittance(0.0), 1.0);
        assert_relative_eq!(percent_transmittance(absorbance(50.0, 1.0, Molarity::zero())), 100.0);
    }

    #[test]
    fn one_absorbance_unit_transmits_ten_percent() {
        assert_relative_eq!(percent_transmittance(1.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(transmittance(2.0), 0.01, epsilon = 1e-12);
    }

    #[test]
    fn negative_inputs_do_not_amplify_light() {
        let a = absorbance(-100.0, 1.0, Molarity::from_moles_per_liter(1.0));
        assert_relative_eq!(a, 0.0);
        assert_relative_eq!(transmittance(a), 1.0);
    }
}
