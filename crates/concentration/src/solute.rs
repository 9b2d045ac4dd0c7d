//! The fixed catalog of solutes and the water solvent they dissolve in.
//!
//! Solutes are immutable value records selected by an enum tag; everything
//! the model needs to know about a solute (molar mass, saturation point,
//! stock concentration, colors, particle rendering density) is looked up
//! from a static table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use units::{Density, Molarity};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::color::{Color, SoluteColorScheme};

/// Default edge length of a rendered solute particle (model units)
const PARTICLE_SIZE: f64 = 5.0;

/// Default number of rendered particles per mole of solute
const PARTICLES_PER_MOLE: f64 = 200.0;

/// Water at room temperature
const WATER_DENSITY_G_PER_L: f64 = 1000.0;
const WATER_COLOR: Color = Color::new(224, 255, 255);

/// The liquid solutes are dissolved in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solvent {
    pub name: String,
    pub density: Density,
    pub color: Color,
}

impl Solvent {
    pub fn water() -> Self {
        Self {
            name: "water".to_string(),
            density: Density::from_grams_per_liter(WATER_DENSITY_G_PER_L),
            color: WATER_COLOR,
        }
    }
}

impl Default for Solvent {
    fn default() -> Self {
        Self::water()
    }
}

/// How solute is added to the beaker: as solid grains from the shaker, or as
/// stock solution from the dropper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub enum SoluteForm {
    #[default]
    Solid,
    Solution,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown solute: {0}")]
pub struct ParseSoluteError(pub String);

/// One of the nine solutes available in the simulation.
///
/// # Examples
///
/// ```
/// use concentration::solute::Solute;
///
/// let solute: Solute = "copperSulfate".parse().unwrap();
/// assert_eq!(solute, Solute::CopperSulfate);
/// assert_eq!(solute.formula(), Some("CuSO4"));
/// assert!(solute.stock_solution_concentration() <= solute.saturated_concentration());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "tsify", derive(Tsify))]
#[cfg_attr(feature = "tsify", tsify(into_wasm_abi, from_wasm_abi))]
pub enum Solute {
    #[default]
    DrinkMix,
    CobaltIINitrate,
    CobaltChloride,
    PotassiumDichromate,
    PotassiumChromate,
    NickelIIChloride,
    CopperSulfate,
    PotassiumPermanganate,
    SodiumChloride,
}

struct SoluteProperties {
    key: &'static str,
    name: &'static str,
    formula: Option<&'static str>,
    /// g/mol
    molar_mass: f64,
    /// mol/L
    stock_solution_concentration: f64,
    /// The max stop is the saturated concentration
    color_scheme: SoluteColorScheme,
    particle_color: Color,
    particle_size: f64,
    particles_per_mole: f64,
}

const fn scheme(
    pale: Color,
    mid_concentration: f64,
    mid: Color,
    saturated: f64,
    max: Color,
) -> SoluteColorScheme {
    SoluteColorScheme::new(0.0, pale, mid_concentration, mid, saturated, max)
}

static PROPERTIES: [SoluteProperties; 9] = [
    SoluteProperties {
        key: "drinkMix",
        name: "Drink mix",
        formula: None,
        molar_mass: 342.296,
        stock_solution_concentration: 5.5,
        color_scheme: scheme(
            Color::new(255, 225, 225),
            0.05,
            Color::new(255, 0, 0),
            5.96,
            Color::new(190, 0, 0),
        ),
        particle_color: Color::new(190, 0, 0),
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "cobaltIINitrate",
        name: "Cobalt (II) nitrate",
        formula: Some("Co(NO3)2"),
        molar_mass: 182.942,
        stock_solution_concentration: 5.0,
        color_scheme: scheme(
            Color::new(255, 225, 225),
            0.05,
            Color::new(255, 0, 0),
            5.64,
            Color::new(255, 0, 0),
        ),
        particle_color: Color::new(255, 0, 0),
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "cobaltChloride",
        name: "Cobalt chloride",
        formula: Some("CoCl2"),
        molar_mass: 129.839,
        stock_solution_concentration: 4.0,
        color_scheme: scheme(
            Color::new(255, 242, 242),
            0.05,
            Color::new(255, 106, 106),
            4.33,
            Color::new(255, 106, 106),
        ),
        particle_color: Color::new(255, 106, 106),
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "potassiumDichromate",
        name: "Potassium dichromate",
        formula: Some("K2Cr2O7"),
        molar_mass: 294.185,
        stock_solution_concentration: 0.5,
        color_scheme: scheme(
            Color::new(255, 204, 153),
            0.05,
            Color::new(255, 127, 0),
            0.51,
            Color::new(255, 127, 0),
        ),
        particle_color: Color::new(255, 127, 0),
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "potassiumChromate",
        name: "Potassium chromate",
        formula: Some("K2CrO4"),
        molar_mass: 194.191,
        stock_solution_concentration: 3.0,
        color_scheme: scheme(
            Color::new(255, 255, 153),
            0.05,
            Color::new(255, 255, 0),
            3.35,
            Color::new(255, 255, 0),
        ),
        particle_color: Color::new(255, 255, 0),
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "nickelIIChloride",
        name: "Nickel (II) chloride",
        formula: Some("NiCl2"),
        molar_mass: 129.599,
        stock_solution_concentration: 5.0,
        color_scheme: scheme(
            Color::new(234, 244, 234),
            0.2,
            Color::new(0, 128, 0),
            5.21,
            Color::new(0, 128, 0),
        ),
        particle_color: Color::new(0, 128, 0),
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "copperSulfate",
        name: "Copper sulfate",
        formula: Some("CuSO4"),
        molar_mass: 159.609,
        stock_solution_concentration: 1.0,
        color_scheme: scheme(
            Color::new(220, 238, 255),
            0.2,
            Color::new(30, 144, 255),
            1.38,
            Color::new(30, 144, 255),
        ),
        particle_color: Color::new(30, 144, 255),
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "potassiumPermanganate",
        name: "Potassium permanganate",
        formula: Some("KMnO4"),
        molar_mass: 158.034,
        stock_solution_concentration: 0.4,
        color_scheme: scheme(
            Color::new(255, 235, 255),
            0.01,
            Color::new(255, 0, 255),
            0.48,
            Color::new(80, 0, 120),
        ),
        particle_color: Color::BLACK,
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
    SoluteProperties {
        key: "sodiumChloride",
        name: "Sodium chloride",
        formula: Some("NaCl"),
        molar_mass: 58.443,
        stock_solution_concentration: 5.0,
        color_scheme: scheme(
            WATER_COLOR,
            0.05,
            WATER_COLOR,
            5.37,
            WATER_COLOR,
        ),
        particle_color: Color::WHITE,
        particle_size: PARTICLE_SIZE,
        particles_per_mole: PARTICLES_PER_MOLE,
    },
];

impl Solute {
    pub const ALL: [Solute; 9] = [
        Solute::DrinkMix,
        Solute::CobaltIINitrate,
        Solute::CobaltChloride,
        Solute::PotassiumDichromate,
        Solute::PotassiumChromate,
        Solute::NickelIIChloride,
        Solute::CopperSulfate,
        Solute::PotassiumPermanganate,
        Solute::SodiumChloride,
    ];

    fn properties(&self) -> &'static SoluteProperties {
        &PROPERTIES[*self as usize]
    }

    /// Stable identifier, matches the serde representation
    pub fn key(&self) -> &'static str {
        self.properties().key
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        self.properties().name
    }

    /// Chemical formula; drink mix has none
    pub fn formula(&self) -> Option<&'static str> {
        self.properties().formula
    }

    /// Molar mass in g/mol
    pub fn molar_mass(&self) -> f64 {
        self.properties().molar_mass
    }

    /// Concentration of the premixed solution in the dropper
    pub fn stock_solution_concentration(&self) -> Molarity {
        Molarity::from_moles_per_liter(self.properties().stock_solution_concentration)
    }

    /// Maximum concentration before excess solute precipitates
    pub fn saturated_concentration(&self) -> Molarity {
        Molarity::from_moles_per_liter(self.properties().color_scheme.max_concentration)
    }

    pub fn color_scheme(&self) -> &'static SoluteColorScheme {
        &self.properties().color_scheme
    }

    pub fn particle_color(&self) -> Color {
        self.properties().particle_color
    }

    /// Edge length of one rendered particle
    pub fn particle_size(&self) -> f64 {
        self.properties().particle_size
    }

    /// How many rendered particles represent one mole
    pub fn particles_per_mole(&self) -> f64 {
        self.properties().particles_per_mole
    }
}

impl fmt::Display for Solute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Solute {
    type Err = ParseSoluteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Solute::ALL
            .into_iter()
            .find(|solute| solute.key() == s || solute.formula() == Some(s))
            .ok_or_else(|| ParseSoluteError(s.to_string()))
    }
}
