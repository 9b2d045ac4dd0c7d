//! Mass-balance and particle simulation of a solution in a beaker.
//!
//! Solute enters as solid grains from a shaker or as stock solution from a
//! dropper; solvent enters from a faucet and leaves through a drain or by
//! evaporation. Solute beyond the saturation point settles as precipitate.

pub mod absorbance;
pub mod beaker;
pub mod bounds;
pub mod color;
pub mod config;
pub mod flow;
pub mod meter;
pub mod model;
pub mod particle;
pub mod precipitate;
pub mod shaker;
pub mod shaker_particles;
pub mod solute;
pub mod solution;

#[cfg(test)]
mod flow_test;
#[cfg(test)]
mod solution_test;

pub use config::{ConfigError, ModelConfig};
pub use model::{ConcentrationModel, ModelState, SoluteChange};
pub use solute::{Solute, SoluteForm, Solvent};
pub use solution::ConcentrationSolution;
