//! WASM bindings for the concentration simulation.
//!
//! This crate provides JavaScript/TypeScript bindings for the concentration
//! crate, so a browser host can drive the model from its animation loop.
//!
//! # Architecture
//!
//! Models are stored in thread-local storage (WASM is single-threaded).
//! Functions return opaque IDs for referencing mutable state, and serializable
//! snapshots for reading state.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const simId = simulation_create();
//!
//! // Open the solvent faucet halfway
//! simulation_set_solvent_flow_rate(simId, 0.125);
//!
//! // Once per animation frame
//! simulation_set_shaker_position(simId, pointerX, pointerY);
//! simulation_step(simId, 1 / 60);
//! const snapshot = simulation_get_snapshot(simId);
//! const grains = simulation_get_shaker_particles(simId);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use concentration::color::Color;
use concentration::flow::FlowSource;
use concentration::particle::SoluteParticle;
use concentration::{ConcentrationModel, ModelConfig, ModelState, Solute, SoluteChange, SoluteForm};
use units::{Time, VolumeRate};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// =============================================================================
// Thread-local storage for simulation state
// =============================================================================

thread_local! {
    static SIMULATIONS: RefCell<HashMap<u32, ConcentrationModel>> = RefCell::new(HashMap::new());
    static NEXT_SIM_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn insert(model: ConcentrationModel) -> u32 {
    let id = NEXT_SIM_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    SIMULATIONS.with(|sims| {
        sims.borrow_mut().insert(id, model);
    });

    id
}

fn with_model<R>(sim_id: u32, f: impl FnOnce(&mut ConcentrationModel) -> R) -> Result<R, JsError> {
    SIMULATIONS.with(|sims| {
        let mut sims = sims.borrow_mut();
        let model = sims
            .get_mut(&sim_id)
            .ok_or_else(|| JsError::new(&format!("Simulation {} not found", sim_id)))?;
        Ok(f(model))
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// One solute particle for rendering
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleSnapshot {
    /// Center [x, y] in model units
    pub position: [f64; 2],
    /// Rotation in radians
    pub orientation: f64,
    /// Edge length in model units
    pub size: f64,
    pub color: Color,
}

impl From<&SoluteParticle> for ParticleSnapshot {
    fn from(particle: &SoluteParticle) -> Self {
        Self {
            position: [particle.position.x, particle.position.y],
            orientation: particle.orientation,
            size: particle.size(),
            color: particle.color(),
        }
    }
}

/// Rate and availability of one flow source
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    /// L/s
    pub flow_rate: f64,
    /// L/s
    pub max_flow_rate: f64,
    pub enabled: bool,
}

impl FlowSnapshot {
    fn of(source: &dyn FlowSource) -> Self {
        Self {
            flow_rate: source.flow_rate().to_liters_per_second(),
            max_flow_rate: source.max_flow_rate().to_liters_per_second(),
            enabled: source.is_enabled(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShakerSnapshot {
    pub position: [f64; 2],
    pub orientation: f64,
    pub visible: bool,
    pub empty: bool,
    /// mol/s
    pub dispensing_rate: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropperSnapshot {
    pub position: [f64; 2],
    pub visible: bool,
    pub empty: bool,
    pub flow: FlowSnapshot,
    /// Hex color of the stock solution
    pub fluid_color: String,
}

/// Everything a view needs to draw one frame, except the particle pools
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    /// Seconds
    pub time: f64,
    pub solute: Solute,
    pub solute_form: SoluteForm,
    /// Liters
    pub volume: f64,
    pub solute_moles: f64,
    /// mol/L
    pub concentration: f64,
    /// mol/L
    pub saturated_concentration: f64,
    pub is_saturated: bool,
    pub precipitate_moles: f64,
    pub solute_grams: f64,
    pub percent_concentration: f64,
    /// Hex color of the solution
    pub solution_color: String,
    /// y of the solution surface in model units
    pub surface_y: f64,
    pub solvent_faucet: FlowSnapshot,
    pub drain_faucet: FlowSnapshot,
    pub evaporator: FlowSnapshot,
    pub dropper: DropperSnapshot,
    pub shaker: ShakerSnapshot,
    pub meter_position: [f64; 2],
    /// Probe reading in mol/L, absent when the probe is in no fluid
    pub meter_value: Option<f64>,
    pub shaker_particle_count: usize,
    pub precipitate_particle_count: usize,
}

impl From<&ConcentrationModel> for SimulationSnapshot {
    fn from(model: &ConcentrationModel) -> Self {
        let solution = model.solution();
        let shaker = model.shaker();
        let dropper = model.dropper();
        let meter = model.meter().position();

        Self {
            time: model.time().to_seconds(),
            solute: model.solute(),
            solute_form: model.solute_form(),
            volume: solution.volume().to_liters(),
            solute_moles: solution.solute_moles().to_moles(),
            concentration: solution.concentration().to_moles_per_liter(),
            saturated_concentration: solution.saturated_concentration().to_moles_per_liter(),
            is_saturated: solution.is_saturated(),
            precipitate_moles: solution.precipitate_moles().to_moles(),
            solute_grams: solution.solute_grams().to_grams(),
            percent_concentration: solution.percent_concentration(),
            solution_color: solution.color().to_hex(),
            surface_y: model.beaker().solution_surface_y(solution.volume()),
            solvent_faucet: FlowSnapshot::of(model.solvent_faucet()),
            drain_faucet: FlowSnapshot::of(model.drain_faucet()),
            evaporator: FlowSnapshot::of(model.evaporator()),
            dropper: DropperSnapshot {
                position: [dropper.position.x, dropper.position.y],
                visible: dropper.is_visible(),
                empty: dropper.is_empty(),
                flow: FlowSnapshot::of(dropper),
                fluid_color: dropper.fluid_color(solution.solvent()).to_hex(),
            },
            shaker: ShakerSnapshot {
                position: [shaker.position().x, shaker.position().y],
                orientation: shaker.orientation,
                visible: shaker.is_visible(),
                empty: shaker.is_empty(),
                dispensing_rate: shaker.dispensing_rate().to_moles_per_second(),
            },
            meter_position: [meter.x, meter.y],
            meter_value: model.meter().value().map(|c| c.to_moles_per_liter()),
            shaker_particle_count: model.shaker_particles().len(),
            precipitate_particle_count: model.precipitate_particles().len(),
        }
    }
}

/// Result of one step
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSnapshot {
    pub time: f64,
    pub particles_created: usize,
    pub particles_dissolved: usize,
}

/// Catalog entry for a solute picker
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoluteInfo {
    pub solute: Solute,
    pub name: String,
    pub formula: Option<String>,
    /// g/mol
    pub molar_mass: f64,
    /// mol/L
    pub stock_concentration: f64,
    /// mol/L
    pub saturated_concentration: f64,
    pub particle_color: String,
}

impl From<Solute> for SoluteInfo {
    fn from(solute: Solute) -> Self {
        Self {
            solute,
            name: solute.name().to_string(),
            formula: solute.formula().map(str::to_string),
            molar_mass: solute.molar_mass(),
            stock_concentration: solute.stock_solution_concentration().to_moles_per_liter(),
            saturated_concentration: solute.saturated_concentration().to_moles_per_liter(),
            particle_color: solute.particle_color().to_hex(),
        }
    }
}

// =============================================================================
// Simulation management functions
// =============================================================================

/// Create a simulation with the stock configuration.
///
/// Returns a simulation ID for use with other functions.
#[wasm_bindgen]
pub fn simulation_create() -> u32 {
    insert(ConcentrationModel::new())
}

/// Create a simulation from a configuration object.
///
/// Missing fields take their stock values.
///
/// # Arguments
/// * `config` - Partial `ModelConfig` (camelCase keys)
#[wasm_bindgen]
pub fn simulation_create_with_config(config: JsValue) -> Result<u32, JsError> {
    let config: ModelConfig = from_js(config)?;
    let model = ConcentrationModel::with_config(config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(insert(model))
}

/// Delete a simulation to free memory.
#[wasm_bindgen]
pub fn simulation_delete(sim_id: u32) {
    SIMULATIONS.with(|sims| {
        sims.borrow_mut().remove(&sim_id);
    });
}

/// Restore every component to its default state.
#[wasm_bindgen]
pub fn simulation_reset(sim_id: u32) -> Result<(), JsError> {
    with_model(sim_id, |model| model.reset())
}

// =============================================================================
// Simulation stepping
// =============================================================================

/// Advance the simulation by one frame.
///
/// # Arguments
/// * `sim_id` - Simulation ID
/// * `dt` - Frame duration in seconds
#[wasm_bindgen]
pub fn simulation_step(sim_id: u32, dt: f64) -> Result<JsValue, JsError> {
    let snapshot = with_model(sim_id, |model| {
        let report = model.step(Time::from_seconds(dt));
        StepSnapshot {
            time: model.time().to_seconds(),
            particles_created: report.created,
            particles_dissolved: report.dissolved,
        }
    })?;
    to_js(&snapshot)
}

// =============================================================================
// User controls
// =============================================================================

/// Select the active solute; the beaker's solute amount is emptied.
#[wasm_bindgen]
pub fn simulation_select_solute(sim_id: u32, solute: Solute) -> Result<(), JsError> {
    with_model(sim_id, |model| model.select_solute(solute, SoluteChange::Reset))
}

/// Choose between the shaker (solid) and the dropper (solution).
#[wasm_bindgen]
pub fn simulation_set_solute_form(sim_id: u32, form: SoluteForm) -> Result<(), JsError> {
    with_model(sim_id, |model| model.set_solute_form(form))
}

/// Set the solvent faucet rate in L/s.
#[wasm_bindgen]
pub fn simulation_set_solvent_flow_rate(
    sim_id: u32,
    liters_per_second: f64,
) -> Result<(), JsError> {
    with_model(sim_id, |model| {
        model.set_solvent_flow_rate(VolumeRate::from_liters_per_second(liters_per_second))
    })
}

/// Set the drain faucet rate in L/s.
#[wasm_bindgen]
pub fn simulation_set_drain_flow_rate(sim_id: u32, liters_per_second: f64) -> Result<(), JsError> {
    with_model(sim_id, |model| {
        model.set_drain_flow_rate(VolumeRate::from_liters_per_second(liters_per_second))
    })
}

/// Set the evaporation rate in L/s.
#[wasm_bindgen]
pub fn simulation_set_evaporation_rate(sim_id: u32, liters_per_second: f64) -> Result<(), JsError> {
    with_model(sim_id, |model| {
        model.set_evaporation_rate(VolumeRate::from_liters_per_second(liters_per_second))
    })
}

/// Press or release the dropper button.
#[wasm_bindgen]
pub fn simulation_set_dropper_dispensing(sim_id: u32, dispensing: bool) -> Result<(), JsError> {
    with_model(sim_id, |model| model.set_dropper_dispensing(dispensing))
}

/// Drag the shaker; it dispenses on the next step if it moved.
#[wasm_bindgen]
pub fn simulation_set_shaker_position(sim_id: u32, x: f64, y: f64) -> Result<(), JsError> {
    with_model(sim_id, |model| model.set_shaker_position(Point2::new(x, y)))
}

/// Drag the concentration probe.
#[wasm_bindgen]
pub fn simulation_set_meter_position(sim_id: u32, x: f64, y: f64) -> Result<(), JsError> {
    with_model(sim_id, |model| model.set_meter_position(Point2::new(x, y)))
}

// =============================================================================
// State queries
// =============================================================================

/// Get the scalar state and derived values for rendering one frame.
#[wasm_bindgen]
pub fn simulation_get_snapshot(sim_id: u32) -> Result<JsValue, JsError> {
    let snapshot = with_model(sim_id, |model| SimulationSnapshot::from(&*model))?;
    to_js(&snapshot)
}

/// Get airborne shaker particles.
///
/// Pools only grow and shrink at the tail, so a renderer can diff by length.
#[wasm_bindgen]
pub fn simulation_get_shaker_particles(sim_id: u32) -> Result<JsValue, JsError> {
    let particles: Vec<ParticleSnapshot> = with_model(sim_id, |model| {
        model
            .shaker_particles()
            .particles()
            .iter()
            .map(|p| ParticleSnapshot::from(&p.particle))
            .collect()
    })?;
    to_js(&particles)
}

/// Get precipitate particles on the beaker floor.
#[wasm_bindgen]
pub fn simulation_get_precipitate_particles(sim_id: u32) -> Result<JsValue, JsError> {
    let particles: Vec<ParticleSnapshot> = with_model(sim_id, |model| {
        model
            .precipitate_particles()
            .particles()
            .iter()
            .map(ParticleSnapshot::from)
            .collect()
    })?;
    to_js(&particles)
}

/// Save the settable state (solute, amounts, rates, positions).
#[wasm_bindgen]
pub fn simulation_save_state(sim_id: u32) -> Result<JsValue, JsError> {
    let state = with_model(sim_id, |model| model.state())?;
    to_js(&state)
}

/// Restore a state returned by `simulation_save_state`.
#[wasm_bindgen]
pub fn simulation_restore_state(sim_id: u32, state: JsValue) -> Result<(), JsError> {
    let state: ModelState = from_js(state)?;
    with_model(sim_id, |model| model.restore(&state))
}

/// List the available solutes.
#[wasm_bindgen]
pub fn solute_catalog() -> Result<JsValue, JsError> {
    let catalog: Vec<SoluteInfo> = Solute::ALL.iter().copied().map(SoluteInfo::from).collect();
    to_js(&catalog)
}
