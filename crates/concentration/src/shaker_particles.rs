//! Solid solute falling from the shaker into the solution.
//!
//! Each step propagates every airborne particle, retires the ones that have
//! crossed the solution surface (each retired particle dissolves as
//! `1 / particles_per_mole` mol), and emits new particles if the shaker is
//! dispensing. Retirement is the only path by which shaken solute reaches the
//! solution.

use nalgebra::{Point2, Vector2};
use rand::Rng;
use rand_chacha::ChaChaRng;
use std::f64::consts::TAU;
use units::{Amount, Time};

use crate::beaker::Beaker;
use crate::config::ShakerParticleConfig;
use crate::particle::{ParticlePool, ShakerParticle, SoluteParticle};
use crate::shaker::Shaker;
use crate::solution::ConcentrationSolution;

/// What happened to the particle population during one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShakerStepReport {
    pub created: usize,
    pub dissolved: usize,
    /// Solute actually added to the solution (after clamping)
    pub solute_added: Amount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShakerParticleSystem {
    config: ShakerParticleConfig,
    particles: ParticlePool<ShakerParticle>,
}

impl ShakerParticleSystem {
    pub fn new(config: ShakerParticleConfig) -> Self {
        Self {
            config,
            particles: ParticlePool::new(),
        }
    }

    pub fn particles(&self) -> &ParticlePool<ShakerParticle> {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Discards every airborne particle without dissolving it.
    pub fn remove_all_particles(&mut self) {
        self.particles.clear();
    }

    pub fn reset(&mut self) {
        self.remove_all_particles();
    }

    /// Number of particles to emit for one step at the shaker's current rate
    pub fn particles_to_create(shaker: &Shaker, dt: Time) -> usize {
        let moles = shaker.dispensing_rate().integrate(dt).to_moles();
        let per_step = moles * shaker.solute().particles_per_mole();
        if shaker.dispensing_rate().to_moles_per_second() > 0.0 {
            per_step.max(1.0).round() as usize
        } else {
            0
        }
    }

    pub fn step(
        &mut self,
        dt: Time,
        shaker: &Shaker,
        beaker: &Beaker,
        solution: &mut ConcentrationSolution,
        rng: &mut ChaChaRng,
    ) -> ShakerStepReport {
        let solute = solution.solute();
        let surface_y = beaker.solution_surface_y(solution.volume()) - solute.particle_size();
        let seconds = dt.to_seconds();

        self.particles
            .iter_mut()
            .for_each(|particle| particle.step(seconds, beaker));

        let dissolved = self.particles.retain(|particle| particle.position().y <= surface_y);
        let solute_added = if dissolved > 0 {
            solution.add_solute(Amount::from_moles(dissolved as f64 / solute.particles_per_mole()))
        } else {
            Amount::zero()
        };

        let created = Self::particles_to_create(shaker, dt);
        for _ in 0..created {
            let particle = self.create_particle(shaker, rng);
            self.particles.push(particle);
        }

        if created > 0 || dissolved > 0 {
            tracing::trace!(
                created,
                dissolved,
                airborne = self.particles.len(),
                "shaker particles stepped"
            );
        }

        ShakerStepReport {
            created,
            dissolved,
            solute_added,
        }
    }

    fn create_particle(&self, shaker: &Shaker, rng: &mut ChaChaRng) -> ShakerParticle {
        let offset = Vector2::new(
            rng.random_range(-self.config.max_x_offset..=self.config.max_x_offset),
            rng.random_range(0.0..=self.config.max_y_offset),
        );
        let position: Point2<f64> = shaker.position() + offset;
        let orientation = rng.random_range(0.0..TAU);

        let direction = Vector2::new(shaker.orientation.cos(), shaker.orientation.sin());
        let velocity = direction * self.config.initial_speed;
        let acceleration = Vector2::new(0.0, self.config.gravitational_acceleration);

        ShakerParticle::new(
            SoluteParticle::new(shaker.solute(), position, orientation),
            velocity,
            acceleration,
        )
    }
}
