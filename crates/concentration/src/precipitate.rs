//! Static particles on the beaker floor that track the precipitate amount.

use nalgebra::Point2;
use rand::Rng;
use rand_chacha::ChaChaRng;
use std::f64::consts::{SQRT_2, TAU};
use units::Amount;

use crate::beaker::Beaker;
use crate::particle::{ParticlePool, SoluteParticle};
use crate::solute::Solute;
use crate::solution::ConcentrationSolution;

#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitateParticleSystem {
    solute: Solute,
    particles: ParticlePool<SoluteParticle>,
}

impl PrecipitateParticleSystem {
    pub fn new(solute: Solute) -> Self {
        Self {
            solute,
            particles: ParticlePool::new(),
        }
    }

    pub fn solute(&self) -> Solute {
        self.solute
    }

    pub fn particles(&self) -> &ParticlePool<SoluteParticle> {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles that represents `precipitate` of `solute`.
    ///
    /// Any nonzero precipitate shows at least one particle.
    pub fn target_count(solute: Solute, precipitate: Amount) -> usize {
        let moles = precipitate.to_moles();
        let count = (solute.particles_per_mole() * moles).round().max(0.0) as usize;
        if count == 0 && moles > 0.0 {
            1
        } else {
            count
        }
    }

    /// Grows or shrinks the pool to match the solution's precipitate.
    ///
    /// Only the tail of the pool is touched: surviving particles keep their
    /// index and position.
    pub fn update_particles(
        &mut self,
        solution: &ConcentrationSolution,
        beaker: &Beaker,
        rng: &mut ChaChaRng,
    ) {
        let target = Self::target_count(self.solute, solution.precipitate_moles());
        let current = self.particles.len();

        if target < current {
            self.particles.pop_many(current - target);
        } else if target > current {
            for _ in current..target {
                let particle = self.create_particle(beaker, rng);
                self.particles.push(particle);
            }
        } else {
            return;
        }

        debug_assert_eq!(self.particles.len(), target, "precipitate pool out of sync");
        tracing::debug!(
            solute = %self.solute,
            from = current,
            to = target,
            "precipitate particles resized"
        );
    }

    /// Switches solute, discarding every particle of the old one, then
    /// rebuilds the pool for the new solute.
    pub fn set_solute(
        &mut self,
        solute: Solute,
        solution: &ConcentrationSolution,
        beaker: &Beaker,
        rng: &mut ChaChaRng,
    ) {
        self.solute = solute;
        self.particles.clear();
        self.update_particles(solution, beaker, rng);
    }

    pub fn remove_all_particles(&mut self) {
        self.particles.clear();
    }

    fn create_particle(&self, beaker: &Beaker, rng: &mut ChaChaRng) -> SoluteParticle {
        // keep the whole rotated square inside the walls
        let margin = self.solute.particle_size() * SQRT_2;
        let min_x = beaker.left() + margin;
        let max_x = beaker.right() - margin;
        let x = if min_x < max_x {
            rng.random_range(min_x..=max_x)
        } else {
            beaker.position.x
        };
        let y = beaker.bottom() - margin;
        let orientation = rng.random_range(0.0..TAU);

        SoluteParticle::new(self.solute, Point2::new(x, y), orientation)
    }
}
