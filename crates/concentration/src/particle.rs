//! Visual grains of solute and the pool that holds them.

use nalgebra::{Point2, Vector2};

use crate::beaker::Beaker;
use crate::color::Color;
use crate::solute::Solute;

/// One visible grain of solute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoluteParticle {
    pub solute: Solute,
    pub position: Point2<f64>,
    /// Fixed rotation in radians
    pub orientation: f64,
}

impl SoluteParticle {
    pub fn new(solute: Solute, position: Point2<f64>, orientation: f64) -> Self {
        Self {
            solute,
            position,
            orientation,
        }
    }

    pub fn size(&self) -> f64 {
        self.solute.particle_size()
    }

    pub fn color(&self) -> Color {
        self.solute.particle_color()
    }
}

/// A grain falling from the shaker, with ballistic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakerParticle {
    pub particle: SoluteParticle,
    pub velocity: Vector2<f64>,
    /// Constant for the particle's lifetime
    pub acceleration: Vector2<f64>,
}

impl ShakerParticle {
    pub fn new(
        particle: SoluteParticle,
        velocity: Vector2<f64>,
        acceleration: Vector2<f64>,
    ) -> Self {
        Self {
            particle,
            velocity,
            acceleration,
        }
    }

    pub fn position(&self) -> Point2<f64> {
        self.particle.position
    }

    /// Semi-implicit Euler step with a bounce off the beaker's left wall.
    ///
    /// Only the left wall is modeled; particles leave the shaker moving left
    /// and cannot reach the right wall.
    pub fn step(&mut self, dt: f64, beaker: &Beaker) {
        self.velocity += self.acceleration * dt;
        self.particle.position += self.velocity * dt;

        let min_x = beaker.left() + self.particle.size();
        if self.particle.position.x <= min_x {
            self.particle.position.x = min_x;
            self.velocity.x = self.velocity.x.abs();
        }
    }
}

/// Growable pool of particles.
///
/// Renderers redraw incrementally, so code that resizes the pool to a target
/// count must only push to and pop from the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticlePool<P> {
    particles: Vec<P>,
}

impl<P> ParticlePool<P> {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.particles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.particles.get(index)
    }

    pub(crate) fn push(&mut self, particle: P) {
        self.particles.push(particle);
    }

    /// Removes up to `count` particles from the tail, returning how many
    /// were removed.
    pub(crate) fn pop_many(&mut self, count: usize) -> usize {
        let removed = count.min(self.particles.len());
        self.particles.truncate(self.particles.len() - removed);
        removed
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, P> {
        self.particles.iter_mut()
    }

    /// Keeps particles matching `keep` in their original order, returning the
    /// number removed.
    pub(crate) fn retain<F: FnMut(&P) -> bool>(&mut self, keep: F) -> usize {
        let before = self.particles.len();
        self.particles.retain(keep);
        before - self.particles.len()
    }

    pub(crate) fn clear(&mut self) {
        self.particles.clear();
    }
}

impl<P> Default for ParticlePool<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P> IntoIterator for &'a ParticlePool<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
