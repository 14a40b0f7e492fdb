//! Distance constraints solved by iterative relaxation.

use crate::float::Float;
use crate::particle::Particle;

/// A distance constraint between two particles in the world arena.
///
/// Solved Gauss-Seidel style: each `satisfy` call nudges the pair toward the
/// rest length. With shared particles (a box's edges and diagonals) a single
/// pass disturbs neighbours, so the world runs several iterations per
/// sub-step. Convergence is approximate, never exact.
#[derive(Clone, Debug)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F) -> Self {
        DistanceConstraint { a, b, rest_length, stiffness }
    }

    /// Rest length measured from the particles' current positions.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle<F>], stiffness: F) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        DistanceConstraint { a, b, rest_length, stiffness }
    }

    /// One relaxation pass.
    ///
    /// Degenerate geometry (coincident endpoints, both ends locked) is a
    /// silent no-op; it occurs routinely mid-solve and is not an error.
    pub fn satisfy(&self, particles: &mut [Particle<F>]) {
        let a_pos = particles[self.a].pos;
        let b_pos = particles[self.b].pos;
        let a_inv = particles[self.a].inv_mass;
        let b_inv = particles[self.b].inv_mass;

        let w_total = a_inv + b_inv;
        if w_total.is_near_zero(F::from_f32(1e-10)) {
            return; // both locked
        }

        let delta = b_pos - a_pos;
        let dist = delta.length();
        if dist.is_near_zero(F::from_f32(1e-10)) {
            return; // coincident
        }

        // Half the error per end at full stiffness; a locked end's share
        // flows entirely to the other end via the inverse-mass ratio.
        let correction = delta.scale((self.rest_length - dist) / dist * F::half() * self.stiffness);

        if !particles[self.a].locked {
            let share = (a_inv + a_inv) / w_total;
            particles[self.a].pos = particles[self.a].pos - correction.scale(share);
        }
        if !particles[self.b].locked {
            let share = (b_inv + b_inv) / w_total;
            particles[self.b].pos = particles[self.b].pos + correction.scale(share);
        }
    }
}
