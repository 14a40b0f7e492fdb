//! Positional collision response for particles and constraint segments.
//!
//! Resolution only moves positions; there is no impulse or momentum
//! exchange. The next sub-step's implicit Verlet velocity absorbs each
//! correction as ordinary motion. Under sustained overlap this can jitter;
//! that behaviour is intentional and kept.

use crate::float::Float;
use crate::particle::Particle;

/// Separate two overlapping circular particles along their center line.
///
/// Inverse-mass weighted: equal masses split 50/50, a locked particle absorbs
/// nothing. Coincident centers are a no-op.
pub fn separate_particles<F: Float>(particles: &mut [Particle<F>], i: usize, j: usize) {
    let a_inv = particles[i].inv_mass;
    let b_inv = particles[j].inv_mass;
    let w_total = a_inv + b_inv;
    if w_total.is_near_zero(F::from_f32(1e-10)) {
        return;
    }

    let delta = particles[j].pos - particles[i].pos;
    let min_dist = particles[i].radius + particles[j].radius;
    let dist_sq = delta.length_sq();
    if dist_sq >= min_dist * min_dist {
        return;
    }

    let dist = dist_sq.sqrt();
    if dist.is_near_zero(F::from_f32(1e-10)) {
        return;
    }

    let normal = delta.scale(F::one() / dist);
    let overlap = min_dist - dist;

    if !particles[i].locked {
        particles[i].pos = particles[i].pos - normal.scale(overlap * a_inv / w_total);
    }
    if !particles[j].locked {
        particles[j].pos = particles[j].pos + normal.scale(overlap * b_inv / w_total);
    }
}

/// Push a particle out of a constraint segment treated as a capsule.
///
/// The particle is projected onto the segment (parameter clamped to [0, 1]);
/// on overlap against `segment_radius + particle.radius` the particle takes
/// half the correction and each endpoint a quarter, locked targets none.
/// Endpoints of the segment itself are never tested against it.
pub fn separate_particle_from_segment<F: Float>(
    particles: &mut [Particle<F>],
    p: usize,
    a: usize,
    b: usize,
    segment_radius: F,
) {
    if p == a || p == b {
        return;
    }

    let pos = particles[p].pos;
    let a_pos = particles[a].pos;
    let b_pos = particles[b].pos;

    let ab = b_pos - a_pos;
    let ab_len_sq = ab.length_sq();
    let t = if ab_len_sq.is_near_zero(F::from_f32(1e-10)) {
        F::zero()
    } else {
        ((pos - a_pos).dot(ab) / ab_len_sq).clamp(F::zero(), F::one())
    };
    let closest = a_pos + ab.scale(t);

    let delta = pos - closest;
    let min_dist = segment_radius + particles[p].radius;
    let dist_sq = delta.length_sq();
    if dist_sq >= min_dist * min_dist {
        return;
    }

    let dist = dist_sq.sqrt();
    if dist.is_near_zero(F::from_f32(1e-10)) {
        return;
    }

    let normal = delta.scale(F::one() / dist);
    let overlap = min_dist - dist;
    let quarter = F::half() * F::half();

    if !particles[p].locked {
        particles[p].pos = particles[p].pos + normal.scale(overlap * F::half());
    }
    if !particles[a].locked {
        particles[a].pos = particles[a].pos - normal.scale(overlap * quarter);
    }
    if !particles[b].locked {
        particles[b].pos = particles[b].pos - normal.scale(overlap * quarter);
    }
}
