//! Verlet particles with position-based dynamics.

use crate::float::Float;
use crate::vec::Vec2;

/// A Verlet particle; velocity is implicit in `pos - prev_pos`.
///
/// Particles live in the world's flat arena and are referenced everywhere by
/// stable index, never by pointer. Removal tombstones (`alive = false`) so
/// outstanding indices stay valid.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub acceleration: Vec2<F>,
    pub radius: F,
    pub mass: F,
    pub inv_mass: F,
    pub locked: bool,
    pub alive: bool,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec2<F>, mass: F, radius: F) -> Self {
        let inv_mass = if mass.is_near_zero(F::from_f32(1e-10)) {
            F::zero()
        } else {
            F::one() / mass
        };
        Particle {
            pos,
            prev_pos: pos,
            acceleration: Vec2::zero(),
            radius,
            mass,
            inv_mass,
            locked: false,
            alive: true,
        }
    }

    pub fn locked_at(pos: Vec2<F>, radius: F) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            acceleration: Vec2::zero(),
            radius,
            mass: F::zero(),
            inv_mass: F::zero(),
            locked: true,
            alive: true,
        }
    }

    /// Accumulate a one-shot force, consumed by the next integration.
    pub fn apply_force(&mut self, force: Vec2<F>) {
        if !self.locked {
            self.acceleration = self.acceleration + force.scale(self.inv_mass);
        }
    }

    pub fn apply_acceleration(&mut self, accel: Vec2<F>) {
        if !self.locked {
            self.acceleration = self.acceleration + accel;
        }
    }

    /// Inject velocity directly by shifting `prev_pos`.
    pub fn apply_impulse(&mut self, impulse: Vec2<F>) {
        if !self.locked {
            self.prev_pos = self.prev_pos - impulse.scale(self.inv_mass);
        }
    }

    /// One Verlet step. Locked particles are skipped entirely.
    pub fn integrate(&mut self, dt: F, damping: F) {
        if self.locked {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let new_pos = self.pos + velocity + self.acceleration.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
        self.acceleration = Vec2::zero();
    }

    /// Implicit velocity in distance-per-sub-step units.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    pub fn lock(&mut self) {
        self.locked = true;
        self.inv_mass = F::zero();
        self.prev_pos = self.pos;
        self.acceleration = Vec2::zero();
    }

    pub fn unlock(&mut self, mass: F) {
        self.locked = false;
        self.mass = mass;
        self.inv_mass = if mass.is_near_zero(F::from_f32(1e-10)) {
            F::zero()
        } else {
            F::one() / mass
        };
    }

    /// Teleport without injecting velocity: `prev_pos` resyncs to the target.
    pub fn teleport(&mut self, pos: Vec2<F>) {
        self.pos = pos;
        self.prev_pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_accumulates_gravity() {
        let mut p: Particle<f32> = Particle::new(Vec2::new(0.0, 0.0), 1.0, 1.0);
        p.apply_acceleration(Vec2::new(0.0, 10.0));
        p.integrate(1.0, 1.0);
        assert!((p.pos.y - 10.0).abs() < 1e-6);
        // acceleration is one-shot
        p.integrate(1.0, 1.0);
        assert!((p.pos.y - 20.0).abs() < 1e-6, "only implicit velocity remains");
    }

    #[test]
    fn locked_skips_integration() {
        let mut p: Particle<f32> = Particle::locked_at(Vec2::new(5.0, 5.0), 1.0);
        p.apply_force(Vec2::new(1000.0, 1000.0));
        p.integrate(1.0 / 60.0, 1.0);
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn teleport_resyncs_prev() {
        let mut p: Particle<f32> = Particle::new(Vec2::new(0.0, 0.0), 1.0, 1.0);
        p.teleport(Vec2::new(40.0, -3.0));
        assert_eq!(p.pos, p.prev_pos);
        assert_eq!(p.velocity_raw(), Vec2::zero());
    }

    #[test]
    fn impulse_shifts_prev_by_inv_mass() {
        let mut heavy: Particle<f32> = Particle::new(Vec2::zero(), 4.0, 1.0);
        let mut light: Particle<f32> = Particle::new(Vec2::zero(), 1.0, 1.0);
        heavy.apply_impulse(Vec2::new(4.0, 0.0));
        light.apply_impulse(Vec2::new(4.0, 0.0));
        assert!(heavy.velocity_raw().x < light.velocity_raw().x);
    }
}
