//! World configuration with construction-time validation.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::{Rect, Vec2};

/// Configuration for a physics world.
///
/// # Builder Pattern
/// ```
/// use wobble::config::WorldConfig;
/// use wobble::vec::{Rect, Vec2};
///
/// let config: WorldConfig<f32> = WorldConfig::new(Rect::new(0.0, 0.0, 800.0, 600.0))
///     .with_gravity(Vec2::new(0.0, 500.0))
///     .with_damping(0.99)
///     .with_iterations(8)
///     .with_fixed_dt(1.0 / 60.0);
/// ```
///
/// Validation happens once, at `World::new`; a bad configuration cannot be
/// recovered from mid-simulation, so it is rejected up front.
#[derive(Clone, Debug)]
pub struct WorldConfig<F: Float> {
    /// Gravity acceleration, applied to every unlocked particle each sub-step.
    pub gravity: Vec2<F>,
    /// Implicit-velocity damping factor in [0, 1]. 1.0 = no damping. Default: 0.99.
    pub damping: F,
    /// Constraint relaxation rounds per sub-step. More = stiffer but slower. Default: 8.
    pub iterations: u32,
    /// World bounds every unlocked particle is clamped into.
    pub bounds: Rect<F>,
    /// Fixed sub-step duration consumed from the accumulator. Default: 1/60.
    pub fixed_dt: F,
    /// Most sub-steps a single `step()` call may consume; pending time beyond
    /// this is dropped and counted, never simulated late. Default: 8.
    pub max_sub_steps: u32,
    /// Collision radius of constraint segments (and the default particle
    /// radius the factories use). Default: 2.0.
    pub segment_radius: F,
}

impl<F: Float> WorldConfig<F> {
    /// Create a config with default tuning and the given bounds.
    pub fn new(bounds: Rect<F>) -> Self {
        WorldConfig {
            gravity: Vec2::zero(),
            damping: F::from_f32(0.99),
            iterations: 8,
            bounds,
            fixed_dt: F::from_f32(1.0 / 60.0),
            max_sub_steps: 8,
            segment_radius: F::from_f32(2.0),
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_fixed_dt(mut self, fixed_dt: F) -> Self {
        self.fixed_dt = fixed_dt;
        self
    }

    pub fn with_max_sub_steps(mut self, max_sub_steps: u32) -> Self {
        self.max_sub_steps = max_sub_steps;
        self
    }

    pub fn with_segment_radius(mut self, segment_radius: F) -> Self {
        self.segment_radius = segment_radius;
        self
    }

    /// Reject configurations the simulation cannot run correctly under.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.iterations == 0 {
            return Err(PhysicsError::InvalidIterations);
        }
        if !(self.fixed_dt.is_finite() && self.fixed_dt > F::zero()) {
            return Err(PhysicsError::InvalidTimeStep);
        }
        if !(self.damping.is_finite() && self.damping >= F::zero() && self.damping <= F::one()) {
            return Err(PhysicsError::InvalidDamping);
        }
        if !self.bounds.is_valid() {
            return Err(PhysicsError::DegenerateBounds);
        }
        if self.max_sub_steps == 0 {
            return Err(PhysicsError::InvalidSubStepCap);
        }
        if !(self.segment_radius.is_finite() && self.segment_radius > F::zero()) {
            return Err(PhysicsError::InvalidDimensions);
        }
        Ok(())
    }
}
