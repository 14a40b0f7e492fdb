//! The physics world: particle/constraint arenas, fixed-timestep stepping,
//! composite-body factories, and the external force/query surface.

use alloc::vec::Vec;

use crate::body::{BodyHandle, CompositeBody, ConstraintId, ParticleId, ShapeKind};
use crate::collision;
use crate::config::WorldConfig;
use crate::constraint::DistanceConstraint;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::vec::Vec2;

/// A self-contained 2D particle world.
///
/// Owns all particles and constraints in flat arenas; composite bodies and
/// callers hold stable indices into them. Single-threaded: a world is
/// exclusively owned by its game loop, and force/drag calls must not be
/// interleaved with an in-progress `step`.
pub struct World<F: Float, O: StepObserver = NoOpStepObserver> {
    config: WorldConfig<F>,
    particles: Vec<Particle<F>>,
    constraints: Vec<Option<DistanceConstraint<F>>>,
    bodies: Vec<Option<CompositeBody>>,
    accumulator: F,
    dropped_sub_steps: u64,
    observer: O,
}

impl<F: Float> World<F, NoOpStepObserver> {
    /// Create a world with no observer. Fails fast on invalid configuration.
    pub fn new(config: WorldConfig<F>) -> Result<Self, PhysicsError> {
        Self::with_observer(config, NoOpStepObserver)
    }
}

impl<F: Float, O: StepObserver> World<F, O> {
    /// Create a world with an injected step observer.
    pub fn with_observer(config: WorldConfig<F>, observer: O) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(World {
            config,
            particles: Vec::new(),
            constraints: Vec::new(),
            bodies: Vec::new(),
            accumulator: F::zero(),
            dropped_sub_steps: 0,
            observer,
        })
    }

    // ------------------------------------------------------------------
    // Arena primitives
    // ------------------------------------------------------------------

    /// Add a free particle (loose projectile, debris, drag handle).
    pub fn add_particle(&mut self, pos: Vec2<F>, mass: F, radius: F) -> Result<ParticleId, PhysicsError> {
        if !(mass.is_finite() && mass > F::zero()) {
            return Err(PhysicsError::InvalidMass);
        }
        if !(radius.is_finite() && radius > F::zero()) {
            return Err(PhysicsError::InvalidDimensions);
        }
        Ok(self.push_particle(Particle::new(pos, mass, radius)))
    }

    /// Add a distance constraint between two existing particles. The rest
    /// length is measured from their current positions.
    pub fn add_constraint(
        &mut self,
        a: ParticleId,
        b: ParticleId,
        stiffness: F,
    ) -> Result<ConstraintId, PhysicsError> {
        check_stiffness(stiffness)?;
        let a = self.check_particle(a)?;
        let b = self.check_particle(b)?;
        let constraint = DistanceConstraint::from_particles(a, b, &self.particles, stiffness);
        Ok(self.push_constraint(constraint))
    }

    fn push_particle(&mut self, particle: Particle<F>) -> ParticleId {
        let idx = self.particles.len();
        self.particles.push(particle);
        ParticleId(idx)
    }

    fn push_constraint(&mut self, constraint: DistanceConstraint<F>) -> ConstraintId {
        let idx = self.constraints.len();
        self.constraints.push(Some(constraint));
        ConstraintId(idx)
    }

    fn push_body(&mut self, body: CompositeBody) -> BodyHandle {
        let idx = self.bodies.len();
        self.bodies.push(Some(body));
        BodyHandle(idx)
    }

    // ------------------------------------------------------------------
    // Composite-body factories
    // ------------------------------------------------------------------

    /// A rope: `count` particles spaced `segment_length` apart along +x from
    /// `start`, chained by `count - 1` constraints. The first particle is
    /// locked as an anchor by convention; unlock it with `set_locked`.
    pub fn add_rope(
        &mut self,
        start: Vec2<F>,
        segment_length: F,
        count: usize,
        stiffness: F,
    ) -> Result<BodyHandle, PhysicsError> {
        if count < 2 {
            return Err(PhysicsError::InsufficientParticles);
        }
        if !(segment_length.is_finite() && segment_length > F::zero()) {
            return Err(PhysicsError::InvalidSegmentLength);
        }
        check_stiffness(stiffness)?;

        let radius = self.config.segment_radius;
        let mut particle_ids = Vec::with_capacity(count);
        for i in 0..count {
            let pos = Vec2::new(start.x + segment_length * F::from_usize(i), start.y);
            let particle = if i == 0 {
                Particle::locked_at(pos, radius)
            } else {
                Particle::new(pos, F::one(), radius)
            };
            particle_ids.push(self.push_particle(particle));
        }

        let mut constraint_ids = Vec::with_capacity(count - 1);
        for window in particle_ids.windows(2) {
            let c = DistanceConstraint::new(window[0].0, window[1].0, segment_length, stiffness);
            constraint_ids.push(self.push_constraint(c));
        }

        Ok(self.push_body(CompositeBody::new(ShapeKind::RopeChain, particle_ids, constraint_ids)))
    }

    /// A "rigid" box: 4 corner particles, 4 edge constraints, 2 diagonals to
    /// resist shear. Rigidity is emergent from relaxation, not enforced;
    /// large forces visibly deform the box. That softness is a design
    /// trade-off of the constraint formulation, not a defect.
    pub fn add_box(
        &mut self,
        pos: Vec2<F>,
        width: F,
        height: F,
        stiffness: F,
    ) -> Result<BodyHandle, PhysicsError> {
        if !(width.is_finite() && width > F::zero() && height.is_finite() && height > F::zero()) {
            return Err(PhysicsError::InvalidDimensions);
        }
        check_stiffness(stiffness)?;

        let hw = width * F::half();
        let hh = height * F::half();
        let corners = [
            Vec2::new(pos.x - hw, pos.y - hh),
            Vec2::new(pos.x + hw, pos.y - hh),
            Vec2::new(pos.x + hw, pos.y + hh),
            Vec2::new(pos.x - hw, pos.y + hh),
        ];

        let radius = self.config.segment_radius;
        let mut particle_ids = Vec::with_capacity(4);
        for corner in corners {
            particle_ids.push(self.push_particle(Particle::new(corner, F::one(), radius)));
        }

        let mut constraint_ids = Vec::with_capacity(6);
        // Edges
        for i in 0..4 {
            let j = (i + 1) % 4;
            let c = DistanceConstraint::from_particles(
                particle_ids[i].0,
                particle_ids[j].0,
                &self.particles,
                stiffness,
            );
            constraint_ids.push(self.push_constraint(c));
        }
        // Diagonals against shear
        for (i, j) in [(0, 2), (1, 3)] {
            let c = DistanceConstraint::from_particles(
                particle_ids[i].0,
                particle_ids[j].0,
                &self.particles,
                stiffness,
            );
            constraint_ids.push(self.push_constraint(c));
        }

        Ok(self.push_body(CompositeBody::new(ShapeKind::Box, particle_ids, constraint_ids)))
    }

    /// A closed polygon: perimeter constraints, plus opposite-vertex cross
    /// braces at half stiffness when there are enough vertices for them.
    pub fn add_polygon(
        &mut self,
        vertices: &[Vec2<F>],
        stiffness: F,
    ) -> Result<BodyHandle, PhysicsError> {
        if vertices.len() < 3 {
            return Err(PhysicsError::InsufficientVertices);
        }
        check_stiffness(stiffness)?;

        let n = vertices.len();
        let radius = self.config.segment_radius;
        let mut particle_ids = Vec::with_capacity(n);
        for &v in vertices {
            particle_ids.push(self.push_particle(Particle::new(v, F::one(), radius)));
        }

        let mut constraint_ids = Vec::new();
        for i in 0..n {
            let j = (i + 1) % n;
            let c = DistanceConstraint::from_particles(
                particle_ids[i].0,
                particle_ids[j].0,
                &self.particles,
                stiffness,
            );
            constraint_ids.push(self.push_constraint(c));
        }

        // Cross braces for structural integrity
        if n >= 4 {
            let half = n / 2;
            for i in 0..half {
                let j = i + half;
                let c = DistanceConstraint::from_particles(
                    particle_ids[i].0,
                    particle_ids[j].0,
                    &self.particles,
                    stiffness * F::half(),
                );
                constraint_ids.push(self.push_constraint(c));
            }
        }

        Ok(self.push_body(CompositeBody::new(ShapeKind::Polygon, particle_ids, constraint_ids)))
    }

    /// A capsule: `segments + 1` particles of the given collision radius along
    /// p0 -> p1, chained constraints plus skip-one bend constraints at half
    /// stiffness to keep the chain from folding.
    pub fn add_capsule(
        &mut self,
        p0: Vec2<F>,
        p1: Vec2<F>,
        radius: F,
        segments: usize,
    ) -> Result<BodyHandle, PhysicsError> {
        if segments < 1 {
            return Err(PhysicsError::InsufficientSegments);
        }
        if !(radius.is_finite() && radius > F::zero()) {
            return Err(PhysicsError::InvalidDimensions);
        }
        if p0.distance_sq(p1).is_near_zero(F::from_f32(1e-10)) {
            return Err(PhysicsError::InvalidSegmentLength);
        }

        let stiffness = F::one();
        let n = segments + 1;
        let mut particle_ids = Vec::with_capacity(n);
        for i in 0..n {
            let t = F::from_usize(i) / F::from_usize(segments);
            let pos = p0.lerp(p1, t);
            particle_ids.push(self.push_particle(Particle::new(pos, F::one(), radius)));
        }

        let mut constraint_ids = Vec::new();
        for i in 0..segments {
            let c = DistanceConstraint::from_particles(
                particle_ids[i].0,
                particle_ids[i + 1].0,
                &self.particles,
                stiffness,
            );
            constraint_ids.push(self.push_constraint(c));
        }
        for i in 0..segments.saturating_sub(1) {
            let c = DistanceConstraint::from_particles(
                particle_ids[i].0,
                particle_ids[i + 2].0,
                &self.particles,
                stiffness * F::half(),
            );
            constraint_ids.push(self.push_constraint(c));
        }

        Ok(self.push_body(CompositeBody::new(ShapeKind::Capsule, particle_ids, constraint_ids)))
    }

    /// Remove a body: its constraints and particles are tombstoned so every
    /// outstanding index stays stable. Queries on them fail from now on.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        let idx = self.check_body(handle)?;
        if let Some(body) = self.bodies[idx].take() {
            for ConstraintId(c) in &body.constraints {
                self.constraints[*c] = None;
            }
            for ParticleId(p) in &body.particles {
                self.particles[*p].alive = false;
            }
        }
        // Drop any remaining constraint that referenced the removed particles
        // (e.g. manual cross-body links added via add_constraint).
        for slot in self.constraints.iter_mut() {
            if let Some(c) = slot {
                if !self.particles[c.a].alive || !self.particles[c.b].alive {
                    *slot = None;
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Advance the simulation by `dt` of wall time.
    ///
    /// Accumulates `dt` and consumes whole fixed sub-steps, at most
    /// `max_sub_steps` per call. Whole sub-steps still pending past the cap
    /// are dropped from the accumulator and counted; catching up late would
    /// spiral after a stall, so dropped time is reported instead.
    pub fn step(&mut self, dt: F) {
        if dt > F::zero() && dt.is_finite() {
            self.accumulator = self.accumulator + dt;
        }

        let fixed_dt = self.config.fixed_dt;
        let mut sub_steps: u32 = 0;
        while self.accumulator >= fixed_dt && sub_steps < self.config.max_sub_steps {
            self.sub_step();
            self.accumulator = self.accumulator - fixed_dt;
            sub_steps += 1;
        }

        let mut dropped: u32 = 0;
        while self.accumulator >= fixed_dt {
            self.accumulator = self.accumulator - fixed_dt;
            dropped += 1;
        }
        if dropped > 0 {
            self.dropped_sub_steps += u64::from(dropped);
            self.observer.on_time_dropped(dropped);
        }

        self.observer.on_step_complete(sub_steps);
    }

    /// One fixed sub-step: gravity, integration, then interleaved relaxation
    /// and collision rounds, then the boundary clamp.
    fn sub_step(&mut self) {
        let dt = self.config.fixed_dt;
        let gravity = self.config.gravity;
        let damping = self.config.damping;

        for p in self.particles.iter_mut() {
            if p.alive {
                p.apply_acceleration(gravity);
            }
        }
        for p in self.particles.iter_mut() {
            if p.alive {
                p.integrate(dt, damping);
            }
        }
        self.observer.on_integrate();

        for i in 0..self.config.iterations {
            for c in self.constraints.iter().flatten() {
                c.satisfy(&mut self.particles);
            }
            self.observer.on_constraint_iteration(i);

            Self::collision_pass(&self.constraints, &mut self.particles, self.config.segment_radius);
            self.observer.on_collision_pass(i);
        }

        self.clamp_to_bounds();
        self.observer.on_sub_step_complete();
    }

    /// One collision pass: every live particle against every constraint
    /// segment, then every live pair. O(particles x constraints) plus
    /// O(particles^2); no broad phase in this core. Response is purely
    /// positional; the next integration turns corrections into velocity.
    fn collision_pass(
        constraints: &[Option<DistanceConstraint<F>>],
        particles: &mut [Particle<F>],
        segment_radius: F,
    ) {
        let n = particles.len();

        for c in constraints.iter().flatten() {
            for p in 0..n {
                if !particles[p].alive {
                    continue;
                }
                collision::separate_particle_from_segment(particles, p, c.a, c.b, segment_radius);
            }
        }

        for i in 0..n {
            if !particles[i].alive {
                continue;
            }
            for j in (i + 1)..n {
                if !particles[j].alive {
                    continue;
                }
                collision::separate_particles(particles, i, j);
            }
        }
    }

    /// Clamp unlocked particles into the world bounds. A clamped component's
    /// `prev_pos` is clamped to the same boundary value; leaving it outside
    /// would manufacture a large implicit velocity on the next sub-step.
    fn clamp_to_bounds(&mut self) {
        let b = self.config.bounds;
        for p in self.particles.iter_mut() {
            if !p.alive || p.locked {
                continue;
            }
            if p.pos.x < b.left {
                p.pos.x = b.left;
                p.prev_pos.x = b.left;
            } else if p.pos.x > b.right {
                p.pos.x = b.right;
                p.prev_pos.x = b.right;
            }
            if p.pos.y < b.top {
                p.pos.y = b.top;
                p.prev_pos.y = b.top;
            } else if p.pos.y > b.bottom {
                p.pos.y = b.bottom;
                p.prev_pos.y = b.bottom;
            }
        }
    }

    // ------------------------------------------------------------------
    // External force / drag / pin surface
    // ------------------------------------------------------------------

    /// Apply a one-shot force to a particle, consumed by the next sub-step.
    pub fn apply_force(&mut self, id: ParticleId, force: Vec2<F>) -> Result<(), PhysicsError> {
        let idx = self.check_particle(id)?;
        self.particles[idx].apply_force(force);
        Ok(())
    }

    /// Apply a one-shot force to every particle of a body.
    pub fn apply_body_force(&mut self, handle: BodyHandle, force: Vec2<F>) -> Result<(), PhysicsError> {
        let idx = self.check_body(handle)?;
        if let Some(body) = self.bodies[idx].as_ref() {
            for &ParticleId(p) in &body.particles {
                self.particles[p].apply_force(force);
            }
        }
        Ok(())
    }

    /// Inject velocity directly by shifting the particle's `prev_pos`.
    pub fn apply_impulse(&mut self, id: ParticleId, impulse: Vec2<F>) -> Result<(), PhysicsError> {
        let idx = self.check_particle(id)?;
        self.particles[idx].apply_impulse(impulse);
        Ok(())
    }

    /// Lock or unlock a particle. Locking pins it in place and resyncs its
    /// `prev_pos`; unlocking restores its last mass (or unit mass for
    /// particles created locked).
    pub fn set_locked(&mut self, id: ParticleId, locked: bool) -> Result<(), PhysicsError> {
        let idx = self.check_particle(id)?;
        let p = &mut self.particles[idx];
        if locked {
            p.lock();
        } else {
            let mass = if p.mass.is_near_zero(F::from_f32(1e-10)) {
                F::one()
            } else {
                p.mass
            };
            p.unlock(mass);
        }
        Ok(())
    }

    /// Teleport a particle, resyncing `prev_pos` so no velocity is injected.
    /// This is the mouse-drag primitive: call it every frame on a locked
    /// control particle.
    pub fn drag_to(&mut self, id: ParticleId, pos: Vec2<F>) -> Result<(), PhysicsError> {
        let idx = self.check_particle(id)?;
        self.particles[idx].teleport(pos);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only queries
    // ------------------------------------------------------------------

    pub fn particle_position(&self, id: ParticleId) -> Result<Vec2<F>, PhysicsError> {
        let idx = self.check_particle(id)?;
        Ok(self.particles[idx].pos)
    }

    /// Previous position, for render interpolation between sub-steps.
    pub fn particle_prev_position(&self, id: ParticleId) -> Result<Vec2<F>, PhysicsError> {
        let idx = self.check_particle(id)?;
        Ok(self.particles[idx].prev_pos)
    }

    pub fn is_locked(&self, id: ParticleId) -> Result<bool, PhysicsError> {
        let idx = self.check_particle(id)?;
        Ok(self.particles[idx].locked)
    }

    /// Positions of a body's particles, in creation order.
    pub fn body_positions(&self, handle: BodyHandle) -> Result<Vec<Vec2<F>>, PhysicsError> {
        let body = self.body_ref(handle)?;
        Ok(body.particles.iter().map(|&ParticleId(p)| self.particles[p].pos).collect())
    }

    pub fn body_particles(&self, handle: BodyHandle) -> Result<&[ParticleId], PhysicsError> {
        Ok(&self.body_ref(handle)?.particles)
    }

    /// Ids of a body's constraints, for rendering its segments via
    /// `constraint_endpoints`.
    pub fn body_constraints(&self, handle: BodyHandle) -> Result<&[ConstraintId], PhysicsError> {
        Ok(&self.body_ref(handle)?.constraints)
    }

    pub fn body_kind(&self, handle: BodyHandle) -> Result<ShapeKind, PhysicsError> {
        Ok(self.body_ref(handle)?.kind)
    }

    /// Endpoint positions of a constraint, for rendering segments.
    pub fn constraint_endpoints(&self, id: ConstraintId) -> Result<(Vec2<F>, Vec2<F>), PhysicsError> {
        let ConstraintId(i) = id;
        let count = self.constraints.len();
        match self.constraints.get(i) {
            Some(Some(c)) => Ok((self.particles[c.a].pos, self.particles[c.b].pos)),
            _ => Err(PhysicsError::InvalidConstraint { index: i, count }),
        }
    }

    /// Live particle count (removed particles excluded).
    pub fn particle_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    /// Live constraint count.
    pub fn constraint_count(&self) -> usize {
        self.constraints.iter().flatten().count()
    }

    /// Live body count.
    pub fn body_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    /// Total sub-steps discarded by the per-call cap since creation.
    pub fn dropped_sub_steps(&self) -> u64 {
        self.dropped_sub_steps
    }

    /// Accumulated time not yet consumed (always less than `fixed_dt` after
    /// a `step` call that stayed under the cap).
    pub fn pending_time(&self) -> F {
        self.accumulator
    }

    pub fn config(&self) -> &WorldConfig<F> {
        &self.config
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // ------------------------------------------------------------------
    // Handle checks
    // ------------------------------------------------------------------

    fn check_particle(&self, id: ParticleId) -> Result<usize, PhysicsError> {
        let ParticleId(i) = id;
        let count = self.particles.len();
        match self.particles.get(i) {
            Some(p) if p.alive => Ok(i),
            _ => Err(PhysicsError::InvalidParticle { index: i, count }),
        }
    }

    fn check_body(&self, handle: BodyHandle) -> Result<usize, PhysicsError> {
        let BodyHandle(i) = handle;
        let count = self.bodies.len();
        match self.bodies.get(i) {
            Some(Some(_)) => Ok(i),
            _ => Err(PhysicsError::InvalidBody { index: i, count }),
        }
    }

    fn body_ref(&self, handle: BodyHandle) -> Result<&CompositeBody, PhysicsError> {
        let BodyHandle(i) = handle;
        let count = self.bodies.len();
        match self.bodies.get(i) {
            Some(Some(body)) => Ok(body),
            _ => Err(PhysicsError::InvalidBody { index: i, count }),
        }
    }
}

fn check_stiffness<F: Float>(stiffness: F) -> Result<(), PhysicsError> {
    if stiffness.is_finite() && stiffness >= F::zero() && stiffness <= F::one() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidStiffness)
    }
}
