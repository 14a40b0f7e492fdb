//! Composite bodies: named aggregates of particles and constraints.

use alloc::vec::Vec;

/// Stable index of a particle in the world arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId(pub(crate) usize);

/// Stable index of a constraint in the world arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintId(pub(crate) usize);

/// Opaque handle to a composite body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) usize);

/// Shape tag for bookkeeping and queries. Rendering code matches on this
/// exhaustively; it never drives solver behaviour, since rigidity is emergent
/// from the constraint topology rather than enforced per shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    RopeChain,
    Box,
    Polygon,
    Capsule,
}

/// A named aggregate of world particles and constraints.
///
/// Holds indices only; the world owns the arenas. Topology is fixed at
/// creation; a body is removed as a whole, never edited mid-simulation.
#[derive(Clone, Debug)]
pub struct CompositeBody {
    pub kind: ShapeKind,
    pub particles: Vec<ParticleId>,
    pub constraints: Vec<ConstraintId>,
}

impl CompositeBody {
    pub fn new(kind: ShapeKind, particles: Vec<ParticleId>, constraints: Vec<ConstraintId>) -> Self {
        CompositeBody { kind, particles, constraints }
    }
}
