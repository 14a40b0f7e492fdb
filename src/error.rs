//! Error types for world construction and queries.

use core::fmt;

/// Errors surfaced by world construction, body factories, and queries.
///
/// Two families: configuration errors reject bad parameters up front (the
/// whole simulation depends on them, nothing can be recovered later), and
/// invalid-handle errors flag caller bugs on the query/force surface.
/// Degenerate geometry during solving is deliberately NOT an error; it is a
/// routine numerical edge case handled as a no-op inside the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// Solver iteration count must be at least 1.
    InvalidIterations,
    /// Fixed timestep must be positive and finite.
    InvalidTimeStep,
    /// Damping must be in [0, 1].
    InvalidDamping,
    /// World bounds must have positive, finite extent.
    DegenerateBounds,
    /// Per-call sub-step cap must be at least 1.
    InvalidSubStepCap,
    /// Stiffness must be in [0, 1].
    InvalidStiffness,
    /// Mass must be positive and finite.
    InvalidMass,
    /// Segment length must be positive.
    InvalidSegmentLength,
    /// A rope needs at least 2 particles.
    InsufficientParticles,
    /// A polygon needs at least 3 vertices.
    InsufficientVertices,
    /// A capsule needs at least 1 segment.
    InsufficientSegments,
    /// Box width/height (or capsule radius) must be positive.
    InvalidDimensions,
    /// Particle id is out of bounds or refers to a removed particle.
    InvalidParticle { index: usize, count: usize },
    /// Constraint id is out of bounds or refers to a removed constraint.
    InvalidConstraint { index: usize, count: usize },
    /// Body handle is out of bounds or refers to a removed body.
    InvalidBody { index: usize, count: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidIterations => write!(f, "solver iterations must be at least 1"),
            PhysicsError::InvalidTimeStep => write!(f, "fixed timestep must be positive and finite"),
            PhysicsError::InvalidDamping => write!(f, "damping must be in [0, 1]"),
            PhysicsError::DegenerateBounds => write!(f, "world bounds must have positive extent"),
            PhysicsError::InvalidSubStepCap => write!(f, "sub-step cap must be at least 1"),
            PhysicsError::InvalidStiffness => write!(f, "stiffness must be in [0, 1]"),
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidSegmentLength => write!(f, "segment length must be positive"),
            PhysicsError::InsufficientParticles => write!(f, "rope needs at least 2 particles"),
            PhysicsError::InsufficientVertices => write!(f, "polygon needs at least 3 vertices"),
            PhysicsError::InsufficientSegments => write!(f, "capsule needs at least 1 segment"),
            PhysicsError::InvalidDimensions => write!(f, "shape dimensions must be positive"),
            PhysicsError::InvalidParticle { index, count } => {
                write!(f, "particle id {} invalid (arena size: {})", index, count)
            }
            PhysicsError::InvalidConstraint { index, count } => {
                write!(f, "constraint id {} invalid (arena size: {})", index, count)
            }
            PhysicsError::InvalidBody { index, count } => {
                write!(f, "body handle {} invalid (arena size: {})", index, count)
            }
        }
    }
}
