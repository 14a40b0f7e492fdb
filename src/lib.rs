//! Constraint-based 2D particle physics for games.
//!
//! `wobble` provides position-based Verlet dynamics with iterative
//! distance-constraint relaxation and positional collision response.
//! Designed for game use: ropes, soft "rigid" boxes, polygon blobs,
//! capsule limbs, and simple rag-doll assemblies.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity, no separate velocity field
//! - **Constraint relaxation**: Gauss-Seidel distance solving, stiffness-aware
//! - **Composite bodies**: rope, box, polygon, and capsule factories returning
//!   opaque handles over a flat particle arena
//! - **Fixed-timestep accumulator**: frame-rate independent, deterministic,
//!   with a sub-step cap that drops (and reports) time after stalls
//! - **Positional collisions**: particle-particle and particle-segment
//! - **Observable**: monitor stepping via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod body;
pub mod collision;
pub mod world;
pub mod config;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec2, Rect};
pub use particle::Particle;
pub use constraint::DistanceConstraint;
pub use body::{BodyHandle, CompositeBody, ConstraintId, ParticleId, ShapeKind};
pub use world::World;
pub use config::WorldConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
