//! Narrow-phase geometry testing
//!
//! The broad phase (see [`crate::spatial`]) only compares axis-aligned
//! bounds; everything here tests true object shape.
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (rays, spheres, triangles)
//! - [`mesh`] - Triangle-mesh collision geometry, synthesized from render
//!   meshes for objects with no physical representation of their own
//! - [`shape`] - Model-space shapes transformed to world space on demand
//! - [`probe`] - The single reusable narrow-phase tester
//!
//! # Key Types
//!
//! - [`CollisionShape`] - Model-space shape attached to a probe volume
//! - [`CollisionProbe`] - Reconfigurable tester shared across candidates
//! - [`Ray`], [`BoundingSphere`], [`Triangle`] - Primitive geometric types

pub mod mesh;
pub mod primitives;
pub mod probe;
pub mod shape;

pub use mesh::{CollisionMeshTemplate, WorldSpaceCollisionMesh};
pub use primitives::{BoundingSphere, Ray, Triangle};
pub use probe::CollisionProbe;
pub use shape::{CollisionShape, WorldSpaceShape};
