//! Scene-side data the engine intersects against
//!
//! Ownership of geometry lives with the host application; the registry
//! holds tracked objects by generational key so that a vacated key reads
//! as "destroyed" to in-flight queries.

pub mod bounds;
pub mod registry;

pub use bounds::Aabb;
pub use registry::{LockQuery, NoLocks, ObjectKey, SceneRegistry, TrackedObject};
