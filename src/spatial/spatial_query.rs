//! Abstract spatial index interface for broad-phase culling
//!
//! This abstraction allows swapping different spatial partitioning schemes
//! (uniform grid, octree, BVH, etc.) without changing the intersection
//! engine. Query results carry no ordering guarantee; the engine sorts
//! candidates itself.

use crate::collision::Ray;
use crate::scene::{Aabb, ObjectKey};

/// Bounds-keyed index over the mutable set of tracked objects
///
/// Results are appended to caller-supplied buffers so that per-frame
/// queries reuse scratch storage instead of allocating.
pub trait SpatialIndex: Send + Sync {
    /// Insert an object with its world-space bounds
    fn insert(&mut self, key: ObjectKey, bounds: Aabb);

    /// Remove an object from the index
    fn remove(&mut self, key: ObjectKey);

    /// Update an object's bounds after it moved
    fn update(&mut self, key: ObjectKey, bounds: Aabb);

    /// Append every object whose bounds overlap the query box
    fn query_bounds(&self, bounds: &Aabb, results: &mut Vec<ObjectKey>);

    /// Append every object whose bounds are pierced by the ray within
    /// `max_distance` of its origin
    fn query_ray(&self, ray: &Ray, max_distance: f32, results: &mut Vec<ObjectKey>);

    /// Number of objects currently indexed
    fn object_count(&self) -> usize;

    /// Remove all objects
    fn clear(&mut self);
}
