//! Tracked-object registry and external capability traits

use slotmap::{new_key_type, SlotMap};

use super::bounds::Aabb;
use crate::collision::CollisionMeshTemplate;
use crate::foundation::math::Transform;

new_key_type! {
    /// Generational key identifying a tracked object
    ///
    /// Keys stay unique across removals, so a key whose slot has been
    /// vacated reliably reads as destroyed.
    pub struct ObjectKey;
}

/// Scene geometry eligible for intersection
#[derive(Debug, Clone)]
pub struct TrackedObject {
    /// World-space bounds, refreshed by the owner when the object moves
    pub bounds: Aabb,
    /// Exact geometry, synthesized from the object's render mesh
    pub geometry: CollisionMeshTemplate,
    /// World transform of the geometry
    pub transform: Transform,
    /// Inactive objects are skipped during candidate filtering
    pub active: bool,
}

impl TrackedObject {
    /// Create a tracked object, deriving world bounds from the geometry
    /// and transform
    pub fn new(geometry: CollisionMeshTemplate, transform: Transform) -> Self {
        let bounds = geometry.world_bounds(&transform.matrix());
        Self {
            bounds,
            geometry,
            transform,
            active: true,
        }
    }

    /// Recompute world bounds after the transform changed
    pub fn refresh_bounds(&mut self) {
        self.bounds = self.geometry.world_bounds(&self.transform.matrix());
    }
}

/// Store of all tracked objects, keyed by [`ObjectKey`]
#[derive(Debug, Default)]
pub struct SceneRegistry {
    objects: SlotMap<ObjectKey, TrackedObject>,
}

impl SceneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its key
    pub fn add(&mut self, object: TrackedObject) -> ObjectKey {
        self.objects.insert(object)
    }

    /// Remove (destroy) an object
    pub fn remove(&mut self, key: ObjectKey) -> Option<TrackedObject> {
        self.objects.remove(key)
    }

    /// Look up an object; None when the key was destroyed
    pub fn get(&self, key: ObjectKey) -> Option<&TrackedObject> {
        self.objects.get(key)
    }

    /// Mutable lookup
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut TrackedObject> {
        self.objects.get_mut(key)
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Capability for asking whether an object is locked against interaction
///
/// Locking policy is owned by an external service; the engine only
/// consults the predicate during candidate filtering.
pub trait LockQuery: Send + Sync {
    /// Returns true when the object must be skipped
    fn is_locked(&self, key: ObjectKey) -> bool;
}

/// Default lock query: nothing is ever locked
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocks;

impl LockQuery for NoLocks {
    fn is_locked(&self, _key: ObjectKey) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn removed_key_reads_as_destroyed() {
        let mut scene = SceneRegistry::new();
        let key = scene.add(TrackedObject::new(
            CollisionMeshTemplate::cube(0.5),
            Transform::identity(),
        ));
        assert!(scene.get(key).is_some());

        scene.remove(key);
        assert!(scene.get(key).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn refresh_bounds_tracks_movement() {
        let mut object = TrackedObject::new(CollisionMeshTemplate::cube(0.5), Transform::identity());
        object.transform.position = Vec3::new(10.0, 0.0, 0.0);
        object.refresh_bounds();
        assert!((object.bounds.center().x - 10.0).abs() < 1e-5);
    }
}
