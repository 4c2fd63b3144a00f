//! Core intersection engine
//!
//! Two-phase pipeline run once per frame by the host's update callback:
//! broad-phase culling through the installed [`SpatialIndex`], then
//! narrow-phase exact tests against distance-sorted candidates. The engine
//! keeps one current object per source in its hit-state table and emits
//! [`IntersectionEvent`]s when that mapping changes.
//!
//! Failure policy is silent no-ops: an engine with no index installed
//! skips all work (`ready` is false), unknown sources read as "no result",
//! and candidates destroyed between broad and narrow phase are dropped.
//! A missed frame self-heals on the next motion event, so there is nothing
//! useful to report to the per-frame caller.

use std::collections::HashSet;

use slotmap::{SecondaryMap, SlotMap};

use crate::collision::{CollisionProbe, Ray};
use crate::config::EngineConfig;
use crate::foundation::math::{Transform, Vec3};
use crate::intersection::events::IntersectionEvent;
use crate::intersection::raycast_cache::{RayPick, RaycastCache};
use crate::intersection::source::{IntersectionSource, SourceId};
use crate::scene::{Aabb, LockQuery, ObjectKey, SceneRegistry};
use crate::spatial::SpatialIndex;

/// Result of an exact ray query
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The object that was hit
    pub object: ObjectKey,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The surface normal at the intersection point (world space)
    pub normal: Vec3,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
}

/// Registered source plus the engine-owned movement bookkeeping
#[derive(Debug)]
struct SourceSlot {
    source: IntersectionSource,
    /// World bounds observed on the last processed tick. A source whose
    /// bounds match is considered unmoved and is skipped.
    last_bounds: Option<Aabb>,
}

/// Broad-phase survivor tagged with its center-to-center distance
#[derive(Debug, Clone, Copy)]
struct SortedCandidate {
    key: ObjectKey,
    distance: f32,
}

/// Spatial intersection engine
///
/// See the [module documentation](self) for the per-frame pipeline.
pub struct IntersectionEngine {
    config: EngineConfig,
    lock_query: Box<dyn LockQuery>,
    spatial: Option<Box<dyn SpatialIndex>>,

    sources: SlotMap<SourceId, SourceSlot>,
    /// Registration order; ticks process sources in this order
    order: Vec<SourceId>,
    /// Hit-state table: at most one current object per source
    hits: SecondaryMap<SourceId, ObjectKey>,
    picks: RaycastCache,
    probe: CollisionProbe,

    // Per-frame scratch, reused to avoid reallocation. Cleared at the
    // start of each use; carries no state between frames.
    broad: Vec<ObjectKey>,
    sorted: Vec<SortedCandidate>,
    events: Vec<IntersectionEvent>,
}

impl IntersectionEngine {
    /// Create an engine with no spatial index installed yet
    ///
    /// The engine is not [`ready`](Self::ready) until
    /// [`install_index`](Self::install_index) is called; every tick and
    /// query is a silent no-op before that.
    pub fn new(config: EngineConfig, lock_query: Box<dyn LockQuery>) -> Self {
        Self {
            config,
            lock_query,
            spatial: None,
            sources: SlotMap::with_key(),
            order: Vec::new(),
            hits: SecondaryMap::new(),
            picks: RaycastCache::new(),
            probe: CollisionProbe::new(),
            broad: Vec::new(),
            sorted: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Install the broad-phase index; the engine becomes ready
    pub fn install_index(&mut self, spatial: Box<dyn SpatialIndex>) {
        self.spatial = Some(spatial);
    }

    /// Whether a spatial index has been installed
    ///
    /// Collaborators must check this before issuing queries; while false,
    /// all per-frame work is skipped. This is a valid "not yet
    /// initialized" state, not a fault.
    pub fn ready(&self) -> bool {
        self.spatial.is_some()
    }

    /// Register a probe volume
    ///
    /// Registration invalidates the whole hit-state table, not just the
    /// new source; entries repopulate as sources move on later ticks.
    /// Re-registering an identical source is not an error, the duplicates
    /// simply coexist.
    pub fn add_source(&mut self, source: IntersectionSource) -> SourceId {
        self.hits.clear();
        let id = self.sources.insert(SourceSlot {
            source,
            last_bounds: None,
        });
        self.order.push(id);
        id
    }

    /// Unregister a probe and drop its hit-state and memoized pick
    pub fn remove_source(&mut self, id: SourceId) {
        if self.sources.remove(id).is_some() {
            self.order.retain(|&other| other != id);
            self.hits.remove(id);
            self.picks.remove(id);
        }
    }

    /// Move a registered source; the change is picked up on the next tick
    pub fn set_source_transform(&mut self, id: SourceId, transform: Transform) {
        if let Some(slot) = self.sources.get_mut(id) {
            slot.source.transform = transform;
        }
    }

    /// Toggle a source; an inactive source sheds its hit on the next tick
    pub fn set_source_active(&mut self, id: SourceId, active: bool) {
        if let Some(slot) = self.sources.get_mut(id) {
            slot.source.active = active;
        }
    }

    /// Read access to a registered source
    pub fn source(&self, id: SourceId) -> Option<&IntersectionSource> {
        self.sources.get(id).map(|slot| &slot.source)
    }

    /// Number of registered sources
    pub fn source_count(&self) -> usize {
        self.order.len()
    }

    /// Mirror an external object into the broad-phase index
    pub fn track(&mut self, key: ObjectKey, bounds: Aabb) {
        if let Some(spatial) = &mut self.spatial {
            spatial.insert(key, bounds);
        }
    }

    /// Refresh an object's indexed bounds after it moved
    pub fn update_bounds(&mut self, key: ObjectKey, bounds: Aabb) {
        if let Some(spatial) = &mut self.spatial {
            spatial.update(key, bounds);
        }
    }

    /// Remove an object from the broad-phase index
    pub fn untrack(&mut self, key: ObjectKey) {
        if let Some(spatial) = &mut self.spatial {
            spatial.remove(key);
        }
    }

    /// Number of objects in the broad-phase index
    pub fn object_count(&self) -> usize {
        self.spatial.as_ref().map_or(0, |s| s.object_count())
    }

    /// The object a source currently intersects
    ///
    /// O(1) lookup with no side effects; None for unknown sources or
    /// sources with no current hit.
    pub fn intersected_object(&self, id: SourceId) -> Option<ObjectKey> {
        self.hits.get(id).copied()
    }

    /// Number of sources with a current hit
    pub fn intersected_object_count(&self) -> usize {
        self.hits.len()
    }

    /// Run one frame of intersection testing
    ///
    /// Invoked exactly once per frame by an external scheduler. Returns
    /// the transitions produced this frame, ordered; the slice is valid
    /// until the next call that mutates the engine.
    pub fn tick(&mut self, scene: &SceneRegistry) -> &[IntersectionEvent] {
        self.events.clear();
        let Some(spatial) = &self.spatial else {
            return &self.events;
        };

        for i in 0..self.order.len() {
            let id = self.order[i];
            let Some(slot) = self.sources.get(id) else {
                continue;
            };

            if !slot.source.active {
                if let Some(object) = self.hits.remove(id) {
                    self.events.push(IntersectionEvent::Exit { source: id, object });
                }
                continue;
            }

            let world_shape = slot.source.world_shape();
            let bounds = world_shape.bounds();

            // Unmoved since the last processed tick: prior hit state stands.
            if slot.last_bounds == Some(bounds) {
                continue;
            }

            self.broad.clear();
            spatial.query_bounds(&bounds, &mut self.broad);

            self.sorted.clear();
            let bounds_center = bounds.center();
            for &key in &self.broad {
                // Destroyed between index population and now
                let Some(object) = scene.get(key) else {
                    continue;
                };
                if !object.active {
                    continue;
                }
                if self.lock_query.is_locked(key) {
                    continue;
                }
                // The indexed bounds may be stale; re-check the object's own
                if !object.bounds.intersects(&bounds) {
                    continue;
                }
                self.sorted.push(SortedCandidate {
                    key,
                    distance: (object.bounds.center() - bounds_center).magnitude(),
                });
            }

            // Closer objects are tested first
            self.sorted.sort_by(|a, b| a.distance.total_cmp(&b.distance));

            if self.sorted.len() > self.config.max_tests_per_source {
                log::debug!(
                    "skipping narrow phase for source {id:?}: {} candidates over cap {}",
                    self.sorted.len(),
                    self.config.max_tests_per_source
                );
                if let Some(slot) = self.sources.get_mut(id) {
                    slot.last_bounds = Some(bounds);
                }
                continue;
            }

            let mut found = None;
            for candidate in &self.sorted {
                let Some(object) = scene.get(candidate.key) else {
                    continue;
                };
                self.probe.configure(&object.geometry, &object.transform);
                if self.probe.test_overlap(&world_shape) {
                    // First candidate to pass wins, not the globally
                    // nearest exact hit.
                    found = Some(candidate.key);
                    break;
                }
            }

            match (self.hits.get(id).copied(), found) {
                (None, Some(new)) => {
                    self.hits.insert(id, new);
                    self.events.push(IntersectionEvent::Enter { source: id, object: new });
                }
                (Some(old), Some(new)) if old == new => {
                    self.events.push(IntersectionEvent::Stay { source: id, object: new });
                }
                (Some(old), Some(new)) => {
                    self.hits.insert(id, new);
                    self.events.push(IntersectionEvent::Exit { source: id, object: old });
                    self.events.push(IntersectionEvent::Enter { source: id, object: new });
                }
                (Some(old), None) => {
                    self.hits.remove(id);
                    self.events.push(IntersectionEvent::Exit { source: id, object: old });
                }
                (None, None) => {}
            }

            if let Some(slot) = self.sources.get_mut(id) {
                slot.last_bounds = Some(bounds);
            }
        }

        &self.events
    }

    /// Exact ray query against the tracked scene
    ///
    /// Broad phase over the ray, then narrow-phase tests every surviving
    /// candidate with no early exit, keeping the globally nearest hit by
    /// world-space distance from the ray origin. Objects in `ignore` are
    /// skipped before any narrow-phase cost is paid.
    pub fn raycast(
        &mut self,
        ray: &Ray,
        max_distance: f32,
        ignore: Option<&HashSet<ObjectKey>>,
        scene: &SceneRegistry,
    ) -> Option<RaycastHit> {
        let spatial = self.spatial.as_ref()?;

        self.broad.clear();
        spatial.query_ray(ray, max_distance, &mut self.broad);

        let mut best: Option<RaycastHit> = None;
        for &key in &self.broad {
            if ignore.is_some_and(|set| set.contains(&key)) {
                continue;
            }
            let Some(object) = scene.get(key) else {
                continue;
            };

            self.probe.configure(&object.geometry, &object.transform);
            if let Some((distance, point, normal)) = self.probe.test_ray(ray, max_distance) {
                if best.as_ref().map_or(true, |b| distance < b.distance) {
                    best = Some(RaycastHit {
                        object: key,
                        point,
                        normal,
                        distance,
                    });
                }
            }
        }
        best
    }

    /// Re-run the memoized ray pick for a source
    ///
    /// Builds a ray from the source's position and forward direction, runs
    /// [`raycast`](Self::raycast), and overwrites the cached [`RayPick`]
    /// unconditionally: a miss stores `(None, 0.0)` rather than keeping
    /// the last hit.
    pub fn update_raycast(&mut self, id: SourceId, max_distance: f32, scene: &SceneRegistry) {
        let Some(slot) = self.sources.get(id) else {
            return;
        };
        let ray = Ray::new(slot.source.transform.position, slot.source.transform.forward());

        let hit = self.raycast(&ray, max_distance, None, scene);
        self.picks.store(
            id,
            RayPick {
                object: hit.map(|h| h.object),
                distance: hit.map_or(0.0, |h| h.distance),
            },
        );
    }

    /// The cached pick for a source: `(object, distance)`, or
    /// `(None, 0.0)` if never queried
    pub fn get_first_object(&self, id: SourceId) -> (Option<ObjectKey>, f32) {
        self.picks.get_first_object(id)
    }

    /// The raycast memo, for callers that want the raw [`RayPick`]
    pub fn raycast_cache(&self) -> &RaycastCache {
        &self.picks
    }
}
