//! # intersect3d
//!
//! A spatial intersection engine for 3D editing tools.
//!
//! The crate tracks a set of moving probe volumes ("sources", e.g. a
//! controller-attached collider or a pointer ray origin) against a dynamic
//! set of scene geometry. Each frame it runs broad-phase culling through a
//! spatial index, narrow-phase exact geometry tests against the surviving
//! candidates, and maintains a per-source hit-state table that drives
//! enter/stay/exit transition events. On-demand ray picks run the same
//! two-phase pipeline against an explicit ray, with per-source memoization
//! of the last result.
//!
//! ## Architecture
//!
//! - [`spatial`] - Broad phase: the [`spatial::SpatialIndex`] trait and a
//!   uniform-grid [`spatial::SpatialHash`] implementation
//! - [`collision`] - Narrow phase: mesh/sphere/triangle primitives and the
//!   reusable [`collision::CollisionProbe`]
//! - [`scene`] - Tracked-object registry, bounds, and the injected
//!   [`scene::LockQuery`] capability
//! - [`intersection`] - The engine: per-frame tick, hit-state table,
//!   transition events, and the raycast cache
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use intersect3d::prelude::*;
//!
//! let config = EngineConfig::default();
//! let mut engine = IntersectionEngine::new(config.clone(), Box::new(NoLocks));
//! engine.install_index(Box::new(SpatialHash::new(config.cell_size)));
//!
//! let mut scene = SceneRegistry::new();
//! let cube = TrackedObject::new(
//!     CollisionMeshTemplate::cube(0.5),
//!     Transform::from_position(Vec3::new(0.0, 0.0, 3.0)),
//! );
//! let bounds = cube.bounds;
//! let key = scene.add(cube);
//! engine.track(key, bounds);
//!
//! let probe = IntersectionSource::new(
//!     CollisionShape::sphere(0.25),
//!     Transform::from_position(Vec3::new(0.0, 0.0, 2.6)),
//! );
//! let source = engine.add_source(probe);
//!
//! // Once per frame, driven by the host's update loop.
//! for event in engine.tick(&scene) {
//!     println!("{event:?}");
//! }
//! assert_eq!(engine.intersected_object(source), Some(key));
//! ```

pub mod collision;
pub mod config;
pub mod foundation;
pub mod intersection;
pub mod scene;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        collision::{CollisionMeshTemplate, CollisionProbe, CollisionShape, Ray},
        config::{Config, ConfigError, EngineConfig},
        foundation::math::{Transform, Vec3},
        intersection::{
            IntersectionEngine, IntersectionEvent, IntersectionSource, RayPick, RaycastHit,
            SourceId,
        },
        scene::{Aabb, LockQuery, NoLocks, ObjectKey, SceneRegistry, TrackedObject},
        spatial::{SpatialHash, SpatialIndex},
    };
}
