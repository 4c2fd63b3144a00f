//! The intersection engine
//!
//! Owns the set of registered probe volumes, runs the per-frame
//! broad-phase + narrow-phase pipeline, maintains the hit-state table with
//! its enter/stay/exit transitions, and answers on-demand ray picks.

pub mod engine;
pub mod events;
pub mod raycast_cache;
pub mod source;

pub use engine::{IntersectionEngine, RaycastHit};
pub use events::IntersectionEvent;
pub use raycast_cache::{RayPick, RaycastCache};
pub use source::{IntersectionSource, SourceId};
