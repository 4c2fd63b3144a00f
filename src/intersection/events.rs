//! Hit-state transition events

use crate::intersection::SourceId;
use crate::scene::ObjectKey;

/// Transition emitted by a tick when a source's current object changes
///
/// Events are ordered within a tick: when a source switches objects, the
/// `Exit` for the old object precedes the `Enter` for the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionEvent {
    /// The source started intersecting an object it was not in last tick
    Enter {
        /// The probe that moved
        source: SourceId,
        /// The newly intersected object
        object: ObjectKey,
    },
    /// The source moved but still intersects the same object
    Stay {
        /// The probe that moved
        source: SourceId,
        /// The object still intersected
        object: ObjectKey,
    },
    /// The source stopped intersecting its current object
    Exit {
        /// The probe that moved (or went inactive)
        source: SourceId,
        /// The object no longer intersected
        object: ObjectKey,
    },
}
