//! Per-source memoized ray picks
//!
//! Callers that need "what is this pointer currently over" read the cache
//! instead of re-querying every frame. There is no expiry: each
//! `update_raycast` overwrites the prior entry unconditionally, misses
//! included.

use slotmap::SecondaryMap;

use crate::intersection::SourceId;
use crate::scene::ObjectKey;

/// Memoized result of the last ray query issued for a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPick {
    /// The object the ray hit, or None on a miss
    pub object: Option<ObjectKey>,
    /// World-space distance to the hit point; 0.0 on a miss
    pub distance: f32,
}

/// Keyed store of the last [`RayPick`] per source
#[derive(Debug, Default)]
pub struct RaycastCache {
    picks: SecondaryMap<SourceId, RayPick>,
}

impl RaycastCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the memoized pick for a source
    pub fn store(&mut self, source: SourceId, pick: RayPick) {
        self.picks.insert(source, pick);
    }

    /// The raw memoized pick, if one was ever stored
    pub fn get(&self, source: SourceId) -> Option<&RayPick> {
        self.picks.get(source)
    }

    /// The cached object and distance, or `(None, 0.0)` when the source
    /// was never queried
    pub fn get_first_object(&self, source: SourceId) -> (Option<ObjectKey>, f32) {
        self.picks
            .get(source)
            .map_or((None, 0.0), |pick| (pick.object, pick.distance))
    }

    /// Drop the entry for a removed source
    pub fn remove(&mut self, source: SourceId) {
        self.picks.remove(source);
    }

    /// Number of memoized picks
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn unknown_source_reads_none_and_zero() {
        let mut sources: SlotMap<SourceId, ()> = SlotMap::with_key();
        let id = sources.insert(());

        let cache = RaycastCache::new();
        assert_eq!(cache.get_first_object(id), (None, 0.0));
    }

    #[test]
    fn store_overwrites_prior_pick() {
        let mut sources: SlotMap<SourceId, ()> = SlotMap::with_key();
        let id = sources.insert(());
        let mut objects: SlotMap<ObjectKey, ()> = SlotMap::with_key();
        let key = objects.insert(());

        let mut cache = RaycastCache::new();
        cache.store(
            id,
            RayPick {
                object: Some(key),
                distance: 4.0,
            },
        );
        assert_eq!(cache.get_first_object(id), (Some(key), 4.0));

        // A miss replaces the hit, it does not preserve it
        cache.store(
            id,
            RayPick {
                object: None,
                distance: 0.0,
            },
        );
        assert_eq!(cache.get_first_object(id), (None, 0.0));
    }
}
