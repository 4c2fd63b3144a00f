//! Broad-phase spatial indexing
//!
//! Coarse bounds-only culling that cheaply discards non-candidates before
//! the narrow phase pays for exact geometry tests. The [`SpatialIndex`]
//! trait keeps the partitioning scheme pluggable; [`SpatialHash`] is the
//! default uniform-grid implementation.

pub mod spatial_hash;
pub mod spatial_query;

pub use spatial_hash::SpatialHash;
pub use spatial_query::SpatialIndex;
