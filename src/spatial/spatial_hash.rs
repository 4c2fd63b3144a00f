//! Uniform-grid spatial hash
//!
//! Divides world space into fixed-size cells keyed by integer coordinates.
//! An object is registered in every cell its bounds overlap, so both box
//! queries and ray walks only touch the cells they actually cover. Ray
//! queries traverse cells with the Amanatides-Woo stepping scheme, bounded
//! by the union of all stored bounds so an unbounded max distance cannot
//! walk the grid forever.

use std::collections::{HashMap, HashSet};

use slotmap::SecondaryMap;

use super::spatial_query::SpatialIndex;
use crate::collision::Ray;
use crate::foundation::math::Vec3;
use crate::scene::{Aabb, ObjectKey};

/// Integer cell coordinates
type Cell = (i32, i32, i32);

/// Uniform-grid implementation of [`SpatialIndex`]
#[derive(Debug)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<Cell, Vec<ObjectKey>>,
    bounds: SecondaryMap<ObjectKey, Aabb>,
}

impl SpatialHash {
    /// Create a hash with the given cell edge length (world units)
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cells: HashMap::new(),
            bounds: SecondaryMap::new(),
        }
    }

    fn cell_of(&self, point: Vec3) -> Cell {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
            (point.z / self.cell_size).floor() as i32,
        )
    }

    fn cell_range(&self, bounds: &Aabb) -> (Cell, Cell) {
        (self.cell_of(bounds.min), self.cell_of(bounds.max))
    }

    fn for_each_cell(range: (Cell, Cell), mut f: impl FnMut(Cell)) {
        let ((x0, y0, z0), (x1, y1, z1)) = range;
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    f((x, y, z));
                }
            }
        }
    }

    /// Union of all stored bounds; None when the hash is empty
    fn content_bounds(&self) -> Option<Aabb> {
        let mut merged: Option<Aabb> = None;
        for (_, bounds) in &self.bounds {
            merged = Some(match merged {
                Some(current) => current.merged(bounds),
                None => *bounds,
            });
        }
        merged
    }
}

impl SpatialIndex for SpatialHash {
    fn insert(&mut self, key: ObjectKey, bounds: Aabb) {
        // Re-inserting an existing key is treated as an update
        if self.bounds.contains_key(key) {
            self.remove(key);
        }
        Self::for_each_cell(self.cell_range(&bounds), |cell| {
            self.cells.entry(cell).or_default().push(key);
        });
        self.bounds.insert(key, bounds);
    }

    fn remove(&mut self, key: ObjectKey) {
        let Some(bounds) = self.bounds.remove(key) else {
            return;
        };
        let range = self.cell_range(&bounds);
        Self::for_each_cell(range, |cell| {
            if let Some(keys) = self.cells.get_mut(&cell) {
                keys.retain(|&k| k != key);
                if keys.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        });
    }

    fn update(&mut self, key: ObjectKey, bounds: Aabb) {
        self.remove(key);
        self.insert(key, bounds);
    }

    fn query_bounds(&self, bounds: &Aabb, results: &mut Vec<ObjectKey>) {
        let mut seen = HashSet::new();
        Self::for_each_cell(self.cell_range(bounds), |cell| {
            let Some(keys) = self.cells.get(&cell) else {
                return;
            };
            for &key in keys {
                if !seen.insert(key) {
                    continue;
                }
                if let Some(stored) = self.bounds.get(key) {
                    if stored.intersects(bounds) {
                        results.push(key);
                    }
                }
            }
        });
    }

    fn query_ray(&self, ray: &Ray, max_distance: f32, results: &mut Vec<ObjectKey>) {
        let Some(content) = self.content_bounds() else {
            return;
        };
        let Some((entry, exit)) = content.intersect_ray_span(ray.origin, ray.direction) else {
            return;
        };
        if entry > max_distance {
            return;
        }

        // Walk grid cells from the entry point (Amanatides & Woo). The walk
        // is clamped to the populated region, never to max_distance alone,
        // so callers may pass f32::INFINITY.
        let t_end = exit.min(max_distance) + self.cell_size * 1e-3;
        let start = ray.point_at(entry);
        let (mut x, mut y, mut z) = self.cell_of(start);

        let step = |d: f32| if d > 0.0 { 1 } else { -1 };
        let (sx, sy, sz) = (
            step(ray.direction.x),
            step(ray.direction.y),
            step(ray.direction.z),
        );

        let delta = |d: f32| {
            if d != 0.0 {
                (self.cell_size / d).abs()
            } else {
                f32::INFINITY
            }
        };
        let (dx, dy, dz) = (
            delta(ray.direction.x),
            delta(ray.direction.y),
            delta(ray.direction.z),
        );

        // Absolute ray distance at which the walk crosses the next cell
        // boundary on each axis.
        let boundary = |cell: i32, s: i32, origin: f32, dir: f32| {
            if dir != 0.0 {
                let edge = (cell + i32::from(s > 0)) as f32 * self.cell_size;
                (edge - origin) / dir
            } else {
                f32::INFINITY
            }
        };
        let mut tx = boundary(x, sx, ray.origin.x, ray.direction.x);
        let mut ty = boundary(y, sy, ray.origin.y, ray.direction.y);
        let mut tz = boundary(z, sz, ray.origin.z, ray.direction.z);

        let mut seen = HashSet::new();
        let mut t = entry;
        while t <= t_end {
            if let Some(keys) = self.cells.get(&(x, y, z)) {
                for &key in keys {
                    if !seen.insert(key) {
                        continue;
                    }
                    let Some(stored) = self.bounds.get(key) else {
                        continue;
                    };
                    let hit = stored.intersect_ray(ray.origin, ray.direction);
                    if hit.is_some_and(|distance| distance <= max_distance) {
                        results.push(key);
                    }
                }
            }

            if tx <= ty && tx <= tz {
                t = tx;
                tx += dx;
                x += sx;
            } else if ty <= tz {
                t = ty;
                ty += dy;
                y += sy;
            } else {
                t = tz;
                tz += dz;
                z += sz;
            }
        }
    }

    fn object_count(&self) -> usize {
        self.bounds.len()
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.bounds.clear();
    }
}
