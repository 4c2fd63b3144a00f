//! Axis-aligned bounding boxes for spatial queries

use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents (half-size)
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Smallest AABB enclosing both boxes
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the distance to the entry point if the ray intersects, None
    /// otherwise. Based on "An Efficient and Robust Ray-Box Intersection
    /// Algorithm".
    pub fn intersect_ray(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        self.intersect_ray_span(ray_origin, ray_dir).map(|(t, _)| t)
    }

    /// Slab test returning both entry and exit distances
    ///
    /// Entry is clamped to 0 when the origin is inside the box.
    pub fn intersect_ray_span(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<(f32, f32)> {
        let inv_dir = Vec3::new(
            if ray_dir.x != 0.0 { 1.0 / ray_dir.x } else { f32::INFINITY },
            if ray_dir.y != 0.0 { 1.0 / ray_dir.y } else { f32::INFINITY },
            if ray_dir.z != 0.0 { 1.0 / ray_dir.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray_origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray_origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray_origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray_origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray_origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray_origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax >= tmin && tmax >= 0.0 {
            Some((tmin.max(0.0), tmax))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn overlap_and_separation() {
        let a = Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(1.0));
        let b = Aabb::from_center_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::repeat(1.0));
        let c = Aabb::from_center_extents(Vec3::new(5.0, 0.0, 0.0), Vec3::repeat(1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn touching_faces_count_as_intersecting() {
        let a = Aabb::new(Vec3::zeros(), Vec3::repeat(1.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn ray_entry_distance() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, 1.0, 4.0));
        let t = aabb.intersect_ray(Vec3::zeros(), Vec3::z()).unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn ray_from_inside_enters_at_zero() {
        let aabb = Aabb::from_center_extents(Vec3::zeros(), Vec3::repeat(1.0));
        let (entry, exit) = aabb.intersect_ray_span(Vec3::zeros(), Vec3::z()).unwrap();
        assert_relative_eq!(entry, 0.0);
        assert_relative_eq!(exit, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, 2.0), Vec3::new(1.0, 1.0, 4.0));
        assert!(aabb.intersect_ray(Vec3::zeros(), -Vec3::z()).is_none());
    }
}
