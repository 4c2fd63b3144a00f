//! Primitive collision shapes and intersection algorithms
//!
//! Provides basic geometric primitives (rays, spheres, triangles) with
//! efficient intersection testing algorithms.

use crate::foundation::math::Vec3;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Test ray intersection with this sphere
    /// Returns (distance, hit_point, normal) if hit, None otherwise
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3, Vec3)> {
        // Solve |origin + t*direction - center|^2 = radius^2
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Closest positive root
        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);
        let t = if t1 > 0.0 {
            t1
        } else if t2 > 0.0 {
            t2
        } else {
            return None;
        };

        let hit_point = ray.point_at(t);
        let normal = (hit_point - self.center).normalize();
        Some((t, hit_point, normal))
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex in world space
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Calculates the normal of the triangle (right-hand rule)
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).normalize()
    }

    /// Möller-Trumbore ray-triangle intersection
    ///
    /// Returns (t, u, v) barycentric coordinates if hit, None otherwise.
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller &
    /// Trumbore.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 0.000_001;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle?
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None // Behind ray origin
        }
    }

    /// Get the closest point on the triangle to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let v0_to_point = point - self.v0;

        let d1 = edge1.dot(&v0_to_point);
        let d2 = edge2.dot(&v0_to_point);
        if d1 <= 0.0 && d2 <= 0.0 {
            return self.v0;
        }

        let v1_to_point = point - self.v1;
        let d3 = edge1.dot(&v1_to_point);
        let d4 = edge2.dot(&v1_to_point);
        if d3 >= 0.0 && d4 <= d3 {
            return self.v1;
        }

        let v2_to_point = point - self.v2;
        let d5 = edge1.dot(&v2_to_point);
        let d6 = edge2.dot(&v2_to_point);
        if d6 >= 0.0 && d5 <= d6 {
            return self.v2;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v_val = d1 / (d1 - d3);
            return self.v0 + edge1 * v_val;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return self.v0 + edge2 * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return self.v1 + (self.v2 - self.v1) * w;
        }

        // Point projects inside the triangle
        let denom = 1.0 / (va + vb + vc);
        let v_val = vb * denom;
        let w = vc * denom;
        self.v0 + edge1 * v_val + edge2 * w
    }

    /// Signed distance from a point to the triangle plane
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        let normal = self.normal();
        let v0_to_point = point - self.v0;
        normal.dot(&v0_to_point)
    }

    /// Test if this triangle intersects another triangle
    ///
    /// Separating Axis Theorem over 11 candidate axes: the two face normals
    /// and the 9 edge-edge cross products.
    pub fn intersects_triangle(&self, other: &Triangle) -> bool {
        const EPSILON: f32 = 0.000_001;

        fn project_triangle(tri: &Triangle, axis: Vec3) -> (f32, f32) {
            let p0 = axis.dot(&tri.v0);
            let p1 = axis.dot(&tri.v1);
            let p2 = axis.dot(&tri.v2);
            (p0.min(p1).min(p2), p0.max(p1).max(p2))
        }

        // Returns false when the axis separates the triangles
        fn test_axis(tri1: &Triangle, tri2: &Triangle, axis: Vec3) -> bool {
            let axis_len_sq = axis.magnitude_squared();
            if axis_len_sq < EPSILON {
                return true; // Degenerate axis, skip
            }

            let normalized_axis = axis * (1.0 / axis_len_sq.sqrt());
            let (min1, max1) = project_triangle(tri1, normalized_axis);
            let (min2, max2) = project_triangle(tri2, normalized_axis);
            max1 >= min2 && max2 >= min1
        }

        let edges1 = [self.v1 - self.v0, self.v2 - self.v1, self.v0 - self.v2];
        let edges2 = [
            other.v1 - other.v0,
            other.v2 - other.v1,
            other.v0 - other.v2,
        ];

        if !test_axis(self, other, self.normal()) {
            return false;
        }
        if !test_axis(self, other, other.normal()) {
            return false;
        }

        for edge1 in &edges1 {
            for edge2 in &edges2 {
                if !test_axis(self, other, edge1.cross(edge2)) {
                    return false;
                }
            }
        }

        // No separating axis found
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_hits_sphere_head_on() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let (t, point, normal) = sphere.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 4.0, epsilon = 1e-5);
        assert_relative_eq!(point, Vec3::new(0.0, 0.0, 4.0), epsilon = 1e-5);
        assert_relative_eq!(normal, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn ray_misses_sphere_behind_origin() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        assert!(sphere.intersect_ray(&ray).is_none());
    }

    #[test]
    fn ray_hits_triangle_inside() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );
        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let (t, _, _) = tri.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn ray_misses_triangle_outside_barycentric_range() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );
        let ray = Ray::new(Vec3::new(5.0, 5.0, 0.0), Vec3::z());
        assert!(tri.intersect_ray(&ray).is_none());
    }

    #[test]
    fn overlapping_triangles_intersect() {
        let a = Triangle::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let b = Triangle::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, -0.5),
            Vec3::new(0.0, 1.0, 0.5),
        );
        assert!(a.intersects_triangle(&b));
    }

    #[test]
    fn separated_triangles_do_not_intersect() {
        let a = Triangle::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let b = Triangle::new(
            Vec3::new(-1.0, 5.0, -1.0),
            Vec3::new(1.0, 5.0, -1.0),
            Vec3::new(0.0, 5.0, 1.0),
        );
        assert!(!a.intersects_triangle(&b));
    }
}
