//! Collision mesh representations
//!
//! Tracked objects are arbitrary renderable geometry, not pre-built physics
//! bodies, so their collision shape is synthesized from render geometry: a
//! model-space template built once from vertices and indices, transformed
//! to world space on demand during testing.

use super::primitives::{BoundingSphere, Ray, Triangle};
use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::scene::Aabb;

/// A collision mesh template stored in model space (local coordinates)
#[derive(Debug, Clone)]
pub struct CollisionMeshTemplate {
    /// Triangles in model space, never modified after construction
    pub local_triangles: Vec<Triangle>,
    /// Local bounding sphere radius (model space)
    pub local_bounding_radius: f32,
}

impl CollisionMeshTemplate {
    /// Creates a collision mesh template from model-space vertices and
    /// indices, the same buffers a renderer would draw
    pub fn from_vertices(vertices: &[Vec3], indices: &[u32]) -> Self {
        let mut triangles = Vec::new();
        for chunk in indices.chunks(3) {
            if chunk.len() == 3 {
                let v0 = vertices[chunk[0] as usize];
                let v1 = vertices[chunk[1] as usize];
                let v2 = vertices[chunk[2] as usize];
                triangles.push(Triangle::new(v0, v1, v2));
            }
        }

        // Bounding sphere radius from the furthest vertex
        let mut max_distance_sq = 0.0f32;
        for tri in &triangles {
            for vertex in [tri.v0, tri.v1, tri.v2] {
                max_distance_sq = max_distance_sq.max(vertex.magnitude_squared());
            }
        }

        Self {
            local_triangles: triangles,
            local_bounding_radius: max_distance_sq.sqrt(),
        }
    }

    /// Axis-aligned cube of the given half-extent, centered at the origin
    ///
    /// Convenience constructor for probe volumes and tests.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let vertices = [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        #[rustfmt::skip]
        let indices: [u32; 36] = [
            0, 2, 1, 0, 3, 2, // back  (-z)
            4, 5, 6, 4, 6, 7, // front (+z)
            0, 1, 5, 0, 5, 4, // bottom
            3, 6, 2, 3, 7, 6, // top
            0, 7, 3, 0, 4, 7, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        Self::from_vertices(&vertices, &indices)
    }

    /// Transform this template to world space using a transformation matrix
    pub fn to_world_space(
        &self,
        matrix: &Mat4,
        center: Vec3,
        scale_factor: f32,
    ) -> WorldSpaceCollisionMesh {
        let triangles: Vec<Triangle> = self
            .local_triangles
            .iter()
            .map(|tri| {
                let v0 = matrix.transform_point(&Point3::new(tri.v0.x, tri.v0.y, tri.v0.z));
                let v1 = matrix.transform_point(&Point3::new(tri.v1.x, tri.v1.y, tri.v1.z));
                let v2 = matrix.transform_point(&Point3::new(tri.v2.x, tri.v2.y, tri.v2.z));
                Triangle::new(v0.coords, v1.coords, v2.coords)
            })
            .collect();

        WorldSpaceCollisionMesh {
            triangles,
            center,
            bounding_radius: self.local_bounding_radius * scale_factor,
        }
    }

    /// World-space axis-aligned bounds of the transformed mesh
    ///
    /// Falls back to a degenerate box at the matrix translation when the
    /// template has no triangles.
    pub fn world_bounds(&self, matrix: &Mat4) -> Aabb {
        let translation = Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        let mut min = translation;
        let mut max = translation;
        let mut any = false;
        for tri in &self.local_triangles {
            for vertex in [tri.v0, tri.v1, tri.v2] {
                let p = matrix.transform_point(&Point3::new(vertex.x, vertex.y, vertex.z));
                let world = p.coords;
                if any {
                    min = min.inf(&world);
                    max = max.sup(&world);
                } else {
                    min = world;
                    max = world;
                    any = true;
                }
            }
        }
        Aabb::new(min, max)
    }
}

/// World-space collision mesh, created on demand for a single test and not
/// stored anywhere
#[derive(Debug)]
pub struct WorldSpaceCollisionMesh {
    /// Triangles in world space
    pub triangles: Vec<Triangle>,
    /// Center position in world space
    pub center: Vec3,
    /// Bounding sphere radius in world space
    pub bounding_radius: f32,
}

impl WorldSpaceCollisionMesh {
    /// Point-in-mesh test by ray-crossing parity
    ///
    /// Casts a ray from the point and counts triangle crossings; an odd
    /// count means the point is inside. Assumes closed geometry. The
    /// direction is deliberately skewed so axis-aligned meshes are not hit
    /// along shared edges or vertices.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let ray = Ray::new(point, Vec3::new(0.123, 0.456, 0.789));
        let mut crossings = 0u32;
        for triangle in &self.triangles {
            if triangle.intersect_ray(&ray).is_some() {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Test ray intersection against all triangles in the mesh
    /// Returns closest hit (t, hit_point, normal) if any triangle is hit
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3, Vec3)> {
        // Bounding sphere reject first
        let bounding_sphere = BoundingSphere::new(self.center, self.bounding_radius);
        bounding_sphere.intersect_ray(ray)?;

        let mut closest_hit: Option<(f32, Vec3, Vec3)> = None;
        let mut closest_t = f32::MAX;
        for triangle in &self.triangles {
            if let Some((t, _u, _v)) = triangle.intersect_ray(ray) {
                if t < closest_t {
                    closest_t = t;
                    closest_hit = Some((t, ray.point_at(t), triangle.normal()));
                }
            }
        }
        closest_hit
    }

    /// Test sphere intersection against the mesh
    /// Returns contact point, normal, and penetration depth if hit
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<(Vec3, Vec3, f32)> {
        let bounding_sphere = BoundingSphere::new(self.center, self.bounding_radius);
        if !bounding_sphere.intersects(sphere) {
            return None;
        }

        for triangle in &self.triangles {
            let dist = triangle.distance_to_point(sphere.center);
            if dist.abs() > sphere.radius {
                continue; // Too far from the triangle plane
            }

            let closest = triangle.closest_point(sphere.center);
            let dist_sq = (closest - sphere.center).magnitude_squared();
            if dist_sq <= sphere.radius * sphere.radius {
                let normal = triangle.normal();
                let penetration = sphere.radius - dist_sq.sqrt();
                return Some((closest, normal, penetration));
            }
        }

        // No triangle within reach of the surface: the sphere may still be
        // fully inside the mesh, where every triangle is farther away than
        // the radius.
        if self.contains_point(sphere.center) {
            let offset = sphere.center - self.center;
            let normal = if offset.magnitude_squared() > f32::EPSILON {
                offset.normalize()
            } else {
                Vec3::y()
            };
            return Some((sphere.center, normal, sphere.radius));
        }

        None
    }

    /// Test mesh-mesh intersection
    pub fn intersects_mesh(&self, other: &WorldSpaceCollisionMesh) -> bool {
        let sphere_a = BoundingSphere::new(self.center, self.bounding_radius);
        let sphere_b = BoundingSphere::new(other.center, other.bounding_radius);
        if !sphere_a.intersects(&sphere_b) {
            return false;
        }

        for tri_a in &self.triangles {
            for tri_b in &other.triangles {
                if tri_a.intersects_triangle(tri_b) {
                    return true;
                }
            }
        }

        // No surface crossings: one mesh may fully contain the other. A
        // vertex lies on its mesh's surface, so containment of any vertex
        // implies overlap.
        if let Some(tri) = other.triangles.first() {
            if self.contains_point(tri.v0) {
                return true;
            }
        }
        if let Some(tri) = self.triangles.first() {
            if other.contains_point(tri.v0) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn cube_template_has_twelve_triangles() {
        let cube = CollisionMeshTemplate::cube(0.5);
        assert_eq!(cube.local_triangles.len(), 12);
        // Corner distance for a half-extent 0.5 cube
        assert_relative_eq!(cube.local_bounding_radius, 0.75f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn ray_hits_front_face_of_translated_cube() {
        let cube = CollisionMeshTemplate::cube(0.5);
        let transform = Transform::from_position(Vec3::new(0.0, 0.0, 3.0));
        let world = cube.to_world_space(&transform.matrix(), transform.position, 1.0);

        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let (t, point, _normal) = world.intersect_ray(&ray).unwrap();
        assert_relative_eq!(t, 2.5, epsilon = 1e-4);
        assert_relative_eq!(point.z, 2.5, epsilon = 1e-4);
    }

    #[test]
    fn sphere_touching_cube_face_reports_contact() {
        let cube = CollisionMeshTemplate::cube(0.5);
        let transform = Transform::from_position(Vec3::new(0.0, 0.0, 3.0));
        let world = cube.to_world_space(&transform.matrix(), transform.position, 1.0);

        let overlapping = BoundingSphere::new(Vec3::new(0.0, 0.0, 2.3), 0.25);
        assert!(world.intersect_sphere(&overlapping).is_some());

        let separated = BoundingSphere::new(Vec3::new(0.0, 0.0, 2.0), 0.25);
        assert!(world.intersect_sphere(&separated).is_none());
    }

    #[test]
    fn sphere_fully_inside_mesh_reports_contact() {
        let cube = CollisionMeshTemplate::cube(5.0);
        let world = cube.to_world_space(&Mat4::identity(), Vec3::zeros(), 1.0);

        // Every face is 5.0 away, far beyond the radius; only containment
        // can detect this overlap.
        let inside = BoundingSphere::new(Vec3::zeros(), 0.2);
        assert!(world.intersect_sphere(&inside).is_some());

        let off_center = BoundingSphere::new(Vec3::new(1.0, -2.0, 3.0), 0.2);
        assert!(world.intersect_sphere(&off_center).is_some());

        let outside = BoundingSphere::new(Vec3::new(8.0, 0.0, 0.0), 0.2);
        assert!(world.intersect_sphere(&outside).is_none());
    }

    #[test]
    fn mesh_fully_inside_mesh_overlaps() {
        let big = CollisionMeshTemplate::cube(5.0)
            .to_world_space(&Mat4::identity(), Vec3::zeros(), 1.0);
        let small = CollisionMeshTemplate::cube(0.5)
            .to_world_space(&Mat4::identity(), Vec3::zeros(), 1.0);

        // No triangle pair crosses; containment must catch it both ways.
        assert!(big.intersects_mesh(&small));
        assert!(small.intersects_mesh(&big));
    }

    #[test]
    fn contains_point_parity() {
        let cube = CollisionMeshTemplate::cube(1.0);
        let world = cube.to_world_space(&Mat4::identity(), Vec3::zeros(), 1.0);
        assert!(world.contains_point(Vec3::zeros()));
        assert!(world.contains_point(Vec3::new(0.9, -0.9, 0.9)));
        assert!(!world.contains_point(Vec3::new(1.1, 0.0, 0.0)));
        assert!(!world.contains_point(Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn world_bounds_follow_transform() {
        let cube = CollisionMeshTemplate::cube(0.5);
        let transform = Transform::from_position(Vec3::new(2.0, 0.0, 0.0));
        let bounds = cube.world_bounds(&transform.matrix());
        assert_relative_eq!(bounds.min, Vec3::new(1.5, -0.5, -0.5), epsilon = 1e-5);
        assert_relative_eq!(bounds.max, Vec3::new(2.5, 0.5, 0.5), epsilon = 1e-5);
    }
}
