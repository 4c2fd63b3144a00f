//! High-level collision shapes for probe volumes
//!
//! Shapes are stored in model space and transformed to world space
//! on-demand during collision tests.

use super::mesh::{CollisionMeshTemplate, WorldSpaceCollisionMesh};
use super::primitives::{BoundingSphere, Ray};
use crate::foundation::math::{Transform, Vec3};
use crate::scene::Aabb;

/// Collision shape attached to a probe volume (model space)
#[derive(Debug, Clone)]
pub enum CollisionShape {
    /// A spherical probe volume (radius only; position comes from the
    /// owning transform at test time)
    Sphere(f32),
    /// A triangle-mesh probe volume (model space, transformed on demand)
    Mesh(CollisionMeshTemplate),
}

impl CollisionShape {
    /// Creates a spherical collision shape with the given radius
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(radius)
    }

    /// Creates a mesh collision shape from model-space vertices and indices
    pub fn mesh_from_model(vertices: &[Vec3], indices: &[u32]) -> Self {
        Self::Mesh(CollisionMeshTemplate::from_vertices(vertices, indices))
    }

    /// Get the bounding radius in model space
    pub fn local_bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere(radius) => *radius,
            Self::Mesh(template) => template.local_bounding_radius,
        }
    }

    /// Transform this shape to world space for a collision test
    pub fn to_world_space(&self, transform: &Transform) -> WorldSpaceShape {
        match self {
            // Sphere radius is already in world-space units
            Self::Sphere(radius) => {
                WorldSpaceShape::Sphere(BoundingSphere::new(transform.position, *radius))
            }
            Self::Mesh(template) => {
                let world_mesh = template.to_world_space(
                    &transform.matrix(),
                    transform.position,
                    transform.max_scale(),
                );
                WorldSpaceShape::Mesh(world_mesh)
            }
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug)]
pub enum WorldSpaceShape {
    /// World-space sphere
    Sphere(BoundingSphere),
    /// World-space mesh
    Mesh(WorldSpaceCollisionMesh),
}

impl WorldSpaceShape {
    /// Get center position
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Mesh(mesh) => mesh.center,
        }
    }

    /// Get the bounding sphere
    pub fn bounding_sphere(&self) -> BoundingSphere {
        match self {
            Self::Sphere(sphere) => *sphere,
            Self::Mesh(mesh) => BoundingSphere::new(mesh.center, mesh.bounding_radius),
        }
    }

    /// Conservative world-space axis-aligned bounds from the bounding sphere
    pub fn bounds(&self) -> Aabb {
        let sphere = self.bounding_sphere();
        Aabb::from_center_extents(sphere.center, Vec3::repeat(sphere.radius))
    }

    /// Test ray intersection, returning (distance, hit_point, normal)
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3, Vec3)> {
        match self {
            Self::Sphere(sphere) => sphere.intersect_ray(ray),
            Self::Mesh(mesh) => mesh.intersect_ray(ray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sphere_shape_world_bounds() {
        let shape = CollisionShape::sphere(2.0);
        let world = shape.to_world_space(&Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let bounds = world.bounds();
        assert_relative_eq!(bounds.min, Vec3::new(-1.0, -2.0, -2.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Vec3::new(3.0, 2.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn mesh_shape_scales_bounding_radius() {
        let shape = CollisionShape::Mesh(CollisionMeshTemplate::cube(1.0));
        let mut transform = Transform::identity();
        transform.scale = Vec3::new(1.0, 1.0, 3.0);
        let sphere = shape.to_world_space(&transform).bounding_sphere();
        assert_relative_eq!(sphere.radius, 3.0f32.sqrt() * 3.0, epsilon = 1e-5);
    }
}
