//! Reusable narrow-phase tester
//!
//! The engine performs many narrow-phase tests per frame against different
//! target geometry. Rather than building a world-space mesh per candidate
//! and per caller, a single [`CollisionProbe`] is reconfigured before each
//! test. The probe never persists a specific shape across calls: every
//! test is preceded by [`CollisionProbe::configure`], and callers must not
//! assume anything about its state between tests.

use super::mesh::{CollisionMeshTemplate, WorldSpaceCollisionMesh};
use super::primitives::Ray;
use super::shape::WorldSpaceShape;
use crate::foundation::math::{Transform, Vec3};

/// Scoped, reconfigurable narrow-phase test resource
#[derive(Debug, Default)]
pub struct CollisionProbe {
    target: Option<WorldSpaceCollisionMesh>,
}

impl CollisionProbe {
    /// Create an unconfigured probe
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the currently configured target geometry
    pub fn reset(&mut self) {
        self.target = None;
    }

    /// Point the probe at a candidate: transforms the candidate's mesh
    /// template into world space, replacing whatever was configured before
    pub fn configure(&mut self, template: &CollisionMeshTemplate, transform: &Transform) {
        self.target = Some(template.to_world_space(
            &transform.matrix(),
            transform.position,
            transform.max_scale(),
        ));
    }

    /// Whether a target is currently configured
    pub fn is_configured(&self) -> bool {
        self.target.is_some()
    }

    /// Exact overlap test between the configured target and a probe shape
    pub fn test_overlap(&self, shape: &WorldSpaceShape) -> bool {
        let Some(target) = &self.target else {
            return false;
        };
        match shape {
            WorldSpaceShape::Sphere(sphere) => target.intersect_sphere(sphere).is_some(),
            WorldSpaceShape::Mesh(mesh) => target.intersects_mesh(mesh),
        }
    }

    /// Exact ray test against the configured target
    ///
    /// Returns (distance, world hit point, world normal) for the closest
    /// triangle hit within `max_distance`.
    pub fn test_ray(&self, ray: &Ray, max_distance: f32) -> Option<(f32, Vec3, Vec3)> {
        let target = self.target.as_ref()?;
        target
            .intersect_ray(ray)
            .filter(|(distance, _, _)| *distance <= max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::primitives::BoundingSphere;
    use approx::assert_relative_eq;

    #[test]
    fn unconfigured_probe_never_hits() {
        let probe = CollisionProbe::new();
        let sphere = WorldSpaceShape::Sphere(BoundingSphere::new(Vec3::zeros(), 10.0));
        assert!(!probe.test_overlap(&sphere));
        assert!(probe
            .test_ray(&Ray::new(Vec3::zeros(), Vec3::z()), f32::INFINITY)
            .is_none());
    }

    #[test]
    fn configure_replaces_previous_target() {
        let mut probe = CollisionProbe::new();
        let cube = CollisionMeshTemplate::cube(0.5);

        probe.configure(&cube, &Transform::from_position(Vec3::new(0.0, 0.0, 2.0)));
        let touching = WorldSpaceShape::Sphere(BoundingSphere::new(Vec3::new(0.0, 0.0, 1.4), 0.2));
        assert!(probe.test_overlap(&touching));

        // Retarget far away; the old geometry must be gone.
        probe.configure(&cube, &Transform::from_position(Vec3::new(50.0, 0.0, 0.0)));
        assert!(!probe.test_overlap(&touching));

        probe.reset();
        assert!(!probe.is_configured());
    }

    #[test]
    fn ray_test_respects_max_distance() {
        let mut probe = CollisionProbe::new();
        let cube = CollisionMeshTemplate::cube(0.5);
        probe.configure(&cube, &Transform::from_position(Vec3::new(0.0, 0.0, 5.0)));

        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let (distance, _, _) = probe.test_ray(&ray, 10.0).unwrap();
        assert_relative_eq!(distance, 4.5, epsilon = 1e-4);
        assert!(probe.test_ray(&ray, 4.0).is_none());
    }
}
