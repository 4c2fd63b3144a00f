//! Probe volumes tracked by the engine

use slotmap::new_key_type;

use crate::collision::{CollisionShape, WorldSpaceShape};
use crate::foundation::math::Transform;
use crate::scene::Aabb;

new_key_type! {
    /// Handle to a registered intersection source
    pub struct SourceId;
}

/// One moving probe volume, e.g. a controller-attached collider
#[derive(Debug, Clone)]
pub struct IntersectionSource {
    /// The probe's bounding collider (model space)
    pub shape: CollisionShape,
    /// World transform; also supplies the ray origin and forward direction
    /// for memoized ray picks
    pub transform: Transform,
    /// Inactive sources are skipped each tick and shed any current hit
    pub active: bool,
}

impl IntersectionSource {
    /// Create an active source
    pub fn new(shape: CollisionShape, transform: Transform) -> Self {
        Self {
            shape,
            transform,
            active: true,
        }
    }

    /// The probe's collider transformed to world space
    pub fn world_shape(&self) -> WorldSpaceShape {
        self.shape.to_world_space(&self.transform)
    }

    /// Conservative world-space bounds used for the broad phase
    pub fn world_bounds(&self) -> Aabb {
        self.world_shape().bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn world_bounds_move_with_transform() {
        let mut source = IntersectionSource::new(
            CollisionShape::sphere(0.5),
            Transform::from_position(Vec3::zeros()),
        );
        let before = source.world_bounds();

        source.transform.position = Vec3::new(3.0, 0.0, 0.0);
        let after = source.world_bounds();

        assert_ne!(before, after);
        assert!((after.center().x - 3.0).abs() < 1e-6);
    }
}
