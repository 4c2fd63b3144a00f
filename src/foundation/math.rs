//! Math utilities and types
//!
//! Provides the fundamental math types used throughout the engine.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Build the model matrix in TRS order
    pub fn matrix(&self) -> Mat4 {
        let translation = Mat4::new_translation(&self.position);
        let rotation = self.rotation.to_homogeneous();
        let scale = Mat4::new_nonuniform_scaling(&self.scale);
        translation * rotation * scale
    }

    /// The transform's forward axis (+Z rotated by the orientation)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    /// Largest scale factor across the three axes
    ///
    /// Used as a conservative scale for bounding-sphere radii under
    /// non-uniform scaling.
    pub fn max_scale(&self) -> f32 {
        self.scale.x.max(self.scale.y).max(self.scale.z)
    }
}
