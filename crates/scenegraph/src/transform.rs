//! Rigid transforms (translation + rotation).

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A rigid transform: rotation followed by translation.
///
/// Scale is deliberately absent; mounted parts never scale with their socket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Offset from the parent frame origin.
    pub translation: Vec3,
    /// Orientation relative to the parent frame.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Zero offset, identity rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a transform with only a translation.
    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Create a transform from a translation and rotation.
    #[must_use]
    pub const fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Compose `child` (expressed in this frame) into this frame's parent space.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::{Quat, Vec3};
    /// use scenegraph::Transform;
    ///
    /// let parent = Transform::from_translation_rotation(
    ///     Vec3::new(1.0, 0.0, 0.0),
    ///     Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
    /// );
    /// let child = Transform::from_translation(Vec3::new(0.0, 0.0, 1.0));
    ///
    /// let world = parent.mul_transform(&child);
    /// assert!(world.translation.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    /// ```
    #[must_use]
    pub fn mul_transform(&self, child: &Self) -> Self {
        Self {
            translation: self.translation + self.rotation * child.translation,
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Returns the inverse rigid transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            translation: rotation * -self.translation,
            rotation,
        }
    }

    /// Returns true if both transforms are within `eps` of each other.
    ///
    /// `q` and `-q` describe the same rotation and compare equal here.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.translation.abs_diff_eq(other.translation, eps)
            && (self.rotation.abs_diff_eq(other.rotation, eps)
                || self.rotation.abs_diff_eq(-other.rotation, eps))
    }

    /// Returns true if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite()
    }
}
