//! Time-driven motion of the planet and its moon.
//!
//! Everything here is a pure function of the scaled elapsed time, so a frame
//! can be recomputed any number of times with the same result.

use glam::{Mat4, Vec3};

/// Factor applied to the host's millisecond clock to obtain scaled time.
pub const TIME_SCALE: f64 = 0.0005;

/// Converts raw host time in milliseconds to the scaled time fed to [`OrbitRule::transform`].
pub fn scaled_time(raw_millis: f64) -> f32 {
    (raw_millis * TIME_SCALE) as f32
}

/// Placement of a body at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Builds the model-view matrix: translate, rotate about X, Y and Z, then scale.
    ///
    /// The order is significant and matches right-multiplying each step onto an
    /// identity matrix.
    pub fn model_view(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

/// Circular orbit in the x-z plane combined with a spin about the X and Z axes.
///
/// A body with a zero `radius` stays at `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRule {
    pub center: Vec3,
    pub radius: f32,
    /// Scaled time is divided by this to obtain the spin angle.
    pub spin_divisor: f32,
    pub scale: f32,
}

impl OrbitRule {
    /// The planet sits six units in front of the camera.
    pub const PLANET: Self = Self {
        center: Vec3::new(0.0, 0.0, -6.0),
        radius: 0.0,
        spin_divisor: 1.5,
        scale: 1.0,
    };

    /// The moon circles a point slightly in front of the planet.
    pub const MOON: Self = Self {
        center: Vec3::new(0.0, 0.3, -5.0),
        radius: 2.5,
        spin_divisor: 2.0,
        scale: 0.4,
    };

    /// Computes the body's transform at scaled time `t`.
    pub fn transform(&self, t: f32) -> Transform {
        let (sin_t, cos_t) = t.sin_cos();
        let offset = if self.radius == 0.0 {
            Vec3::ZERO
        } else {
            Vec3::new(sin_t * self.radius, 0.0, cos_t * self.radius)
        };
        let spin = t / self.spin_divisor;

        Transform {
            translation: self.center + offset,
            rotation: Vec3::new(spin, 0.0, spin),
            scale: Vec3::splat(self.scale),
        }
    }
}
