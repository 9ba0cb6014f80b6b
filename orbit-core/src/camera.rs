//! Shared camera parameters.

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Perspective camera looking down -Z from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Perspective {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 120.0,
        }
    }
}

impl Perspective {
    /// Returns the OpenGL clip-space projection for a viewport of the given size.
    pub fn projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}
