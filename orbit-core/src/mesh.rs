//! UV-sphere generation.
//!
//! The generated [`SphereMesh`] lives on the CPU side only; uploading it is
//! the job of the client.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Parameters controlling the resolution and size of a generated sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereOptions {
    pub latitude_bands: u32,
    pub longitude_bands: u32,
    pub radius: f32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            latitude_bands: 30,
            longitude_bands: 30,
            radius: 1.2,
        }
    }
}

/// A sphere made of latitude/longitude bands.
///
/// Vertices on the seam and at both poles are duplicated so every vertex
/// carries its own texture coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Generates a sphere. Both band counts must be at least 1 and the radius positive.
    pub fn generate(options: SphereOptions) -> Self {
        let SphereOptions {
            latitude_bands,
            longitude_bands,
            radius,
        } = options;
        let ring = longitude_bands + 1;
        let vertex_count = ((latitude_bands + 1) * ring) as usize;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for lat in 0..=latitude_bands {
            let theta = lat as f32 * PI / latitude_bands as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for lon in 0..=longitude_bands {
                let phi = lon as f32 * 2.0 * PI / longitude_bands as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                positions.push(radius * Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta));
                uvs.push(Vec2::new(
                    1.0 - lon as f32 / longitude_bands as f32,
                    1.0 - lat as f32 / latitude_bands as f32,
                ));
            }
        }

        let mut indices = Vec::with_capacity((6 * latitude_bands * longitude_bands) as usize);
        for lat in 0..latitude_bands {
            for lon in 0..longitude_bands {
                let first = lat * ring + lon;
                let second = first + ring;
                indices.extend_from_slice(&[first, second, first + 1]);
                indices.extend_from_slice(&[second, second + 1, first + 1]);
            }
        }

        Self {
            positions,
            uvs,
            indices,
        }
    }

    /// Returns the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of indices, which is always a multiple of 3.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Positions flattened to `x, y, z` triples, ready for a vertex buffer.
    pub fn position_data(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Texture coordinates flattened to `u, v` pairs.
    pub fn uv_data(&self) -> Vec<f32> {
        self.uvs.iter().flat_map(|uv| uv.to_array()).collect()
    }
}
