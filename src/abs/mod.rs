//! This module contains the GL-facing building blocks of the viewer,
//! including application setup, the graphics context seam, shaders, meshes and textures.

pub mod app;
pub mod context;
pub mod mesh;
pub mod shader;
pub mod texture;

#[cfg(test)]
pub mod mock;

pub use app::*;
pub use context::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
