//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! Attribute and uniform slots are resolved once after linking into a [`ProgramBindings`]
//! record, and values are uploaded through the [`Uniform`] trait.

use std::sync::Arc;

use glam::Mat4;

use super::context::GraphicsContext;
use crate::error::{OrbitError, ResourceKind, ShaderStage};

/// Represents an individual compiled shader stage.
pub struct Shader<G: GraphicsContext> {
    gl: Arc<G>,
    id: G::Shader,
    _stage: ShaderStage,
}

impl<G: GraphicsContext> Shader<G> {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the shader object is released and the compiler log is returned.
    pub fn new(gl: &Arc<G>, stage: ShaderStage, source: &str) -> Result<Self, OrbitError> {
        let shader = gl
            .create_shader(stage)
            .map_err(OrbitError::resource(ResourceKind::Shader))?;

        if !gl.compile_shader(shader, source) {
            let log = gl.shader_info_log(shader);
            gl.delete_shader(shader);
            log::error!("Failed to compile {stage} shader: {log}");
            return Err(OrbitError::ShaderCompile { stage, log });
        }

        Ok(Self {
            gl: Arc::clone(gl),
            id: shader,
            _stage: stage,
        })
    }
}

impl<G: GraphicsContext> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// A typed record of the slots a program exposes, looked up by name once after linking.
pub trait ProgramBindings<G: GraphicsContext>: Sized {
    fn resolve(gl: &G, program: G::Program) -> Self;
}

/// Looks up an attribute slot. A missing name is not an error; the slot is simply unused.
pub fn attrib_slot<G: GraphicsContext>(gl: &G, program: G::Program, name: &str) -> Option<u32> {
    let slot = gl.attrib_location(program, name);
    if slot.is_none() {
        log::warn!("Attribute `{name}` is not active in the shader program");
    }
    slot
}

/// Looks up a uniform slot. A missing name is not an error; the slot is simply unused.
pub fn uniform_slot<G: GraphicsContext>(
    gl: &G,
    program: G::Program,
    name: &str,
) -> Option<G::UniformLocation> {
    let slot = gl.uniform_location(program, name);
    if slot.is_none() {
        log::warn!("Uniform `{name}` is not active in the shader program");
    }
    slot
}

/// Represents a value that can be uploaded to a uniform slot.
pub trait Uniform {
    fn set_uniform<G: GraphicsContext>(&self, gl: &G, location: &G::UniformLocation);
}

impl Uniform for i32 {
    fn set_uniform<G: GraphicsContext>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_i32(location, *self);
    }
}

impl Uniform for Mat4 {
    fn set_uniform<G: GraphicsContext>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_mat4(location, self);
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform<G: GraphicsContext>(&self, gl: &G, location: &G::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}

/// A linked shader program together with its resolved bindings.
pub struct ShaderProgram<G: GraphicsContext, B> {
    gl: Arc<G>,
    id: G::Program,
    bindings: B,
}

impl<G: GraphicsContext, B: ProgramBindings<G>> ShaderProgram<G, B> {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<G>, shaders: &[&Shader<G>]) -> Result<Self, OrbitError> {
        let program = gl
            .create_program()
            .map_err(OrbitError::resource(ResourceKind::Program))?;

        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        if !gl.link_program(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            log::error!("Failed to link shader program: {log}");
            return Err(OrbitError::ShaderLink(log));
        }

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
            bindings: B::resolve(gl, program),
        })
    }

    /// Compiles both stages and links them. Stage objects are released whether or not this succeeds.
    pub fn from_sources(gl: &Arc<G>, vertex: &str, fragment: &str) -> Result<Self, OrbitError> {
        let vert = Shader::new(gl, ShaderStage::Vertex, vertex)?;
        let frag = Shader::new(gl, ShaderStage::Fragment, fragment)?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.use_program(self.id);
    }

    pub fn bindings(&self) -> &B {
        &self.bindings
    }

    /// Uploads `value` to `slot`; an unresolved slot is skipped.
    pub fn set_uniform<T: Uniform>(&self, slot: Option<&G::UniformLocation>, value: T) {
        if let Some(location) = slot {
            value.set_uniform(&*self.gl, location);
        }
    }
}

impl<G: GraphicsContext, B> Drop for ShaderProgram<G, B> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
