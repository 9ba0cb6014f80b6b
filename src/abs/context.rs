//! The graphics context seam.
//!
//! Every GL call made by the viewer goes through [`GraphicsContext`], which is
//! passed explicitly as an `Arc` to each resource. The real implementation is
//! [`glow::Context`]; tests use a recording mock.

use std::fmt::Debug;

use glam::{Mat4, Vec4};
use glow::HasContext;

use crate::error::ShaderStage;

/// Binding target of a buffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Vertex,
    Index,
}

/// The subset of OpenGL used to draw textured spheres.
pub trait GraphicsContext {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type VertexArray: Copy + Debug;
    type Texture: Copy + Debug;
    type UniformLocation: Clone + Debug;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Compiles `source` into `shader`, returning whether compilation succeeded.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Links `program`, returning whether linking succeeded.
    fn link_program(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Self::Program);
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    fn uniform_mat4(&self, location: &Self::UniformLocation, value: &Mat4);
    fn uniform_i32(&self, location: &Self::UniformLocation, value: i32);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Binds `buffer` and fills it with static data.
    fn buffer_data(&self, target: BufferTarget, buffer: Self::Buffer, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    /// Points attribute `location` at the bound vertex buffer as tightly packed floats and enables it.
    fn vertex_attrib_f32(&self, location: u32, components: i32);

    fn create_texture(&self) -> Result<Self::Texture, String>;
    /// Makes `unit` the active texture unit and binds `texture` to it.
    fn bind_texture(&self, unit: u32, texture: Option<Self::Texture>);
    /// Replaces the pixel store of `texture` with tightly packed RGBA8 data.
    fn upload_rgba(&self, texture: Self::Texture, width: u32, height: u32, data: &[u8], mipmaps: bool);
    fn delete_texture(&self, texture: Self::Texture);

    fn viewport(&self, width: u32, height: u32);
    /// Clears color and depth, and enables less-or-equal depth testing.
    fn clear(&self, color: Vec4, depth: f32);
    /// Draws a triangle list from the bound index buffer.
    fn draw_triangles(&self, index_count: usize);
}

impl GraphicsContext for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Texture = glow::Texture;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        let shader_type = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool {
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
            self.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) -> bool {
        unsafe {
            HasContext::link_program(self, program);
            self.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Self::Program) {
        unsafe { HasContext::use_program(self, Some(program)) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_mat4(&self, location: &Self::UniformLocation, value: &Mat4) {
        unsafe { self.uniform_matrix_4_f32_slice(Some(location), false, value.as_ref()) }
    }

    fn uniform_i32(&self, location: &Self::UniformLocation, value: i32) {
        unsafe { self.uniform_1_i32(Some(location), value) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, gl_target(target), buffer) }
    }

    fn buffer_data(&self, target: BufferTarget, buffer: Self::Buffer, data: &[u8]) {
        unsafe {
            HasContext::bind_buffer(self, gl_target(target), Some(buffer));
            self.buffer_data_u8_slice(gl_target(target), data, glow::STATIC_DRAW);
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn vertex_attrib_f32(&self, location: u32, components: i32) {
        unsafe {
            self.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, 0, 0);
            self.enable_vertex_attrib_array(location);
        }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { HasContext::create_texture(self) }
    }

    fn bind_texture(&self, unit: u32, texture: Option<Self::Texture>) {
        unsafe {
            self.active_texture(glow::TEXTURE0 + unit);
            HasContext::bind_texture(self, glow::TEXTURE_2D, texture);
        }
    }

    fn upload_rgba(&self, texture: Self::Texture, width: u32, height: u32, data: &[u8], mipmaps: bool) {
        unsafe {
            HasContext::bind_texture(self, glow::TEXTURE_2D, Some(texture));
            self.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            let min_filter = if mipmaps {
                self.generate_mipmap(glow::TEXTURE_2D);
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            HasContext::bind_texture(self, glow::TEXTURE_2D, None);
        }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { HasContext::delete_texture(self, texture) }
    }

    fn viewport(&self, width: u32, height: u32) {
        unsafe { HasContext::viewport(self, 0, 0, width as i32, height as i32) }
    }

    fn clear(&self, color: Vec4, depth: f32) {
        unsafe {
            self.clear_color(color.x, color.y, color.z, color.w);
            self.clear_depth_f32(depth);
            self.enable(glow::DEPTH_TEST);
            self.depth_func(glow::LEQUAL);
            HasContext::clear(self, glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn draw_triangles(&self, index_count: usize) {
        unsafe { self.draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0) }
    }
}

fn gl_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}
