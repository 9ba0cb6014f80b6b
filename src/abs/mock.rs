//! A recording [`GraphicsContext`] for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use glam::{Mat4, Vec4};

use super::context::{BufferTarget, GraphicsContext};
use crate::error::ShaderStage;

/// A GL call as observed by [`MockContext`]. Object handles are plain counters.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, u32, usize),
    BindVertexArray(Option<u32>),
    VertexAttrib { location: u32, components: i32 },
    UniformMat4 { location: u32, value: [f32; 16] },
    UniformI32 { location: u32, value: i32 },
    BindTexture { unit: u32, texture: Option<u32> },
    UploadRgba { texture: u32, width: u32, height: u32, mipmaps: bool },
    Viewport(u32, u32),
    Clear { color: [f32; 4], depth: f32 },
    DrawTriangles(usize),
}

/// Names the mock program exposes, in slot order.
const ACTIVE_NAMES: [&str; 5] = ["a_position", "a_tex_coord", "u_projection", "u_model_view", "u_sampler"];

#[derive(Default)]
pub struct MockContext {
    next_id: Cell<u32>,
    pub calls: RefCell<Vec<Call>>,
    pub live_shaders: RefCell<HashSet<u32>>,
    pub live_programs: RefCell<HashSet<u32>>,
    pub live_textures: RefCell<HashSet<u32>>,
    pub live_buffers: RefCell<HashSet<u32>>,
    pub live_vertex_arrays: RefCell<HashSet<u32>>,
    /// How many more buffers may be created before allocation fails.
    pub buffer_budget: Cell<Option<usize>>,
    pub fail_link: Cell<bool>,
    pub fail_texture_creation: Cell<bool>,
    /// Names that the linked program will not expose.
    pub missing: RefCell<HashSet<String>>,
}

impl MockContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn slot(&self, name: &str) -> Option<u32> {
        if self.missing.borrow().contains(name) {
            return None;
        }
        ACTIVE_NAMES.iter().position(|n| *n == name).map(|i| i as u32)
    }
}

impl GraphicsContext for MockContext {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type UniformLocation = u32;

    fn create_shader(&self, _stage: ShaderStage) -> Result<u32, String> {
        let id = self.next();
        self.live_shaders.borrow_mut().insert(id);
        Ok(id)
    }

    fn compile_shader(&self, _shader: u32, source: &str) -> bool {
        source.contains("void main")
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        "0:1: syntax error: missing entry point".to_string()
    }

    fn delete_shader(&self, shader: u32) {
        self.live_shaders.borrow_mut().remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.next();
        self.live_programs.borrow_mut().insert(id);
        Ok(id)
    }

    fn attach_shader(&self, _program: u32, _shader: u32) {}

    fn detach_shader(&self, _program: u32, _shader: u32) {}

    fn link_program(&self, _program: u32) -> bool {
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: u32) -> String {
        "error: varying v_tex_coord not written".to_string()
    }

    fn delete_program(&self, program: u32) {
        self.live_programs.borrow_mut().remove(&program);
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.slot(name)
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.slot(name)
    }

    fn uniform_mat4(&self, location: &u32, value: &Mat4) {
        self.record(Call::UniformMat4 {
            location: *location,
            value: value.to_cols_array(),
        });
    }

    fn uniform_i32(&self, location: &u32, value: i32) {
        self.record(Call::UniformI32 {
            location: *location,
            value,
        });
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if let Some(budget) = self.buffer_budget.get() {
            if budget == 0 {
                return Err("out of memory".to_string());
            }
            self.buffer_budget.set(Some(budget - 1));
        }
        let id = self.next();
        self.live_buffers.borrow_mut().insert(id);
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, buffer: u32, data: &[u8]) {
        self.record(Call::BufferData(target, buffer, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.live_buffers.borrow_mut().remove(&buffer);
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.next();
        self.live_vertex_arrays.borrow_mut().insert(id);
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.live_vertex_arrays.borrow_mut().remove(&vertex_array);
    }

    fn vertex_attrib_f32(&self, location: u32, components: i32) {
        self.record(Call::VertexAttrib { location, components });
    }

    fn create_texture(&self) -> Result<u32, String> {
        if self.fail_texture_creation.get() {
            return Err("out of memory".to_string());
        }
        let id = self.next();
        self.live_textures.borrow_mut().insert(id);
        Ok(id)
    }

    fn bind_texture(&self, unit: u32, texture: Option<u32>) {
        self.record(Call::BindTexture { unit, texture });
    }

    fn upload_rgba(&self, texture: u32, width: u32, height: u32, data: &[u8], mipmaps: bool) {
        assert_eq!(data.len(), (width * height * 4) as usize);
        self.record(Call::UploadRgba {
            texture,
            width,
            height,
            mipmaps,
        });
    }

    fn delete_texture(&self, texture: u32) {
        self.live_textures.borrow_mut().remove(&texture);
    }

    fn viewport(&self, width: u32, height: u32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear(&self, color: Vec4, depth: f32) {
        self.record(Call::Clear {
            color: color.to_array(),
            depth,
        });
    }

    fn draw_triangles(&self, index_count: usize) {
        self.record(Call::DrawTriangles(index_count));
    }
}
