//! The two-body scene and its per-frame draw routine.

use std::sync::Arc;

use glam::{Mat4, Vec4};
use orbit_core::{camera::Perspective, config::Config, mesh::SphereMesh, orbit::OrbitRule};

use crate::abs::*;
use crate::error::OrbitError;

const SPHERE_VERT: &str = include_str!("shaders/sphere/vert.glsl");
const SPHERE_FRAG: &str = include_str!("shaders/sphere/frag.glsl");

const CLEAR_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
const CLEAR_DEPTH: f32 = 1.0;
const SAMPLER_UNIT: u32 = 0;

/// Slots of the sphere shader.
pub struct SphereBindings<G: GraphicsContext> {
    pub position: Option<u32>,
    pub tex_coord: Option<u32>,
    pub projection: Option<G::UniformLocation>,
    pub model_view: Option<G::UniformLocation>,
    pub sampler: Option<G::UniformLocation>,
}

impl<G: GraphicsContext> ProgramBindings<G> for SphereBindings<G> {
    fn resolve(gl: &G, program: G::Program) -> Self {
        Self {
            position: attrib_slot(gl, program, "a_position"),
            tex_coord: attrib_slot(gl, program, "a_tex_coord"),
            projection: uniform_slot(gl, program, "u_projection"),
            model_view: uniform_slot(gl, program, "u_model_view"),
            sampler: uniform_slot(gl, program, "u_sampler"),
        }
    }
}

/// A textured sphere following an [`OrbitRule`].
pub struct CelestialBody<G: GraphicsContext> {
    pub name: &'static str,
    pub texture: Texture<G>,
    pub orbit: OrbitRule,
}

/// The matrices a body is drawn with in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFrame {
    pub projection: Mat4,
    pub model_view: Mat4,
}

/// Owns every GPU resource of the scene and draws it once per tick.
pub struct SceneRenderer<G: GraphicsContext> {
    gl: Arc<G>,
    program: ShaderProgram<G, SphereBindings<G>>,
    mesh: Mesh<G>,
    bodies: Vec<CelestialBody<G>>,
    camera: Perspective,
    viewport: (u32, u32),
}

impl<G: GraphicsContext> SceneRenderer<G> {
    /// Builds the program, the shared sphere and both bodies, and queues their textures.
    pub fn new(
        gl: &Arc<G>,
        loader: &TextureLoader<G>,
        config: &Config,
        viewport: (u32, u32),
    ) -> Result<Self, OrbitError> {
        let program = ShaderProgram::from_sources(gl, SPHERE_VERT, SPHERE_FRAG)?;
        let mesh = Mesh::new(gl, &SphereMesh::generate(config.sphere))?;

        let bodies = vec![
            CelestialBody {
                name: "planet",
                texture: loader.load(TextureSource::Path(config.textures.planet.clone()))?,
                orbit: OrbitRule::PLANET,
            },
            CelestialBody {
                name: "moon",
                texture: loader.load(TextureSource::Path(config.textures.moon.clone()))?,
                orbit: OrbitRule::MOON,
            },
        ];

        for body in &bodies {
            log::debug!("Queued {} texture", body.name);
        }
        gl.viewport(viewport.0, viewport.1);
        log::info!(
            "Scene ready: {} bodies, {} indices per sphere, viewport {}x{}",
            bodies.len(),
            mesh.index_count(),
            viewport.0,
            viewport.1
        );

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            mesh,
            bodies,
            camera: config.camera,
            viewport,
        })
    }

    pub fn bodies(&self) -> &[CelestialBody<G>] {
        &self.bodies
    }

    /// Computes the matrices of every body at scaled time `t`, in draw order.
    pub fn frame(&self, t: f32) -> Vec<BodyFrame> {
        let (width, height) = self.viewport;
        self.bodies
            .iter()
            .map(|body| BodyFrame {
                projection: self.camera.projection(width, height),
                model_view: body.orbit.transform(t).model_view(),
            })
            .collect()
    }

    /// Draws one frame at scaled time `t`.
    ///
    /// Finished texture decodes are uploaded first; bodies whose texture is still
    /// pending are drawn with the placeholder.
    pub fn render(&mut self, t: f32) {
        for body in &mut self.bodies {
            body.texture.poll();
        }

        self.gl.clear(CLEAR_COLOR, CLEAR_DEPTH);

        for (body, frame) in self.bodies.iter().zip(self.frame(t)) {
            self.draw_body(body, &frame);
        }
    }

    fn draw_body(&self, body: &CelestialBody<G>, frame: &BodyFrame) {
        let bindings = self.program.bindings();

        self.program.use_program();
        self.mesh.bind_vertex_streams(bindings.position, bindings.tex_coord);
        self.program.set_uniform(bindings.projection.as_ref(), frame.projection);
        self.program.set_uniform(bindings.model_view.as_ref(), frame.model_view);

        body.texture.bind(SAMPLER_UNIT);
        self.program.set_uniform(bindings.sampler.as_ref(), SAMPLER_UNIT as i32);

        self.mesh.draw();
    }
}
