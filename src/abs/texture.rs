//! Structs and functions for handling textures.
//!
//! A [`Texture`] exists on the GPU as soon as it is requested. Its pixels are decoded
//! on the [`TextureLoader`] worker thread and uploaded later, on the render thread,
//! when [`Texture::poll`] observes the finished decode.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use image::RgbaImage;

use super::context::GraphicsContext;
use crate::error::{OrbitError, ResourceKind};

/// Opaque mid-grey, shown until the real image is uploaded.
const PLACEHOLDER_PIXEL: [u8; 4] = [96, 96, 96, 255];

type Decoded = Result<RgbaImage, image::ImageError>;

/// Where the pixels of a texture come from.
#[derive(Debug, Clone)]
pub enum TextureSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl TextureSource {
    fn describe(&self) -> String {
        match self {
            TextureSource::Path(path) => path.display().to_string(),
            TextureSource::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }

    fn decode(&self) -> Decoded {
        let image = match self {
            TextureSource::Path(path) => image::open(path)?,
            TextureSource::Bytes(bytes) => image::load_from_memory(bytes)?,
        };
        Ok(image.to_rgba8())
    }
}

struct DecodeJob {
    source: TextureSource,
    reply: Sender<Decoded>,
}

enum TextureState {
    Pending { source: String, result: Receiver<Decoded> },
    Ready { width: u32, height: u32 },
    Failed,
}

/// Represents a texture stored on the GPU side.
pub struct Texture<G: GraphicsContext> {
    gl: Arc<G>,
    id: G::Texture,
    state: TextureState,
}

impl<G: GraphicsContext> Texture<G> {
    /// Checks for a finished decode and uploads it. Returns whether the texture is ready.
    ///
    /// Once ready (or failed) the texture never changes again.
    pub fn poll(&mut self) -> bool {
        let TextureState::Pending { source, result } = &self.state else {
            return self.is_ready();
        };

        self.state = match result.try_recv() {
            Err(TryRecvError::Empty) => return false,
            Ok(Ok(image)) => {
                let (width, height) = image.dimensions();
                self.gl.upload_rgba(self.id, width, height, image.as_raw(), true);
                log::info!("Texture {source} ready ({width}x{height})");
                TextureState::Ready { width, height }
            }
            Ok(Err(err)) => {
                log::error!("Failed to decode texture {source}: {err}");
                TextureState::Failed
            }
            Err(TryRecvError::Disconnected) => {
                log::error!("Texture worker stopped before decoding {source}");
                TextureState::Failed
            }
        };
        self.is_ready()
    }

    /// Returns whether the decoded image has been uploaded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, TextureState::Ready { .. })
    }

    /// Returns whether decoding failed. A failed texture keeps showing the placeholder.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, TextureState::Failed)
    }

    /// Returns the image size once the texture is ready.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self.state {
            TextureState::Ready { width, height } => Some((width, height)),
            _ => None,
        }
    }

    /// Returns the underlying GPU handle.
    pub fn handle(&self) -> G::Texture {
        self.id
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        self.gl.bind_texture(unit, Some(self.id));
    }
}

impl<G: GraphicsContext> Drop for Texture<G> {
    fn drop(&mut self) {
        self.gl.delete_texture(self.id);
    }
}

/// Creates textures and decodes their images off the render thread.
pub struct TextureLoader<G: GraphicsContext> {
    gl: Arc<G>,
    jobs: Option<Sender<DecodeJob>>,
    worker: Option<JoinHandle<()>>,
}

impl<G: GraphicsContext> TextureLoader<G> {
    pub fn new(gl: &Arc<G>) -> Result<Self, OrbitError> {
        let (jobs, job_receiver) = mpsc::channel::<DecodeJob>();
        let worker = thread::Builder::new()
            .name("texture-decode".to_string())
            .spawn(move || {
                while let Ok(job) = job_receiver.recv() {
                    log::debug!("Decoding texture {}", job.source.describe());
                    let result = job.source.decode();
                    if job.reply.send(result).is_err() {
                        log::debug!("Texture was dropped before its decode finished");
                    }
                }
            })
            .map_err(|e| OrbitError::resource(ResourceKind::Texture)(e.to_string()))?;

        Ok(Self {
            gl: Arc::clone(gl),
            jobs: Some(jobs),
            worker: Some(worker),
        })
    }

    /// Allocates a texture holding a placeholder pixel and queues its image for decoding.
    pub fn load(&self, source: TextureSource) -> Result<Texture<G>, OrbitError> {
        let id = self
            .gl
            .create_texture()
            .map_err(OrbitError::resource(ResourceKind::Texture))?;
        self.gl.upload_rgba(id, 1, 1, &PLACEHOLDER_PIXEL, false);

        let description = source.describe();
        let (reply, result) = mpsc::channel();
        let queued = self
            .jobs
            .as_ref()
            .is_some_and(|jobs| jobs.send(DecodeJob { source, reply }).is_ok());
        if !queued {
            log::error!("Texture worker is not running, {description} will not be loaded");
        }

        Ok(Texture {
            gl: Arc::clone(&self.gl),
            id,
            state: TextureState::Pending {
                source: description,
                result,
            },
        })
    }
}

impl<G: GraphicsContext> Drop for TextureLoader<G> {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.jobs.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::error!("Texture worker panicked");
        }
    }
}
