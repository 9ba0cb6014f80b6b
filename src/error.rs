//! Initialization errors.
//!
//! Every variant is fatal: setup stops and the error is reported to the user.

use std::fmt;

use orbit_core::config::ConfigError;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// The kind of GPU object whose allocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Shader,
    Program,
    Buffer,
    VertexArray,
    Texture,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Shader => "shader",
            ResourceKind::Program => "program",
            ResourceKind::Buffer => "buffer",
            ResourceKind::VertexArray => "vertex array",
            ResourceKind::Texture => "texture",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrbitError {
    /// No rendering context could be obtained from the host.
    #[error("unable to initialize an OpenGL context: {0}")]
    ContextUnavailable(String),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {0}")]
    ShaderLink(String),

    #[error("failed to create {kind}: {reason}")]
    ResourceCreation { kind: ResourceKind, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OrbitError {
    pub(crate) fn resource(kind: ResourceKind) -> impl FnOnce(String) -> Self {
        move |reason| OrbitError::ResourceCreation { kind, reason }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_invalid_config_is_a_fatal_config_error() {
        let err: OrbitError = ConfigError::Invalid {
            path: PathBuf::from("config.json"),
            reason: "sphere.radius must be a positive finite number, got -1".to_string(),
        }
        .into();
        assert!(matches!(err, OrbitError::Config(ConfigError::Invalid { .. })));
        assert_eq!(
            err.to_string(),
            "invalid config config.json: sphere.radius must be a positive finite number, got -1"
        );
    }
}
