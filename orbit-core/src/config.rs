//! Static configuration loaded once at startup.
//!
//! The file is JSON; every section falls back to its defaults, so a partial
//! file only needs the keys it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{camera::Perspective, mesh::SphereOptions};

/// Errors that can occur when loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`Config`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but holds values the viewer cannot render with.
    #[error("invalid config {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub sphere: SphereOptions,
    pub camera: Perspective,
    pub textures: TextureConfig,
    /// Log filter level, e.g. `info` or `debug`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            sphere: SphereOptions::default(),
            camera: Perspective::default(),
            textures: TextureConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orbit View".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Image locators for the two bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    pub planet: PathBuf,
    pub moon: PathBuf,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            planet: PathBuf::from("assets/earth.jpg"),
            moon: PathBuf::from("assets/moon.jpg"),
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Loads the configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Checks the sphere and camera settings, returning a description of the first bad value.
    pub fn validate(&self) -> Result<(), String> {
        let sphere = &self.sphere;
        if sphere.latitude_bands < 1 || sphere.longitude_bands < 1 {
            return Err(format!(
                "sphere needs at least 1 band in each direction, got {}x{}",
                sphere.latitude_bands, sphere.longitude_bands
            ));
        }
        positive("sphere.radius", sphere.radius)?;

        let camera = &self.camera;
        positive("camera.fov_degrees", camera.fov_degrees)?;
        if camera.fov_degrees >= 180.0 {
            return Err(format!("camera.fov_degrees must be below 180, got {}", camera.fov_degrees));
        }
        positive("camera.near", camera.near)?;
        positive("camera.far", camera.far)?;
        if camera.near >= camera.far {
            return Err(format!(
                "camera.near ({}) must be closer than camera.far ({})",
                camera.near, camera.far
            ));
        }
        Ok(())
    }

    /// Returns the default config file location, `<config dir>/orbitview/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("orbitview").join("config.json"))
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit path must exist. Without one, the default location is tried and
    /// built-in defaults are used if nothing is there.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn positive(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a positive finite number, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sphere.latitude_bands, 30);
        assert_eq!(config.sphere.longitude_bands, 30);
        assert_eq!(config.sphere.radius, 1.2);
        assert_eq!(config.camera.fov_degrees, 90.0);
        assert_eq!(config.camera.far, 120.0);
        assert_eq!(config.window.width, 1280);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "sphere": { "latitude_bands": 8 }, "log_level": "debug" }"#)
            .unwrap();
        assert_eq!(config.sphere.latitude_bands, 8);
        assert_eq!(config.sphere.longitude_bands, 30);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.textures, TextureConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "textures": { "moon": "luna.png" } }"#).unwrap();
        let config = Config::resolve(Some(&path)).unwrap();
        assert_eq!(config.textures.moon, PathBuf::from("luna.png"));
        assert_eq!(config.textures.planet, PathBuf::from("assets/earth.jpg"));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::resolve(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_degenerate_sphere_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "sphere": { "latitude_bands": 0, "radius": -1.0 } }"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(&err, ConfigError::Invalid { reason, .. } if reason.contains("band")));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let mut config = Config::default();
        config.sphere.longitude_bands = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sphere.radius = 0.0;
        assert!(config.validate().unwrap_err().contains("sphere.radius"));

        let mut config = Config::default();
        config.camera.far = f32::NAN;
        assert!(config.validate().unwrap_err().contains("camera.far"));

        let mut config = Config::default();
        config.camera.fov_degrees = -90.0;
        assert!(config.validate().unwrap_err().contains("camera.fov_degrees"));

        let mut config = Config::default();
        config.camera.near = 200.0;
        assert!(config.validate().unwrap_err().contains("closer"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }
}
