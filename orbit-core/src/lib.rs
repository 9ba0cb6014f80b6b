//! The GL-independent core of Orbit View. This crate contains everything
//! that can be computed without a graphics context: sphere generation,
//! the orbital motion of the bodies, camera parameters and configuration.

pub mod camera;
pub mod config;
pub mod mesh;
pub mod orbit;
