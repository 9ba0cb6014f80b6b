//! Scene rendering: the textured planet and moon.

pub mod scene;
