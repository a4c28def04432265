//! Lissajous scope library - loopback capture and audio-reactive line visuals

pub mod audio;
pub mod cli;
pub mod meter;
pub mod params;
pub mod rendering;
pub mod visual;
