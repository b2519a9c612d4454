//! Bevy plugins
//!
//! `image_copy` reads the offscreen render target back to the CPU each frame.

pub mod image_copy;

pub use image_copy::ImageCopyPlugin;
