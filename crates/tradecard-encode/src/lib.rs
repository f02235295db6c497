//! # tradecard-encode
//!
//! Encoding module. Converts rendered frame buffers to an animated GIF that
//! shares one palette across all frames, and to a static PNG.

pub mod export;
pub mod gif;
pub mod palette;
pub mod png;

pub use export::{export_all, export_animated, export_static, AnimationSettings, Exports};
pub use self::gif::GifEncoder;
pub use palette::SharedPalette;
pub use self::png::PngEncoder;
