//! # tradecard-render
//!
//! The tradecard rendering engine. Takes trade rows and an asset directory and
//! produces one RGBA frame per timeline index. CPU only, single-threaded:
//! frames are drawn sequentially in playback order.

pub mod assets;
pub mod compositor;
pub mod image_loader;
pub mod text;
pub mod timeline;

pub use assets::{Asset, AssetHandle, AssetResolver};
pub use compositor::{Cell, FrameCompositor, PlannedRow, RenderPlan};
pub use text::TextRenderer;
pub use timeline::{RenderResult, Timeline};
