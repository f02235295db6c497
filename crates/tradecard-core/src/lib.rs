//! # tradecard-core
//!
//! Core types and primitives for the tradecard renderer.
//! This crate contains the types shared across all tradecard crates:
//! trade rows, frame buffers, colors, layout constants, configuration,
//! content hashes and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod layout;
pub mod trade;

pub use config::*;

pub use color::Color;
pub use error::{TradecardError, TradecardResult};
pub use frame::FrameBuffer;
pub use layout::Layout;
pub use trade::TradeRow;
