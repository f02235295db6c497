use std::borrow::Cow;

use tradecard_core::frame::FrameBuffer;
use tradecard_core::{TradecardError, TradecardResult};

use crate::palette::SharedPalette;

/// Animated GIF encoder using the `gif` crate with a single global palette.
pub struct GifEncoder;

impl GifEncoder {
    /// Encode a sequence of frame buffers to an animated GIF in memory.
    ///
    /// # Arguments
    /// * `frames` - Ordered sequence of frame buffers, all the same size
    /// * `delay_ms` - Display time of each frame in milliseconds
    /// * `loop_count` - Number of loops (0 = infinite)
    ///
    /// The palette is derived from the first frame. Returns `Ok(None)` when
    /// there are no frames.
    pub fn encode(
        frames: &[FrameBuffer],
        delay_ms: u32,
        loop_count: u16,
    ) -> TradecardResult<Option<Vec<u8>>> {
        let Some(first) = frames.first() else {
            tracing::debug!("No frames to encode; skipping GIF");
            return Ok(None);
        };

        let (width, height) = (first.width, first.height);
        let (gif_width, gif_height) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(TradecardError::Encode(format!(
                    "{}x{} exceeds the GIF size limit",
                    width, height
                )))
            }
        };

        let delay_cs = delay_centiseconds(delay_ms);
        let palette = SharedPalette::from_frame(first);

        let mut encoder =
            gif::Encoder::new(Vec::new(), gif_width, gif_height, &palette.to_rgb_bytes())
                .map_err(|e| TradecardError::Encode(format!("failed to start GIF: {}", e)))?;

        let repeat = match loop_count {
            0 => gif::Repeat::Infinite,
            n => gif::Repeat::Finite(n),
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| TradecardError::Encode(format!("failed to set GIF repeat: {}", e)))?;

        for (i, frame) in frames.iter().enumerate() {
            if frame.width != width || frame.height != height {
                return Err(TradecardError::Encode(format!(
                    "frame {} has dimensions {}x{}, expected {}x{}",
                    i, frame.width, frame.height, width, height
                )));
            }

            let gif_frame = gif::Frame {
                width: gif_width,
                height: gif_height,
                delay: delay_cs,
                buffer: Cow::Owned(palette.index_frame(frame)),
                ..gif::Frame::default()
            };
            encoder.write_frame(&gif_frame).map_err(|e| {
                TradecardError::Encode(format!("failed to encode GIF frame {}: {}", i, e))
            })?;
        }

        let bytes = encoder
            .into_inner()
            .map_err(|e| TradecardError::Encode(format!("failed to finalize GIF: {}", e)))?;

        tracing::info!(
            "Encoded {} frames to GIF ({}x{}, delay={}cs, {} colors)",
            frames.len(),
            width,
            height,
            delay_cs,
            palette.len(),
        );

        Ok(Some(bytes))
    }
}

/// Milliseconds to GIF centiseconds, rounded. GIF minimum is ~2cs.
fn delay_centiseconds(delay_ms: u32) -> u16 {
    let cs = delay_ms.saturating_add(5) / 10;
    cs.clamp(2, u16::MAX as u32) as u16
}
