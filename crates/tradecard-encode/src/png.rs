use tradecard_core::frame::FrameBuffer;
use tradecard_core::{TradecardError, TradecardResult};

/// Still-image encoder using the `png` crate. Writes 8-bit RGB; the canvas is
/// opaque so alpha is dropped.
pub struct PngEncoder;

impl PngEncoder {
    /// Encode one frame buffer to PNG bytes.
    pub fn encode(frame: &FrameBuffer) -> TradecardResult<Vec<u8>> {
        let rgb: Vec<u8> = frame
            .pixels()
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, frame.width, frame.height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .map_err(|e| TradecardError::Encode(format!("failed to write PNG header: {}", e)))?;
            writer
                .write_image_data(&rgb)
                .map_err(|e| TradecardError::Encode(format!("failed to write PNG data: {}", e)))?;
            writer
                .finish()
                .map_err(|e| TradecardError::Encode(format!("failed to finalize PNG: {}", e)))?;
        }

        tracing::info!("Encoded {}x{} PNG ({} bytes)", frame.width, frame.height, out.len());
        Ok(out)
    }

    /// Encode the first frame of a sequence, or `Ok(None)` if there is none.
    pub fn encode_first(frames: &[FrameBuffer]) -> TradecardResult<Option<Vec<u8>>> {
        frames.first().map(Self::encode).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradecard_core::Color;

    #[test]
    fn test_png_signature() {
        let fb = FrameBuffer::solid(8, 4, &Color::from_rgb8(40, 44, 52));
        let bytes = PngEncoder::encode(&fb).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_first_of_nothing() {
        assert!(PngEncoder::encode_first(&[]).unwrap().is_none());
    }

    #[test]
    fn test_png_round_trips_pixels() {
        let mut fb = FrameBuffer::solid(3, 2, &Color::from_rgb8(40, 44, 52));
        fb.set_pixel(2, 1, [255, 100, 100, 255]);
        let bytes = PngEncoder::encode(&fb).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [40, 44, 52]);
        assert_eq!(decoded.get_pixel(2, 1).0, [255, 100, 100]);
    }
}
