//! Image loading module.
//! Decodes PNG, GIF and APNG files into FrameBuffers, one per animation frame.

use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, ImageFormat, RgbaImage};
use tradecard_core::frame::FrameBuffer;
use tradecard_core::{TradecardError, TradecardResult};

/// Convert a decoded RGBA image into a FrameBuffer without copying.
pub fn from_rgba_image(img: RgbaImage) -> FrameBuffer {
    let (width, height) = img.dimensions();
    FrameBuffer {
        data: img.into_raw(),
        width,
        height,
    }
}

/// Copy a FrameBuffer into an `image` buffer for resampling and encoding.
pub fn to_rgba_image(fb: &FrameBuffer) -> TradecardResult<RgbaImage> {
    RgbaImage::from_raw(fb.width, fb.height, fb.data.clone()).ok_or_else(|| {
        TradecardError::Render(format!(
            "buffer of {} bytes does not match {}x{}",
            fb.data.len(),
            fb.width,
            fb.height
        ))
    })
}

/// Load an image file as a single still frame. Animated files yield their
/// first frame.
pub fn load_image(path: &Path) -> TradecardResult<FrameBuffer> {
    let img = image::open(path).map_err(|e| {
        TradecardError::asset(
            format!("failed to load image '{}': {}", path.display(), e),
            path,
        )
    })?;
    Ok(from_rgba_image(img.to_rgba8()))
}

/// Decode every frame of an image file.
///
/// GIFs and animated PNGs produce one fully composited canvas per frame
/// (disposal already applied). Any other decodable still image produces a
/// single frame.
pub fn load_frames(path: &Path) -> TradecardResult<Vec<FrameBuffer>> {
    let data = std::fs::read(path)
        .map_err(|e| TradecardError::asset(format!("failed to read: {}", e), path))?;
    let asset_err = |e: image::ImageError| {
        TradecardError::asset(format!("failed to decode '{}': {}", path.display(), e), path)
    };

    let format = image::guess_format(&data).map_err(asset_err)?;
    let frames = match format {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(Cursor::new(&data[..])).map_err(asset_err)?;
            decoder.into_frames().collect_frames().map_err(asset_err)?
        }
        ImageFormat::Png => {
            let decoder = PngDecoder::new(Cursor::new(&data[..])).map_err(asset_err)?;
            if decoder.is_apng().map_err(asset_err)? {
                let apng = decoder.apng().map_err(asset_err)?;
                apng.into_frames().collect_frames().map_err(asset_err)?
            } else {
                let img = image::load_from_memory_with_format(&data, format).map_err(asset_err)?;
                return Ok(vec![from_rgba_image(img.to_rgba8())]);
            }
        }
        _ => {
            let img = image::load_from_memory_with_format(&data, format).map_err(asset_err)?;
            return Ok(vec![from_rgba_image(img.to_rgba8())]);
        }
    };

    if frames.is_empty() {
        return Err(TradecardError::asset("animation has no frames", path));
    }
    Ok(frames
        .into_iter()
        .map(|frame| from_rgba_image(frame.into_buffer()))
        .collect())
}

/// Resample a frame to exactly `width` x `height`, ignoring aspect ratio.
pub fn resize_exact(fb: &FrameBuffer, width: u32, height: u32) -> TradecardResult<FrameBuffer> {
    if fb.width == width && fb.height == height {
        return Ok(fb.clone());
    }
    let img = to_rgba_image(fb)?;
    let resized = image::imageops::resize(&img, width, height, FilterType::CatmullRom);
    Ok(from_rgba_image(resized))
}
