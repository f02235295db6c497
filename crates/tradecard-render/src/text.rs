//! Text rendering module.
//! Uses fontdue for CPU-based rasterization of TrueType/OpenType fonts, with a
//! built-in 8x8 bitmap face when no font file can be loaded.

use std::path::{Path, PathBuf};

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use fontdue::{Font, FontSettings};
use tradecard_core::frame::FrameBuffer;
use tradecard_core::Color;

/// Font files probed by [`TextRenderer::system`], in order.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Native size of the bitmap glyphs, in pixels.
const BITMAP_GLYPH: u32 = 8;

enum Face {
    Outline(Box<Font>),
    Bitmap,
}

/// Rasterizes a single line of text to a FrameBuffer.
pub struct TextRenderer {
    face: Face,
}

impl TextRenderer {
    /// A renderer using the built-in bitmap face. Output does not depend on
    /// fonts installed on the host.
    pub fn builtin() -> Self {
        Self { face: Face::Bitmap }
    }

    /// Parse font bytes.
    pub fn from_font_bytes(data: Vec<u8>) -> Result<Self, String> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| format!("failed to parse font: {}", e))?;
        Ok(Self {
            face: Face::Outline(Box::new(font)),
        })
    }

    /// Load a font file.
    pub fn load_font(path: &Path) -> Result<Self, String> {
        let data = std::fs::read(path)
            .map_err(|e| format!("failed to read font file {}: {}", path.display(), e))?;
        Self::from_font_bytes(data).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Load a font file, falling back to the built-in face if it is unusable.
    pub fn with_font_file(path: &Path) -> Self {
        match Self::load_font(path) {
            Ok(renderer) => {
                tracing::debug!("Using font {}", path.display());
                renderer
            }
            Err(e) => {
                tracing::debug!("Font unavailable ({}); using built-in bitmap font", e);
                Self::builtin()
            }
        }
    }

    /// First loadable font from [`SYSTEM_FONT_CANDIDATES`], else the built-in face.
    pub fn system() -> Self {
        Self::first_available(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from))
    }

    /// First loadable font among `paths`, else the built-in face.
    pub fn first_available(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        for path in paths {
            if !path.is_file() {
                continue;
            }
            match Self::load_font(&path) {
                Ok(renderer) => {
                    tracing::debug!("Using font {}", path.display());
                    return renderer;
                }
                Err(e) => tracing::debug!("Skipping font: {}", e),
            }
        }
        tracing::debug!("No usable font found; using built-in bitmap font");
        Self::builtin()
    }

    /// True when text is drawn with the built-in bitmap face.
    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Bitmap)
    }

    /// Render one line of text. The returned buffer is transparent except for
    /// glyph coverage, and its top edge is the line's ascent.
    pub fn render_text(&self, text: &str, font_size: f32, color: &Color) -> FrameBuffer {
        if text.is_empty() {
            return FrameBuffer::new(1, 1);
        }
        match &self.face {
            Face::Outline(font) => render_outline(font, text, font_size, color.to_rgba8()),
            Face::Bitmap => render_bitmap(text, font_size, color.to_rgba8()),
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Measurements for a single line of text.
#[derive(Debug, Clone)]
struct LineMeasure {
    /// Total advance width.
    width: i32,
    /// Ascent above the baseline.
    ascent: i32,
    /// Descent below the baseline.
    descent: i32,
}

fn measure_outline(font: &Font, text: &str, font_size: f32) -> LineMeasure {
    let mut width: i32 = 0;
    let mut ascent: i32 = 0;
    let mut descent: i32 = 0;

    for ch in text.chars() {
        let metrics = font.metrics(ch, font_size);
        ascent = ascent.max(metrics.height as i32 + metrics.ymin);
        descent = descent.max(-metrics.ymin);
        width += metrics.advance_width.round() as i32;
    }

    // Font-wide metrics keep the baseline in the same place for every string,
    // so labels and item names line up.
    if let Some(line) = font.horizontal_line_metrics(font_size) {
        ascent = ascent.max(line.ascent.ceil() as i32);
        descent = descent.max((-line.descent).ceil() as i32);
    }

    LineMeasure {
        width,
        ascent,
        descent,
    }
}

fn render_outline(font: &Font, text: &str, font_size: f32, rgba: [u8; 4]) -> FrameBuffer {
    let measure = measure_outline(font, text, font_size);
    let width = measure.width.max(1) as u32;
    let height = (measure.ascent + measure.descent).max(1) as u32;
    let mut fb = FrameBuffer::new(width, height);

    let [r, g, b, a] = rgba;
    let mut cursor_x: i32 = 0;
    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, font_size);
        let glyph_x = cursor_x + metrics.xmin;
        let glyph_y = measure.ascent - (metrics.height as i32 + metrics.ymin);

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let coverage = bitmap[gy * metrics.width + gx];
                if coverage == 0 {
                    continue;
                }
                let px = glyph_x + gx as i32;
                let py = glyph_y + gy as i32;
                if px < 0 || py < 0 {
                    continue;
                }
                let alpha = (coverage as u32 * a as u32 / 255) as u8;
                // Overlapping glyph edges keep the stronger coverage.
                let existing = fb.get_pixel(px as u32, py as u32).map_or(0, |p| p[3]);
                if alpha > existing {
                    fb.set_pixel(px as u32, py as u32, [r, g, b, alpha]);
                }
            }
        }

        cursor_x += metrics.advance_width.round() as i32;
    }

    fb
}

/// Integer upscale of the 8px bitmap face for a requested point size.
fn bitmap_scale(font_size: f32) -> u32 {
    ((font_size / 12.0).round() as u32).max(1)
}

fn bitmap_glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn render_bitmap(text: &str, font_size: f32, rgba: [u8; 4]) -> FrameBuffer {
    let scale = bitmap_scale(font_size);
    let cell = BITMAP_GLYPH * scale;
    let chars = text.chars().count() as u32;
    let mut fb = FrameBuffer::new(cell * chars, cell);

    for (i, ch) in text.chars().enumerate() {
        let glyph = bitmap_glyph(ch);
        let origin_x = i as u32 * cell;
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..BITMAP_GLYPH {
                // Bit 0 is the leftmost pixel.
                if bits & (1u8 << col) == 0 {
                    continue;
                }
                fb.fill_rect(
                    (origin_x + col * scale) as i32,
                    (row as u32 * scale) as i32,
                    scale,
                    scale,
                    rgba,
                );
            }
        }
    }

    fb
}
