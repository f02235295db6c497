/// Bytes per pixel of every frame buffer: 8-bit RGBA.
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA8 raster, row-major, no padding between rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl FrameBuffer {
    /// A fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width as usize) * (height as usize) * BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    /// A buffer filled with one color.
    pub fn solid(width: u32, height: u32, color: &crate::Color) -> Self {
        let pixel = color.to_rgba8();
        Self {
            data: pixel.repeat((width as usize) * (height as usize)),
            width,
            height,
        }
    }

    /// Pixels as 4-byte RGBA chunks in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(BYTES_PER_PIXEL)
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL)
    }

    /// The pixel at (x, y), or None outside the buffer.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[i..i + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Overwrite the pixel at (x, y). Outside the buffer is a no-op.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        }
    }

    /// Overwrite a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: [u8; 4]) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width as i32).min(self.width as i32);
        let y1 = y.saturating_add(height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize * BYTES_PER_PIXEL;
        for py in y0 as usize..y1 as usize {
            let start = py * stride + x0 as usize * BYTES_PER_PIXEL;
            let end = py * stride + x1 as usize * BYTES_PER_PIXEL;
            for d in self.data[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                d.copy_from_slice(&rgba);
            }
        }
    }

    /// Alpha-composite `src` with its top-left corner at (dx, dy), clipped to
    /// this buffer. Integer math only, so output is bit-exact across runs.
    pub fn composite_over(&mut self, src: &FrameBuffer, dx: i32, dy: i32) {
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = dx.saturating_add(src.width as i32).min(self.width as i32);
        let y1 = dy.saturating_add(src.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let len = (x1 - x0) as usize * BYTES_PER_PIXEL;
        let src_stride = src.width as usize * BYTES_PER_PIXEL;
        let dst_stride = self.width as usize * BYTES_PER_PIXEL;

        for y in y0..y1 {
            let src_start = (y - dy) as usize * src_stride + (x0 - dx) as usize * BYTES_PER_PIXEL;
            let dst_start = y as usize * dst_stride + x0 as usize * BYTES_PER_PIXEL;
            let src_row = &src.data[src_start..src_start + len];
            let dst_row = &mut self.data[dst_start..dst_start + len];

            for (s, d) in src_row
                .chunks_exact(BYTES_PER_PIXEL)
                .zip(dst_row.chunks_exact_mut(BYTES_PER_PIXEL))
            {
                blend_over(s, d);
            }
        }
    }
}

/// Source-over for one straight-alpha pixel.
fn blend_over(s: &[u8], d: &mut [u8]) {
    let sa = s[3] as u32;
    match sa {
        0 => {}
        255 => d.copy_from_slice(s),
        _ => {
            let da = d[3] as u32;
            let inv = 255 - sa;
            let out_a = sa + da * inv / 255;
            if out_a == 0 {
                return;
            }
            for c in 0..3 {
                let v = (s[c] as u32 * sa * 255 + d[c] as u32 * da * inv) / (out_a * 255);
                d[c] = v as u8;
            }
            d[3] = out_a as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_new_is_transparent() {
        let fb = FrameBuffer::new(3, 2);
        assert_eq!(fb.data.len(), 3 * 2 * 4);
        assert!(fb.pixels().all(|p| p == [0, 0, 0, 0]));
    }

    #[test]
    fn test_solid_fills_every_pixel() {
        let fb = FrameBuffer::solid(2, 2, &Color::from_rgb8(40, 44, 52));
        assert_eq!(fb.pixels().count(), 4);
        assert!(fb.pixels().all(|p| p == [40, 44, 52, 255]));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.set_pixel(5, 5, [128, 64, 32, 255]);
        assert_eq!(fb.get_pixel(5, 5), Some([128, 64, 32, 255]));
        assert_eq!(fb.get_pixel(10, 0), None);
        assert_eq!(fb.get_pixel(0, 10), None);
        fb.set_pixel(10, 10, [1, 1, 1, 1]);
    }

    #[test]
    fn test_composite_opaque_replaces() {
        let mut dst = FrameBuffer::solid(4, 4, &Color::BLUE);
        let src = FrameBuffer::solid(2, 2, &Color::RED);
        dst.composite_over(&src, 1, 1);
        assert_eq!(dst.get_pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(dst.get_pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(dst.get_pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(dst.get_pixel(3, 3), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_composite_transparent_keeps_destination() {
        let mut dst = FrameBuffer::solid(4, 4, &Color::WHITE);
        dst.composite_over(&FrameBuffer::new(2, 2), 0, 0);
        assert_eq!(dst.get_pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_composite_half_alpha_blends() {
        let mut dst = FrameBuffer::solid(1, 1, &Color::WHITE);
        let mut src = FrameBuffer::new(1, 1);
        src.set_pixel(0, 0, [255, 0, 0, 128]);
        dst.composite_over(&src, 0, 0);

        let [r, g, b, a] = dst.get_pixel(0, 0).unwrap_or_default();
        assert_eq!(r, 255);
        assert!(g > 100 && g < 150);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_composite_clips_negative_and_overflowing_offsets() {
        let mut dst = FrameBuffer::solid(4, 4, &Color::BLACK);
        let src = FrameBuffer::solid(3, 3, &Color::WHITE);
        dst.composite_over(&src, -2, 2);
        assert_eq!(dst.get_pixel(0, 2), Some([255, 255, 255, 255]));
        assert_eq!(dst.get_pixel(0, 3), Some([255, 255, 255, 255]));
        assert_eq!(dst.get_pixel(1, 2), Some([0, 0, 0, 255]));
        assert_eq!(dst.get_pixel(0, 1), Some([0, 0, 0, 255]));

        // Entirely outside: nothing happens.
        dst.composite_over(&src, 10, 10);
        dst.composite_over(&src, -3, 0);
    }

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut fb = FrameBuffer::solid(10, 4, &Color::BLACK);
        fb.fill_rect(-5, 2, 100, 2, [80, 80, 80, 255]);
        assert_eq!(fb.get_pixel(0, 2), Some([80, 80, 80, 255]));
        assert_eq!(fb.get_pixel(9, 3), Some([80, 80, 80, 255]));
        assert_eq!(fb.get_pixel(0, 1), Some([0, 0, 0, 255]));
        fb.fill_rect(20, 0, 2, 2, [1, 2, 3, 255]);
    }
}
