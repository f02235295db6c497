//! One color table for a whole animation.
//!
//! The palette comes from the first frame only and every later frame is
//! mapped onto it. Background, labels and dividers therefore keep the same
//! index in every frame and cannot shift color between frames. Colors that
//! only appear in later frames are approximated by their nearest entry.

use std::collections::{HashMap, HashSet};

use color_quant::NeuQuant;
use tradecard_core::frame::FrameBuffer;

/// GIF color tables hold at most 256 entries.
pub const MAX_COLORS: usize = 256;

/// NeuQuant sampling factor: 1 is slowest/best, 30 fastest.
const SAMPLE_FACTOR: i32 = 10;

pub struct SharedPalette {
    colors: Vec<[u8; 3]>,
    exact: HashMap<[u8; 3], u8>,
    quantizer: Option<NeuQuant>,
}

impl SharedPalette {
    /// Derive the palette from `frame`.
    ///
    /// A frame with at most 256 distinct colors keeps them exactly, in order
    /// of first appearance. Busier frames are reduced with NeuQuant.
    pub fn from_frame(frame: &FrameBuffer) -> Self {
        match distinct_colors(frame) {
            Some(colors) => {
                let exact = colors
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (*c, i as u8))
                    .collect();
                Self {
                    colors,
                    exact,
                    quantizer: None,
                }
            }
            None => {
                let rgba = to_rgba(frame);
                let quantizer = NeuQuant::new(SAMPLE_FACTOR, MAX_COLORS, &rgba);
                let colors: Vec<[u8; 3]> = quantizer
                    .color_map_rgb()
                    .chunks_exact(3)
                    .map(|c| [c[0], c[1], c[2]])
                    .collect();
                let mut exact = HashMap::new();
                for (i, c) in colors.iter().enumerate() {
                    exact.entry(*c).or_insert(i as u8);
                }
                Self {
                    colors,
                    exact,
                    quantizer: Some(quantizer),
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// True when the palette holds the first frame's colors without loss.
    pub fn is_exact(&self) -> bool {
        self.quantizer.is_none()
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// The palette as packed RGB triples, as GIF color tables expect.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flatten().copied().collect()
    }

    /// Palette index for a color.
    pub fn index_of(&self, rgb: [u8; 3]) -> u8 {
        if let Some(&index) = self.exact.get(&rgb) {
            return index;
        }
        match &self.quantizer {
            Some(nq) => nq.index_of(&[rgb[0], rgb[1], rgb[2], 255]) as u8,
            None => self.nearest(rgb),
        }
    }

    /// Map every pixel of `frame` to a palette index. Alpha is ignored; frames
    /// are opaque canvases.
    pub fn index_frame(&self, frame: &FrameBuffer) -> Vec<u8> {
        let mut memo: HashMap<[u8; 3], u8> = HashMap::new();
        frame
            .pixels()
            .map(|p| {
                let rgb = [p[0], p[1], p[2]];
                *memo.entry(rgb).or_insert_with(|| self.index_of(rgb))
            })
            .collect()
    }

    // Ties resolve to the lowest index.
    fn nearest(&self, rgb: [u8; 3]) -> u8 {
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (i, c) in self.colors.iter().enumerate() {
            let dist: u32 = (0..3)
                .map(|k| {
                    let d = c[k] as i32 - rgb[k] as i32;
                    (d * d) as u32
                })
                .sum();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best as u8
    }
}

/// Distinct RGB colors in first-appearance order, or None past 256.
fn distinct_colors(frame: &FrameBuffer) -> Option<Vec<[u8; 3]>> {
    let mut seen: HashSet<[u8; 3]> = HashSet::new();
    let mut colors = Vec::new();
    for p in frame.pixels() {
        let rgb = [p[0], p[1], p[2]];
        if seen.insert(rgb) {
            if colors.len() == MAX_COLORS {
                return None;
            }
            colors.push(rgb);
        }
    }
    Some(colors)
}

fn to_rgba(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .pixels()
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect()
}
