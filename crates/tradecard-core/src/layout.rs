//! Fixed geometry and colors of a trade sheet.
//!
//! All offsets are in pixels. Per-row offsets are relative to the row's top
//! edge, horizontal offsets are absolute canvas coordinates.

use crate::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Canvas width.
    pub width: u32,
    /// Height of one trade row; the canvas is `row_height * max(1, rows)` tall.
    pub row_height: u32,
    /// Vertical offset of the first row's content.
    pub top_margin: i32,

    pub want_label: String,
    pub offer_label: String,
    pub want_label_x: i32,
    pub offer_label_x: i32,
    /// First item cell on the want side.
    pub want_items_x: i32,
    /// First item cell on the offer side.
    pub offer_items_x: i32,

    /// Row-relative y of labels and text fallbacks.
    pub text_y: i32,
    /// Row-relative y of the top edge of visual cells.
    pub visual_y: i32,
    /// Side length of the square a visual asset is scaled into.
    pub cell_size: u32,
    /// Horizontal advance after a visual cell.
    pub visual_pitch: i32,
    /// Horizontal advance after a text fallback. Wider than `visual_pitch`.
    pub text_pitch: i32,

    pub divider_y: i32,
    pub divider_thickness: u32,

    pub font_size: f32,

    pub background: Color,
    pub want_color: Color,
    pub offer_color: Color,
    pub text_color: Color,
    pub divider_color: Color,
}

impl Layout {
    /// Canvas height for a sheet of `rows` rows. Never zero.
    pub fn canvas_height(&self, rows: usize) -> u32 {
        self.row_height * rows.max(1) as u32
    }

    /// Top edge of row `index`, including the top margin.
    pub fn row_top(&self, index: usize) -> i32 {
        self.top_margin + (index as i32) * self.row_height as i32
    }

    /// First pixel row of the divider under row `index`. The line is centered
    /// on `divider_y`, so the last row's divider stays partly visible.
    pub fn divider_top(&self, index: usize) -> i32 {
        self.row_top(index) + self.divider_y - (self.divider_thickness / 2) as i32
    }
}

impl Default for Layout {
    fn default() -> Self {
        let width = 800;
        let center = width as i32 / 2;
        Self {
            width,
            row_height: 120,
            top_margin: 10,
            want_label: "WANT:".to_string(),
            offer_label: "OFFER:".to_string(),
            want_label_x: 20,
            offer_label_x: center - 80,
            want_items_x: 100,
            offer_items_x: center + 20,
            text_y: 40,
            visual_y: 20,
            cell_size: 60,
            visual_pitch: 70,
            text_pitch: 80,
            divider_y: 110,
            divider_thickness: 2,
            font_size: 24.0,
            background: Color::from_rgb8(40, 44, 52),
            want_color: Color::from_rgb8(100, 255, 100),
            offer_color: Color::from_rgb8(255, 100, 100),
            text_color: Color::WHITE,
            divider_color: Color::from_rgb8(80, 80, 80),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_height_has_one_row_minimum() {
        let layout = Layout::default();
        assert_eq!(layout.canvas_height(0), 120);
        assert_eq!(layout.canvas_height(1), 120);
        assert_eq!(layout.canvas_height(2), 240);
    }

    #[test]
    fn test_row_top_includes_margin() {
        let layout = Layout::default();
        assert_eq!(layout.row_top(0), 10);
        assert_eq!(layout.row_top(1), 130);
    }

    #[test]
    fn test_divider_visible_on_last_row() {
        let layout = Layout::default();
        assert_eq!(layout.divider_top(0), 119);
        assert_eq!(layout.divider_top(1), 239);
        assert!(layout.divider_top(1) < layout.canvas_height(2) as i32);
    }

    #[test]
    fn test_default_offer_side_is_centered() {
        let layout = Layout::default();
        assert_eq!(layout.offer_label_x, 320);
        assert_eq!(layout.offer_items_x, 420);
        assert!(layout.text_pitch > layout.visual_pitch);
    }
}
