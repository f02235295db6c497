//! Draws one complete trade sheet frame.
//!
//! Rendering happens in two steps. [`FrameCompositor::plan`] resolves every
//! item of every row into a [`Cell`] once, loading icons from disk.
//! [`FrameCompositor::draw`] then paints a frame from that plan for a given
//! timeline index without touching the filesystem again.

use std::collections::HashMap;
use std::sync::Arc;

use tradecard_core::frame::FrameBuffer;
use tradecard_core::{Color, Layout, TradeRow};

use crate::assets::{Asset, AssetResolver};
use crate::text::TextRenderer;

/// What an item draws as, decided once per item per render.
#[derive(Debug, Clone)]
pub enum Cell {
    /// The item's icon, animated along the timeline.
    Visual(Arc<Asset>),
    /// The item's identifier, drawn as text because no icon was usable.
    Text(String),
}

impl Cell {
    /// Frames this cell contributes to the timeline.
    pub fn frame_count(&self) -> usize {
        match self {
            Cell::Visual(asset) => asset.frame_count(),
            Cell::Text(_) => 1,
        }
    }

    /// Horizontal advance after drawing this cell.
    pub fn pitch(&self, layout: &Layout) -> i32 {
        match self {
            Cell::Visual(_) => layout.visual_pitch,
            Cell::Text(_) => layout.text_pitch,
        }
    }
}

/// A trade row with every item resolved.
#[derive(Debug, Clone, Default)]
pub struct PlannedRow {
    pub want: Vec<Cell>,
    pub offer: Vec<Cell>,
}

impl PlannedRow {
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.want.iter().chain(self.offer.iter())
    }
}

/// Resolved rows for one render. Built per request and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct RenderPlan {
    rows: Vec<PlannedRow>,
}

impl RenderPlan {
    pub fn rows(&self) -> &[PlannedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(PlannedRow::cells)
    }
}

/// Paints trade sheets with a fixed layout.
///
/// Holds no per-render state: the same compositor can render any number of
/// row lists, and `render(rows, i)` always yields the same pixels for the same
/// inputs and asset directory contents.
pub struct FrameCompositor {
    layout: Layout,
    resolver: AssetResolver,
    text: TextRenderer,
}

impl FrameCompositor {
    pub fn new(layout: Layout, resolver: AssetResolver, text: TextRenderer) -> Self {
        Self {
            layout,
            resolver,
            text,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Resolve every item of `rows`. Each distinct identifier is loaded once.
    pub fn plan(&self, rows: &[TradeRow]) -> RenderPlan {
        let mut loaded: HashMap<String, Option<Arc<Asset>>> = HashMap::new();
        let mut cell_for = |identifier: &String| -> Cell {
            let asset = match loaded.get(identifier) {
                Some(asset) => asset.clone(),
                None => {
                    let asset = self
                        .resolver
                        .lookup(identifier, self.layout.cell_size)
                        .map(Arc::new);
                    loaded.insert(identifier.clone(), asset.clone());
                    asset
                }
            };
            match asset {
                Some(asset) => Cell::Visual(asset),
                None => Cell::Text(identifier.clone()),
            }
        };

        let rows = rows
            .iter()
            .map(|row| PlannedRow {
                want: row.want.iter().map(|id| cell_for(id)).collect(),
                offer: row.offer.iter().map(|id| cell_for(id)).collect(),
            })
            .collect();

        RenderPlan { rows }
    }

    /// Paint the frame at `frame_index` from a prepared plan.
    pub fn draw(&self, plan: &RenderPlan, frame_index: usize) -> FrameBuffer {
        let layout = &self.layout;
        let height = layout.canvas_height(plan.len());
        let mut canvas = FrameBuffer::solid(layout.width, height, &layout.background);

        for (i, row) in plan.rows().iter().enumerate() {
            let top = layout.row_top(i);

            self.draw_text(
                &mut canvas,
                &layout.want_label,
                layout.want_label_x,
                top + layout.text_y,
                &layout.want_color,
            );
            self.draw_side(&mut canvas, &row.want, layout.want_items_x, top, frame_index);

            self.draw_text(
                &mut canvas,
                &layout.offer_label,
                layout.offer_label_x,
                top + layout.text_y,
                &layout.offer_color,
            );
            self.draw_side(&mut canvas, &row.offer, layout.offer_items_x, top, frame_index);

            canvas.fill_rect(
                0,
                layout.divider_top(i),
                layout.width,
                layout.divider_thickness,
                layout.divider_color.to_rgba8(),
            );
        }

        canvas
    }

    /// Resolve `rows` and paint the frame at `frame_index`.
    pub fn render(&self, rows: &[TradeRow], frame_index: usize) -> FrameBuffer {
        self.draw(&self.plan(rows), frame_index)
    }

    fn draw_side(
        &self,
        canvas: &mut FrameBuffer,
        cells: &[Cell],
        start_x: i32,
        row_top: i32,
        frame_index: usize,
    ) {
        let layout = &self.layout;
        let mut x = start_x;
        for cell in cells {
            match cell {
                Cell::Visual(asset) => {
                    canvas.composite_over(asset.frame_at(frame_index), x, row_top + layout.visual_y);
                }
                Cell::Text(label) => {
                    self.draw_text(canvas, label, x, row_top + layout.text_y, &layout.text_color);
                }
            }
            x += cell.pitch(layout);
        }
    }

    fn draw_text(&self, canvas: &mut FrameBuffer, text: &str, x: i32, y: i32, color: &Color) {
        let glyphs = self.text.render_text(text, self.layout.font_size, color);
        canvas.composite_over(&glyphs, x, y);
    }
}
