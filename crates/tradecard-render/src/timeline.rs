//! Shared timeline across items with different animation lengths.

use tradecard_core::frame::FrameBuffer;
use tradecard_core::hash::{self, ContentHash};
use tradecard_core::TradeRow;

use crate::compositor::{FrameCompositor, RenderPlan};

/// Result of a complete render.
pub struct RenderResult {
    /// All rendered frames in playback order.
    pub frames: Vec<FrameBuffer>,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl RenderResult {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Content hash over every frame, in order.
    pub fn content_hash(&self) -> ContentHash {
        hash::hash_frames(&self.frames)
    }

    /// Compute the content hash of a single frame by index.
    pub fn frame_hash(&self, index: usize) -> Option<ContentHash> {
        self.frames.get(index).map(hash::hash_frame)
    }
}

/// Drives the compositor once per timeline index.
pub struct Timeline;

impl Timeline {
    /// Frames needed so that every item plays at least one full cycle: the
    /// longest animation among all referenced items. Never less than 1.
    pub fn frame_count(plan: &RenderPlan) -> usize {
        plan.cells().map(|cell| cell.frame_count()).max().unwrap_or(1).max(1)
    }

    /// Render every timeline frame of `rows`, indices in increasing order.
    ///
    /// Items are resolved once for the whole timeline. Shorter animations wrap
    /// around inside it.
    pub fn render(compositor: &FrameCompositor, rows: &[TradeRow]) -> RenderResult {
        let plan = compositor.plan(rows);
        Self::render_plan(compositor, &plan)
    }

    /// Render every timeline frame of an existing plan.
    pub fn render_plan(compositor: &FrameCompositor, plan: &RenderPlan) -> RenderResult {
        let total = Self::frame_count(plan);
        tracing::debug!("Rendering {} rows over {} frames", plan.len(), total);

        let frames: Vec<FrameBuffer> = (0..total)
            .map(|index| {
                tracing::trace!("Drawing frame {}/{}", index + 1, total);
                compositor.draw(plan, index)
            })
            .collect();

        let layout = compositor.layout();
        RenderResult {
            frames,
            width: layout.width,
            height: layout.canvas_height(plan.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetResolver;
    use crate::text::TextRenderer;
    use tradecard_core::Layout;

    fn compositor() -> FrameCompositor {
        let dir = std::env::temp_dir().join("tradecard_timeline_empty");
        let _ = std::fs::create_dir_all(&dir);
        FrameCompositor::new(Layout::default(), AssetResolver::new(dir), TextRenderer::builtin())
    }

    #[test]
    fn test_no_rows_is_one_frame() {
        let c = compositor();
        let result = Timeline::render(&c, &[]);
        assert_eq!(result.frame_count(), 1);
        assert_eq!((result.width, result.height), (800, 120));
    }

    #[test]
    fn test_text_only_rows_are_one_frame() {
        let c = compositor();
        let rows = vec![
            TradeRow::new(["Sheepie"], ["Molti", "Slime"]),
            TradeRow::new(Vec::<String>::new(), ["Frog"]),
        ];
        let result = Timeline::render(&c, &rows);
        assert_eq!(result.frame_count(), 1);
        assert_eq!(result.height, 240);
        assert!(result.frame_hash(1).is_none());
    }

    #[test]
    fn test_static_frames_match_single_render() {
        let c = compositor();
        let rows = vec![TradeRow::new(["Frog"], ["Slime"])];
        let result = Timeline::render(&c, &rows);
        assert_eq!(
            result.frame_hash(0),
            Some(hash::hash_frame(&c.render(&rows, 0)))
        );
    }
}
