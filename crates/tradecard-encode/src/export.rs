//! Rows in, encoded images out.

use tradecard_core::hash::ContentHash;
use tradecard_core::{AnimationConfig, TradeRow, TradecardError, TradecardResult};
use tradecard_render::{FrameCompositor, RenderResult, Timeline};

use crate::gif::GifEncoder;
use crate::png::PngEncoder;

/// Playback settings of the animated export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSettings {
    /// Display time of every frame.
    pub delay_ms: u32,
    /// 0 loops forever.
    pub loop_count: u16,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            delay_ms: 120,
            loop_count: 0,
        }
    }
}

impl From<&AnimationConfig> for AnimationSettings {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            delay_ms: config.delay_ms,
            loop_count: config.loop_count,
        }
    }
}

/// Both images of one render.
#[derive(Debug, Clone)]
pub struct Exports {
    pub png: Vec<u8>,
    pub gif: Vec<u8>,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
    pub content_hash: ContentHash,
}

/// Composite PNG of `rows`: the first frame of the timeline. `None` when
/// there are no rows.
pub fn export_static(
    compositor: &FrameCompositor,
    rows: &[TradeRow],
) -> TradecardResult<Option<Vec<u8>>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let frame = compositor.render(rows, 0);
    PngEncoder::encode(&frame).map(Some)
}

/// Animated GIF of `rows` over the shared timeline. `None` when there are no
/// rows.
pub fn export_animated(
    compositor: &FrameCompositor,
    rows: &[TradeRow],
    settings: AnimationSettings,
) -> TradecardResult<Option<Vec<u8>>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let result = Timeline::render(compositor, rows);
    GifEncoder::encode(&result.frames, settings.delay_ms, settings.loop_count)
}

/// Render the timeline once and produce both images from it.
pub fn export_all(
    compositor: &FrameCompositor,
    rows: &[TradeRow],
    settings: AnimationSettings,
) -> TradecardResult<Option<Exports>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let result = Timeline::render(compositor, rows);
    encode_result(&result, settings).map(Some)
}

/// Encode both images from a finished render. A render always has at least
/// one frame; an empty one is an error rather than "nothing produced".
fn encode_result(result: &RenderResult, settings: AnimationSettings) -> TradecardResult<Exports> {
    let png = PngEncoder::encode_first(&result.frames)?
        .ok_or_else(|| TradecardError::Encode("render produced no frames".into()))?;
    let gif = GifEncoder::encode(&result.frames, settings.delay_ms, settings.loop_count)?
        .ok_or_else(|| TradecardError::Encode("GIF encoder produced no output".into()))?;

    Ok(Exports {
        png,
        gif,
        frame_count: result.frame_count(),
        width: result.width,
        height: result.height,
        content_hash: result.content_hash(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradecard_core::Layout;
    use tradecard_render::{AssetResolver, TextRenderer};

    fn compositor() -> FrameCompositor {
        let dir = std::env::temp_dir().join("tradecard_export_empty");
        let _ = std::fs::create_dir_all(&dir);
        FrameCompositor::new(Layout::default(), AssetResolver::new(dir), TextRenderer::builtin())
    }

    #[test]
    fn test_no_rows_exports_nothing() {
        let c = compositor();
        assert!(export_static(&c, &[]).unwrap().is_none());
        assert!(export_animated(&c, &[], AnimationSettings::default())
            .unwrap()
            .is_none());
        assert!(export_all(&c, &[], AnimationSettings::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_export_all_matches_single_exports() {
        let c = compositor();
        let rows = vec![TradeRow::new(["Frog"], ["Slime"])];
        let settings = AnimationSettings::default();
        let all = export_all(&c, &rows, settings).unwrap().unwrap();
        assert_eq!(Some(all.png), export_static(&c, &rows).unwrap());
        assert_eq!(Some(all.gif), export_animated(&c, &rows, settings).unwrap());
        assert_eq!(all.frame_count, 1);
        assert_eq!((all.width, all.height), (800, 120));
    }

    #[test]
    fn test_empty_render_is_an_error() {
        let result = RenderResult {
            frames: Vec::new(),
            width: 800,
            height: 120,
        };
        let err = encode_result(&result, AnimationSettings::default()).unwrap_err();
        assert!(matches!(err, TradecardError::Encode(_)));
    }

    #[test]
    fn test_settings_from_config() {
        let config = AnimationConfig {
            delay_ms: 80,
            loop_count: 3,
        };
        assert_eq!(
            AnimationSettings::from(&config),
            AnimationSettings {
                delay_ms: 80,
                loop_count: 3
            }
        );
    }
}
