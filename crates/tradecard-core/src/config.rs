use serde::{Deserialize, Serialize};

use crate::{Color, Layout, TradecardError, TradecardResult};

/// `[layout]`: canvas geometry. Defaults reproduce the classic 800px sheet.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: u32,
    pub row_height: u32,
    pub top_margin: i32,
    pub want_label: String,
    pub offer_label: String,
    pub want_label_x: i32,
    pub offer_label_x: i32,
    pub want_items_x: i32,
    pub offer_items_x: i32,
    pub text_y: i32,
    pub visual_y: i32,
    pub cell_size: u32,
    pub visual_pitch: i32,
    pub text_pitch: i32,
    pub divider_y: i32,
    pub divider_thickness: u32,
    pub font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let l = Layout::default();
        Self {
            width: l.width,
            row_height: l.row_height,
            top_margin: l.top_margin,
            want_label: l.want_label,
            offer_label: l.offer_label,
            want_label_x: l.want_label_x,
            offer_label_x: l.offer_label_x,
            want_items_x: l.want_items_x,
            offer_items_x: l.offer_items_x,
            text_y: l.text_y,
            visual_y: l.visual_y,
            cell_size: l.cell_size,
            visual_pitch: l.visual_pitch,
            text_pitch: l.text_pitch,
            divider_y: l.divider_y,
            divider_thickness: l.divider_thickness,
            font_size: l.font_size,
        }
    }
}

/// `[palette]`: hex colors (`#RRGGBB` or `#RRGGBBAA`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: String,
    pub want: String,
    pub offer: String,
    pub text: String,
    pub divider: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let l = Layout::default();
        Self {
            background: l.background.to_string(),
            want: l.want_color.to_string(),
            offer: l.offer_color.to_string(),
            text: l.text_color.to_string(),
            divider: l.divider_color.to_string(),
        }
    }
}

/// `[animation]`: GIF timing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Display time of every frame, in milliseconds.
    pub delay_ms: u32,
    /// 0 loops forever.
    pub loop_count: u16,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 120,
            loop_count: 0,
        }
    }
}

/// `[assets]`: where item icons and the label font come from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: String,
    /// TrueType/OpenType font for labels. Falls back to a built-in bitmap font.
    pub font_path: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: "assets".to_string(),
            font_path: None,
        }
    }
}

/// `[log]`: the append-only CSV record of generated sheets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "trade_analytics.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TradecardConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl TradecardConfig {
    pub fn from_toml_str(contents: &str) -> TradecardResult<Self> {
        toml::from_str(contents).map_err(|e| TradecardError::Config(e.to_string()))
    }

    pub fn load_from_file(path: &std::path::Path) -> TradecardResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
            .map_err(|e| TradecardError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_toml_string(&self) -> TradecardResult<String> {
        toml::to_string_pretty(self).map_err(|e| TradecardError::Config(e.to_string()))
    }

    /// Build the render layout, validating colors and geometry.
    pub fn layout(&self) -> TradecardResult<Layout> {
        let l = &self.layout;
        if l.width == 0 || l.row_height == 0 {
            return Err(TradecardError::Config(
                "layout width and row_height must be positive".into(),
            ));
        }
        if l.cell_size == 0 {
            return Err(TradecardError::Config("layout cell_size must be positive".into()));
        }
        if !(l.font_size > 0.0) {
            return Err(TradecardError::Config("layout font_size must be positive".into()));
        }

        let p = &self.palette;
        Ok(Layout {
            width: l.width,
            row_height: l.row_height,
            top_margin: l.top_margin,
            want_label: l.want_label.clone(),
            offer_label: l.offer_label.clone(),
            want_label_x: l.want_label_x,
            offer_label_x: l.offer_label_x,
            want_items_x: l.want_items_x,
            offer_items_x: l.offer_items_x,
            text_y: l.text_y,
            visual_y: l.visual_y,
            cell_size: l.cell_size,
            visual_pitch: l.visual_pitch,
            text_pitch: l.text_pitch,
            divider_y: l.divider_y,
            divider_thickness: l.divider_thickness,
            font_size: l.font_size,
            background: parse_color("background", &p.background)?,
            want_color: parse_color("want", &p.want)?,
            offer_color: parse_color("offer", &p.offer)?,
            text_color: parse_color("text", &p.text)?,
            divider_color: parse_color("divider", &p.divider)?,
        })
    }
}

fn parse_color(key: &str, value: &str) -> TradecardResult<Color> {
    Color::from_hex(value)
        .map_err(|e| TradecardError::Config(format!("palette.{}: {} ({:?})", key, e, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_default_layout() {
        let layout = TradecardConfig::default().layout().unwrap();
        assert_eq!(layout, Layout::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TradecardConfig::from_toml_str(
            r##"
            [layout]
            width = 1024

            [palette]
            background = "#000000"

            [animation]
            delay_ms = 80
            "##,
        )
        .unwrap();
        let layout = config.layout().unwrap();
        assert_eq!(layout.width, 1024);
        assert_eq!(layout.row_height, 120);
        assert_eq!(layout.background.to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(config.animation.delay_ms, 80);
        assert_eq!(config.animation.loop_count, 0);
        assert_eq!(config.assets.dir, "assets");
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let config = TradecardConfig::from_toml_str("[palette]\nwant = \"green\"\n").unwrap();
        let err = config.layout().unwrap_err();
        assert!(matches!(err, TradecardError::Config(_)));
        assert!(err.to_string().contains("palette.want"));
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = TradecardConfig::from_toml_str("[layout]\nwidth = 0\n").unwrap();
        assert!(config.layout().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TradecardConfig::default();
        let text = config.to_toml_string().unwrap();
        let back = TradecardConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.layout().unwrap(), config.layout().unwrap());
    }
}
