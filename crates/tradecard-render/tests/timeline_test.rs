use std::fs::File;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use tradecard_core::{Layout, TradeRow};
use tradecard_render::{AssetResolver, Cell, FrameCompositor, TextRenderer, Timeline};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const YELLOW: [u8; 4] = [255, 255, 0, 255];
const MAGENTA: [u8; 4] = [255, 0, 255, 255];

/// Fresh asset directory under the system temp dir.
fn asset_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tradecard_timeline_{}", name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a GIF whose frames are solid squares of the given colors.
fn write_gif(path: &Path, colors: &[[u8; 4]]) {
    let file = File::create(path).unwrap();
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite).unwrap();
    let frames = colors.iter().map(|c| {
        Frame::from_parts(
            RgbaImage::from_pixel(8, 8, Rgba(*c)),
            0,
            0,
            Delay::from_numer_denom_ms(100, 1),
        )
    });
    encoder.encode_frames(frames).unwrap();
}

fn write_png(path: &Path, color: [u8; 4]) {
    RgbaImage::from_pixel(8, 8, Rgba(color)).save(path).unwrap();
}

fn compositor(dir: &Path) -> FrameCompositor {
    FrameCompositor::new(
        Layout::default(),
        AssetResolver::new(dir),
        TextRenderer::builtin(),
    )
}

/// Center of the first want-side cell in row 0.
fn first_want_cell_center() -> (u32, u32) {
    let layout = Layout::default();
    let half = layout.cell_size as i32 / 2;
    (
        (layout.want_items_x + half) as u32,
        (layout.row_top(0) + layout.visual_y + half) as u32,
    )
}

#[test]
fn test_frame_count_is_longest_animation() {
    let dir = asset_dir("longest");
    write_gif(&dir.join("slime.gif"), &[RED, GREEN, BLUE]);
    write_gif(&dir.join("frog.gif"), &[RED, GREEN, BLUE, YELLOW, MAGENTA]);
    write_png(&dir.join("molti.png"), RED);
    write_gif(&dir.join("bored_bean.gif"), &[RED, GREEN]);

    let c = compositor(&dir);
    let rows = vec![
        TradeRow::new(["Slime", "Molti"], ["Bored Bean"]),
        TradeRow::new(Vec::<String>::new(), ["Frog", "Sheepie"]),
    ];
    let plan = c.plan(&rows);
    assert_eq!(Timeline::frame_count(&plan), 5);

    let result = Timeline::render(&c, &rows);
    assert_eq!(result.frame_count(), 5);
    for frame in &result.frames {
        assert_eq!((frame.width, frame.height), (800, 240));
    }
}

#[test]
fn test_resolver_reports_frame_counts() {
    let dir = asset_dir("counts");
    write_gif(&dir.join("slime.gif"), &[RED, GREEN, BLUE]);
    write_png(&dir.join("molti.png"), RED);

    let resolver = AssetResolver::new(&dir);
    let slime = resolver.resolve("Slime").unwrap();
    let molti = resolver.resolve("Molti").unwrap();
    assert_eq!(resolver.frame_count(&slime), 3);
    assert_eq!(resolver.frame_count(&molti), 1);
}

#[test]
fn test_visual_wraps_modulo_own_frame_count() {
    let dir = asset_dir("wrap");
    write_gif(&dir.join("slime.gif"), &[RED, GREEN, BLUE]);
    write_gif(&dir.join("frog.gif"), &[RED, GREEN, BLUE, YELLOW, MAGENTA, RED, GREEN, BLUE]);

    let c = compositor(&dir);
    let rows = vec![TradeRow::new(["Slime"], ["Frog"])];
    let (x, y) = first_want_cell_center();

    // Timeline index 7 shows the 3-frame asset's own frame 1.
    assert_eq!(c.render(&rows, 7).get_pixel(x, y), Some(GREEN));
    assert_eq!(c.render(&rows, 1).get_pixel(x, y), Some(GREEN));
    assert_eq!(c.render(&rows, 0).get_pixel(x, y), Some(RED));
    assert_eq!(c.render(&rows, 2).get_pixel(x, y), Some(BLUE));

    let plan = c.plan(&rows);
    assert_eq!(Timeline::frame_count(&plan), 8);
}

#[test]
fn test_render_is_deterministic_with_assets() {
    let dir = asset_dir("deterministic");
    write_gif(&dir.join("slime.gif"), &[RED, GREEN, BLUE]);

    let c = compositor(&dir);
    let rows = vec![TradeRow::new(["Slime", "Sheepie"], ["Slime"])];
    let first = Timeline::render(&c, &rows);
    let second = Timeline::render(&c, &rows);
    assert_eq!(first.content_hash(), second.content_hash());
    assert_ne!(first.frame_hash(0), first.frame_hash(1));
}

#[test]
fn test_visual_and_text_cells_use_different_pitch() {
    let dir = asset_dir("pitch");
    write_png(&dir.join("molti.png"), BLUE);

    let c = compositor(&dir);
    let layout = c.layout().clone();
    let rows = vec![TradeRow::new(["Molti", "Molti"], ["Sheepie", "Molti"])];
    let plan = c.plan(&rows);
    let row = &plan.rows()[0];
    assert!(matches!(row.want[0], Cell::Visual(_)));
    assert!(matches!(row.offer[0], Cell::Text(_)));

    let fb = c.draw(&plan, 0);
    let cell_y = (layout.row_top(0) + layout.visual_y + 30) as u32;
    // Want side: two visuals, one visual pitch apart.
    let second_want = (layout.want_items_x + layout.visual_pitch + 30) as u32;
    assert_eq!(fb.get_pixel(second_want, cell_y), Some(BLUE));
    // Offer side: a text cell first, so the visual sits one text pitch in.
    let offer_visual = (layout.offer_items_x + layout.text_pitch + 30) as u32;
    assert_eq!(fb.get_pixel(offer_visual, cell_y), Some(BLUE));
}

#[test]
fn test_transparent_icon_pixels_show_background() {
    let dir = asset_dir("alpha");
    write_png(&dir.join("frog.png"), [255, 0, 0, 0]);

    let c = compositor(&dir);
    let fb = c.render(&[TradeRow::new(["Frog"], Vec::<String>::new())], 0);
    let (x, y) = first_want_cell_center();
    assert_eq!(fb.get_pixel(x, y), Some([40, 44, 52, 255]));
}

#[test]
fn test_missing_assets_render_text_and_dividers() {
    let dir = asset_dir("missing");
    let c = compositor(&dir);
    let rows = vec![
        TradeRow::new(["Sheepie"], ["Molti", "Slime"]),
        TradeRow::new(Vec::<String>::new(), ["Frog"]),
    ];
    let result = Timeline::render(&c, &rows);
    assert_eq!(result.frame_count(), 1);
    let fb = &result.frames[0];
    assert_eq!(fb.height, 240);
    assert_eq!(fb.get_pixel(10, 119), Some([80, 80, 80, 255]));
    assert_eq!(fb.get_pixel(10, 239), Some([80, 80, 80, 255]));
}
