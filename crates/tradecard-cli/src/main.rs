mod rows;
mod trade_log;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tradecard_core::{TradeRow, TradecardConfig};
use tradecard_encode::AnimationSettings;
use tradecard_render::{AssetResolver, FrameCompositor, TextRenderer};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "tradecard.toml";
const DEFAULT_PNG: &str = "trade_image.png";
const DEFAULT_GIF: &str = "trade_image.gif";

#[derive(Parser)]
#[command(
    name = "tradecard",
    version,
    about = "tradecard: render WANT/OFFER trade rows to PNG and animated GIF"
)]
struct Cli {
    /// Path to a tradecard.toml (default: ./tradecard.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RowInput {
    /// A trade row as "want1,want2|offer1,offer2" (repeatable, top to bottom)
    #[arg(long = "row", value_name = "ROW")]
    row: Vec<String>,

    /// JSON file with [{"want": [...], "offer": [...]}] rows, placed before --row rows
    #[arg(long = "rows", value_name = "FILE")]
    rows_file: Option<PathBuf>,

    /// Directory holding item icons (default: [assets] dir from config)
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render trade rows to a static PNG and an animated GIF
    Render {
        #[command(flatten)]
        input: RowInput,

        /// Write the static image here
        #[arg(long)]
        png: Option<PathBuf>,

        /// Write the animated image here
        #[arg(long)]
        gif: Option<PathBuf>,

        /// Frame delay in milliseconds (overrides config)
        #[arg(long)]
        delay_ms: Option<u32>,

        /// Loop count, 0 = forever (overrides config)
        #[arg(long)]
        loop_count: Option<u16>,

        /// CSV trade log path (overrides config)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Do not append to the trade log
        #[arg(long)]
        no_log: bool,

        /// Draw text with the built-in bitmap font instead of a system font
        #[arg(long)]
        builtin_font: bool,
    },

    /// Show how every item resolves against the asset directory
    Check {
        #[command(flatten)]
        input: RowInput,
    },

    /// Display version and effective configuration
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            input,
            png,
            gif,
            delay_ms,
            loop_count,
            log,
            no_log,
            builtin_font,
        } => {
            let mut settings = AnimationSettings::from(&config.animation);
            if let Some(delay_ms) = delay_ms {
                settings.delay_ms = delay_ms;
            }
            if let Some(loop_count) = loop_count {
                settings.loop_count = loop_count;
            }
            let log_path = if no_log || !config.log.enabled {
                None
            } else {
                Some(log.unwrap_or_else(|| PathBuf::from(&config.log.path)))
            };
            cmd_render(
                &config,
                input,
                Outputs::new(png, gif),
                settings,
                log_path,
                builtin_font,
            )
        }
        Commands::Check { input } => cmd_check(&config, input),
        Commands::Info => cmd_info(&config, cli.config.as_deref()),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<TradecardConfig> {
    if let Some(path) = explicit {
        return TradecardConfig::load_from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()));
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        tracing::debug!("Using {}", default_path.display());
        return TradecardConfig::load_from_file(default_path)
            .with_context(|| format!("failed to load config: {}", default_path.display()));
    }
    Ok(TradecardConfig::default())
}

struct Outputs {
    png: Option<PathBuf>,
    gif: Option<PathBuf>,
}

impl Outputs {
    /// Neither path given means both images at their default names.
    fn new(png: Option<PathBuf>, gif: Option<PathBuf>) -> Self {
        if png.is_none() && gif.is_none() {
            Self {
                png: Some(PathBuf::from(DEFAULT_PNG)),
                gif: Some(PathBuf::from(DEFAULT_GIF)),
            }
        } else {
            Self { png, gif }
        }
    }
}

fn asset_dir(config: &TradecardConfig, input: &RowInput) -> PathBuf {
    input
        .assets
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.assets.dir))
}

fn build_compositor(
    config: &TradecardConfig,
    assets: PathBuf,
    builtin_font: bool,
) -> Result<FrameCompositor> {
    let layout = config.layout().context("invalid layout configuration")?;

    if !assets.is_dir() {
        tracing::warn!(
            "Asset directory {} not found; items will render as text",
            assets.display()
        );
    }

    let text = if builtin_font {
        TextRenderer::builtin()
    } else {
        match &config.assets.font_path {
            Some(path) => TextRenderer::with_font_file(Path::new(path)),
            None => TextRenderer::system(),
        }
    };

    Ok(FrameCompositor::new(layout, AssetResolver::new(assets), text))
}

fn read_rows(input: &RowInput) -> Result<Vec<TradeRow>> {
    let rows = rows::collect_rows(&input.row, input.rows_file.as_deref())?;
    if rows.is_empty() {
        anyhow::bail!("no trade rows given; use --row or --rows");
    }
    Ok(rows)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

fn cmd_render(
    config: &TradecardConfig,
    input: RowInput,
    outputs: Outputs,
    settings: AnimationSettings,
    log_path: Option<PathBuf>,
    builtin_font: bool,
) -> Result<()> {
    let start = Instant::now();
    let rows = read_rows(&input)?;
    let compositor = build_compositor(config, asset_dir(config, &input), builtin_font)?;

    println!("Rendering {} trade rows", rows.len());

    let Some(exports) = tradecard_encode::export_all(&compositor, &rows, settings)
        .map_err(|e| anyhow::anyhow!("{}", e))?
    else {
        println!("   Nothing to render.");
        return Ok(());
    };

    println!(
        "   ✓ {} frames at {}x{} (hash {})",
        exports.frame_count,
        exports.width,
        exports.height,
        exports.content_hash.short()
    );

    if let Some(path) = &outputs.png {
        write_output(path, &exports.png)?;
        println!("   ✓ PNG: {}", path.display());
    }
    if let Some(path) = &outputs.gif {
        write_output(path, &exports.gif)?;
        println!(
            "   ✓ GIF: {} ({}ms/frame, {})",
            path.display(),
            settings.delay_ms,
            match settings.loop_count {
                0 => "loops forever".to_string(),
                n => format!("{} loops", n),
            }
        );
    }

    if let Some(path) = log_path {
        let written = trade_log::append_now(&path, &rows)?;
        println!("   ✓ Logged {} rows to {}", written, path.display());
    }

    println!("   Done in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
    Ok(())
}

fn cmd_check(config: &TradecardConfig, input: RowInput) -> Result<()> {
    let rows = read_rows(&input)?;
    let layout = config.layout().context("invalid layout configuration")?;
    let resolver = AssetResolver::new(asset_dir(config, &input));

    println!("Checking {} trade rows against {}", rows.len(), resolver.root().display());

    let mut frames = 1;
    for (i, row) in rows.iter().enumerate() {
        println!("   Row {}", i + 1);
        for (side, items) in [("want", &row.want), ("offer", &row.offer)] {
            for item in items {
                match resolver.lookup(item, layout.cell_size) {
                    Some(asset) => {
                        frames = frames.max(asset.frame_count());
                        println!(
                            "      {:<5} {} → icon ({} frames)",
                            side,
                            item,
                            asset.frame_count()
                        );
                    }
                    None => println!("      {:<5} {} → text", side, item),
                }
            }
        }
    }

    println!();
    println!("   Timeline: {} frames", frames);
    Ok(())
}

fn cmd_info(config: &TradecardConfig, config_path: Option<&Path>) -> Result<()> {
    let source = match config_path {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => DEFAULT_CONFIG_FILE.to_string(),
        None => "built-in defaults".to_string(),
    };
    let font = match &config.assets.font_path {
        Some(path) => path.clone(),
        None if TextRenderer::system().is_builtin() => "built-in bitmap".to_string(),
        None => "system".to_string(),
    };

    println!("tradecard {}", env!("CARGO_PKG_VERSION"));
    println!("   Config:  {}", source);
    println!("   Font:    {}", font);
    println!("   Formats: PNG (static), GIF (animated, shared palette)");
    println!();
    print!(
        "{}",
        config
            .to_toml_string()
            .map_err(|e| anyhow::anyhow!("{}", e))?
    );
    Ok(())
}
