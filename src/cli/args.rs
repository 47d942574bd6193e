use clap::Parser;
use std::path::PathBuf;

use stickercut::types::OutputFormat;

#[derive(Parser)]
#[command(name = "stickercut", version, about = "STICKERCUT CLI")]
pub struct CliArgs {
    /// Input sheet image (single sheet mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing sheet images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory for sticker files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Pose list JSON: descriptor objects or plain strings in row-major
    /// cell order (first entry is the original pose)
    #[arg(short, long)]
    pub poses: PathBuf,

    /// Grid rows
    #[arg(long, default_value_t = 3)]
    pub rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 3)]
    pub cols: usize,

    /// Pixels trimmed from every side of each grid cell
    #[arg(long, default_value_t = 0)]
    pub padding: usize,

    /// Sticker output format (png or jpeg)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::PNG)]
    pub format: OutputFormat,

    /// Background key color as a hex triplet (e.g., #00ff00)
    #[arg(long, default_value = "#00ff00")]
    pub key_color: String,

    /// Key color distance mapped to full transparency (0-255)
    #[arg(long, default_value_t = 96)]
    pub tolerance: u8,

    /// Disable soft keying at matte edges (hard cut at the tolerance)
    #[arg(long, default_value_t = false)]
    pub no_edge_smoothing: bool,

    /// Disable key spill suppression on foreground edges
    #[arg(long, default_value_t = false)]
    pub no_spill_correction: bool,

    /// Skip the chroma key pass entirely (for providers that do not emit
    /// flat-color backgrounds)
    #[arg(long, default_value_t = false)]
    pub no_keying: bool,

    /// Emit opaque stickers (keep the background in the cut cells)
    #[arg(long, default_value_t = false)]
    pub opaque: bool,

    /// Sticker size for scaling. Options:
    /// - Predefined: 512 (the common sticker canvas)
    /// - Custom: any positive integer (e.g., 256)
    /// - Original: "original" (keep cell size)
    #[arg(long, default_value = "original")]
    pub size: String,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue processing other sheets when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}
