use serde::{Deserialize, Serialize};

use crate::types::{GridLayout, OutputFormat};

/// Chroma keying parameters suitable for config files and presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyingParams {
    /// Background color the upstream generator was asked to emit.
    pub key_color: [u8; 3],
    /// Color-distance radius (0..=255) that maps to full transparency.
    pub tolerance: u8,
    /// Soft-key the band above `tolerance` for anti-aliased edges.
    pub edge_smoothing: bool,
    /// Suppress residual key tint on foreground edge pixels.
    pub spill_correction: bool,
}

impl Default for KeyingParams {
    fn default() -> Self {
        Self {
            // Pure green, the color the sheet prompt requests
            key_color: [0, 255, 0],
            tolerance: 96,
            edge_smoothing: true,
            spill_correction: true,
        }
    }
}

/// Whether the chroma key pass runs at all.
///
/// This is a capability of the upstream image provider (does it honor the
/// flat-background instruction?), resolved once by the caller. The pipeline
/// never infers it from pixel content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum KeyingMode {
    Enabled(KeyingParams),
    Disabled,
}

impl KeyingMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, KeyingMode::Enabled(_))
    }
}

impl Default for KeyingMode {
    fn default() -> Self {
        KeyingMode::Enabled(KeyingParams::default())
    }
}

/// Cutting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutParams {
    /// Pixels trimmed from every side of each raw grid cell.
    pub padding: usize,
    /// Encoding used when stickers are written to disk; no effect on extraction.
    pub output_format: OutputFormat,
    /// Expect an alpha channel in the cut cells; cells cut from an alpha-less
    /// sheet are flagged `no-alpha` instead of failing.
    pub transparent_background: bool,
    /// Target long side in pixels for each sticker; None keeps the cell size.
    pub size: Option<usize>,
}

impl Default for CutParams {
    fn default() -> Self {
        Self {
            padding: 0,
            output_format: OutputFormat::PNG,
            transparent_background: true,
            size: None,
        }
    }
}

/// Full per-sheet processing parameters suitable for config files and presets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetParams {
    pub layout: GridLayout,
    pub keying: KeyingMode,
    pub cut: CutParams,
}
