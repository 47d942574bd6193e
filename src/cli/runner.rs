use tracing::{info, warn};

use stickercut::api::{load_poses, process_directory_to_dir, process_sheet_to_dir};
use stickercut::core::params::{CutParams, KeyingMode, KeyingParams, SheetParams};
use stickercut::types::GridLayout;

use super::args::CliArgs;
use super::errors::AppError;

fn parse_key_color(value: &str) -> Result<[u8; 3], AppError> {
    let invalid = || AppError::InvalidKeyColor {
        value: value.to_string(),
    };
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 {
        return Err(invalid());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
    Ok([r, g, b])
}

fn build_params(args: &CliArgs) -> Result<SheetParams, AppError> {
    let target_size = if args.size == "original" {
        None
    } else {
        let parsed_size = args.size.parse::<usize>().map_err(|_| AppError::InvalidSize {
            size: args.size.clone(),
        })?;

        if parsed_size == 0 {
            return Err(AppError::ZeroSize { size: parsed_size });
        }

        Some(parsed_size)
    };

    let keying = if args.no_keying {
        KeyingMode::Disabled
    } else {
        KeyingMode::Enabled(KeyingParams {
            key_color: parse_key_color(&args.key_color)?,
            tolerance: args.tolerance,
            edge_smoothing: !args.no_edge_smoothing,
            spill_correction: !args.no_spill_correction,
        })
    };

    Ok(SheetParams {
        layout: GridLayout::new(args.rows, args.cols),
        keying,
        cut: CutParams {
            padding: args.padding,
            output_format: args.format,
            transparent_background: !args.opaque,
            size: target_size,
        },
    })
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let poses = load_poses(&args.poses).map_err(AppError::Pipeline)?;
    let params = build_params(&args)?;

    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report =
            process_directory_to_dir(&input_dir, &output_dir, &poses, &params, true)?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        let report = process_sheet_to_dir(&input, &poses, &output_dir, &params)?;
        if !report.processing.suspect_cells.is_empty() {
            warn!(
                "Suspect cells (empty or over-keyed): {:?}",
                report.processing.suspect_cells
            );
        }
        info!(
            "Successfully processed: {:?} -> {:?}\n",
            input, report.out_dir
        );
    }

    Ok(())
}
