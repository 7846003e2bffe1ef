//! 將透明度合成到白色背景，輸出一律為 RGB PNG

use crate::tools::{ensure_directory_exists, file_name_string, list_files};
use anyhow::{Context, Result};
use console::style;
use image::{ColorType, DynamicImage, ImageFormat, Rgb, RgbImage};
use log::{error, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenAction {
    /// 有透明通道，已合成到白底
    RemovedAlpha,
    /// 灰階、16-bit 等轉為 8-bit RGB
    ConvertedToRgb,
    AlreadyRgb,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlattenSummary {
    pub removed_alpha: usize,
    pub converted: usize,
    pub unchanged: usize,
    pub errors: usize,
}

fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// 依色彩型態決定處理方式並回傳 RGB 影像
#[must_use]
pub fn flatten(image: &DynamicImage) -> (RgbImage, FlattenAction) {
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let flattened = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            Rgb([
                blend_over_white(r, a),
                blend_over_white(g, a),
                blend_over_white(b, a),
            ])
        });
        return (flattened, FlattenAction::RemovedAlpha);
    }

    if image.color() == ColorType::Rgb8 {
        (image.to_rgb8(), FlattenAction::AlreadyRgb)
    } else {
        (image.to_rgb8(), FlattenAction::ConvertedToRgb)
    }
}

#[must_use]
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    output_dir.join(format!("{stem}.png"))
}

pub fn flatten_file(input: &Path, output_dir: &Path) -> Result<FlattenAction> {
    let image =
        image::open(input).with_context(|| format!("Failed to open image {}", input.display()))?;
    let (flattened, action) = flatten(&image);
    let output = output_path(input, output_dir);
    flattened
        .save_with_format(&output, ImageFormat::Png)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    Ok(action)
}

pub fn flatten_directory(
    input_dir: &Path,
    output_dir: &Path,
    shutdown_signal: &AtomicBool,
) -> Result<FlattenSummary> {
    if !output_dir.exists() {
        println!("Creating output directory: {}", output_dir.display());
        ensure_directory_exists(output_dir)?;
    }

    let mut summary = FlattenSummary::default();
    for input in list_files(input_dir)? {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            break;
        }

        let file_name = file_name_string(&input);
        match flatten_file(&input, output_dir) {
            Ok(FlattenAction::RemovedAlpha) => {
                println!("Removed alpha channel from {file_name}.");
                summary.removed_alpha += 1;
            }
            Ok(FlattenAction::ConvertedToRgb) => {
                println!("Converted {file_name} to RGB.");
                summary.converted += 1;
            }
            Ok(FlattenAction::AlreadyRgb) => {
                println!("{file_name} already in RGB format.");
                summary.unchanged += 1;
            }
            Err(e) => {
                error!("處理失敗 {file_name}: {e:#}");
                println!("{} processing {file_name}: {e:#}", style("Error").red());
                summary.errors += 1;
            }
        }
    }
    Ok(summary)
}
