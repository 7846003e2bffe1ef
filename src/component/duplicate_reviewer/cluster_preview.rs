//! 重複組預覽圖：各圖並排，上方標題、下方檔案資訊

use super::review_session::Cluster;
use crate::tools::{ImageInfo, LabelFont, describe_command};
use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use uuid::Uuid;

const THUMBNAIL_HEIGHT: u32 = 480;
const THUMBNAIL_WIDTH: u32 = 960;
const MIN_PANEL_WIDTH: u32 = 160;
const GAP: u32 = 12;
const TEXT_PADDING: u32 = 6;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

struct PreviewPanel {
    title: String,
    thumbnail: RgbImage,
    info: [String; 3],
}

/// 等比例縮到 `THUMBNAIL_WIDTH` x `THUMBNAIL_HEIGHT` 之內；已在範圍內則回傳 `None`
fn thumbnail_size(width: u32, height: u32) -> Option<(u32, u32)> {
    if width <= THUMBNAIL_WIDTH && height <= THUMBNAIL_HEIGHT {
        return None;
    }
    let (w, h) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(THUMBNAIL_WIDTH), u64::from(THUMBNAIL_HEIGHT));
    // 寬度先碰到上限時以寬度為準，否則以高度為準
    let (new_w, new_h) = if w * max_h >= h * max_w {
        (max_w, (h * max_w / w).max(1))
    } else {
        ((w * max_h / h).max(1), max_h)
    };
    Some((new_w as u32, new_h as u32))
}

fn thumbnail_of(path: &Path) -> Result<RgbImage> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image {}", path.display()))?;
    Ok(match thumbnail_size(image.width(), image.height()) {
        Some((width, height)) => image
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgb8(),
        None => image.to_rgb8(),
    })
}

/// 繪製預覽圖；沒有字型時只有圖片
pub fn render_preview(image_dir: &Path, cluster: &Cluster, font: Option<&LabelFont>) -> Result<RgbImage> {
    let panels = cluster
        .members()
        .enumerate()
        .map(|(index, name)| {
            let path = image_dir.join(name);
            Ok(PreviewPanel {
                title: if index == 0 {
                    "Original".to_string()
                } else {
                    format!("Duplicate {index}")
                },
                thumbnail: thumbnail_of(&path)?,
                info: ImageInfo::read(&path)?.lines(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let line_height = font.map_or(0, |f| f.line_height() + TEXT_PADDING);
    let title_height = line_height;
    let info_height = line_height * 3;

    let panel_widths: Vec<u32> = panels
        .iter()
        .map(|p| p.thumbnail.width().max(MIN_PANEL_WIDTH))
        .collect();
    let image_height = panels.iter().map(|p| p.thumbnail.height()).max().unwrap_or(1);

    let width = panel_widths.iter().sum::<u32>() + GAP * (panels.len() as u32 + 1);
    let height = GAP * 2 + title_height + image_height + info_height;
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    let mut x = GAP;
    for (panel, panel_width) in panels.iter().zip(&panel_widths) {
        let image_x = x + (panel_width - panel.thumbnail.width()) / 2;
        imageops::replace(
            &mut canvas,
            &panel.thumbnail,
            i64::from(image_x),
            i64::from(GAP + title_height),
        );

        if let Some(font) = font {
            let centered = |text: &str| {
                let text_width = font.text_width(text).min(*panel_width);
                (x + (panel_width - text_width) / 2) as i32
            };
            font.draw_text(&mut canvas, TEXT_COLOR, centered(&panel.title), GAP as i32, &panel.title);

            let info_top = GAP + title_height + image_height + TEXT_PADDING;
            for (row, line) in panel.info.iter().enumerate() {
                let y = info_top + row as u32 * line_height;
                font.draw_text(&mut canvas, TEXT_COLOR, centered(line), y as i32, line);
            }
        }

        x += panel_width + GAP;
    }

    Ok(canvas)
}

/// 存成暫存檔並以系統預設程式開啟，回傳暫存檔路徑
pub fn open_preview(preview: &RgbImage) -> Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("dedup_preview_{}.png", Uuid::new_v4()));
    preview
        .save(&path)
        .with_context(|| format!("Failed to save preview {}", path.display()))?;

    let mut cmd = viewer_command(&path);
    debug!("開啟預覽: {}", describe_command(&cmd));
    if let Err(e) = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        warn!("無法開啟預覽圖 {}: {e}", path.display());
        println!("Preview saved to {}", path.display());
    }
    Ok(path)
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
