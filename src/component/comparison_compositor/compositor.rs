//! 條帶合成：各面板取一段縱向條帶，中間以黑白線分隔

use super::layout::{LABEL_PADDING, plan_strips, scaled_width};
use crate::tools::{LabelFont, ensure_directory_exists, file_name_string, list_files};
use anyhow::{Context, Result, bail};
use console::style;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use log::{error, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// 一個面板：來源資料夾與標籤
#[derive(Debug, Clone)]
pub struct Panel {
    pub label: String,
    pub directory: PathBuf,
}

impl Panel {
    pub fn new(label: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            directory: directory.into(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompositeSummary {
    pub created: usize,
    pub skipped: usize,
    pub errors: usize,
}

fn to_target_height(image: &DynamicImage, target_height: u32) -> RgbImage {
    if image.height() == target_height {
        return image.to_rgb8();
    }
    let width = scaled_width(image.width(), image.height(), target_height).max(1);
    image
        .resize_exact(width, target_height, FilterType::Lanczos3)
        .to_rgb8()
}

/// 合成單張比較圖；高度以第一張為準
pub fn compose(images: &[DynamicImage], labels: &[&str], font: Option<&LabelFont>) -> Result<RgbImage> {
    let Some(first) = images.first() else {
        bail!("No panels to compose");
    };
    let target_height = first.height();
    if target_height == 0 {
        bail!("First panel has zero height");
    }

    let panels: Vec<RgbImage> = images
        .iter()
        .map(|image| to_target_height(image, target_height))
        .collect();
    let widths: Vec<u32> = panels.iter().map(RgbImage::width).collect();
    let layout = plan_strips(&widths, target_height)?;

    let mut canvas = RgbImage::from_pixel(layout.width, layout.height, WHITE);
    let last = layout.strips.len() - 1;

    for (i, (panel, strip)) in panels.iter().zip(&layout.strips).enumerate() {
        let piece = imageops::crop_imm(panel, strip.source_x, 0, strip.width, target_height).to_image();
        imageops::replace(&mut canvas, &piece, i64::from(strip.dest_x), 0);

        if i < last {
            let separator_x = strip.dest_x + strip.width;
            for y in 0..target_height {
                canvas.put_pixel(separator_x, y, BLACK);
                canvas.put_pixel(separator_x + 1, y, WHITE);
            }
        }
    }

    if let Some(font) = font {
        for (strip, label) in layout.strips.iter().zip(labels) {
            font.draw_text_with_stroke(
                &mut canvas,
                (strip.dest_x + LABEL_PADDING) as i32,
                LABEL_PADDING as i32,
                label,
            );
        }
    }

    Ok(canvas)
}

/// 針對多個資料夾中同名的圖片產生比較圖
pub struct CompositeJob {
    panels: Vec<Panel>,
    output_dir: PathBuf,
}

impl CompositeJob {
    pub fn new(panels: Vec<Panel>, output_dir: impl Into<PathBuf>) -> Result<Self> {
        if panels.len() < 2 {
            bail!("A comparison needs at least two folders");
        }
        Ok(Self {
            panels,
            output_dir: output_dir.into(),
        })
    }

    pub fn run(&self, font: Option<&LabelFont>, shutdown_signal: &AtomicBool) -> Result<CompositeSummary> {
        ensure_directory_exists(&self.output_dir)?;

        let labels: Vec<&str> = self.panels.iter().map(|p| p.label.as_str()).collect();
        let mut summary = CompositeSummary::default();

        for file in list_files(&self.panels[0].directory)? {
            if shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止合成");
                break;
            }

            let file_name = file_name_string(&file);
            if let Some(missing) = self
                .panels
                .iter()
                .skip(1)
                .find(|panel| !panel.directory.join(&file_name).is_file())
            {
                println!(
                    "{} Corresponding {} file not found for {file_name}. Skipping.",
                    style("Warning:").yellow(),
                    missing.label
                );
                summary.skipped += 1;
                continue;
            }

            match self.compose_file(&file_name, &labels, font) {
                Ok(()) => {
                    println!("Created composite image: {file_name}");
                    summary.created += 1;
                }
                Err(e) => {
                    error!("合成失敗 {file_name}: {e:#}");
                    println!("{} processing {file_name}: {e:#}", style("Error").red());
                    summary.errors += 1;
                }
            }
        }
        Ok(summary)
    }

    fn compose_file(&self, file_name: &str, labels: &[&str], font: Option<&LabelFont>) -> Result<()> {
        let images = self
            .panels
            .iter()
            .map(|panel| open(&panel.directory.join(file_name)))
            .collect::<Result<Vec<_>>>()?;

        let composite = compose(&images, labels, font)?;
        let output = self.output_dir.join(file_name);
        composite
            .save(&output)
            .with_context(|| format!("Failed to save {}", output.display()))
    }
}

fn open(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to open image {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_two_way_composite_has_black_then_white_separator() {
        let lq = solid(100, 50, [255, 0, 0]);
        let hq = solid(100, 50, [0, 0, 255]);
        let canvas = compose(&[lq, hq], &["LQ", "HQ"], None).unwrap();

        assert_eq!(canvas.dimensions(), (102, 50));
        assert_eq!(canvas.get_pixel(0, 10), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(49, 10), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(50, 10), &BLACK);
        assert_eq!(canvas.get_pixel(51, 10), &WHITE);
        assert_eq!(canvas.get_pixel(52, 10), &Rgb([0, 0, 255]));
        assert_eq!(canvas.get_pixel(101, 49), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_three_way_composite_resizes_to_first_height() {
        let lq = solid(60, 20, [10, 10, 10]);
        let hq = solid(240, 80, [20, 20, 20]);
        let up = solid(240, 80, [30, 30, 30]);
        let canvas = compose(&[lq, hq, up], &["LQ", "HQ", "Up"], None).unwrap();

        // 全部縮放為 60x20，每段 20px
        assert_eq!(canvas.dimensions(), (20 * 3 + 2 * 2, 20));
        assert_eq!(canvas.get_pixel(20, 0), &BLACK);
        assert_eq!(canvas.get_pixel(21, 0), &WHITE);
        assert_eq!(canvas.get_pixel(42, 0), &BLACK);
        assert_eq!(canvas.get_pixel(43, 0), &WHITE);
    }

    #[test]
    fn test_job_skips_unpaired_files() {
        let temp = TempDir::new().unwrap();
        let lq_dir = temp.path().join("lq");
        let hq_dir = temp.path().join("hq");
        std::fs::create_dir_all(&lq_dir).unwrap();
        std::fs::create_dir_all(&hq_dir).unwrap();
        solid(40, 20, [1, 2, 3]).save(lq_dir.join("a.png")).unwrap();
        solid(160, 80, [4, 5, 6]).save(hq_dir.join("a.png")).unwrap();
        solid(40, 20, [1, 2, 3]).save(lq_dir.join("b.png")).unwrap();

        let out = temp.path().join("out");
        let job = CompositeJob::new(
            vec![Panel::new("LQ", &lq_dir), Panel::new("HQ", &hq_dir)],
            &out,
        )
        .unwrap();
        let summary = job.run(None, &AtomicBool::new(false)).unwrap();

        assert_eq!(
            summary,
            CompositeSummary {
                created: 1,
                skipped: 1,
                errors: 0
            }
        );
        let composite = image::open(out.join("a.png")).unwrap();
        assert_eq!(composite.width(), 20 + 20 + 2);
        assert_eq!(composite.height(), 20);
    }

    #[test]
    fn test_job_requires_two_panels() {
        assert!(CompositeJob::new(vec![Panel::new("LQ", "x")], "out").is_err());
    }
}
