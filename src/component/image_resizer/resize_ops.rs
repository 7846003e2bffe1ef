//! 單張與成對圖片縮放
//!
//! 超出範圍才縮放（Lanczos），否則直接複製原檔

use super::bounding_box::BoundingBox;
use crate::config::FileTypeTable;
use crate::tools::{ensure_directory_exists, file_name_string, is_same_location, scan_image_files};
use anyhow::{Context, Result, bail};
use console::style;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    pub bounding_box: BoundingBox,
    pub jpeg_quality: u8,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            jpeg_quality: 95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeOutcome {
    Resized {
        output: PathBuf,
        width: u32,
        height: u32,
    },
    Copied {
        output: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    Resized {
        hq_output: PathBuf,
        lq_output: PathBuf,
    },
    Copied {
        hq_output: PathBuf,
        lq_output: PathBuf,
    },
}

#[derive(Debug, Default)]
pub struct ResizeSummary {
    pub total: usize,
    pub resized: usize,
    pub copied: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// 依副檔名存檔；JPEG 使用指定品質
fn save_image(image: &DynamicImage, path: &Path, jpeg_quality: u8) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Unknown image format for {}", path.display()))?;

    if format == ImageFormat::Jpeg {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
        image
            .to_rgb8()
            .write_with_encoder(encoder)
            .with_context(|| format!("Failed to encode {}", path.display()))?;
    } else {
        image
            .save_with_format(path, format)
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }
    Ok(())
}

/// 以原格式存檔，失敗時改存 `<stem>.png`
fn save_with_png_fallback(
    image: &DynamicImage,
    output_dir: &Path,
    file_name: &str,
    jpeg_quality: u8,
) -> Result<PathBuf> {
    let output = output_dir.join(file_name);
    match save_image(image, &output, jpeg_quality) {
        Ok(()) => Ok(output),
        Err(e) => {
            warn!("無法以原格式儲存 {file_name}: {e:#}");
            println!("Could not save {file_name} in original format. Saving as PNG.");
            if output.exists() {
                fs::remove_file(&output).ok();
            }
            let stem = Path::new(file_name)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| file_name.to_string());
            let png_output = output_dir.join(format!("{stem}.png"));
            image
                .save_with_format(&png_output, ImageFormat::Png)
                .with_context(|| format!("Failed to save {}", png_output.display()))?;
            Ok(png_output)
        }
    }
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to open image {}", path.display()))
}

fn copy_into(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let output = output_dir.join(file_name_string(source));
    // 複製到自己會把檔案截斷成 0 bytes
    if output.exists() && is_same_location(source, &output) {
        bail!("{} and {} are the same file", source.display(), output.display());
    }
    fs::copy(source, &output).with_context(|| {
        format!("Failed to copy {} -> {}", source.display(), output.display())
    })?;
    Ok(output)
}

/// 單張圖片：超出範圍就縮小，否則複製
pub fn resize_single_image(
    image_path: &Path,
    output_dir: &Path,
    options: &ResizeOptions,
) -> Result<ResizeOutcome> {
    let image = open_image(image_path)?;
    let file_name = file_name_string(image_path);

    match options.bounding_box.fit(image.width(), image.height())? {
        Some((width, height)) => {
            let resized = image.resize_exact(width, height, FilterType::Lanczos3);
            let output =
                save_with_png_fallback(&resized, output_dir, &file_name, options.jpeg_quality)?;
            Ok(ResizeOutcome::Resized {
                output,
                width,
                height,
            })
        }
        None => Ok(ResizeOutcome::Copied {
            output: copy_into(image_path, output_dir)?,
        }),
    }
}

/// 成對圖片：由 HQ 尺寸決定，LQ 固定為 HQ 的四分之一
pub fn resize_image_pair(
    hq_path: &Path,
    lq_path: &Path,
    output_hq_dir: &Path,
    output_lq_dir: &Path,
    options: &ResizeOptions,
) -> Result<PairOutcome> {
    let hq_image = open_image(hq_path)?;
    let lq_image = open_image(lq_path)?;

    match options
        .bounding_box
        .fit_pair(hq_image.width(), hq_image.height())?
    {
        Some(dims) => {
            let hq_resized = hq_image.resize_exact(dims.hq.0, dims.hq.1, FilterType::Lanczos3);
            let lq_resized = lq_image.resize_exact(dims.lq.0, dims.lq.1, FilterType::Lanczos3);

            let hq_output = save_with_png_fallback(
                &hq_resized,
                output_hq_dir,
                &file_name_string(hq_path),
                options.jpeg_quality,
            )?;
            let lq_output = save_with_png_fallback(
                &lq_resized,
                output_lq_dir,
                &file_name_string(lq_path),
                options.jpeg_quality,
            )?;
            Ok(PairOutcome::Resized {
                hq_output,
                lq_output,
            })
        }
        None => Ok(PairOutcome::Copied {
            hq_output: copy_into(hq_path, output_hq_dir)?,
            lq_output: copy_into(lq_path, output_lq_dir)?,
        }),
    }
}

/// 處理整個資料夾的單張縮放
pub fn resize_directory(
    input_dir: &Path,
    output_dir: &Path,
    options: &ResizeOptions,
    file_type_table: &FileTypeTable,
    shutdown_signal: &AtomicBool,
) -> Result<ResizeSummary> {
    if is_same_location(input_dir, output_dir) {
        bail!("Output directory must differ from the input directory");
    }
    ensure_directory_exists(output_dir)?;
    let images = scan_image_files(input_dir, file_type_table)?;
    println!("Found {} potential images to process.", images.len());

    let mut summary = ResizeSummary {
        total: images.len(),
        ..ResizeSummary::default()
    };

    for image_path in &images {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            break;
        }

        let name = file_name_string(image_path);
        match resize_single_image(image_path, output_dir, options) {
            Ok(ResizeOutcome::Resized { width, height, .. }) => {
                println!("Resized {name} -> {width}x{height}");
                summary.resized += 1;
            }
            Ok(ResizeOutcome::Copied { .. }) => {
                println!("{name} does not require resizing. Copied original.");
                summary.copied += 1;
            }
            Err(e) => {
                error!("縮放失敗 {}: {e:#}", image_path.display());
                println!("{} {name}: {e:#}", style("Error processing").red());
                summary.errors += 1;
            }
        }
    }

    info!(
        "單張縮放完成 - 縮放: {}, 複製: {}, 錯誤: {}",
        summary.resized, summary.copied, summary.errors
    );
    Ok(summary)
}

/// 處理 HQ/LQ 兩個資料夾的成對縮放
pub fn resize_pair_directories(
    hq_input_dir: &Path,
    lq_input_dir: &Path,
    output_hq_dir: &Path,
    output_lq_dir: &Path,
    options: &ResizeOptions,
    file_type_table: &FileTypeTable,
    shutdown_signal: &AtomicBool,
) -> Result<ResizeSummary> {
    if is_same_location(hq_input_dir, lq_input_dir) {
        bail!("HQ and LQ input directories must differ");
    }
    if is_same_location(output_hq_dir, output_lq_dir) {
        bail!("HQ and LQ output directories must differ");
    }
    for output in [output_hq_dir, output_lq_dir] {
        if is_same_location(output, hq_input_dir) || is_same_location(output, lq_input_dir) {
            bail!("Output directory {} is also an input directory", output.display());
        }
    }
    ensure_directory_exists(output_hq_dir)?;
    ensure_directory_exists(output_lq_dir)?;

    let hq_images = scan_image_files(hq_input_dir, file_type_table)?;
    println!("Found {} potential HQ images to process.", hq_images.len());

    let mut summary = ResizeSummary {
        total: hq_images.len(),
        ..ResizeSummary::default()
    };

    for hq_path in &hq_images {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            break;
        }

        let name = file_name_string(hq_path);
        let lq_path = lq_input_dir.join(&name);
        if !lq_path.exists() {
            println!(
                "Skipping HQ image {name}: corresponding LQ image not found at {}",
                lq_path.display()
            );
            summary.skipped += 1;
            continue;
        }

        match resize_image_pair(hq_path, &lq_path, output_hq_dir, output_lq_dir, options) {
            Ok(PairOutcome::Resized { .. }) => {
                println!("Resized image pair: {name}");
                summary.resized += 1;
            }
            Ok(PairOutcome::Copied { .. }) => {
                println!("Image pair {name} does not require resizing. Copied originals.");
                summary.copied += 1;
            }
            Err(e) => {
                error!("成對縮放失敗 {name}: {e:#}");
                println!("{} {name}: {e:#}", style("Error processing pair").red());
                summary.errors += 1;
            }
        }
    }

    info!(
        "成對縮放完成 - 縮放: {}, 複製: {}, 跳過: {}, 錯誤: {}",
        summary.resized, summary.copied, summary.skipped, summary.errors
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_image(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([10, 200, 30]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_small_image_is_copied_byte_for_byte() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("small.png");
        let out_dir = temp_dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        write_image(&input, 64, 48);

        let outcome = resize_single_image(&input, &out_dir, &ResizeOptions::default()).unwrap();
        let ResizeOutcome::Copied { output } = outcome else {
            panic!("expected copy");
        };
        assert_eq!(fs::read(&input).unwrap(), fs::read(&output).unwrap());
    }

    #[test]
    fn test_large_image_is_resized_into_box() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("large.jpg");
        let out_dir = temp_dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();
        write_image(&input, 200, 100);

        let options = ResizeOptions {
            bounding_box: BoundingBox::new(50, 50),
            jpeg_quality: 95,
        };
        let outcome = resize_single_image(&input, &out_dir, &options).unwrap();
        let ResizeOutcome::Resized { output, width, height } = outcome else {
            panic!("expected resize");
        };
        assert_eq!((width, height), (50, 25));
        assert_eq!(image::image_dimensions(&output).unwrap(), (50, 25));
        assert_eq!(output, out_dir.join("large.jpg"));
    }

    #[test]
    fn test_pair_keeps_quarter_ratio() {
        let temp_dir = TempDir::new().unwrap();
        let hq = temp_dir.path().join("hq.png");
        let lq = temp_dir.path().join("lq.png");
        let out_hq = temp_dir.path().join("out_hq");
        let out_lq = temp_dir.path().join("out_lq");
        fs::create_dir(&out_hq).unwrap();
        fs::create_dir(&out_lq).unwrap();
        write_image(&hq, 400, 200);
        write_image(&lq, 100, 50);

        let options = ResizeOptions {
            bounding_box: BoundingBox::new(150, 150),
            jpeg_quality: 95,
        };
        let outcome = resize_image_pair(&hq, &lq, &out_hq, &out_lq, &options).unwrap();
        let PairOutcome::Resized {
            hq_output,
            lq_output,
        } = outcome
        else {
            panic!("expected resize");
        };
        // 400x200 * 0.375 = 150x75 -> 148x72
        assert_eq!(image::image_dimensions(&hq_output).unwrap(), (148, 72));
        assert_eq!(image::image_dimensions(&lq_output).unwrap(), (37, 18));
    }

    #[test]
    fn test_pair_directories_skip_missing_lq() {
        let temp_dir = TempDir::new().unwrap();
        let hq_dir = temp_dir.path().join("hq");
        let lq_dir = temp_dir.path().join("lq");
        fs::create_dir(&hq_dir).unwrap();
        fs::create_dir(&lq_dir).unwrap();
        write_image(&hq_dir.join("a.png"), 16, 16);
        write_image(&lq_dir.join("a.png"), 4, 4);
        write_image(&hq_dir.join("b.png"), 16, 16);

        let table = crate::config::Config::load_embedded_file_type_table().unwrap();
        let summary = resize_pair_directories(
            &hq_dir,
            &lq_dir,
            &temp_dir.path().join("new/hq"),
            &temp_dir.path().join("new/lq"),
            &ResizeOptions::default(),
            &table,
            &AtomicBool::new(false),
        )
        .unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.skipped, 1);
        assert!(temp_dir.path().join("new/lq/a.png").exists());
        assert!(!temp_dir.path().join("new/hq/b.png").exists());

        let shared_output = temp_dir.path().join("new/both");
        let shared = resize_pair_directories(
            &hq_dir,
            &lq_dir,
            &shared_output,
            &shared_output,
            &ResizeOptions::default(),
            &table,
            &AtomicBool::new(false),
        );
        assert!(shared.is_err());
        assert!(!shared_output.join("a.png").exists());

        let into_input = resize_pair_directories(
            &hq_dir,
            &lq_dir,
            &hq_dir,
            &temp_dir.path().join("new/lq2"),
            &ResizeOptions::default(),
            &table,
            &AtomicBool::new(false),
        );
        assert!(into_input.is_err());
    }

    #[test]
    fn test_output_same_as_input_keeps_originals() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("images");
        fs::create_dir(&dir).unwrap();
        let small = dir.join("small.png");
        write_image(&small, 32, 32);
        let before = fs::read(&small).unwrap();

        let table = crate::config::Config::load_embedded_file_type_table().unwrap();
        let result = resize_directory(
            &dir,
            &dir.join("."),
            &ResizeOptions::default(),
            &table,
            &AtomicBool::new(false),
        );
        assert!(result.is_err());
        assert_eq!(fs::read(&small).unwrap(), before);

        let copy = resize_single_image(&small, &dir, &ResizeOptions::default());
        assert!(copy.is_err());
        assert_eq!(fs::read(&small).unwrap(), before);
    }
}
