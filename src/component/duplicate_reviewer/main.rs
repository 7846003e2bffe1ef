use super::cluster_preview::{open_preview, render_preview};
use super::perceptual_index::{DuplicateMap, hash_images};
use super::review_session::{Cluster, ReviewSession, ReviewSummary};
use crate::component::path_prompt::{prompt_directory, remember_path};
use crate::config::Config;
use crate::tools::{ImageInfo, LabelFont, scan_image_files, validate_directory_exists};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Input;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 重複圖片審查元件
pub struct DuplicateReviewer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl DuplicateReviewer {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Review Duplicate Images ===").cyan().bold());

        let Some(image_dir) = prompt_directory(&self.config.settings, "Image folder to de-duplicate")?
        else {
            return Ok(());
        };
        validate_directory_exists(&image_dir)?;
        remember_path(&self.config.settings, &image_dir);

        let images = scan_image_files(&image_dir, &self.config.file_type_table)?;
        println!("\nAll images in the directory:");
        for path in &images {
            match ImageInfo::read(path) {
                Ok(info) => println!("{}", info.describe()),
                Err(e) => println!("{} {e:#}", style("Error:").red()),
            }
        }

        println!("\nPress Enter to continue with duplicate detection...");
        Term::stdout().read_line()?;

        let hashed = hash_images(&images, &self.shutdown_signal);
        println!("Finding duplicates...");
        let review = &self.config.settings.duplicate_review;
        let map = DuplicateMap::from_hashes(&hashed, review.max_distance);
        println!("Number of images processed: {}", map.image_count());
        println!("Number of duplicate sets found: {}", map.duplicate_set_count());

        if map.duplicate_set_count() == 0 {
            println!("{}", style("No duplicates found to review.").green());
            return Ok(());
        }

        let font = if review.show_preview {
            let composite = &self.config.settings.composite;
            LabelFont::load(composite.font_path.as_deref(), composite.font_size)
        } else {
            None
        };

        let mut session = ReviewSession::new(&image_dir);
        let summary = session.review(&map, &self.shutdown_signal, |cluster| {
            let preview = if review.show_preview {
                show_preview(&image_dir, cluster, font.as_ref())
            } else {
                None
            };

            let answer = Input::<String>::new()
                .with_prompt("Enter the number of the image to delete (or press Enter to skip)")
                .allow_empty(true)
                .interact_text();

            if let Some(path) = preview {
                fs::remove_file(&path).ok();
            }
            Ok(answer?)
        })?;

        print_summary(&summary);
        Ok(())
    }
}

/// 預覽失敗不影響審查
fn show_preview(image_dir: &Path, cluster: &Cluster, font: Option<&LabelFont>) -> Option<PathBuf> {
    let result = render_preview(image_dir, cluster, font).and_then(|preview| open_preview(&preview));
    match result {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("無法產生預覽圖: {e:#}");
            None
        }
    }
}

fn print_summary(summary: &ReviewSummary) {
    println!();
    println!("{}", style("=== Review Summary ===").cyan().bold());
    println!("  Sets reviewed: {}", summary.clusters_reviewed);
    println!("  Deleted: {}", style(summary.deleted.len()).red());
    for name in &summary.deleted {
        println!("    - {name}");
    }
    println!("  Skipped: {}", summary.skipped);
}
