use super::bounding_box::BoundingBox;
use super::resize_ops::{ResizeOptions, ResizeSummary, resize_directory, resize_pair_directories};
use crate::component::path_prompt::{prompt_directory, prompt_text_path, remember_path};
use crate::config::Config;
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::style;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 圖片縮放元件（單張 / HQ-LQ 成對）
pub struct ImageResizer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl ImageResizer {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    fn options(&self) -> ResizeOptions {
        let resize = &self.config.settings.resize;
        ResizeOptions {
            bounding_box: BoundingBox::new(resize.max_width, resize.max_height),
            jpeg_quality: resize.jpeg_quality,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Resize Images ===").cyan().bold());

        let options = self.options();
        println!(
            "{}",
            style(format!(
                "Bounding box: {}x{}",
                options.bounding_box.max_width, options.bounding_box.max_height
            ))
            .dim()
        );

        let modes = ["Single images", "HQ/LQ pairs (4x)"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select resize mode")
            .items(&modes)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => self.run_single(&options),
            Some(1) => self.run_pair(&options),
            _ => Ok(()),
        }
    }

    fn run_single(&self, options: &ResizeOptions) -> Result<()> {
        let Some(input_dir) = prompt_directory(&self.config.settings, "Input image folder")? else {
            return Ok(());
        };
        validate_directory_exists(&input_dir)?;
        remember_path(&self.config.settings, &input_dir);

        let output_dir = prompt_text_path("Output folder", Some("./new/resized_single"))?;

        let summary = resize_directory(
            &input_dir,
            &output_dir,
            options,
            &self.config.file_type_table,
            &self.shutdown_signal,
        )?;
        self.print_summary(&summary);
        Ok(())
    }

    fn run_pair(&self, options: &ResizeOptions) -> Result<()> {
        let hq_input = prompt_text_path("HQ input folder", Some("./og/hq"))?;
        let lq_input = prompt_text_path("LQ input folder", Some("./og/lq"))?;
        validate_directory_exists(&hq_input)?;
        validate_directory_exists(&lq_input)?;

        let hq_output = prompt_text_path("HQ output folder", Some("./new/hq"))?;
        let lq_output = prompt_text_path("LQ output folder", Some("./new/lq"))?;

        let summary = resize_pair_directories(
            &hq_input,
            &lq_input,
            &hq_output,
            &lq_output,
            options,
            &self.config.file_type_table,
            &self.shutdown_signal,
        )?;
        self.print_summary(&summary);
        Ok(())
    }

    fn print_summary(&self, summary: &ResizeSummary) {
        println!();
        println!("{}", style("=== Resize Summary ===").cyan().bold());
        println!("  Total: {}", summary.total);
        println!("  Resized: {}", style(summary.resized).green());
        println!("  Copied unchanged: {}", style(summary.copied).green());
        if summary.skipped > 0 {
            println!("  Skipped (no LQ pair): {}", style(summary.skipped).yellow());
        }
        if summary.errors > 0 {
            println!("  Errors: {}", style(summary.errors).red());
        }
    }
}
