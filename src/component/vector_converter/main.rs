use super::rasterizer::SvgRasterizer;
use crate::component::path_prompt::{prompt_directory, prompt_text_path, remember_path};
use crate::config::Config;
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::style;
use dialoguer::Input;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// SVG 轉 PNG 元件
pub struct VectorConverter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl VectorConverter {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Convert SVG to PNG ===").cyan().bold());

        let Some(input_dir) = prompt_directory(&self.config.settings, "Folder containing SVG files")?
        else {
            return Ok(());
        };
        if let Err(e) = validate_directory_exists(&input_dir) {
            println!("{} {e}", style("Error:").red());
            return Ok(());
        }
        remember_path(&self.config.settings, &input_dir);

        let output_dir = prompt_text_path("Output folder", Some("./png"))?;
        let width: u32 = Input::new()
            .with_prompt("Output width (px)")
            .default(self.config.settings.vector.output_width)
            .interact_text()?;

        let rasterizer = SvgRasterizer::new(self.config.settings.tools.svg_converter.clone(), width);
        let summary = rasterizer.convert_directory(
            &input_dir,
            &output_dir,
            &self.config.file_type_table,
            &self.shutdown_signal,
        )?;

        println!();
        println!(
            "Converted: {}  Errors: {}",
            style(summary.converted).green(),
            style(summary.errors).red()
        );
        Ok(())
    }
}
