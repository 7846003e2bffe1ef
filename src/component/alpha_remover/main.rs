use super::flattener::flatten_directory;
use crate::component::path_prompt::{prompt_directory, prompt_text_path, remember_path};
use crate::config::Config;
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::style;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 移除透明通道元件
pub struct AlphaRemover {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl AlphaRemover {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Remove Alpha Channel ===").cyan().bold());

        let Some(input_dir) = prompt_directory(&self.config.settings, "Input image folder")? else {
            return Ok(());
        };
        validate_directory_exists(&input_dir)?;
        remember_path(&self.config.settings, &input_dir);

        let output_dir = prompt_text_path("Output folder", Some("./no_alpha"))?;
        let summary = flatten_directory(&input_dir, &output_dir, &self.shutdown_signal)?;

        println!();
        println!("{}", style("=== Processing complete ===").cyan().bold());
        println!("  Alpha removed: {}", style(summary.removed_alpha).green());
        println!("  Converted to RGB: {}", summary.converted);
        println!("  Already RGB: {}", summary.unchanged);
        if summary.errors > 0 {
            println!("  Errors: {}", style(summary.errors).red());
        }
        Ok(())
    }
}
