use super::loudness_probe::FfmpegInspector;
use super::sound_sorter::move_videos_with_sound;
use crate::component::path_prompt::{prompt_directory, prompt_text_path, remember_path};
use crate::config::Config;
use crate::tools::{is_program_available, validate_directory_exists};
use anyhow::{Result, bail};
use console::style;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 依音軌篩選影片元件
pub struct AudioFilter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl AudioFilter {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Move Videos With Sound ===").cyan().bold());

        let tools = &self.config.settings.tools;
        for program in [&tools.ffmpeg, &tools.ffprobe] {
            if !is_program_available(program, &["-version"]) {
                bail!("{program} is not available. Please install FFmpeg or set its path in Settings.");
            }
        }

        let Some(source) = prompt_directory(&self.config.settings, "Source folder (searched recursively)")?
        else {
            return Ok(());
        };
        validate_directory_exists(&source)?;
        remember_path(&self.config.settings, &source);

        let destination = prompt_text_path("Destination folder", Some("./with_sound"))?;

        let inspector = FfmpegInspector::new(tools.ffmpeg.clone(), tools.ffprobe.clone());
        let summary = move_videos_with_sound(
            &inspector,
            &source,
            &destination,
            &self.config.file_type_table,
            &self.shutdown_signal,
        )?;

        println!();
        println!("{}", style("=== Audio Filter Summary ===").cyan().bold());
        println!("  Moved: {}", style(summary.moved).green());
        println!("  Silent: {}", summary.silent);
        println!("  No audio stream: {}", summary.no_audio);
        if summary.errors > 0 {
            println!("  Errors: {}", style(summary.errors).red());
        }
        Ok(())
    }
}
