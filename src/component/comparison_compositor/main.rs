use super::compositor::{CompositeJob, CompositeSummary, Panel};
use crate::component::path_prompt::prompt_text_path;
use crate::config::Config;
use crate::tools::{LabelFont, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 比較圖合成元件
pub struct ComparisonCompositor {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl ComparisonCompositor {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Comparison Composites ===").cyan().bold());

        let modes = ["Two-way (LQ | HQ)", "Three-way (LQ | HQ | Upscaled)"];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select composite mode")
            .items(&modes)
            .default(0)
            .interact_opt()?;

        let (panels, default_output) = match selection {
            Some(0) => (
                vec![
                    Panel::new("LQ", prompt_text_path("LQ folder", Some("./og/lq"))?),
                    Panel::new("HQ", prompt_text_path("HQ folder", Some("./og/hq"))?),
                ],
                "./new/hq_lq_composites",
            ),
            Some(1) => (
                vec![
                    Panel::new("LQ", prompt_text_path("LQ folder", Some("./og/lq"))?),
                    Panel::new("HQ", prompt_text_path("HQ folder", Some("./og/hq"))?),
                    Panel::new("Up", prompt_text_path("Upscaled folder", Some("./up/UP"))?),
                ],
                "./new/up_hq_lq_composites",
            ),
            _ => return Ok(()),
        };

        for panel in &panels {
            validate_directory_exists(&panel.directory)?;
        }
        let output_dir = prompt_text_path("Output folder", Some(default_output))?;

        let composite = &self.config.settings.composite;
        let font = LabelFont::load(composite.font_path.as_deref(), composite.font_size);
        if font.is_none() {
            println!(
                "{}",
                style("Warning: no usable font found, labels will be omitted").yellow()
            );
        }

        let job = CompositeJob::new(panels, output_dir)?;
        let summary = job.run(font.as_ref(), &self.shutdown_signal)?;
        print_summary(&summary);
        Ok(())
    }
}

fn print_summary(summary: &CompositeSummary) {
    println!();
    println!("{}", style("=== Composite Summary ===").cyan().bold());
    println!("  Created: {}", style(summary.created).green());
    if summary.skipped > 0 {
        println!("  Skipped (missing counterpart): {}", style(summary.skipped).yellow());
    }
    if summary.errors > 0 {
        println!("  Errors: {}", style(summary.errors).red());
    }
}
