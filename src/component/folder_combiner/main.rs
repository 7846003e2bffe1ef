use super::combiner::{CombineSummary, DEFAULT_DESTINATION, DEFAULT_SUBFOLDERS, FolderCombiner};
use crate::component::path_prompt::{prompt_directory, prompt_text_path, remember_path};
use crate::config::Config;
use anyhow::Result;
use console::style;
use dialoguer::Input;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// 資料夾合併元件
pub struct FolderCombinerComponent {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl FolderCombinerComponent {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Combine Folders ===").cyan().bold());

        let sources = self.prompt_sources()?;
        if sources.is_empty() {
            println!("{}", style("No source folders given").yellow());
            return Ok(());
        }

        let subfolders: String = Input::new()
            .with_prompt("Paired subfolder names (comma separated)")
            .default(DEFAULT_SUBFOLDERS.join(","))
            .interact_text()?;
        let destination = prompt_text_path("Destination folder", Some(DEFAULT_DESTINATION))?;

        let combiner = FolderCombiner::new(
            sources,
            parse_name_list(&subfolders),
            destination.clone(),
            &self.shutdown_signal,
        )?;
        let summary = combiner.combine()?;
        print_summary(&summary, &destination);
        Ok(())
    }

    /// 逐一輸入來源資料夾，空白輸入結束
    fn prompt_sources(&self) -> Result<Vec<PathBuf>> {
        let mut sources = Vec::new();
        let Some(first) = prompt_directory(&self.config.settings, "First source folder")? else {
            return Ok(sources);
        };
        remember_path(&self.config.settings, &first);
        sources.push(first);

        loop {
            let next: String = Input::new()
                .with_prompt("Another source folder (Enter to finish)")
                .allow_empty(true)
                .interact_text()?;
            let next = next.trim().trim_matches('"');
            if next.is_empty() {
                break;
            }
            let path = PathBuf::from(next);
            if path.is_dir() {
                sources.push(path);
            } else {
                println!("{} {} is not a directory", style("Warning:").yellow(), next);
            }
        }
        Ok(sources)
    }
}

fn print_summary(summary: &CombineSummary, destination: &std::path::Path) {
    println!();
    println!("{}", style("=== Combine Summary ===").cyan().bold());
    println!("  Copied: {}", style(summary.copied).green());
    println!("  Renamed on collision: {}", summary.renamed);
    if summary.missing_folders > 0 {
        println!("  Missing subfolders: {}", style(summary.missing_folders).yellow());
    }
    if summary.errors > 0 {
        println!("  Errors: {}", style(summary.errors).red());
    }
    println!("  Output: {}", destination.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_list() {
        assert_eq!(parse_name_list(" hq, lq ,,x"), vec!["hq", "lq", "x"]);
        assert!(parse_name_list("  ").is_empty());
    }
}
