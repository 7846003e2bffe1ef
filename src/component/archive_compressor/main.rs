use super::bulk_zipper::{BulkZipSummary, BulkZipper, RecoveryChoice};
use super::seven_zip::SevenZip;
use super::tar_gzipper::TarGzipper;
use crate::component::path_prompt::{prompt_directory, remember_path};
use crate::config::Config;
use anyhow::Result;
use console::style;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// 資料夾封存元件
pub struct ArchiveCompressor {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

fn prompt_recovery(folder: &str, _error: &anyhow::Error) -> Result<RecoveryChoice> {
    let options = ["Skip and continue", "Retry", "Exit"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{folder} failed. What would you like to do?"))
        .items(&options)
        .default(0)
        .interact_opt()?;

    Ok(match selection {
        Some(0) => RecoveryChoice::Skip,
        Some(1) => RecoveryChoice::Retry,
        _ => RecoveryChoice::Exit,
    })
}

impl ArchiveCompressor {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== Archive Folders ===").cyan().bold());

        let modes = [
            "Tar + gzip every second-level folder",
            "Zip every folder (verify, then delete)",
        ];
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select archive mode")
            .items(&modes)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => self.run_tar_gzip(),
            Some(1) => self.run_bulk_zip(),
            _ => Ok(()),
        }
    }

    fn seven_zip(&self) -> SevenZip {
        SevenZip::new(self.config.settings.tools.seven_zip.clone())
    }

    fn run_tar_gzip(&self) -> Result<()> {
        let Some(root) = prompt_directory(&self.config.settings, "Root directory to archive")?
        else {
            return Ok(());
        };
        if !root.is_dir() {
            println!(
                "{} {} is not a valid directory",
                style("Error:").red(),
                root.display()
            );
            return Ok(());
        }
        remember_path(&self.config.settings, &root);

        let seven_zip = self.seven_zip();
        let summary = TarGzipper::new(&seven_zip, &self.shutdown_signal).archive_tree(&root)?;

        println!();
        println!("{}", style("=== Archive Summary ===").cyan().bold());
        println!("  Archived: {}", style(summary.archived).green());
        if summary.failed > 0 {
            println!("  Failed: {}", style(summary.failed).red());
        }
        Ok(())
    }

    fn run_bulk_zip(&self) -> Result<()> {
        let Some(source) = prompt_directory(&self.config.settings, "Folder containing folders to zip")?
        else {
            return Ok(());
        };
        remember_path(&self.config.settings, &source);

        let archive = &self.config.settings.archive;
        let seven_zip = self.seven_zip();
        let zipper = BulkZipper::new(
            &seven_zip,
            archive.space_margin,
            Duration::from_secs(archive.verify_delay_secs),
            &self.shutdown_signal,
        );
        let summary = zipper.zip_all(&source, prompt_recovery)?;
        print_bulk_summary(&summary);
        Ok(())
    }
}

fn print_bulk_summary(summary: &BulkZipSummary) {
    println!();
    println!("{}", style("=== Zip Summary ===").cyan().bold());
    println!("  Zipped: {}", style(summary.zipped.len()).green());
    if !summary.skipped.is_empty() {
        println!(
            "  Skipped: {} ({})",
            style(summary.skipped.len()).yellow(),
            summary.skipped.join(", ")
        );
    }
    if summary.terminated {
        println!("  {}", style("Stopped before all folders were processed").yellow());
    }
}
