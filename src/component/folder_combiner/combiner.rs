//! 將多個來源的成對子資料夾（hq/lq）合併到同一個目的地
//!
//! 檔名衝突時改名為 `stem_N.ext`，不覆蓋既有檔案

use crate::tools::{ensure_directory_exists, file_name_string, list_files, unique_destination};
use anyhow::{Context, Result, bail};
use console::style;
use log::{error, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub const DEFAULT_SUBFOLDERS: [&str; 2] = ["hq", "lq"];
pub const DEFAULT_DESTINATION: &str = "combined";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub copied: usize,
    pub renamed: usize,
    pub missing_folders: usize,
    pub errors: usize,
}

pub struct FolderCombiner<'a> {
    sources: Vec<PathBuf>,
    subfolders: Vec<String>,
    destination: PathBuf,
    shutdown_signal: &'a AtomicBool,
}

impl<'a> FolderCombiner<'a> {
    pub fn new(
        sources: Vec<PathBuf>,
        subfolders: Vec<String>,
        destination: PathBuf,
        shutdown_signal: &'a AtomicBool,
    ) -> Result<Self> {
        if sources.is_empty() {
            bail!("At least one source folder is required");
        }
        if subfolders.is_empty() {
            bail!("At least one subfolder name is required");
        }
        Ok(Self {
            sources,
            subfolders,
            destination,
            shutdown_signal,
        })
    }

    pub fn combine(&self) -> Result<CombineSummary> {
        for subfolder in &self.subfolders {
            ensure_directory_exists(&self.destination.join(subfolder))?;
        }

        let mut summary = CombineSummary::default();
        for source in &self.sources {
            for subfolder in &self.subfolders {
                let source_dir = source.join(subfolder);
                if !source_dir.is_dir() {
                    warn!("找不到子資料夾 {}", source_dir.display());
                    println!(
                        "{} {} does not exist, skipping",
                        style("Warning:").yellow(),
                        source_dir.display()
                    );
                    summary.missing_folders += 1;
                    continue;
                }

                let dest_dir = self.destination.join(subfolder);
                for file in list_files(&source_dir)? {
                    if self.shutdown_signal.load(Ordering::SeqCst) {
                        warn!("收到中斷訊號，停止合併");
                        return Ok(summary);
                    }

                    match copy_unique(&file, &dest_dir) {
                        Ok(renamed) => {
                            summary.copied += 1;
                            if renamed {
                                summary.renamed += 1;
                            }
                        }
                        Err(e) => {
                            error!("複製失敗 {}: {e:#}", file.display());
                            println!("{} {e:#}", style("Error:").red());
                            summary.errors += 1;
                        }
                    }
                }
            }
        }
        Ok(summary)
    }
}

/// 複製到目的資料夾，回傳是否因衝突而改名
fn copy_unique(file: &Path, dest_dir: &Path) -> Result<bool> {
    let file_name = file_name_string(file);
    let destination = unique_destination(dest_dir, &file_name);
    fs::copy(file, &destination).with_context(|| {
        format!("Failed to copy {} -> {}", file.display(), destination.display())
    })?;
    Ok(file_name_string(&destination) != file_name)
}
