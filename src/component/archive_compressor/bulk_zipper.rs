//! 逐一將子資料夾壓成 zip，驗證後刪除原資料夾
//!
//! 任何錯誤都交給呼叫端決定：略過、重試或結束

use super::seven_zip::{ArchiveFormat, Archiver};
use crate::tools::{
    available_space, directory_size, file_name_string, has_room_for, list_subdirectories,
    validate_directory_exists,
};
use anyhow::{Context, Result, anyhow, bail};
use console::style;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// 發生錯誤時使用者的選擇
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryChoice {
    Skip,
    Retry,
    Exit,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BulkZipSummary {
    pub zipped: Vec<String>,
    pub skipped: Vec<String>,
    pub terminated: bool,
}

pub struct BulkZipper<'a, A: Archiver> {
    archiver: &'a A,
    space_margin: f64,
    verify_delay: Duration,
    shutdown_signal: &'a AtomicBool,
}

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

impl<'a, A: Archiver> BulkZipper<'a, A> {
    pub const fn new(
        archiver: &'a A,
        space_margin: f64,
        verify_delay: Duration,
        shutdown_signal: &'a AtomicBool,
    ) -> Self {
        Self {
            archiver,
            space_margin,
            verify_delay,
            shutdown_signal,
        }
    }

    /// 處理 `source_dir` 底下所有子資料夾
    pub fn zip_all(
        &self,
        source_dir: &Path,
        mut recover: impl FnMut(&str, &anyhow::Error) -> Result<RecoveryChoice>,
    ) -> Result<BulkZipSummary> {
        validate_directory_exists(source_dir)?;

        if !self.archiver.is_available() {
            bail!("7-Zip is not available. Please install it or set its path in Settings.");
        }

        let folders = list_subdirectories(source_dir)?;
        let mut summary = BulkZipSummary::default();
        if folders.is_empty() {
            println!("{}", style("No folders found to process").yellow());
            return Ok(summary);
        }

        println!("Found {} folders to process", folders.len());

        'folders: for folder in folders {
            let name = file_name_string(&folder);
            loop {
                if self.shutdown_signal.load(Ordering::SeqCst) {
                    warn!("收到中斷訊號，停止壓縮");
                    summary.terminated = true;
                    break 'folders;
                }

                let Err(e) = self.zip_folder(source_dir, &folder) else {
                    summary.zipped.push(name);
                    break;
                };

                error!("壓縮 {name} 失敗: {e:#}");
                println!("{} {e:#}", style("Error:").red());

                match recover(&name, &e)? {
                    RecoveryChoice::Skip => {
                        println!("Skipping {name}");
                        summary.skipped.push(name);
                        break;
                    }
                    RecoveryChoice::Retry => {
                        println!("Retrying {name}");
                    }
                    RecoveryChoice::Exit => {
                        println!("{}", style("Script terminated").yellow());
                        summary.terminated = true;
                        break 'folders;
                    }
                }
            }
        }

        Ok(summary)
    }

    /// 單一資料夾：空間檢查 → 壓縮 → 驗證 → 刪除
    pub fn zip_folder(&self, source_dir: &Path, folder: &Path) -> Result<PathBuf> {
        let started = Instant::now();
        let name = file_name_string(folder);
        let folder_size = directory_size(folder);

        if !has_room_for(folder_size, self.space_margin, available_space(source_dir)) {
            bail!("Insufficient disk space for {name}");
        }

        println!(
            "\nProcessing: {} ({:.2} MB)",
            style(&name).cyan(),
            folder_size as f64 / BYTES_PER_MB
        );

        let zip_path = source_dir.join(format!("{name}.zip"));
        self.archiver
            .add(&zip_path, folder, ArchiveFormat::Zip)
            .map_err(|e| anyhow!("ZIP creation failed: {e:#}"))?;

        self.verify(&zip_path)?;

        fs::remove_dir_all(folder)
            .with_context(|| format!("Failed to remove {}", folder.display()))?;
        info!("已刪除原資料夾 {name}");

        println!(
            "{} {name} in {:.2}s",
            style("Zipped").green(),
            started.elapsed().as_secs_f64()
        );
        Ok(zip_path)
    }

    fn verify(&self, zip_path: &Path) -> Result<()> {
        if !zip_path.exists() {
            bail!("ZIP file was not created: {}", zip_path.display());
        }

        if !self.verify_delay.is_zero() {
            thread::sleep(self.verify_delay);
        }

        self.archiver
            .test(zip_path)
            .map_err(|e| anyhow!("ZIP integrity test failed: {e:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::seven_zip::fake::FakeArchiver;
    use super::*;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    fn build_source(root: &Path, names: &[&str]) {
        for name in names {
            let dir = root.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("payload.bin"), vec![0u8; 64]).unwrap();
        }
    }

    fn zipper<'a>(archiver: &'a FakeArchiver, shutdown: &'a AtomicBool) -> BulkZipper<'a, FakeArchiver> {
        BulkZipper::new(archiver, 1.2, Duration::ZERO, shutdown)
    }

    fn scripted(
        choices: &[RecoveryChoice],
    ) -> impl FnMut(&str, &anyhow::Error) -> Result<RecoveryChoice> {
        let mut queue: VecDeque<RecoveryChoice> = choices.iter().copied().collect();
        move |_, _| Ok(queue.pop_front().unwrap_or(RecoveryChoice::Exit))
    }

    #[test]
    fn test_zips_and_removes_every_folder() {
        let temp = TempDir::new().unwrap();
        build_source(temp.path(), &["alpha", "beta"]);
        let archiver = FakeArchiver::default();
        let shutdown = AtomicBool::new(false);

        let summary = zipper(&archiver, &shutdown)
            .zip_all(temp.path(), scripted(&[]))
            .unwrap();

        assert_eq!(summary.zipped, vec!["alpha", "beta"]);
        assert!(summary.skipped.is_empty());
        assert!(!summary.terminated);
        assert!(temp.path().join("alpha.zip").exists());
        assert!(!temp.path().join("alpha").exists());
        assert!(!temp.path().join("beta").exists());
    }

    #[test]
    fn test_skip_keeps_folder_and_continues() {
        let temp = TempDir::new().unwrap();
        build_source(temp.path(), &["alpha", "beta"]);
        let archiver = FakeArchiver {
            failing_sources: ["alpha".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let shutdown = AtomicBool::new(false);

        let summary = zipper(&archiver, &shutdown)
            .zip_all(temp.path(), scripted(&[RecoveryChoice::Skip]))
            .unwrap();

        assert_eq!(summary.skipped, vec!["alpha"]);
        assert_eq!(summary.zipped, vec!["beta"]);
        assert!(temp.path().join("alpha/payload.bin").exists());
    }

    #[test]
    fn test_retry_can_repeat_until_verification_passes() {
        let temp = TempDir::new().unwrap();
        build_source(temp.path(), &["alpha"]);
        let archiver = FakeArchiver {
            failing_tests: 2.into(),
            ..Default::default()
        };
        let shutdown = AtomicBool::new(false);

        let summary = zipper(&archiver, &shutdown)
            .zip_all(
                temp.path(),
                scripted(&[RecoveryChoice::Retry, RecoveryChoice::Retry]),
            )
            .unwrap();

        assert_eq!(summary.zipped, vec!["alpha"]);
        let tests = archiver
            .calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with("test"))
            .count();
        assert_eq!(tests, 3);
    }

    #[test]
    fn test_failed_verification_never_deletes_source() {
        let temp = TempDir::new().unwrap();
        build_source(temp.path(), &["alpha", "beta"]);
        let archiver = FakeArchiver {
            failing_tests: 1.into(),
            ..Default::default()
        };
        let shutdown = AtomicBool::new(false);

        let summary = zipper(&archiver, &shutdown)
            .zip_all(temp.path(), scripted(&[RecoveryChoice::Exit]))
            .unwrap();

        assert!(summary.terminated);
        assert!(summary.zipped.is_empty());
        assert!(temp.path().join("alpha/payload.bin").exists());
        assert!(temp.path().join("beta/payload.bin").exists());
    }

    #[test]
    fn test_unavailable_archiver_stops_before_work() {
        let temp = TempDir::new().unwrap();
        build_source(temp.path(), &["alpha"]);
        let archiver = FakeArchiver {
            unavailable: true,
            ..Default::default()
        };
        let shutdown = AtomicBool::new(false);

        assert!(
            zipper(&archiver, &shutdown)
                .zip_all(temp.path(), scripted(&[]))
                .is_err()
        );
        assert!(archiver.calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_source_has_nothing_to_do() {
        let temp = TempDir::new().unwrap();
        let archiver = FakeArchiver::default();
        let shutdown = AtomicBool::new(false);

        let summary = zipper(&archiver, &shutdown)
            .zip_all(temp.path(), scripted(&[]))
            .unwrap();
        assert_eq!(summary, BulkZipSummary::default());
    }
}
