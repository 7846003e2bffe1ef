//! 兩層資料夾的 tar + gzip 封存
//!
//! root/T/D → root/T/D.tar → root/T/D.tar.gz，成功後才刪除來源

use super::seven_zip::{ArchiveFormat, Archiver};
use crate::tools::{file_name_string, list_subdirectories, validate_directory_exists};
use anyhow::{Context, Result};
use console::style;
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TarGzipSummary {
    pub archived: usize,
    pub failed: usize,
}

pub struct TarGzipper<'a, A: Archiver> {
    archiver: &'a A,
    shutdown_signal: &'a AtomicBool,
}

fn with_suffix(directory: &Path, suffix: &str) -> PathBuf {
    let mut name = directory.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

impl<'a, A: Archiver> TarGzipper<'a, A> {
    pub const fn new(archiver: &'a A, shutdown_signal: &'a AtomicBool) -> Self {
        Self {
            archiver,
            shutdown_signal,
        }
    }

    /// 封存 root 底下第二層的每個資料夾
    pub fn archive_tree(&self, root: &Path) -> Result<TarGzipSummary> {
        validate_directory_exists(root)?;

        let mut summary = TarGzipSummary::default();
        for top_level in list_subdirectories(root)? {
            for directory in list_subdirectories(&top_level)? {
                if self.shutdown_signal.load(Ordering::SeqCst) {
                    warn!("收到中斷訊號，停止封存");
                    return Ok(summary);
                }

                match self.archive_directory(&directory) {
                    Ok(()) => summary.archived += 1,
                    Err(e) => {
                        error!("封存失敗 {}: {e:#}", directory.display());
                        println!("{} {e:#}", style("Error:").red());
                        summary.failed += 1;
                    }
                }
            }
        }
        Ok(summary)
    }

    /// 單一資料夾：tar → 刪除資料夾 → gzip → 刪除 tar
    pub fn archive_directory(&self, directory: &Path) -> Result<()> {
        let name = file_name_string(directory);
        let tar_path = with_suffix(directory, ".tar");
        let gz_path = with_suffix(directory, ".tar.gz");

        println!("Creating {}", style(tar_path.display()).cyan());
        self.archiver
            .add(&tar_path, directory, ArchiveFormat::Tar)
            .with_context(|| format!("Failed to create {}", tar_path.display()))?;

        fs::remove_dir_all(directory)
            .with_context(|| format!("Failed to remove {}", directory.display()))?;
        info!("已刪除 {name}");

        println!("Compressing {}", style(gz_path.display()).cyan());
        self.archiver
            .add(&gz_path, &tar_path, ArchiveFormat::Gzip)
            .with_context(|| format!("Failed to create {}", gz_path.display()))?;

        fs::remove_file(&tar_path)
            .with_context(|| format!("Failed to remove {}", tar_path.display()))?;
        println!("{} {}", style("Archived").green(), gz_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::seven_zip::fake::FakeArchiver;
    use super::*;
    use tempfile::TempDir;

    fn build_tree(root: &Path) {
        for (top, inner) in [("T1", "A"), ("T1", "B"), ("T2", "C")] {
            let dir = root.join(top).join(inner);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("file.txt"), b"data").unwrap();
        }
        fs::write(root.join("loose.txt"), b"not a folder").unwrap();
    }

    #[test]
    fn test_archives_second_level_directories() {
        let temp = TempDir::new().unwrap();
        build_tree(temp.path());
        let archiver = FakeArchiver::default();
        let shutdown = AtomicBool::new(false);

        let summary = TarGzipper::new(&archiver, &shutdown)
            .archive_tree(temp.path())
            .unwrap();

        assert_eq!(summary, TarGzipSummary { archived: 3, failed: 0 });
        for (top, inner) in [("T1", "A"), ("T1", "B"), ("T2", "C")] {
            let base = temp.path().join(top);
            assert!(!base.join(inner).exists());
            assert!(!base.join(format!("{inner}.tar")).exists());
            assert!(base.join(format!("{inner}.tar.gz")).exists());
        }
        assert!(temp.path().join("loose.txt").exists());
    }

    #[test]
    fn test_failed_tar_keeps_source() {
        let temp = TempDir::new().unwrap();
        build_tree(temp.path());
        let archiver = FakeArchiver {
            failing_sources: ["B".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let shutdown = AtomicBool::new(false);

        let summary = TarGzipper::new(&archiver, &shutdown)
            .archive_tree(temp.path())
            .unwrap();

        assert_eq!(summary, TarGzipSummary { archived: 2, failed: 1 });
        assert!(temp.path().join("T1/B/file.txt").exists());
        assert!(!temp.path().join("T1/B.tar.gz").exists());
    }

    #[test]
    fn test_failed_gzip_keeps_tar() {
        let temp = TempDir::new().unwrap();
        build_tree(temp.path());
        let archiver = FakeArchiver {
            failing_sources: ["C.tar".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let shutdown = AtomicBool::new(false);

        let summary = TarGzipper::new(&archiver, &shutdown)
            .archive_tree(temp.path())
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert!(temp.path().join("T2/C.tar").exists());
        assert!(!temp.path().join("T2/C").exists());
    }

    #[test]
    fn test_rejects_missing_root() {
        let temp = TempDir::new().unwrap();
        let archiver = FakeArchiver::default();
        let shutdown = AtomicBool::new(false);
        assert!(
            TarGzipper::new(&archiver, &shutdown)
                .archive_tree(&temp.path().join("missing"))
                .is_err()
        );
    }
}
