//! 互動審查：每組重複最多刪除一個檔案，已刪除的檔案不會再出現

use super::perceptual_index::{Duplicate, DuplicateMap};
use crate::tools::{ImageInfo, files_identical};
use anyhow::{Context, Result};
use console::style;
use log::{error, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// 使用者輸入的解讀結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    /// 0 為原圖，i 為第 i 個重複
    Delete(usize),
    Invalid,
    Skip,
}

/// 解析輸入；`member_count` 為原圖加重複的總數
#[must_use]
pub fn parse_choice(input: &str, member_count: usize) -> ReviewChoice {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return ReviewChoice::Skip;
    }
    match trimmed.parse::<usize>() {
        Ok(index) if index < member_count => ReviewChoice::Delete(index),
        _ => ReviewChoice::Invalid,
    }
}

/// 一組待審查的重複圖片
#[derive(Debug, Clone)]
pub struct Cluster {
    pub key: String,
    pub duplicates: Vec<Duplicate>,
    /// 與原圖位元組完全相同
    pub identical: Vec<bool>,
}

impl Cluster {
    /// 原圖在前，接著依序為各重複圖片
    pub fn members(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.key.as_str()).chain(self.duplicates.iter().map(|d| d.name.as_str()))
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.duplicates.len() + 1
    }

    #[must_use]
    pub fn member(&self, index: usize) -> Option<&str> {
        self.members().nth(index)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub clusters_reviewed: usize,
    pub deleted: Vec<String>,
    pub skipped: usize,
}

pub struct ReviewSession<'a> {
    image_dir: &'a Path,
    deleted: HashSet<String>,
}

impl<'a> ReviewSession<'a> {
    pub fn new(image_dir: &'a Path) -> Self {
        Self {
            image_dir,
            deleted: HashSet::new(),
        }
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.image_dir.join(name)
    }

    /// 排除本次已刪除的檔案；若原圖已刪或清單變空則回傳 `None`
    #[must_use]
    pub fn prepare_cluster(&self, key: &str, duplicates: &[Duplicate]) -> Option<Cluster> {
        if self.deleted.contains(key) {
            return None;
        }

        let remaining: Vec<Duplicate> = duplicates
            .iter()
            .filter(|d| !self.deleted.contains(&d.name))
            .cloned()
            .collect();
        if remaining.is_empty() {
            return None;
        }

        let key_path = self.path_of(key);
        let identical = remaining
            .iter()
            .map(|d| files_identical(&key_path, &self.path_of(&d.name)).unwrap_or(false))
            .collect();

        Some(Cluster {
            key: key.to_string(),
            duplicates: remaining,
            identical,
        })
    }

    fn print_cluster(&self, cluster: &Cluster) -> Result<()> {
        println!("\nDuplicates for {}:", style(&cluster.key).cyan());
        for (index, name) in cluster.members().enumerate() {
            let info = ImageInfo::read(&self.path_of(name))?;
            let marker = match index {
                0 => String::new(),
                i if cluster.identical[i - 1] => format!(" {}", style("[identical file]").magenta()),
                i => format!(" (distance {})", cluster.duplicates[i - 1].distance),
            };
            println!("{index}. {}{marker}", info.describe());
        }
        Ok(())
    }

    fn delete_member(&mut self, cluster: &Cluster, index: usize) -> Result<String> {
        let name = cluster
            .member(index)
            .map(ToString::to_string)
            .with_context(|| format!("No image at position {index}"))?;
        let path = self.path_of(&name);
        fs::remove_file(&path).with_context(|| format!("Failed to delete {}", path.display()))?;
        self.deleted.insert(name.clone());
        info!("已刪除 {name}");
        Ok(name)
    }

    /// 逐組審查；`ask` 負責顯示預覽並取得使用者輸入
    pub fn review(
        &mut self,
        map: &DuplicateMap,
        shutdown_signal: &AtomicBool,
        mut ask: impl FnMut(&Cluster) -> Result<String>,
    ) -> Result<ReviewSummary> {
        let mut summary = ReviewSummary::default();

        for (key, duplicates) in map.clusters() {
            if shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止審查");
                break;
            }

            let Some(cluster) = self.prepare_cluster(key, duplicates) else {
                continue;
            };
            summary.clusters_reviewed += 1;

            let outcome = self.print_cluster(&cluster).and_then(|()| {
                let input = ask(&cluster)?;
                match parse_choice(&input, cluster.member_count()) {
                    ReviewChoice::Delete(index) => self.delete_member(&cluster, index).map(Some),
                    ReviewChoice::Invalid => {
                        println!("{}", style("Invalid choice. Skipping.").yellow());
                        Ok(None)
                    }
                    ReviewChoice::Skip => {
                        println!("Skipping deletion.");
                        Ok(None)
                    }
                }
            });

            match outcome {
                Ok(Some(name)) => {
                    println!("{} {name}", style("Deleted:").red());
                    summary.deleted.push(name);
                }
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("處理 {key} 的重複時發生錯誤: {e:#}");
                    println!(
                        "{} processing duplicates for {key}: {e:#}",
                        style("Error").red()
                    );
                    summary.skipped += 1;
                }
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::collections::VecDeque;
    use tempfile::TempDir;

    fn make_images(dir: &Path, names: &[&str]) {
        for (i, name) in names.iter().enumerate() {
            RgbImage::from_pixel(8, 8, Rgb([i as u8 * 10, 0, 0]))
                .save(dir.join(name))
                .unwrap();
        }
    }

    /// a、b、c 彼此相近
    fn triangle_map() -> DuplicateMap {
        let names: Vec<String> = ["a.png", "b.png", "c.png"].iter().map(ToString::to_string).collect();
        DuplicateMap::build(&names, 10, |_, _| 1)
    }

    fn scripted(inputs: &[&str]) -> impl FnMut(&Cluster) -> Result<String> {
        let mut queue: VecDeque<String> = inputs.iter().map(ToString::to_string).collect();
        move |_| Ok(queue.pop_front().unwrap_or_default())
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("0", 3), ReviewChoice::Delete(0));
        assert_eq!(parse_choice(" 2 ", 3), ReviewChoice::Delete(2));
        assert_eq!(parse_choice("3", 3), ReviewChoice::Invalid);
        assert_eq!(parse_choice("99999999999999999999999", 3), ReviewChoice::Invalid);
        assert_eq!(parse_choice("", 3), ReviewChoice::Skip);
        assert_eq!(parse_choice("-1", 3), ReviewChoice::Skip);
        assert_eq!(parse_choice("two", 3), ReviewChoice::Skip);
    }

    #[test]
    fn test_deleted_files_are_not_offered_again() {
        let temp = TempDir::new().unwrap();
        make_images(temp.path(), &["a.png", "b.png", "c.png"]);
        let map = triangle_map();
        let mut session = ReviewSession::new(temp.path());

        let mut offered: Vec<Vec<String>> = Vec::new();
        let mut answers = scripted(&["1", "", ""]);
        let summary = session
            .review(&map, &AtomicBool::new(false), |cluster| {
                offered.push(cluster.members().map(ToString::to_string).collect());
                answers(cluster)
            })
            .unwrap();

        // 第一組刪除 b，之後 b 不再出現；c 的清單只剩 a
        assert_eq!(summary.deleted, vec!["b.png"]);
        assert_eq!(offered[0], vec!["a.png", "b.png", "c.png"]);
        assert_eq!(offered[1], vec!["c.png", "a.png"]);
        assert_eq!(offered.len(), 2);
        assert!(!temp.path().join("b.png").exists());
        assert!(temp.path().join("a.png").exists());
        assert!(temp.path().join("c.png").exists());
    }

    #[test]
    fn test_skip_and_invalid_delete_nothing() {
        let temp = TempDir::new().unwrap();
        make_images(temp.path(), &["a.png", "b.png", "c.png"]);
        let map = triangle_map();
        let mut session = ReviewSession::new(temp.path());

        let summary = session
            .review(&map, &AtomicBool::new(false), scripted(&["7", "x", ""]))
            .unwrap();

        assert!(summary.deleted.is_empty());
        assert_eq!(summary.clusters_reviewed, 3);
        assert_eq!(summary.skipped, 3);
        for name in ["a.png", "b.png", "c.png"] {
            assert!(temp.path().join(name).exists());
        }
    }

    #[test]
    fn test_deleting_key_skips_its_later_cluster() {
        let temp = TempDir::new().unwrap();
        make_images(temp.path(), &["a.png", "b.png", "c.png"]);
        let map = triangle_map();
        let mut session = ReviewSession::new(temp.path());

        let summary = session
            .review(&map, &AtomicBool::new(false), scripted(&["0", "0"]))
            .unwrap();

        // a 被刪，b 的組剩 c，再刪 b；c 的組已無成員
        assert_eq!(summary.deleted, vec!["a.png", "b.png"]);
        assert_eq!(summary.clusters_reviewed, 2);
        assert!(temp.path().join("c.png").exists());
    }

    #[test]
    fn test_identical_files_are_flagged() {
        let temp = TempDir::new().unwrap();
        make_images(temp.path(), &["a.png", "b.png"]);
        fs::copy(temp.path().join("a.png"), temp.path().join("a_copy.png")).unwrap();
        let session = ReviewSession::new(temp.path());

        let duplicates = vec![
            Duplicate {
                name: "a_copy.png".to_string(),
                distance: 0,
            },
            Duplicate {
                name: "b.png".to_string(),
                distance: 4,
            },
        ];
        let cluster = session.prepare_cluster("a.png", &duplicates).unwrap();
        assert_eq!(cluster.identical, vec![true, false]);
    }

    #[test]
    fn test_missing_file_is_reported_and_review_continues() {
        let temp = TempDir::new().unwrap();
        make_images(temp.path(), &["b.png", "c.png"]);
        let map = triangle_map();
        let mut session = ReviewSession::new(temp.path());

        let summary = session
            .review(&map, &AtomicBool::new(false), scripted(&["", "", ""]))
            .unwrap();

        assert_eq!(summary.clusters_reviewed, 3);
        assert!(summary.deleted.is_empty());
    }
}
