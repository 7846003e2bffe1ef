//! 感知雜湊索引：DCT 8x8 median hash，漢明距離小於門檻即視為重複

use crate::tools::file_name_string;
use image_hasher::{HashAlg, Hasher, HasherConfig, ImageHash};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
pub struct HashedImage {
    pub name: String,
    pub hash: ImageHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub name: String,
    pub distance: u32,
}

fn perceptual_hasher() -> Hasher {
    HasherConfig::new()
        .hash_alg(HashAlg::Median)
        .preproc_dct()
        .hash_size(8, 8)
        .to_hasher()
}

/// 平行計算每張圖片的雜湊；無法解碼的圖片會被略過
pub fn hash_images(paths: &[PathBuf], shutdown_signal: &AtomicBool) -> Vec<HashedImage> {
    let hasher = perceptual_hasher();

    let progress_bar = ProgressBar::new(paths.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Generating encodings...");

    let mut hashed: Vec<HashedImage> = paths
        .par_iter()
        .filter_map(|path| {
            if shutdown_signal.load(Ordering::SeqCst) {
                return None;
            }

            let result = match image::open(path) {
                Ok(image) => Some(HashedImage {
                    name: file_name_string(path),
                    hash: hasher.hash_image(&image),
                }),
                Err(e) => {
                    warn!("無法解碼 {}: {e}", path.display());
                    None
                }
            };
            progress_bar.inc(1);
            result
        })
        .collect();

    progress_bar.finish_with_message("Encodings generated.");
    hashed.sort_by(|a, b| a.name.cmp(&b.name));
    hashed
}

/// 每張圖片對應到與其相近的其他圖片（對稱）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateMap {
    entries: BTreeMap<String, Vec<Duplicate>>,
}

impl DuplicateMap {
    pub fn from_hashes(hashed: &[HashedImage], max_distance: u32) -> Self {
        let names: Vec<String> = hashed.iter().map(|h| h.name.clone()).collect();
        Self::build(&names, max_distance, |a, b| hashed[a].hash.dist(&hashed[b].hash))
    }

    /// 以任意距離函式建立，距離以索引對傳入
    pub fn build(names: &[String], max_distance: u32, distance: impl Fn(usize, usize) -> u32) -> Self {
        let mut entries: BTreeMap<String, Vec<Duplicate>> =
            names.iter().map(|name| (name.clone(), Vec::new())).collect();

        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                let d = distance(i, j);
                if d > max_distance {
                    continue;
                }
                if let Some(list) = entries.get_mut(&names[i]) {
                    list.push(Duplicate {
                        name: names[j].clone(),
                        distance: d,
                    });
                }
                if let Some(list) = entries.get_mut(&names[j]) {
                    list.push(Duplicate {
                        name: names[i].clone(),
                        distance: d,
                    });
                }
            }
        }

        for list in entries.values_mut() {
            list.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.name.cmp(&b.name)));
        }
        Self { entries }
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn duplicate_set_count(&self) -> usize {
        self.entries.values().filter(|list| !list.is_empty()).count()
    }

    #[must_use]
    pub fn duplicates_of(&self, name: &str) -> &[Duplicate] {
        self.entries
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 有重複的項目，依名稱排序
    pub fn clusters(&self) -> impl Iterator<Item = (&str, &[Duplicate])> {
        self.entries
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(name, list)| (name.as_str(), list.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_map_is_symmetric_and_sorted() {
        let names = names(&["a.png", "b.png", "c.png", "d.png"]);
        // a-b:3, a-c:1, b-c:10, d 遠離其他
        let table = [[0, 3, 1, 40], [3, 0, 10, 40], [1, 10, 0, 40], [40, 40, 40, 0]];
        let map = DuplicateMap::build(&names, 10, |i, j| table[i][j]);

        let a: Vec<&str> = map.duplicates_of("a.png").iter().map(|d| d.name.as_str()).collect();
        assert_eq!(a, vec!["c.png", "b.png"]);
        let b: Vec<&str> = map.duplicates_of("b.png").iter().map(|d| d.name.as_str()).collect();
        assert_eq!(b, vec!["a.png", "c.png"]);
        assert!(map.duplicates_of("d.png").is_empty());

        for (key, duplicates) in map.clusters() {
            for dup in duplicates {
                assert!(map.duplicates_of(&dup.name).iter().any(|d| d.name == key));
            }
        }
        assert_eq!(map.image_count(), 4);
        assert_eq!(map.duplicate_set_count(), 3);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let names = names(&["x", "y"]);
        assert_eq!(DuplicateMap::build(&names, 10, |_, _| 10).duplicate_set_count(), 2);
        assert_eq!(DuplicateMap::build(&names, 10, |_, _| 11).duplicate_set_count(), 0);
    }

    #[test]
    fn test_ties_are_ordered_by_name() {
        let names = names(&["k", "z", "m"]);
        let map = DuplicateMap::build(&names, 10, |_, _| 2);
        let k: Vec<&str> = map.duplicates_of("k").iter().map(|d| d.name.as_str()).collect();
        assert_eq!(k, vec!["m", "z"]);
    }

    #[test]
    fn test_unknown_name_has_no_duplicates() {
        assert!(DuplicateMap::default().duplicates_of("nope").is_empty());
    }
}
