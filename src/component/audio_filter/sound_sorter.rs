//! 遞迴掃描影片，將有聲音的影片移到目的資料夾

use super::loudness_probe::{AudioInspector, AudioStatus};
use crate::config::FileTypeTable;
use crate::tools::{
    ensure_directory_exists, file_name_string, is_within, move_file, unique_destination,
};
use anyhow::{Result, bail};
use console::style;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudioFilterSummary {
    pub moved: usize,
    pub silent: usize,
    pub no_audio: usize,
    pub errors: usize,
}

/// 收集所有影片檔（依路徑排序），略過 `exclude` 資料夾內的檔案
pub fn collect_videos(
    source: &Path,
    exclude: Option<&Path>,
    file_type_table: &FileTypeTable,
) -> Vec<PathBuf> {
    let mut videos: Vec<PathBuf> = WalkDir::new(source)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| exclude.is_none_or(|dir| !is_within(entry.path(), dir)))
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| file_type_table.is_video_file(path))
        .collect();
    videos.sort();
    videos
}

pub fn move_videos_with_sound(
    inspector: &impl AudioInspector,
    source: &Path,
    destination: &Path,
    file_type_table: &FileTypeTable,
    shutdown_signal: &AtomicBool,
) -> Result<AudioFilterSummary> {
    if is_within(source, destination) {
        bail!("Destination must not contain the source directory");
    }
    ensure_directory_exists(destination)?;

    let mut summary = AudioFilterSummary::default();
    // 目的資料夾可能位於來源內，已移過的影片不再處理
    for video in collect_videos(source, Some(destination), file_type_table) {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            break;
        }

        let file_name = file_name_string(&video);
        let result = inspector.inspect(&video).and_then(|status| {
            if let AudioStatus::Audible { max_volume_db } = status {
                let target = unique_destination(destination, &file_name);
                move_file(&video, &target)?;
                info!("{file_name} 峰值 {max_volume_db:.1} dB，已移動");
            }
            Ok(status)
        });

        match result {
            Ok(AudioStatus::Audible { .. }) => {
                println!("Moved {} to {}", style(&file_name).green(), destination.display());
                summary.moved += 1;
            }
            Ok(AudioStatus::Silent) => {
                println!("{file_name} has a silent audio track.");
                summary.silent += 1;
            }
            Ok(AudioStatus::NoAudio) => {
                println!("{file_name} does not have an audio stream.");
                summary.no_audio += 1;
            }
            Err(e) => {
                error!("處理失敗 {file_name}: {e:#}");
                println!("{} processing {file_name}: {e:#}", style("Error").red());
                summary.errors += 1;
            }
        }
    }
    Ok(summary)
}
