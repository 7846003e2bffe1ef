//! 依音軌篩選影片元件
//!
//! 有可聽見聲音的影片會被移到目的資料夾

mod loudness_probe;
mod main;
mod sound_sorter;

pub use loudness_probe::{
    AudioInspector, AudioStatus, FfmpegInspector, SILENCE_FLOOR_DB, is_audible, parse_max_volume,
};
pub use main::AudioFilter;
pub use sound_sorter::{AudioFilterSummary, collect_videos, move_videos_with_sound};
