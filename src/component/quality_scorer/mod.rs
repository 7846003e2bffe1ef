//! 影像品質評分元件（pyiqa 前端）

mod csv_report;
mod main;
mod option_info;
mod pyiqa_command;

pub use csv_report::{batch_compare_upscaled, compare_upscaling_models};
pub use main::QualityScorer;
pub use option_info::{OPTION_COUNT, OptionInfo, option_info};
pub use pyiqa_command::{Device, Pyiqa, Scorer, split_metrics};
