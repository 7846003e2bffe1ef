//! 資料夾合併元件

mod combiner;
mod main;

pub use combiner::{CombineSummary, DEFAULT_DESTINATION, DEFAULT_SUBFOLDERS, FolderCombiner};
pub use main::FolderCombinerComponent;
