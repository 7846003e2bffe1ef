//! 移除透明通道元件

mod flattener;
mod main;

pub use flattener::{
    FlattenAction, FlattenSummary, flatten, flatten_directory, flatten_file, output_path,
};
pub use main::AlphaRemover;
