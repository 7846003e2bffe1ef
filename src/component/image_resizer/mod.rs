//! 圖片縮放元件
//!
//! 將超出範圍的圖片等比例縮小；成對模式維持 HQ/LQ 的 4 倍關係

mod bounding_box;
mod main;
mod resize_ops;

pub use bounding_box::{BoundingBox, PAIR_SCALE, PairDimensions};
pub use main::ImageResizer;
pub use resize_ops::{
    PairOutcome, ResizeOptions, ResizeOutcome, ResizeSummary, resize_directory,
    resize_image_pair, resize_pair_directories, resize_single_image,
};
