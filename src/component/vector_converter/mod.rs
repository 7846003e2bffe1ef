//! 向量圖轉點陣圖元件

mod main;
mod rasterizer;

pub use main::VectorConverter;
pub use rasterizer::{ConvertSummary, SvgRasterizer};
