//! 比較圖合成元件
//!
//! LQ | HQ（| Upscaled）並排的條帶比較圖

mod compositor;
mod layout;
mod main;

pub use compositor::{CompositeJob, CompositeSummary, Panel, compose};
pub use layout::{SEPARATOR_WIDTH, Strip, StripLayout, plan_strips, scaled_width};
pub use main::ComparisonCompositor;
