//! 重複圖片審查元件
//!
//! 以感知雜湊找出相近的圖片，逐組顯示並讓使用者選擇刪除其中一張

mod cluster_preview;
mod main;
mod perceptual_index;
mod review_session;

pub use cluster_preview::{open_preview, render_preview};
pub use main::DuplicateReviewer;
pub use perceptual_index::{Duplicate, DuplicateMap, HashedImage, hash_images};
pub use review_session::{Cluster, ReviewChoice, ReviewSession, ReviewSummary, parse_choice};
