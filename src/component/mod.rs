//! 功能元件模組
//!
//! 每個子模組實現一個獨立的資料集整理工具，包含主要邏輯和專用工具

pub mod alpha_remover;
pub mod archive_compressor;
pub mod audio_filter;
pub mod comparison_compositor;
pub mod duplicate_reviewer;
pub mod folder_combiner;
pub mod image_resizer;
pub mod native_resolution;
pub mod path_prompt;
pub mod quality_scorer;
pub mod vector_converter;

pub use alpha_remover::AlphaRemover;
pub use archive_compressor::ArchiveCompressor;
pub use audio_filter::AudioFilter;
pub use comparison_compositor::ComparisonCompositor;
pub use duplicate_reviewer::DuplicateReviewer;
pub use folder_combiner::FolderCombinerComponent;
pub use image_resizer::ImageResizer;
pub use native_resolution::NativeResolution;
pub use quality_scorer::QualityScorer;
pub use vector_converter::VectorConverter;
