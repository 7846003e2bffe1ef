pub mod load;
pub mod save;
pub mod types;

pub use types::{
    ArchiveSettings, CompositeSettings, Config, DuplicateReviewSettings, FileTypeTable, Language,
    MAX_RECENT_PATHS, ResizeSettings, ToolPaths, UserSettings, VectorSettings,
};
