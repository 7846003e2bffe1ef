use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// 最近使用路徑的最大保存數量
pub const MAX_RECENT_PATHS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTypeTable {
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
    #[serde(rename = "VECTOR_FILE")]
    pub vector_file: Vec<String>,
}

impl FileTypeTable {
    fn extension_set(extensions: &[String]) -> HashSet<String> {
        extensions.iter().map(|ext| ext.to_lowercase()).collect()
    }

    fn matches(extensions: &[String], path: &Path) -> bool {
        let set = Self::extension_set(extensions);
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| set.contains(&format!(".{}", ext.to_lowercase())))
    }

    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        Self::matches(&self.image_file, path)
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        Self::matches(&self.video_file, path)
    }

    #[must_use]
    pub fn is_vector_file(&self, path: &Path) -> bool {
        Self::matches(&self.vector_file, path)
    }
}

/// 介面語言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 外部工具的執行檔路徑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub seven_zip: String,
    pub ffmpeg: String,
    pub ffprobe: String,
    pub python: String,
    pub pyiqa: String,
    pub svg_converter: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            seven_zip: "7z".to_string(),
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            python: "python".to_string(),
            pyiqa: "pyiqa".to_string(),
            svg_converter: "rsvg-convert".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeSettings {
    pub max_width: u32,
    pub max_height: u32,
    pub jpeg_quality: u8,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            jpeg_quality: 95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateReviewSettings {
    /// 視為重複的最大漢明距離
    pub max_distance: u32,
    pub show_preview: bool,
}

impl Default for DuplicateReviewSettings {
    fn default() -> Self {
        Self {
            max_distance: 10,
            show_preview: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeSettings {
    pub font_path: Option<String>,
    pub font_size: f32,
}

impl Default for CompositeSettings {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    pub verify_delay_secs: u64,
    /// 壓縮前要求的可用空間倍數
    pub space_margin: f64,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            verify_delay_secs: 3,
            space_margin: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorSettings {
    pub output_width: u32,
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self { output_width: 1920 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub recent_paths: Vec<String>,
    pub tools: ToolPaths,
    pub resize: ResizeSettings,
    pub duplicate_review: DuplicateReviewSettings,
    pub composite: CompositeSettings,
    pub archive: ArchiveSettings,
    pub vector: VectorSettings,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file_type_table: FileTypeTable,
    pub settings: UserSettings,
}
