use crate::tools::file_name_string;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 單張圖片的檔名、大小與解析度
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub file_name: String,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn read(path: &Path) -> Result<Self> {
        let size_bytes = fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read dimensions of {}", path.display()))?;

        Ok(Self {
            file_name: file_name_string(path),
            size_bytes,
            width,
            height,
        })
    }

    #[must_use]
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    /// `name, 12.34 KB, 640x480`
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{}, {:.2} KB, {}x{}",
            self.file_name,
            self.size_kb(),
            self.width,
            self.height
        )
    }

    /// 多行版本，用於預覽圖下方的說明文字
    #[must_use]
    pub fn lines(&self) -> [String; 3] {
        [
            self.file_name.clone(),
            format!("{:.2} KB", self.size_kb()),
            format!("{}x{}", self.width, self.height),
        ]
    }
}
