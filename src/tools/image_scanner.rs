use crate::config::FileTypeTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 掃描資料夾下一層的圖片檔案（不遞迴），依檔名排序
pub fn scan_image_files(directory: &Path, file_type_table: &FileTypeTable) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory {}", directory.display()))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| file_type_table.is_image_file(path))
        .collect();

    images.sort();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    #[test]
    fn test_scan_image_files_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.PNG"), b"").unwrap();
        fs::write(temp_dir.path().join("a.jpg"), b"").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(temp_dir.path().join("nested.png")).unwrap();

        let table = Config::load_embedded_file_type_table().unwrap();
        let images = scan_image_files(temp_dir.path(), &table).unwrap();

        assert_eq!(images.len(), 2);
        assert!(images[0].ends_with("a.jpg"));
        assert!(images[1].ends_with("b.PNG"));
    }
}
