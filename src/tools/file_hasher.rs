use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// 檔案內容的 BLAKE3 雜湊（十六進位）
pub fn calculate_file_hash(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut hasher = blake3::Hasher::new();
    hasher
        .update_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(hasher.finalize().to_hex().to_string())
}

/// 兩個檔案位元組完全相同；大小不同時不計算雜湊
pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let size_of = |path: &Path| {
        fs::metadata(path)
            .map(|m| m.len())
            .with_context(|| format!("Failed to stat {}", path.display()))
    };
    if size_of(a)? != size_of(b)? {
        return Ok(false);
    }
    Ok(calculate_file_hash(a)? == calculate_file_hash(b)?)
}
