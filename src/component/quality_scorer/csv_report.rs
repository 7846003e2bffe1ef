//! 批次比較結果寫成 CSV

use super::pyiqa_command::{Device, Scorer};
use crate::tools::{file_name_string, list_files};
use anyhow::{Context, Result};
use csv::{Terminator, Writer, WriterBuilder};
use log::warn;
use std::fs::File;
use std::path::Path;

/// 分數取得失敗時留空，繼續下一個檔案
fn score_or_blank(scorer: &impl Scorer, metrics: &[String], target: &Path, device: Device) -> String {
    scorer.score(metrics, target, device).unwrap_or_else(|e| {
        warn!("無法取得 {} 的分數: {e:#}", target.display());
        println!("{e:#}");
        String::new()
    })
}

/// 需要時才加引號，列尾使用 CRLF
fn create(output: &Path) -> Result<Writer<File>> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))
}

/// 原圖與放大圖逐一比較；只處理兩邊都有的檔名，回傳列數
pub fn batch_compare_upscaled(
    scorer: &impl Scorer,
    metrics: &[String],
    original_dir: &Path,
    upscaled_dir: &Path,
    device: Device,
    output: &Path,
) -> Result<usize> {
    let mut writer = create(output)?;
    writer.write_record(["Filename", "Original Score", "Upscaled Score"])?;

    let mut rows = 0;
    for original in list_files(original_dir)? {
        let file_name = file_name_string(&original);
        let upscaled = upscaled_dir.join(&file_name);
        if !upscaled.exists() {
            continue;
        }

        let original_score = score_or_blank(scorer, metrics, &original, device);
        let upscaled_score = score_or_blank(scorer, metrics, &upscaled, device);
        writer.write_record([&file_name, &original_score, &upscaled_score])?;
        rows += 1;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(rows)
}

/// 第一列為原圖，接著是資料夾中每個放大結果
pub fn compare_upscaling_models(
    scorer: &impl Scorer,
    metrics: &[String],
    original: &Path,
    upscaled_dir: &Path,
    device: Device,
    output: &Path,
) -> Result<usize> {
    let mut writer = create(output)?;
    writer.write_record(["Model", "Score"])?;

    let original_score = score_or_blank(scorer, metrics, original, device);
    writer.write_record(["Original", original_score.as_str()])?;

    let mut rows = 1;
    for upscaled in list_files(upscaled_dir)? {
        let score = score_or_blank(scorer, metrics, &upscaled, device);
        writer.write_record([file_name_string(&upscaled), score])?;
        rows += 1;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::fs;
    use tempfile::TempDir;

    /// 分數為檔名長度；名稱含 "bad" 時失敗
    struct NameLength;

    impl Scorer for NameLength {
        fn score(&self, metrics: &[String], target: &Path, _device: Device) -> Result<String> {
            let name = file_name_string(target);
            if name.contains("bad") {
                bail!("cannot score {name}");
            }
            Ok(format!("{}: {}", metrics.join(" "), name.len()))
        }
    }

    #[test]
    fn test_batch_compare_only_paired_files() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("og");
        let upscaled = temp.path().join("up");
        fs::create_dir_all(&original).unwrap();
        fs::create_dir_all(&upscaled).unwrap();
        for name in ["a.png", "b.png"] {
            fs::write(original.join(name), "x").unwrap();
        }
        fs::write(upscaled.join("a.png"), "x").unwrap();

        let output = temp.path().join("results.csv");
        let rows = batch_compare_upscaled(
            &NameLength,
            &["musiq".to_string()],
            &original,
            &upscaled,
            Device::Cpu,
            &output,
        )
        .unwrap();

        assert_eq!(rows, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Filename,Original Score,Upscaled Score\r\na.png,musiq: 5,musiq: 5\r\n"
        );
    }

    #[test]
    fn test_model_comparison_starts_with_original() {
        let temp = TempDir::new().unwrap();
        let upscaled = temp.path().join("models");
        fs::create_dir_all(&upscaled).unwrap();
        fs::write(upscaled.join("esrgan.png"), "x").unwrap();
        fs::write(upscaled.join("bad_model.png"), "x").unwrap();
        let original = temp.path().join("orig.png");
        fs::write(&original, "x").unwrap();

        let output = temp.path().join("models.csv");
        let rows = compare_upscaling_models(
            &NameLength,
            &["a".to_string(), "b".to_string()],
            &original,
            &upscaled,
            Device::Cuda,
            &output,
        )
        .unwrap();

        assert_eq!(rows, 3);
        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.split("\r\n").collect();
        assert_eq!(lines[0], "Model,Score");
        assert_eq!(lines[1], "Original,a b: 8");
        assert_eq!(lines[2], "bad_model.png,");
        assert_eq!(lines[3], "esrgan.png,a b: 10");
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_quoted() {
        let temp = TempDir::new().unwrap();
        let upscaled = temp.path().join("models");
        fs::create_dir_all(&upscaled).unwrap();
        fs::write(upscaled.join("x4,\"sharp\".png"), "x").unwrap();
        let original = temp.path().join("o.png");
        fs::write(&original, "x").unwrap();

        let output = temp.path().join("quoted.csv");
        compare_upscaling_models(
            &NameLength,
            &["m1,m2".to_string()],
            &original,
            &upscaled,
            Device::Cpu,
            &output,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Model,Score\r\nOriginal,\"m1,m2: 5\"\r\n\"x4,\"\"sharp\"\".png\",\"m1,m2: 14\"\r\n"
        );
    }
}
