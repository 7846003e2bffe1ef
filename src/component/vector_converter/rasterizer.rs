//! SVG → PNG（呼叫 rsvg-convert）

use crate::config::FileTypeTable;
use crate::tools::{describe_command, ensure_directory_exists, list_files, run_captured};
use anyhow::{Result, bail};
use console::style;
use log::{error, warn};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub converted: usize,
    pub errors: usize,
}

pub struct SvgRasterizer {
    program: String,
    output_width: u32,
}

impl SvgRasterizer {
    pub fn new(program: impl Into<String>, output_width: u32) -> Self {
        Self {
            program: program.into(),
            output_width,
        }
    }

    /// 輸出檔名：`<stem>.png`
    #[must_use]
    pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        output_dir.join(format!("{stem}.png"))
    }

    #[must_use]
    pub fn build_command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-w")
            .arg(self.output_width.to_string())
            .arg("-o")
            .arg(output)
            .arg(input);
        cmd
    }

    pub fn convert_file(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let output = Self::output_path(input, output_dir);
        let mut cmd = self.build_command(input, &output);
        let result = run_captured(&mut cmd)?;
        if !result.status.success() {
            bail!(
                "{} failed: {}",
                describe_command(&cmd),
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }
        Ok(output)
    }

    pub fn convert_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        file_type_table: &FileTypeTable,
        shutdown_signal: &AtomicBool,
    ) -> Result<ConvertSummary> {
        if !output_dir.exists() {
            ensure_directory_exists(output_dir)?;
            println!("Created output directory: '{}'", output_dir.display());
        }

        let mut summary = ConvertSummary::default();
        for input in list_files(input_dir)?
            .into_iter()
            .filter(|path| file_type_table.is_vector_file(path))
        {
            if shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止轉換");
                break;
            }

            println!(
                "Converting '{}' to '{}'...",
                input.display(),
                Self::output_path(&input, output_dir).display()
            );
            match self.convert_file(&input, output_dir) {
                Ok(_) => {
                    println!("{}", style("Conversion successful.").green());
                    summary.converted += 1;
                }
                Err(e) => {
                    error!("轉換失敗 {}: {e:#}", input.display());
                    println!(
                        "{} converting '{}': {e:#}",
                        style("Error").red(),
                        input.display()
                    );
                    summary.errors += 1;
                }
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_command() {
        let rasterizer = SvgRasterizer::new("rsvg-convert", 1920);
        let cmd = rasterizer.build_command(Path::new("in/logo.svg"), Path::new("out/logo.png"));
        assert_eq!(
            describe_command(&cmd),
            "rsvg-convert -w 1920 -o out/logo.png in/logo.svg"
        );
    }

    #[test]
    fn test_output_path_replaces_extension() {
        assert_eq!(
            SvgRasterizer::output_path(Path::new("a/Icon.SVG"), Path::new("png")),
            PathBuf::from("png/Icon.png")
        );
    }

    #[test]
    fn test_missing_converter_counts_errors_and_continues() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("svg");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("a.svg"), "<svg/>").unwrap();
        fs::write(input.join("b.SVG"), "<svg/>").unwrap();
        fs::write(input.join("c.png"), "not svg").unwrap();

        let table = crate::config::Config::load_embedded_file_type_table().unwrap();
        let rasterizer = SvgRasterizer::new("definitely-not-a-real-rasterizer", 100);
        let summary = rasterizer
            .convert_directory(&input, &temp.path().join("out"), &table, &AtomicBool::new(false))
            .unwrap();

        assert_eq!(summary, ConvertSummary { converted: 0, errors: 2 });
        assert!(temp.path().join("out").is_dir());
    }
}
