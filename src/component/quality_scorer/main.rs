use super::csv_report::{batch_compare_upscaled, compare_upscaling_models};
use super::option_info::{OPTION_COUNT, option_info};
use super::pyiqa_command::{Device, Pyiqa, split_metrics};
use crate::config::Config;
use crate::pause;
use crate::tools::{describe_command, is_program_available, run_inherited, validate_file_exists};
use anyhow::{Context, Result};
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const MENU_ITEMS: [&str; 17] = [
    "1. List available metrics",
    "2. Run a single metric on a single image",
    "3. Run multiple metrics on a single image",
    "4. Run a single metric on a directory",
    "5. Run multiple metrics on a directory",
    "6. Compare two images using FR metrics",
    "7. Compare two directories using FR metrics",
    "8. Compare upscaled image with original using NR metrics",
    "9. Batch compare upscaled images (CSV)",
    "10. Compare upscaling methods",
    "11. Compare multiple upscaling models (CSV)",
    "12. Run FID metric",
    "13. Generate quality map",
    "14. Run metrics on video",
    "15. Save results to a file",
    "Explain an option",
    "Exit",
];

/// pyiqa 影像品質評分元件
pub struct QualityScorer {
    pyiqa: Pyiqa,
    term: Term,
}

fn prompt_line(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().trim_matches('"').to_string())
}

/// 路徑不存在時印出錯誤並回傳 `None`
fn prompt_existing_path(prompt: &str) -> Result<Option<PathBuf>> {
    let path = PathBuf::from(prompt_line(prompt)?);
    if path.exists() {
        Ok(Some(path))
    } else {
        println!(
            "{} Path '{}' does not exist.",
            style("Error:").red(),
            path.display()
        );
        Ok(None)
    }
}

fn prompt_device() -> Result<Option<Device>> {
    let input = prompt_line("Enter device (cuda or cpu, default is cuda)")?;
    match Device::parse(&input) {
        Ok(device) => Ok(Some(device)),
        Err(e) => {
            println!("{} {e}", style("Error:").red());
            Ok(None)
        }
    }
}

fn prompt_metrics(prompt: &str) -> Result<Vec<String>> {
    Ok(split_metrics(&prompt_line(prompt)?))
}

/// 依序取得多個存在的路徑；任一不存在則回傳 `None`
fn prompt_existing_paths(prompts: &[&str]) -> Result<Option<Vec<PathBuf>>> {
    let mut paths = Vec::with_capacity(prompts.len());
    for prompt in prompts {
        paths.push(PathBuf::from(prompt_line(prompt)?));
    }
    for path in &paths {
        if !path.exists() {
            println!(
                "{} Path '{}' does not exist.",
                style("Error:").red(),
                path.display()
            );
            return Ok(None);
        }
    }
    Ok(Some(paths))
}

fn run_visible(mut cmd: Command) {
    println!();
    match run_inherited(&mut cmd) {
        Ok(status) if status.success() => {}
        Ok(status) => {
            println!(
                "{} {} ({status})",
                style("Error executing command:").red(),
                describe_command(&cmd)
            );
        }
        Err(e) => {
            error!("{e:#}");
            println!("{} {e:#}", style("Error:").red());
        }
    }
}

impl QualityScorer {
    pub fn new(config: Config) -> Self {
        Self {
            pyiqa: Pyiqa::new(config.settings.tools.pyiqa.clone()),
            term: Term::stdout(),
        }
    }

    pub fn run(&self) -> Result<()> {
        if !is_program_available(self.pyiqa.program(), &["-h"]) {
            println!("{}", style("pyiqa is not installed. Please install it first.").yellow());
            println!("You can install it using: pip install pyiqa");
            self.pause()?;
        }

        loop {
            self.term.clear_screen()?;
            println!("{}", style("=== PyIQA Toolbox ===").cyan().bold());

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Select an option")
                .items(&MENU_ITEMS)
                .default(0)
                .interact_on_opt(&self.term)?;

            let result = match selection {
                Some(0) => Ok(self.list_metrics()),
                Some(1) => self.single_metric("Enter the path to the image"),
                Some(2) => self.multiple_metrics("Enter the path to the image"),
                Some(3) => self.single_metric("Enter the path to the directory"),
                Some(4) => self.multiple_metrics("Enter the path to the directory"),
                Some(5) => self.full_reference(
                    "Enter the path to the test image",
                    "Enter the path to the reference image",
                ),
                Some(6) => self.full_reference(
                    "Enter the path to the test directory",
                    "Enter the path to the reference directory",
                ),
                Some(7) => self.compare_upscaled(),
                Some(8) => self.batch_compare(),
                Some(9) => self.compare_methods(),
                Some(10) => self.compare_models(),
                Some(11) => self.fid(),
                Some(12) => self.quality_map(),
                Some(13) => self.save_output("Enter the path to the video file", false),
                Some(14) => self.save_output("Enter the path to the directory", true),
                Some(15) => self.explain_option(),
                _ => return Ok(()),
            };

            if let Err(e) = result {
                error!("pyiqa 操作失敗: {e:#}");
                println!("{} {e:#}", style("Error:").red());
            }
            self.pause()?;
        }
    }

    fn pause(&self) -> Result<()> {
        pause(&self.term)
    }

    fn list_metrics(&self) {
        run_visible(self.pyiqa.list_metrics_command());
    }

    fn run_metrics(&self, metrics: &[String], target: &Path, reference: Option<&Path>, device: Device) {
        run_visible(self.pyiqa.metric_command(metrics, target, reference, device, true));
    }

    fn single_metric(&self, path_prompt: &str) -> Result<()> {
        let metric = prompt_line("Enter the metric name")?;
        let Some(target) = prompt_existing_path(path_prompt)? else {
            return Ok(());
        };
        let Some(device) = prompt_device()? else {
            return Ok(());
        };
        self.run_metrics(&[metric], &target, None, device);
        Ok(())
    }

    fn multiple_metrics(&self, path_prompt: &str) -> Result<()> {
        let metrics = prompt_metrics("Enter metric names separated by spaces")?;
        let Some(target) = prompt_existing_path(path_prompt)? else {
            return Ok(());
        };
        let Some(device) = prompt_device()? else {
            return Ok(());
        };
        self.run_metrics(&metrics, &target, None, device);
        Ok(())
    }

    fn full_reference(&self, test_prompt: &str, reference_prompt: &str) -> Result<()> {
        let metric = prompt_line("Enter the FR metric name")?;
        let Some(paths) = prompt_existing_paths(&[test_prompt, reference_prompt])? else {
            return Ok(());
        };
        let Some(device) = prompt_device()? else {
            return Ok(());
        };
        self.run_metrics(&[metric], &paths[0], Some(&paths[1]), device);
        Ok(())
    }

    fn compare_upscaled(&self) -> Result<()> {
        let metrics = prompt_metrics("Enter NR metric names separated by spaces")?;
        let Some(paths) = prompt_existing_paths(&[
            "Enter the path to the original low-quality image",
            "Enter the path to the upscaled image",
        ])?
        else {
            return Ok(());
        };
        let Some(device) = prompt_device()? else {
            return Ok(());
        };

        println!("\nResults for original image:");
        self.run_metrics(&metrics, &paths[0], None, device);
        println!("\nResults for upscaled image:");
        self.run_metrics(&metrics, &paths[1], None, device);
        Ok(())
    }

    fn batch_compare(&self) -> Result<()> {
        let metrics = prompt_metrics("Enter NR metric names separated by spaces")?;
        let Some(paths) = prompt_existing_paths(&[
            "Enter the path to the directory with original images",
            "Enter the path to the directory with upscaled images",
        ])?
        else {
            return Ok(());
        };
        let output = PathBuf::from(prompt_line("Enter the output file name for results")?);
        let Some(device) = prompt_device()? else {
            return Ok(());
        };

        println!("\nProcessing...");
        let rows = batch_compare_upscaled(&self.pyiqa, &metrics, &paths[0], &paths[1], device, &output)?;
        println!("Results saved to {} ({rows} rows)", output.display());
        Ok(())
    }

    fn compare_methods(&self) -> Result<()> {
        let metrics = prompt_metrics("Enter metric names separated by spaces")?;
        let Some(paths) = prompt_existing_paths(&[
            "Enter the path to the original image",
            "Enter the path to the first upscaled image",
            "Enter the path to the second upscaled image",
        ])?
        else {
            return Ok(());
        };
        let Some(device) = prompt_device()? else {
            return Ok(());
        };

        for (label, path) in ["original image", "first upscaled image", "second upscaled image"]
            .iter()
            .zip(&paths)
        {
            println!("\nResults for {label}:");
            self.run_metrics(&metrics, path, None, device);
        }
        Ok(())
    }

    fn compare_models(&self) -> Result<()> {
        let metrics = prompt_metrics("Enter metric names separated by spaces")?;
        let Some(paths) = prompt_existing_paths(&[
            "Enter the path to the original image",
            "Enter the path to the directory containing upscaled images",
        ])?
        else {
            return Ok(());
        };
        validate_file_exists(&paths[0])?;
        let output = PathBuf::from(prompt_line(
            "Enter the output file name for results (e.g., results.csv)",
        )?);
        let Some(device) = prompt_device()? else {
            return Ok(());
        };

        println!("\nProcessing...");
        compare_upscaling_models(&self.pyiqa, &metrics, &paths[0], &paths[1], device, &output)?;
        println!("Results saved to {}", output.display());
        let content = fs::read_to_string(&output)
            .with_context(|| format!("Failed to read {}", output.display()))?;
        println!("{content}");
        Ok(())
    }

    fn fid(&self) -> Result<()> {
        let Some(test_dir) = prompt_existing_path("Enter the path to the test directory")? else {
            return Ok(());
        };
        let reference = prompt_line("Enter the path to the reference directory (or dataset name)")?;
        let dataset_res = prompt_line("Enter dataset resolution (e.g., 1024, optional)")?;
        let dataset_split = prompt_line("Enter dataset split (e.g., trainval70k, optional)")?;
        let Some(device) = prompt_device()? else {
            return Ok(());
        };

        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());
        let dataset_res = optional(&dataset_res);
        let dataset_split = optional(&dataset_split);
        run_visible(self.pyiqa.fid_command(
            &test_dir,
            &reference,
            device,
            dataset_res.as_deref(),
            dataset_split.as_deref(),
        ));
        Ok(())
    }

    fn quality_map(&self) -> Result<()> {
        let metric = prompt_line("Enter the metric name for quality map generation")?;
        let Some(image) = prompt_existing_path("Enter the path to the image")? else {
            return Ok(());
        };
        validate_file_exists(&image)?;
        let output_dir = PathBuf::from(prompt_line("Enter the path for the output quality map")?);
        let Some(device) = prompt_device()? else {
            return Ok(());
        };
        run_visible(self.pyiqa.quality_map_command(&metric, &image, &output_dir, device));
        Ok(())
    }

    /// 執行 metric 並將完整輸出寫入檔案（影片或資料夾）
    fn save_output(&self, path_prompt: &str, multiple: bool) -> Result<()> {
        let metrics = if multiple {
            prompt_metrics("Enter metric names separated by spaces")?
        } else {
            vec![prompt_line("Enter the metric name")?]
        };
        let Some(target) = prompt_existing_path(path_prompt)? else {
            return Ok(());
        };
        let output = PathBuf::from(prompt_line("Enter the output file name for results")?);
        let Some(device) = prompt_device()? else {
            return Ok(());
        };

        println!("\nProcessing...");
        let result = self
            .pyiqa
            .capture(self.pyiqa.metric_command(&metrics, &target, None, device, true))?;
        fs::write(&output, result)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Results saved to {}", output.display());
        Ok(())
    }

    fn explain_option(&self) -> Result<()> {
        let option: usize = Input::new()
            .with_prompt(format!("Option number (1-{OPTION_COUNT})"))
            .interact_text()?;
        match option_info(option) {
            Some(info) => println!("\n{}", info.render()),
            None => println!("Please enter a number between 1 and {OPTION_COUNT}."),
        }
        Ok(())
    }
}
