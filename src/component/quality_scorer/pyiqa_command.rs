//! pyiqa 指令組裝

use crate::tools::{describe_command, run_captured};
use anyhow::{Result, bail};
use std::fmt;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cuda,
    Cpu,
}

impl Device {
    /// 空白輸入視為 cuda
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "cuda" => Ok(Self::Cuda),
            "cpu" => Ok(Self::Cpu),
            other => bail!("Device must be either 'cuda' or 'cpu', got '{other}'"),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cuda => "cuda",
            Self::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 以空白分隔的 metric 名稱
#[must_use]
pub fn split_metrics(input: &str) -> Vec<String> {
    input.split_whitespace().map(ToString::to_string).collect()
}

#[derive(Debug, Clone)]
pub struct Pyiqa {
    program: String,
}

impl Pyiqa {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn list_metrics_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-ls");
        cmd
    }

    /// `pyiqa <metrics…> -t <target> [-r <ref>] --device <dev> [--verbose]`
    #[must_use]
    pub fn metric_command(
        &self,
        metrics: &[String],
        target: &Path,
        reference: Option<&Path>,
        device: Device,
        verbose: bool,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(metrics).arg("-t").arg(target);
        if let Some(reference) = reference {
            cmd.arg("-r").arg(reference);
        }
        cmd.args(["--device", device.as_str()]);
        if verbose {
            cmd.arg("--verbose");
        }
        cmd
    }

    /// FID；reference 可以是資料夾或資料集名稱
    #[must_use]
    pub fn fid_command(
        &self,
        test_dir: &Path,
        reference: &str,
        device: Device,
        dataset_res: Option<&str>,
        dataset_split: Option<&str>,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("fid")
            .arg("-t")
            .arg(test_dir)
            .args(["-r", reference, "--device", device.as_str(), "--verbose"]);
        if let Some(res) = dataset_res {
            cmd.args(["--dataset_res", res]);
        }
        if let Some(split) = dataset_split {
            cmd.args(["--dataset_split", split]);
        }
        cmd
    }

    #[must_use]
    pub fn quality_map_command(
        &self,
        metric: &str,
        image: &Path,
        output_dir: &Path,
        device: Device,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(metric)
            .arg("-t")
            .arg(image)
            .args(["--device", device.as_str(), "--save_map", "--save_dir"])
            .arg(output_dir)
            .arg("--verbose");
        cmd
    }
}

/// 取得分數的介面（CSV 報表使用）
pub trait Scorer {
    fn score(&self, metrics: &[String], target: &Path, device: Device) -> Result<String>;
}

impl Pyiqa {
    /// 執行並回傳 stdout；非零結束碼視為錯誤
    pub fn capture(&self, mut cmd: Command) -> Result<String> {
        let output = run_captured(&mut cmd)?;
        if !output.status.success() {
            bail!(
                "Error executing command: {}\n{}",
                describe_command(&cmd),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Scorer for Pyiqa {
    fn score(&self, metrics: &[String], target: &Path, device: Device) -> Result<String> {
        self.capture(self.metric_command(metrics, target, None, device, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_parse() {
        assert_eq!(Device::parse("").unwrap(), Device::Cuda);
        assert_eq!(Device::parse(" CPU ").unwrap(), Device::Cpu);
        assert!(Device::parse("gpu").is_err());
    }

    #[test]
    fn test_metric_command() {
        let pyiqa = Pyiqa::new("pyiqa");
        let metrics = split_metrics("musiq  niqe");
        let cmd = pyiqa.metric_command(&metrics, Path::new("img.png"), None, Device::Cuda, true);
        assert_eq!(
            describe_command(&cmd),
            "pyiqa musiq niqe -t img.png --device cuda --verbose"
        );

        let cmd = pyiqa.metric_command(
            &split_metrics("lpips"),
            Path::new("test"),
            Some(Path::new("ref")),
            Device::Cpu,
            false,
        );
        assert_eq!(describe_command(&cmd), "pyiqa lpips -t test -r ref --device cpu");
    }

    #[test]
    fn test_fid_command_optional_arguments() {
        let pyiqa = Pyiqa::new("pyiqa");
        let cmd = pyiqa.fid_command(Path::new("gen"), "FFHQ", Device::Cuda, Some("1024"), None);
        assert_eq!(
            describe_command(&cmd),
            "pyiqa fid -t gen -r FFHQ --device cuda --verbose --dataset_res 1024"
        );
    }

    #[test]
    fn test_quality_map_command() {
        let pyiqa = Pyiqa::new("pyiqa");
        let cmd = pyiqa.quality_map_command("ckdn", Path::new("a.png"), Path::new("maps"), Device::Cpu);
        assert_eq!(
            describe_command(&cmd),
            "pyiqa ckdn -t a.png --device cpu --save_map --save_dir maps --verbose"
        );
    }
}
