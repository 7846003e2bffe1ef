//! 以 `python -m getnative` 執行，並檢查 VapourSynth 外掛

use crate::tools::{describe_command, run_captured, run_inherited};
use anyhow::{Result, bail};
use std::path::Path;
use std::process::Command;

/// 印出已安裝的外掛名稱（逗號分隔）；未安裝 VapourSynth 時匯入失敗
const PLUGIN_PROBE_SCRIPT: &str = "import vapoursynth as vs\n\
core = vs.core\n\
names = [('descale', 'descale'), ('ffms2', 'ffms2'), ('lsmash', 'lsmas'), ('imwri', 'imwri')]\n\
print(','.join(label for label, ns in names if hasattr(core, ns)))";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    MissingVapourSynth,
    Installed { plugins: Vec<String> },
}

pub struct Getnative {
    python: String,
}

impl Getnative {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    #[must_use]
    pub fn command(&self, input: &Path, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.args(["-m", "getnative"]).arg(input).args(args);
        cmd
    }

    #[must_use]
    pub fn plugin_probe_command(&self) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.args(["-c", PLUGIN_PROBE_SCRIPT]);
        cmd
    }

    /// 輸出直接顯示給使用者
    pub fn run(&self, input: &Path, args: &[String]) -> Result<()> {
        let mut cmd = self.command(input, args);
        let status = run_inherited(&mut cmd)?;
        if !status.success() {
            bail!("{} exited with {status}", describe_command(&cmd));
        }
        Ok(())
    }

    pub fn check_dependencies(&self) -> Result<DependencyStatus> {
        let mut cmd = self.plugin_probe_command();
        let output = run_captured(&mut cmd)?;
        if !output.status.success() {
            return Ok(DependencyStatus::MissingVapourSynth);
        }
        Ok(DependencyStatus::Installed {
            plugins: parse_plugins(&String::from_utf8_lossy(&output.stdout)),
        })
    }
}

#[must_use]
pub fn parse_plugins(output: &str) -> Vec<String> {
    output
        .lines()
        .last()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arguments() {
        let getnative = Getnative::new("python");
        let cmd = getnative.command(
            Path::new("frame.png"),
            &["--kernel".to_string(), "bicubic".to_string()],
        );
        assert_eq!(
            describe_command(&cmd),
            "python -m getnative frame.png --kernel bicubic"
        );
    }

    #[test]
    fn test_parse_plugins() {
        assert_eq!(parse_plugins("descale,ffms2\n"), vec!["descale", "ffms2"]);
        assert!(parse_plugins("\n").is_empty());
        assert!(parse_plugins("").is_empty());
    }

    #[test]
    fn test_missing_python_is_an_error() {
        let getnative = Getnative::new("definitely-not-a-real-python");
        assert!(getnative.check_dependencies().is_err());
    }
}
