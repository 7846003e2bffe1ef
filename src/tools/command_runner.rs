use anyhow::{Context, Result};
use std::io::{BufRead, BufReader};
use std::process::{Command, ExitStatus, Output, Stdio};

/// 將指令組成可讀字串，供錯誤訊息使用
#[must_use]
pub fn describe_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program().to_string_lossy().to_string())
        .chain(cmd.get_args().map(|arg| arg.to_string_lossy().to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 執行指令並擷取 stdout / stderr
pub fn run_captured(cmd: &mut Command) -> Result<Output> {
    cmd.stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to execute: {}", describe_command(cmd)))
}

/// 執行指令，stdio 直接繼承給使用者
pub fn run_inherited(cmd: &mut Command) -> Result<ExitStatus> {
    cmd.status()
        .with_context(|| format!("Failed to execute: {}", describe_command(cmd)))
}

/// 執行指令並逐行回報 stdout
pub fn run_streaming(cmd: &mut Command, mut on_line: impl FnMut(&str)) -> Result<ExitStatus> {
    let description = describe_command(cmd);
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .with_context(|| format!("Failed to execute: {description}"))?;

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = line.with_context(|| format!("Failed to read output of: {description}"))?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                on_line(trimmed);
            }
        }
    }

    child
        .wait()
        .with_context(|| format!("Failed to wait for: {description}"))
}

/// 檢查外部程式是否可以執行
#[must_use]
pub fn is_program_available(program: &str, probe_args: &[&str]) -> bool {
    Command::new(program)
        .args(probe_args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}
