use crate::tools::{describe_command, is_program_available, run_captured, run_streaming};
use anyhow::{Result, bail};
use console::style;
use std::path::Path;
use std::process::Command;

/// 7-Zip 的封存格式（對應 `-t` 參數）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tar,
    Gzip,
    Zip,
}

impl ArchiveFormat {
    #[must_use]
    pub const fn type_switch(&self) -> &'static str {
        match self {
            Self::Tar => "-ttar",
            Self::Gzip => "-tgzip",
            Self::Zip => "-tzip",
        }
    }
}

/// 封存工具介面
pub trait Archiver {
    /// 工具是否可以執行
    fn is_available(&self) -> bool;

    /// 將 `source` 加入 `archive`
    fn add(&self, archive: &Path, source: &Path, format: ArchiveFormat) -> Result<()>;

    /// 驗證封存檔完整性
    fn test(&self, archive: &Path) -> Result<()>;
}

/// 呼叫外部 `7z` 執行檔
pub struct SevenZip {
    program: String,
}

impl SevenZip {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn add_command(&self, archive: &Path, source: &Path, format: ArchiveFormat) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("a").arg(format.type_switch()).arg(archive).arg(source);
        cmd
    }

    #[must_use]
    pub fn test_command(&self, archive: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("t").arg(archive);
        cmd
    }
}

impl Archiver for SevenZip {
    fn is_available(&self) -> bool {
        is_program_available(&self.program, &[])
    }

    fn add(&self, archive: &Path, source: &Path, format: ArchiveFormat) -> Result<()> {
        let mut cmd = self.add_command(archive, source, format);
        let status = run_streaming(&mut cmd, |line| println!("  {}", style(line).dim()))?;
        if !status.success() {
            bail!("{} exited with {status}", describe_command(&cmd));
        }
        Ok(())
    }

    fn test(&self, archive: &Path) -> Result<()> {
        let mut cmd = self.test_command(archive);
        let output = run_captured(&mut cmd)?;
        if !output.status.success() {
            bail!("{}", String::from_utf8_lossy(&output.stderr).trim());
        }
        Ok(())
    }
}
