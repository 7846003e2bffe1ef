//! 音軌響度偵測：ffprobe 確認有無音軌，ffmpeg volumedetect 取得峰值

use crate::tools::{describe_command, probe_streams, run_captured};
use anyhow::{Result, bail};
use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

/// 數位靜音下限（dB）；16-bit 音訊的全零訊號會回報 -91 dB
pub const SILENCE_FLOOR_DB: f64 = -91.0;

static MAX_VOLUME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"max_volume:\s*(-?(?:inf|\d+(?:\.\d+)?))\s*dB").expect("Invalid regex")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioStatus {
    NoAudio,
    Silent,
    Audible { max_volume_db: f64 },
}

/// 影片音訊檢查介面
pub trait AudioInspector {
    fn inspect(&self, path: &Path) -> Result<AudioStatus>;
}

/// 從 volumedetect 的輸出取出 max_volume；`-inf` 會回傳負無限大
#[must_use]
pub fn parse_max_volume(output: &str) -> Option<f64> {
    let captures = MAX_VOLUME_PATTERN.captures_iter(output).last()?;
    let value = captures.get(1)?.as_str();
    match value {
        "-inf" => Some(f64::NEG_INFINITY),
        "inf" => Some(f64::INFINITY),
        _ => value.parse().ok(),
    }
}

#[must_use]
pub fn is_audible(max_volume_db: f64) -> bool {
    max_volume_db.is_finite() && max_volume_db > SILENCE_FLOOR_DB
}

pub struct FfmpegInspector {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegInspector {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// 只解碼第一條音軌並丟棄輸出
    #[must_use]
    pub fn volumedetect_command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-hide_banner", "-nostats", "-i"])
            .arg(path)
            .args(["-map", "0:a:0", "-af", "volumedetect", "-vn", "-sn", "-dn", "-f", "null", "-"]);
        cmd
    }

    fn max_volume(&self, path: &Path) -> Result<f64> {
        let mut cmd = self.volumedetect_command(path);
        let output = run_captured(&mut cmd)?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            bail!(
                "{} failed: {}",
                describe_command(&cmd),
                stderr.lines().last().unwrap_or_default().trim()
            );
        }
        match parse_max_volume(&stderr) {
            Some(value) => Ok(value),
            None => bail!("volumedetect reported no max_volume for {}", path.display()),
        }
    }
}

impl AudioInspector for FfmpegInspector {
    fn inspect(&self, path: &Path) -> Result<AudioStatus> {
        if !probe_streams(&self.ffprobe, path)?.has_audio() {
            return Ok(AudioStatus::NoAudio);
        }

        let max_volume_db = self.max_volume(path)?;
        if is_audible(max_volume_db) {
            Ok(AudioStatus::Audible { max_volume_db })
        } else {
            Ok(AudioStatus::Silent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[Parsed_volumedetect_0 @ 0x55] n_samples: 882000
[Parsed_volumedetect_0 @ 0x55] mean_volume: -27.3 dB
[Parsed_volumedetect_0 @ 0x55] max_volume: -4.5 dB
[Parsed_volumedetect_0 @ 0x55] histogram_4db: 12";

    #[test]
    fn test_parse_max_volume() {
        assert_eq!(parse_max_volume(SAMPLE), Some(-4.5));
        assert_eq!(parse_max_volume("max_volume: 0.0 dB"), Some(0.0));
        assert_eq!(parse_max_volume("max_volume: -91.0 dB"), Some(-91.0));
        assert_eq!(parse_max_volume("max_volume: -inf dB"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_max_volume("no volume here"), None);
    }

    #[test]
    fn test_silence_floor() {
        assert!(is_audible(-4.5));
        assert!(is_audible(-90.9));
        assert!(!is_audible(-91.0));
        assert!(!is_audible(f64::NEG_INFINITY));
        assert!(!is_audible(f64::NAN));
    }

    #[test]
    fn test_volumedetect_command() {
        let inspector = FfmpegInspector::new("ffmpeg", "ffprobe");
        let cmd = inspector.volumedetect_command(Path::new("clip.mp4"));
        assert_eq!(
            describe_command(&cmd),
            "ffmpeg -hide_banner -nostats -i clip.mp4 -map 0:a:0 -af volumedetect -vn -sn -dn -f null -"
        );
    }
}
