use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// ffprobe 回報的串流摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub video_streams: usize,
    pub audio_streams: usize,
}

impl StreamSummary {
    #[must_use]
    pub const fn has_audio(&self) -> bool {
        self.audio_streams > 0
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
}

/// 使用 ffprobe 取得媒體檔的串流組成
pub fn probe_streams(ffprobe: &str, path: &Path) -> Result<StreamSummary> {
    let output = Command::new(ffprobe)
        .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()
        .with_context(|| format!("Failed to run ffprobe on {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe failed: {}", stderr.trim());
    }

    parse_stream_summary(&String::from_utf8_lossy(&output.stdout))
}

fn parse_stream_summary(json: &str) -> Result<StreamSummary> {
    let probe: FfprobeOutput =
        serde_json::from_str(json).context("Failed to parse ffprobe output")?;

    let mut summary = StreamSummary::default();
    for stream in probe.streams.unwrap_or_default() {
        match stream.codec_type.as_deref() {
            Some("video") => summary.video_streams += 1,
            Some("audio") => summary.audio_streams += 1,
            _ => {}
        }
    }
    Ok(summary)
}
