//! getnative 的預設參數組合

/// 需要額外輸入值的預設
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetValue {
    SourceFilter,
    AspectRatio,
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Lanczos4Taps,
    HighPrecision,
    ExtendedRange,
    DetailMask,
    PlotGui,
    QuickAnalysis,
    BilinearFfms2,
    BicubicLsmash,
    BlBcImwri,
    AllModesFfms2,
    CustomSource,
    QuickBilinearImwri,
    CustomAspectRatio,
    LinearPlot,
    NoSave,
    SpecificFrame,
    MultipleFormats,
}

pub const SOURCE_FILTERS: [&str; 3] = ["ffms2.Source", "lsmas.LWLibavSource", "imwri.Read"];

impl Preset {
    pub const ALL: [Self; 17] = [
        Self::Lanczos4Taps,
        Self::HighPrecision,
        Self::ExtendedRange,
        Self::DetailMask,
        Self::PlotGui,
        Self::QuickAnalysis,
        Self::BilinearFfms2,
        Self::BicubicLsmash,
        Self::BlBcImwri,
        Self::AllModesFfms2,
        Self::CustomSource,
        Self::QuickBilinearImwri,
        Self::CustomAspectRatio,
        Self::LinearPlot,
        Self::NoSave,
        Self::SpecificFrame,
        Self::MultipleFormats,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Lanczos4Taps => "Run with Lanczos (4 taps)",
            Self::HighPrecision => "Run with high precision range (1-pixel steps)",
            Self::ExtendedRange => "Run with extended height range (300-1200)",
            Self::DetailMask => "Run with detail mask output",
            Self::PlotGui => "Run with interactive plot GUI",
            Self::QuickAnalysis => "Run quick analysis (limited range)",
            Self::BilinearFfms2 => "Run with bilinear mode (ffms2)",
            Self::BicubicLsmash => "Run with bicubic mode (lsmash)",
            Self::BlBcImwri => "Run with bl-bc mode (imwri)",
            Self::AllModesFfms2 => "Run all modes comparison (ffms2)",
            Self::CustomSource => "Run with custom source filter",
            Self::QuickBilinearImwri => "Run quick bilinear analysis (imwri)",
            Self::CustomAspectRatio => "Run with custom aspect ratio",
            Self::LinearPlot => "Run with linear plot scaling",
            Self::NoSave => "Run with no file saving",
            Self::SpecificFrame => "Run with specific frame",
            Self::MultipleFormats => "Run with multiple output formats",
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<PresetValue> {
        match self {
            Self::CustomSource => Some(PresetValue::SourceFilter),
            Self::CustomAspectRatio => Some(PresetValue::AspectRatio),
            Self::SpecificFrame => Some(PresetValue::Frame),
            _ => None,
        }
    }

    const fn fixed_args(&self) -> &'static [&'static str] {
        match self {
            Self::Lanczos4Taps => &["--kernel", "lanczos", "--lanczos-taps", "4"],
            Self::HighPrecision => &["--stepping", "1", "--kernel", "bicubic"],
            Self::ExtendedRange => &["--min-height", "300", "--max-height", "1200"],
            Self::DetailMask => &["--output-mask", "--kernel", "bicubic"],
            Self::PlotGui => &["--show-plot-gui", "--plot-scaling", "linear"],
            Self::QuickAnalysis => &["--min-height", "700", "--max-height", "900", "--stepping", "2"],
            Self::BilinearFfms2 => &["--mode", "bilinear", "--use", "ffms2.Source", "--is-image"],
            Self::BicubicLsmash => &["--mode", "bicubic", "--use", "lsmas.LWLibavSource", "--is-image"],
            Self::BlBcImwri => &["--mode", "bl-bc", "--use", "imwri.Read", "--is-image"],
            Self::AllModesFfms2 => &[
                "--mode",
                "all",
                "--use",
                "ffms2.Source",
                "--is-image",
                "--plot-format",
                "png,svg",
            ],
            Self::QuickBilinearImwri => &[
                "--mode",
                "bilinear",
                "--use",
                "imwri.Read",
                "--is-image",
                "--min-height",
                "700",
                "--max-height",
                "900",
                "--stepping",
                "2",
            ],
            Self::LinearPlot => &["--plot-scaling", "linear", "--is-image"],
            Self::NoSave => &["--no-save", "--is-image"],
            Self::MultipleFormats => &["--plot-format", "png,svg", "--is-image"],
            Self::CustomSource | Self::CustomAspectRatio | Self::SpecificFrame => &[],
        }
    }

    /// 組出參數；需要額外值的預設以 `value` 帶入
    #[must_use]
    pub fn args(&self, value: Option<&str>) -> Vec<String> {
        let value = value.unwrap_or_default().to_string();
        match self.value() {
            Some(PresetValue::SourceFilter) => {
                let filter = if value.is_empty() {
                    SOURCE_FILTERS[0].to_string()
                } else {
                    value
                };
                vec!["--use".into(), filter, "--is-image".into()]
            }
            Some(PresetValue::AspectRatio) => vec!["--aspect-ratio".into(), value, "--is-image".into()],
            Some(PresetValue::Frame) => vec!["--frame".into(), value, "--is-image".into()],
            None => self.fixed_args().iter().map(ToString::to_string).collect(),
        }
    }
}

/// 自訂參數時提供的常用組合；`None` 表示需要輸入高度範圍
pub const COMMON_COMBINATIONS: [(&str, Option<&str>); 5] = [
    ("Basic analysis: --kernel bicubic", Some("--kernel bicubic")),
    ("Force image input: --is-image", Some("--is-image")),
    ("Custom height range: --min-height N --max-height M", None),
    ("Save mask: --output-mask", Some("--output-mask")),
    (
        "Custom bicubic parameters: --kernel bicubic --bicubic-b 0.33 --bicubic-c 0.33",
        Some("--kernel bicubic --bicubic-b 0.33 --bicubic-c 0.33"),
    ),
];

/// 高度範圍參數
#[must_use]
pub fn height_range_args(min_height: &str, max_height: &str) -> Vec<String> {
    vec![
        "--min-height".to_string(),
        min_height.trim().to_string(),
        "--max-height".to_string(),
        max_height.trim().to_string(),
    ]
}

#[must_use]
pub fn split_args(input: &str) -> Vec<String> {
    input.split_whitespace().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_presets() {
        assert_eq!(
            Preset::Lanczos4Taps.args(None),
            vec!["--kernel", "lanczos", "--lanczos-taps", "4"]
        );
        assert_eq!(
            Preset::QuickBilinearImwri.args(None).join(" "),
            "--mode bilinear --use imwri.Read --is-image --min-height 700 --max-height 900 --stepping 2"
        );
    }

    #[test]
    fn test_value_presets() {
        assert_eq!(
            Preset::CustomAspectRatio.args(Some("16:9")),
            vec!["--aspect-ratio", "16:9", "--is-image"]
        );
        assert_eq!(
            Preset::SpecificFrame.args(Some("120")),
            vec!["--frame", "120", "--is-image"]
        );
        assert_eq!(
            Preset::CustomSource.args(None),
            vec!["--use", "ffms2.Source", "--is-image"]
        );
        assert_eq!(
            Preset::CustomSource.args(Some("imwri.Read")),
            vec!["--use", "imwri.Read", "--is-image"]
        );
    }

    #[test]
    fn test_every_preset_has_arguments() {
        for preset in Preset::ALL {
            assert!(!preset.args(Some("x")).is_empty(), "{}", preset.label());
        }
    }

    #[test]
    fn test_height_range_and_split() {
        assert_eq!(
            height_range_args(" 500", "1000 "),
            vec!["--min-height", "500", "--max-height", "1000"]
        );
        assert_eq!(split_args("  --kernel  bicubic "), vec!["--kernel", "bicubic"]);
    }
}
