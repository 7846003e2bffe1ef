use super::getnative::{DependencyStatus, Getnative};
use super::presets::{COMMON_COMBINATIONS, Preset, PresetValue, SOURCE_FILTERS, height_range_args, split_args};
use crate::config::Config;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::error;
use std::path::PathBuf;

const GETNATIVE_EXPLANATION: &str = "\
Getnative finds the native resolution(s) of upscaled material, mostly anime.
It analyzes frames to determine the original resolution before upscaling.

Required dependencies:
- VapourSynth R55+
- descale plugin
- ffms2, lsmash or imwri plugin
- ImageMagick (if using imwri)";

const ARGUMENT_EXPLANATION: &str = "\
--frame (-f): Specify a frame for analysis.
--kernel (-k): Resize kernel to be used (e.g., bicubic, bilinear, lanczos).
--bicubic-b (-b): B parameter of bicubic resize (default: 1/3).
--bicubic-c (-c): C parameter of bicubic resize (default: 1/3).
--lanczos-taps (-t): Taps parameter of lanczos resize (default: 3).
--aspect-ratio (-ar): Force aspect ratio.
--min-height (-min): Minimum height to consider (default: 500).
--max-height (-max): Maximum height to consider (default: 1000).
--output-mask (-mask): Save detail mask as png.
--plot-scaling (-ps): Scaling of the y axis (linear or log).
--plot-format (-pf): Format of the output image (e.g., svg, png).
--show-plot-gui (-pg): Show an interactive plot GUI window.
--no-save (-ns): Do not save files to disk.
--is-image (-img): Force image input.
--stepping (-steps): Change the way resolutions are handled.
--output-dir (-dir): Path of the output directory.";

enum MenuAction {
    ExplainGetnative,
    ExplainArguments,
    RunDefault,
    RunCustom,
    CheckDependencies,
    Preset(Preset),
}

fn menu_actions() -> Vec<(String, MenuAction)> {
    let mut actions = vec![
        ("Explain Getnative".to_string(), MenuAction::ExplainGetnative),
        ("Explain Arguments".to_string(), MenuAction::ExplainArguments),
        ("Run Getnative with default settings".to_string(), MenuAction::RunDefault),
        ("Run Getnative with custom arguments".to_string(), MenuAction::RunCustom),
        ("Check Dependencies".to_string(), MenuAction::CheckDependencies),
    ];
    actions.extend(
        Preset::ALL
            .iter()
            .map(|preset| (preset.label().to_string(), MenuAction::Preset(*preset))),
    );
    actions
}

/// getnative 原生解析度偵測選單
pub struct NativeResolution {
    getnative: Getnative,
    term: Term,
}

impl NativeResolution {
    pub fn new(config: Config) -> Self {
        Self {
            getnative: Getnative::new(config.settings.tools.python.clone()),
            term: Term::stdout(),
        }
    }

    pub fn run(&self) -> Result<()> {
        if matches!(
            self.getnative.check_dependencies(),
            Ok(DependencyStatus::MissingVapourSynth) | Err(_)
        ) {
            println!(
                "{}",
                style("VapourSynth is not installed or not in the Python path.").yellow()
            );
            println!("Install it from http://www.vapoursynth.com/ before running getnative.");
        }

        let actions = menu_actions();
        let mut labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();
        labels.push("Exit");

        loop {
            println!("\n{}", style("=== Getnative CLI Menu ===").cyan().bold());
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Select an option")
                .items(&labels)
                .default(0)
                .interact_on_opt(&self.term)?;

            let Some((_, action)) = selection.and_then(|index| actions.get(index)) else {
                println!("Exiting...");
                return Ok(());
            };

            if let Err(e) = self.handle(action) {
                error!("getnative 執行失敗: {e:#}");
                println!("{} {e:#}", style("Error:").red());
            }
        }
    }

    fn handle(&self, action: &MenuAction) -> Result<()> {
        match action {
            MenuAction::ExplainGetnative => println!("\n{GETNATIVE_EXPLANATION}"),
            MenuAction::ExplainArguments => {
                println!("\nArguments you can pass to Getnative:\n{ARGUMENT_EXPLANATION}");
            }
            MenuAction::CheckDependencies => self.print_dependencies()?,
            MenuAction::RunDefault => {
                if let Some(input) = prompt_input_file()? {
                    self.getnative.run(&input, &[])?;
                }
            }
            MenuAction::RunCustom => {
                if let Some(input) = prompt_input_file()? {
                    let args = prompt_custom_args()?;
                    self.getnative.run(&input, &args)?;
                }
            }
            MenuAction::Preset(preset) => {
                if let Some(input) = prompt_input_file()? {
                    let value = match preset.value() {
                        Some(kind) => Some(prompt_preset_value(kind)?),
                        None => None,
                    };
                    self.getnative.run(&input, &preset.args(value.as_deref()))?;
                }
            }
        }
        Ok(())
    }

    fn print_dependencies(&self) -> Result<()> {
        match self.getnative.check_dependencies()? {
            DependencyStatus::MissingVapourSynth => {
                println!("\n{}", style("VapourSynth is not installed!").red());
                println!("Please install VapourSynth from: http://www.vapoursynth.com/");
            }
            DependencyStatus::Installed { plugins } => {
                println!("\n{}", style("VapourSynth is installed correctly!").green());
                println!("Installed plugins: {}", plugins.join(", "));
                if plugins.is_empty() {
                    println!("\n{}", style("Warning: No required plugins detected!").yellow());
                    println!("Please install at least one of: descale, ffms2, lsmash, imwri");
                }
            }
        }
        Ok(())
    }
}

/// 檔案不存在時印出錯誤並回傳 `None`
fn prompt_input_file() -> Result<Option<PathBuf>> {
    let input: String = Input::new()
        .with_prompt("Enter the path to the input file")
        .interact_text()?;
    let path = PathBuf::from(input.trim().trim_matches('"'));
    if path.is_file() {
        Ok(Some(path))
    } else {
        println!("\n{} File not found: {}", style("Error:").red(), path.display());
        Ok(None)
    }
}

fn prompt_custom_args() -> Result<Vec<String>> {
    let mut items: Vec<&str> = COMMON_COMBINATIONS.iter().map(|(label, _)| *label).collect();
    items.push("Enter custom arguments");

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Common argument combinations")
        .items(&items)
        .default(0)
        .interact()?;

    match COMMON_COMBINATIONS.get(selection) {
        Some((_, Some(args))) => Ok(split_args(args)),
        Some((_, None)) => {
            let min_height: String = Input::new().with_prompt("Enter minimum height").interact_text()?;
            let max_height: String = Input::new().with_prompt("Enter maximum height").interact_text()?;
            Ok(height_range_args(&min_height, &max_height))
        }
        None => {
            let custom: String = Input::new()
                .with_prompt("Enter custom arguments")
                .allow_empty(true)
                .interact_text()?;
            Ok(split_args(&custom))
        }
    }
}

fn prompt_preset_value(kind: PresetValue) -> Result<String> {
    let value = match kind {
        PresetValue::SourceFilter => {
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Select source filter")
                .items(&SOURCE_FILTERS)
                .default(0)
                .interact()?;
            SOURCE_FILTERS[selection].to_string()
        }
        PresetValue::AspectRatio => Input::new()
            .with_prompt("Enter the aspect ratio (e.g., 16:9)")
            .interact_text()?,
        PresetValue::Frame => Input::new()
            .with_prompt("Enter the frame number to analyze")
            .interact_text()?,
    };
    Ok(value.trim().to_string())
}
