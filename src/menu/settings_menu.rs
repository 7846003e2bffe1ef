use crate::config::load::SETTINGS_FILE;
use crate::config::save::save_settings;
use crate::config::types::{Config, Language};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use log::warn;
use std::path::Path;
use std::time::Duration;

/// 重新讀取設定檔；工具執行時會寫入最近路徑，存檔前要以磁碟上的內容為準
fn reload_settings_from(config: &mut Config, path: &Path) {
    match Config::load_settings(path) {
        Ok(settings) => config.settings = settings,
        Err(e) => warn!("無法重新讀取設定檔，沿用目前設定: {e:#}"),
    }
}

fn show_saved(value: impl std::fmt::Display) {
    println!("\n{} {}", style(t!("settings.saved")).green(), value);
    std::thread::sleep(Duration::from_secs(1));
}

/// 設定選單
pub fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        reload_settings_from(config, Path::new(SETTINGS_FILE));
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_language"),
            t!("settings.opt_resize"),
            t!("settings.opt_distance"),
            t!("settings.opt_preview"),
            t!("settings.opt_seven_zip"),
            t!("settings.opt_font"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_language_menu(term, config)?,
            Some(1) => edit_resize_box(config)?,
            Some(2) => edit_max_distance(config)?,
            Some(3) => toggle_preview(config)?,
            Some(4) => edit_seven_zip_path(config)?,
            Some(5) => edit_font_path(config)?,
            Some(6) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];
    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        show_saved(selected_lang);
    }

    Ok(())
}

fn edit_resize_box(config: &mut Config) -> Result<()> {
    let resize = &mut config.settings.resize;

    let max_width: u32 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.resize.width"))
        .default(resize.max_width)
        .validate_with(|v: &u32| if *v > 0 { Ok(()) } else { Err("must be positive") })
        .interact_text()?;
    let max_height: u32 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.resize.height"))
        .default(resize.max_height)
        .validate_with(|v: &u32| if *v > 0 { Ok(()) } else { Err("must be positive") })
        .interact_text()?;

    if (max_width, max_height) != (resize.max_width, resize.max_height) {
        resize.max_width = max_width;
        resize.max_height = max_height;
        save_settings(&config.settings)?;
        show_saved(format!("{max_width}x{max_height}"));
    }
    Ok(())
}

fn edit_max_distance(config: &mut Config) -> Result<()> {
    let current = config.settings.duplicate_review.max_distance;
    let max_distance: u32 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.distance.prompt"))
        .default(current)
        .interact_text()?;

    if max_distance != current {
        config.settings.duplicate_review.max_distance = max_distance;
        save_settings(&config.settings)?;
        show_saved(max_distance);
    }
    Ok(())
}

fn toggle_preview(config: &mut Config) -> Result<()> {
    let current = config.settings.duplicate_review.show_preview;
    let show_preview = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.preview.prompt"))
        .default(current)
        .interact()?;

    if show_preview != current {
        config.settings.duplicate_review.show_preview = show_preview;
        save_settings(&config.settings)?;
        show_saved(show_preview);
    }
    Ok(())
}

fn edit_seven_zip_path(config: &mut Config) -> Result<()> {
    let current = config.settings.tools.seven_zip.clone();
    let seven_zip: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.seven_zip.prompt"))
        .default(current.clone())
        .interact_text()?;
    let seven_zip = seven_zip.trim().to_string();

    if !seven_zip.is_empty() && seven_zip != current {
        config.settings.tools.seven_zip = seven_zip.clone();
        save_settings(&config.settings)?;
        show_saved(seven_zip);
    }
    Ok(())
}

/// 空白輸入代表改回自動尋找系統字型
fn edit_font_path(config: &mut Config) -> Result<()> {
    let current = config.settings.composite.font_path.clone().unwrap_or_default();
    let font_path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.font.prompt"))
        .default(current.clone())
        .allow_empty(true)
        .interact_text()?;
    let font_path = font_path.trim().trim_matches('"').to_string();

    if font_path != current {
        config.settings.composite.font_path = (!font_path.is_empty()).then(|| font_path.clone());
        save_settings(&config.settings)?;
        show_saved(if font_path.is_empty() { "(auto)".to_string() } else { font_path });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserSettings;
    use crate::config::save::{add_recent_path, save_settings_to};
    use tempfile::TempDir;

    fn config_with(settings: UserSettings) -> Config {
        Config {
            file_type_table: Config::load_embedded_file_type_table().unwrap(),
            settings,
        }
    }

    #[test]
    fn test_reload_keeps_paths_recorded_by_tools() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let mut config = config_with(UserSettings::default());

        // 工具執行期間另外寫入的路徑
        let mut on_disk = UserSettings::default();
        add_recent_path(&mut on_disk, "/datasets/hq");
        save_settings_to(&on_disk, &path).unwrap();

        reload_settings_from(&mut config, &path);
        config.settings.duplicate_review.max_distance = 4;
        save_settings_to(&config.settings, &path).unwrap();

        let saved = Config::load_settings(&path).unwrap();
        assert_eq!(saved.recent_paths, vec!["/datasets/hq"]);
        assert_eq!(saved.duplicate_review.max_distance, 4);
    }

    #[test]
    fn test_reload_failure_keeps_current_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ broken").unwrap();

        let mut settings = UserSettings::default();
        settings.resize.max_width = 640;
        let mut config = config_with(settings.clone());

        reload_settings_from(&mut config, &path);
        assert_eq!(config.settings, settings);
    }
}
