//! 共用的路徑輸入
//!
//! 有歷史路徑時先列出最近使用的路徑供選擇，ESC 返回

use crate::config::UserSettings;
use crate::config::save::{add_recent_path, save_settings};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::warn;
use std::path::{Path, PathBuf};

const NEW_PATH_OPTION: &str = "Enter a new path...";

/// 詢問資料夾路徑；ESC 時回傳 `None`
pub fn prompt_directory(settings: &UserSettings, prompt: &str) -> Result<Option<PathBuf>> {
    let recent_paths = &settings.recent_paths;

    if recent_paths.is_empty() {
        return Ok(Some(prompt_text_path(prompt, None)?));
    }

    let mut options: Vec<String> = recent_paths
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let indicator = if Path::new(p).exists() { "✓" } else { "✗" };
            format!("{} [{}] {}", i + 1, indicator, p)
        })
        .collect();
    options.push(NEW_PATH_OPTION.to_string());

    println!("{}", style("(ESC to return)").dim());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&options)
        .default(0)
        .interact_opt()?;

    match selection {
        None => Ok(None),
        Some(idx) if idx < recent_paths.len() => Ok(Some(PathBuf::from(&recent_paths[idx]))),
        Some(_) => Ok(Some(prompt_text_path(prompt, None)?)),
    }
}

/// 直接輸入路徑文字，可帶預設值
pub fn prompt_text_path(prompt: &str, default: Option<&str>) -> Result<PathBuf> {
    let input = Input::<String>::new().with_prompt(prompt);
    let input = match default {
        Some(value) => input.default(value.to_string()),
        None => input,
    };
    let path: String = input.interact_text()?;
    Ok(PathBuf::from(path.trim().trim_matches('"')))
}

/// 記錄成功使用的路徑
pub fn remember_path(settings: &UserSettings, path: &Path) {
    let mut settings = settings.clone();
    add_recent_path(&mut settings, &path.to_string_lossy());
    if let Err(e) = save_settings(&settings) {
        warn!("無法儲存路徑歷史: {e}");
    }
}
